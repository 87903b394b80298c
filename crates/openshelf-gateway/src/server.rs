use std::sync::Arc;

use openshelf_common::Result;
use openshelf_config::AppConfig;
use openshelf_db::{BookStore, SqliteDatabase, run_migration};
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// The main gateway server that migrates the store and serves the book API.
pub struct GatewayServer {
    config: AppConfig,
}

impl GatewayServer {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.gateway.host, self.config.gateway.port);

        // Schema migrations run before the listener binds; a failure here
        // aborts startup so no request ever sees an un-migrated store.
        let factory = SqliteDatabase::new(&self.config.database.path);
        run_migration(
            &self.config.migrations.dir,
            &factory,
            self.config.migrations.start_version,
        )?;

        let store = BookStore::open(&self.config.database.path)?;
        let state = Arc::new(AppState::new(self.config, store));
        let app = build_router(state);

        let listener = TcpListener::bind(&addr).await?;
        info!("openshelf gateway listening on {}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| openshelf_common::Error::Gateway(format!("server error: {e}")))?;

        Ok(())
    }
}
