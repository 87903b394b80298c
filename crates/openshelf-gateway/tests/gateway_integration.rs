use std::net::TcpListener;
use std::path::Path;

use openshelf_config::AppConfig;
use openshelf_gateway::GatewayServer;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Pick a random available port.
fn random_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind to random port");
    listener.local_addr().unwrap().port()
}

/// Write the real shipped migration scripts into a temp directory.
fn write_migrations(dir: &Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("1__create_books_table.sql"),
        "CREATE TABLE books (id TEXT PRIMARY KEY, title TEXT NOT NULL, description TEXT NOT NULL);",
    )
    .unwrap();
    std::fs::write(
        dir.join("2__add_is_deleted_column.sql"),
        "ALTER TABLE books ADD COLUMN is_deleted INTEGER NOT NULL DEFAULT 0;",
    )
    .unwrap();
}

/// Build a config pointing at a temp database and migration directory.
fn test_config(port: u16, root: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.gateway.host = "127.0.0.1".to_string();
    config.gateway.port = port;
    config.database.path = root.join("books.db");
    config.migrations.dir = root.join("migrations");
    config.migrations.start_version = 1;
    config
}

/// Start the gateway in the background and return its base URL.
async fn start_test_gateway(config: AppConfig) -> String {
    let port = config.gateway.port;
    tokio::spawn(async move {
        let server = GatewayServer::new(config);
        let _ = server.run().await;
    });

    // Wait for the server to be ready
    for _ in 0..50 {
        if TcpListener::bind(format!("127.0.0.1:{port}")).is_err() {
            break; // port is in use = server is up
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    format!("http://127.0.0.1:{port}")
}

async fn spawn_gateway() -> (TempDir, String) {
    let tmp = tempfile::tempdir().unwrap();
    write_migrations(&tmp.path().join("migrations"));
    let config = test_config(random_port(), tmp.path());
    let base = start_test_gateway(config).await;
    (tmp, base)
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (_tmp, base) = spawn_gateway().await;

    let resp = reqwest::get(format!("{base}/health"))
        .await
        .expect("health request failed");
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn create_then_list_books() {
    let (_tmp, base) = spawn_gateway().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/"))
        .json(&json!({"title": "Dune", "description": "Desert planet"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["title"], "Dune");
    assert!(created["id"].is_string());

    let body: Value = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], created["id"]);
    assert_eq!(data[0]["description"], "Desert planet");
}

#[tokio::test]
async fn update_book_changes_fields_and_unknown_id_is_404() {
    let (_tmp, base) = spawn_gateway().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/"))
        .json(&json!({"title": "Dune", "description": "Desert planet"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let resp = client
        .put(format!("{base}/{id}"))
        .json(&json!({"title": "Dune Messiah", "description": "The sequel"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["title"], "Dune Messiah");

    let resp = client
        .put(format!("{base}/no-such-id"))
        .json(&json!({"title": "x", "description": "y"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_hides_book_and_second_delete_is_404() {
    let (_tmp, base) = spawn_gateway().await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{base}/"))
        .json(&json!({"title": "Gone", "description": "soon"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let resp = client.delete(format!("{base}/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);

    let listing: Value = reqwest::get(format!("{base}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listing["data"].as_array().unwrap().is_empty());

    let resp = client.delete(format!("{base}/{id}")).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn startup_fails_when_a_migration_script_is_invalid() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("migrations");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("1__boom.sql"), "THIS IS NOT SQL;").unwrap();

    let config = test_config(random_port(), tmp.path());
    let err = GatewayServer::new(config).run().await;
    assert!(err.is_err());
}

#[tokio::test]
async fn startup_fails_when_migration_directory_is_missing() {
    let tmp = tempfile::tempdir().unwrap();
    // No migrations directory is created.
    let config = test_config(random_port(), tmp.path());
    let err = GatewayServer::new(config).run().await;
    assert!(err.is_err());
}
