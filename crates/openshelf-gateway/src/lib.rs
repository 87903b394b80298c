pub mod router;
pub mod routes;
pub mod schema;
pub mod server;
pub mod state;

pub use server::GatewayServer;
