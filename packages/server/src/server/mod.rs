// HTTP server setup (Axum + JSON)
pub mod app;
pub mod routes;

pub use app::*;
