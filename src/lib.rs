pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;
pub mod templates;
pub mod utils;

pub use error::SecurityError;
pub use models::AppState;
pub use routes::build_app;
