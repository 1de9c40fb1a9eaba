pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use config::PresaleConfig;
pub use services::presale_service::PresaleService;
