//! Infrastructure layer - HTTP, parsing, persistence, and configuration

pub mod catalog;
pub mod checkpoint;
pub mod config;
pub mod http_client;
pub mod logging;
pub mod session;
pub mod stock_parser;
pub mod storefront;
pub mod woocommerce;

// Re-export commonly used types
pub use checkpoint::CheckpointStore;
pub use config::AppConfig;
pub use http_client::{HttpClient, HttpClientConfig};
pub use session::StorefrontSession;
pub use stock_parser::StockExtractor;
pub use woocommerce::WooClient;
