pub mod app_config;
pub mod clock_client;
pub mod inventory_client;

pub use app_config::Config;
pub use clock_client::ClockClient;
pub use inventory_client::InventoryClient;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(String),
}
