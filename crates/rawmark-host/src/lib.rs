pub mod api;
pub mod config;
pub mod sanitize;
pub mod store;

// Re-export key types for easier usage
pub use api::EditorApi;
pub use config::{Config, ConfigError};
pub use store::{StoreError, load_block, save_block};
