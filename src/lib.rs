pub mod api;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;

// Re-exports
pub use browser::RecipeBrowser;
pub use config::Settings;
pub use error::{Error, Result};
