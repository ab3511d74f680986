//! Persistent user preferences.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;

use crate::core::utils::app_data_dir;

/// Manager rooted at the application data directory.
pub fn default_manager() -> ConfigManager {
    ConfigManager::with_base_dir(app_data_dir())
}
