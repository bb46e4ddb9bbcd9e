//! Configuration
//!
//! Screen settings read from a RON file in the platform config directory.

pub mod settings;

pub use settings::{
    ScreenConfig, ConfigError, ConfigLoad,
    config_path, load_config, load_config_from, save_config,
};
