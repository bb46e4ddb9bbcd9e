//! Screen settings and their RON file

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::ImagePreference;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "LICH_CONFIG";

/// Errors reading or writing the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// User-adjustable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Height of a terminal cell divided by its width
    pub cell_aspect: f32,
    /// How to draw the picture
    pub image: ImagePreference,
    /// Redraw interval when no events arrive
    pub tick_rate_ms: u64,
    /// Log file; defaults to `lich.log` in the working directory
    pub log_file: Option<PathBuf>,
    /// Capture mouse clicks
    pub mouse: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            cell_aspect: 2.0,
            image: ImagePreference::Auto,
            tick_rate_ms: 250,
            log_file: None,
            mouse: true,
        }
    }
}

impl ScreenConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| PathBuf::from("lich.log"))
    }

    /// Cell aspect, with nonsense values replaced by the default
    pub fn effective_cell_aspect(&self) -> f32 {
        if self.cell_aspect.is_finite() && self.cell_aspect > 0.0 {
            self.cell_aspect
        } else {
            ScreenConfig::default().cell_aspect
        }
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(path) = env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "lich", "Lich") {
        proj_dirs.config_dir().join("config.ron")
    } else {
        // Fallback to current directory
        PathBuf::from("./config.ron")
    }
}

/// Outcome of looking for the config file
#[derive(Debug)]
pub enum ConfigLoad {
    Missing(PathBuf),
    Loaded(PathBuf, ScreenConfig),
    Invalid(ConfigError),
}

impl ConfigLoad {
    /// The config to run with; defaults unless a file loaded cleanly
    pub fn config(&self) -> ScreenConfig {
        match self {
            ConfigLoad::Loaded(_, config) => config.clone(),
            ConfigLoad::Missing(_) | ConfigLoad::Invalid(_) => ScreenConfig::default(),
        }
    }

    /// Report the outcome; call once logging is set up
    pub fn log(&self) {
        match self {
            ConfigLoad::Missing(path) => log::info!("No config at {}, using defaults", path.display()),
            ConfigLoad::Loaded(path, _) => log::info!("Loaded config from {}", path.display()),
            ConfigLoad::Invalid(e) => log::warn!("{}. Using defaults.", e),
        }
    }
}

/// Look for the config file and read it if present
pub fn load_config() -> ConfigLoad {
    let path = config_path();
    if !path.exists() {
        return ConfigLoad::Missing(path);
    }

    match load_config_from(&path) {
        Ok(config) => ConfigLoad::Loaded(path, config),
        Err(e) => ConfigLoad::Invalid(e),
    }
}

/// Read a config file
pub fn load_config_from(path: &Path) -> Result<ScreenConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    ron::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a config file, creating its directory
pub fn save_config(path: &Path, config: &ScreenConfig) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let text = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())?;
    fs::write(path, text).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("lich-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ScreenConfig = ron::from_str("(cell_aspect: 2.5)").unwrap();
        assert_eq!(config.cell_aspect, 2.5);
        assert_eq!(config.image, ImagePreference::Auto);
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.mouse);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("config.ron");
        let config = ScreenConfig {
            image: ImagePreference::Blocks,
            mouse: false,
            ..ScreenConfig::default()
        };

        save_config(&path, &config).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_parse_error() {
        let path = temp_path("broken.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(cell_aspect: \"tall\")").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse { .. })));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_config_runs_with_defaults() {
        let path = temp_path("invalid.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not ron at all (").unwrap();

        let load = match load_config_from(&path) {
            Ok(config) => ConfigLoad::Loaded(path.clone(), config),
            Err(e) => ConfigLoad::Invalid(e),
        };
        assert!(matches!(load, ConfigLoad::Invalid(_)));
        assert_eq!(load.config(), ScreenConfig::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bad_aspect_falls_back() {
        let config = ScreenConfig {
            cell_aspect: -1.0,
            ..ScreenConfig::default()
        };
        assert_eq!(config.effective_cell_aspect(), 2.0);
    }
}
