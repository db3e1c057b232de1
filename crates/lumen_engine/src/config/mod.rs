//! Configuration system
//!
//! Any `serde` type with a `Default` can be a [`Config`]: it loads from and
//! saves to TOML or RON, picked by file extension. [`EngineConfig`] is the
//! engine's own configuration; every section falls back to its defaults, so
//! a file only needs the keys it wants to change.
//!
//! ```toml
//! log_level = "debug"
//!
//! [window]
//! title = "Cubes"
//!
//! [camera]
//! fov_degrees = 60.0
//! position = [0.0, 1.0, 5.0]
//! ```

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::input::KeyCode;
use crate::render::Camera;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or has another extension.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading configuration from {}", path.display());

        match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    ///
    /// # Errors
    ///
    /// Fails when serialization or the write fails, or the extension is unknown.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        log::debug!("Saved configuration to {}", path.display());
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|extension| extension.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Window settings handed to the platform layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lumen".to_owned(),
            width: 800,
            height: 600,
        }
    }
}

/// Initial camera and projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Starting position
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::ZERO,
        }
    }
}

impl CameraConfig {
    /// Camera built from these settings
    pub fn to_camera(&self) -> Camera {
        Camera::new(self.position, self.fov_degrees)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Key that closes the engine loop
    pub exit_key: KeyCode,
    /// Window settings
    pub window: WindowConfig,
    /// Camera settings
    pub camera: CameraConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            exit_key: KeyCode::Escape,
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn custom_config() -> EngineConfig {
        EngineConfig {
            window: WindowConfig {
                title: "Test".to_owned(),
                width: 1280,
                height: 720,
            },
            camera: CameraConfig {
                fov_degrees: 70.0,
                position: Vec3::new(0.0, 2.0, 8.0),
                ..CameraConfig::default()
            },
            log_level: "trace".to_owned(),
            exit_key: KeyCode::Q,
        }
    }

    #[test]
    fn test_toml_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        let config = custom_config();
        config.save_to_file(&path).unwrap();
        assert_eq!(EngineConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_ron_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("engine.ron");
        let config = custom_config();
        config.save_to_file(&path).unwrap();
        assert_eq!(EngineConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            exit_key = "Q"

            [window]
            width = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.exit_key, KeyCode::Q);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.title, "Lumen");
        assert_eq!(config.camera, CameraConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_hand_written_toml_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"debug\"\n\n[camera]\nfov_degrees = 60.0").unwrap();

        let config = EngineConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let error = EngineConfig::default().save_to_file("engine.yaml").unwrap_err();
        assert!(matches!(error, ConfigError::UnsupportedFormat(_)));

        let error = EngineConfig::load_from_file("engine.json").unwrap_err();
        assert!(matches!(error, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let error = EngineConfig::load_from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(error, ConfigError::Io(_)));
    }

    #[test]
    fn test_camera_config_builds_camera() {
        let camera = custom_config().camera.to_camera();
        assert_eq!(camera.position, Vec3::new(0.0, 2.0, 8.0));
        assert!((camera.fov - 70.0_f32.to_radians()).abs() < 1e-6);
    }
}
