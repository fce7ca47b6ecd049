//! Configuration structs with defaults matching the star control view, and
//! RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Target surface settings.
    pub view: ViewConfig,
    /// Star camera settings.
    pub camera: CameraConfig,
    /// Star catalog and picking settings.
    pub stars: StarsConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Pixel format of the surface stars are drawn into.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PixelDepthSetting {
    /// One byte per pixel, grey-level palette index.
    Indexed8,
    /// Two bytes per pixel, 5-6-5 RGB.
    #[default]
    Rgb565,
}

/// Colour scheme the camera applies to drawn stars.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StarTintSetting {
    /// Stars keep their catalog colour.
    #[default]
    White,
    /// Stars are pulled toward pink.
    Pink,
}

/// Surface configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Surface pixel format.
    pub pixel_depth: PixelDepthSetting,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the eye to the projection plane, in pixels.
    pub focal_length: f64,
    /// Stars at or closer than this view depth are not drawn.
    pub front_clip: f64,
    /// Star colour scheme.
    pub tint: StarTintSetting,
}

/// Star catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarsConfig {
    /// Root directory resource names are resolved against.
    pub resource_dir: PathBuf,
    /// Resource holding the bright-star catalog.
    pub catalog_resource: String,
    /// Half-size in pixels of the box a click must land in to pick a star.
    pub pick_radius: i32,
    /// View depth under which the nearest star is drawn as a closeup.
    pub closeup_range: f64,
    /// Maximum number of photo-mode markers.
    pub max_markers: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 340,
            pixel_depth: PixelDepthSetting::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focal_length: 400.0,
            front_clip: 0.1,
            tint: StarTintSetting::default(),
        }
    }
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("data"),
            catalog_resource: "STARFIELD/DATA".to_string(),
            pick_radius: 2,
            closeup_range: 50.0,
            max_markers: 3,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(ConfigError::Parse)
    }
}
