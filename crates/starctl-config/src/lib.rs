//! Configuration system for the star control viewer.
//!
//! Settings persist to disk as RON files, can be overridden from the command
//! line via clap, and tolerate missing or unknown fields so older config files
//! keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, PixelDepthSetting, StarTintSetting, StarsConfig, ViewConfig,
};
pub use error::ConfigError;
