//! Command-line argument parsing for the star control viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Star control viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starctl-viewer", about = "Star control star-field viewer")]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Resource directory holding the star catalog.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Surface width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Surface height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Screen point to pick a star at.
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub pick: Option<Vec<i32>>,

    /// Write the rendered frame to this PNG file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl CliArgs {
    /// The `--pick X Y` point, if both coordinates were given.
    pub fn pick_point(&self) -> Option<(i32, i32)> {
        match self.pick.as_deref() {
            Some(&[x, y]) => Some((x, y)),
            _ => None,
        }
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.data {
            self.stars.resource_dir = dir.clone();
        }
        if let Some(w) = args.width {
            self.view.width = w;
        }
        if let Some(h) = args.height {
            self.view.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
