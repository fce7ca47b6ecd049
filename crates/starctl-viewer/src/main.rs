//! Star control viewer: loads the bright-star catalog, draws one frame of the
//! star-field, and optionally picks a star and saves the frame as a PNG.
//!
//! Run with: `cargo run -p starctl-viewer -- --data ./data --output frame.png`

mod frame;

use std::path::PathBuf;

use clap::Parser;
use glam::IVec2;
use starctl_config::{CliArgs, Config, ConfigError};
use starctl_stars::{
    BaseStarEntry, HaloCloseup, ResourceDir, SelectionHandler, StarDataError, StarField,
    StarMarkers, StarView,
};
use tracing::{info, warn};

const APP_NAME: &str = "starctl";

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Stars(#[from] StarDataError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode PNG: {0}")]
    Png(#[from] png::EncodingError),
}

/// Logs the star a pick lands on.
struct LogSelection;

impl SelectionHandler for LogSelection {
    fn star_selected(&mut self, index: usize, entry: &BaseStarEntry, point: IVec2) {
        info!(
            "Selected star {index} at ({}, {}): rgb=({}, {}, {}) value={:.3}",
            point.x, point.y, entry.color.r, entry.color.g, entry.color.b, entry.value
        );
    }
}

fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

fn run(args: &CliArgs) -> Result<(), ViewerError> {
    let mut config = match args.config.clone().or_else(default_config_dir) {
        Some(dir) => Config::load_or_create(&dir)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(args);

    starctl_log::init_logging(
        config.debug.log_dir.as_deref(),
        cfg!(debug_assertions),
        Some(&config),
    );

    info!(
        "Surface: {}x{} {:?} | Catalog: {}",
        config.view.width,
        config.view.height,
        config.view.pixel_depth,
        config.stars.resource_dir.join(&config.stars.catalog_resource).display()
    );

    let resources = ResourceDir::new(&config.stars.resource_dir);
    let mut field = StarField::new(config.stars.catalog_resource.clone());
    field.stars_mut().set_pick_radius(config.stars.pick_radius);
    field.load_yale(&resources)?;

    let camera = frame::camera_from_config(&config.camera);
    let mut surface = frame::surface_from_config(&config.view);
    let mut closeup = HaloCloseup::new(config.stars.closeup_range, frame::CLOSEUP_MAX_RADIUS);
    let mut markers = StarMarkers::new(config.stars.max_markers);

    if let Some((x, y)) = args.pick_point() {
        let point = IVec2::new(x, y);
        if !field.select_star(&surface, &camera, point, Some(&mut LogSelection)) {
            warn!("No star at ({x}, {y})");
        } else if !frame::mark_selection(&mut field, &mut markers) {
            warn!("Could not mark star at ({x}, {y})");
        }
    }

    field.draw(&mut surface, &camera, &mut closeup);
    markers.draw(&mut surface, &camera, &mut closeup);
    info!(
        "Drew {} of {} stars",
        field.stars().count_visible_stars(&surface, &camera),
        field.stars().size()
    );

    if let Some(path) = &args.output {
        frame::write_png(&surface, path)?;
        info!("Wrote frame to {}", path.display());
    }

    Ok(())
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("starctl-viewer: {e}");
        std::process::exit(1);
    }
}
