//! The interface every star view implements.

use glam::IVec2;

use crate::base_stars::BaseStars;
use crate::camera::CameraView;
use crate::closeup::StarCloseup;
use crate::entry::BaseStarEntry;
use crate::error::{SaveFileError, StarDataError};
use crate::resources::ResourceDir;
use crate::save_file::{SaveReader, SaveWriter};
use crate::surface::SurfaceArea;

/// The two contexts the same star data is shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StarMode {
    #[default]
    Starfield = 0,
    Photo = 1,
}

impl StarMode {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(StarMode::Starfield),
            1 => Some(StarMode::Photo),
            _ => None,
        }
    }
}

/// Receives the star a successful [`StarView::select_star`] picked.
pub trait SelectionHandler {
    fn star_selected(&mut self, index: usize, entry: &BaseStarEntry, point: IVec2);
}

/// A set of stars that can be drawn, picked, edited and persisted.
///
/// Every method must be provided; views that do not support an operation
/// return `false` or `Ok(())` explicitly.
pub trait StarView {
    fn stars(&self) -> &BaseStars;

    fn stars_mut(&mut self) -> &mut BaseStars;

    fn mode(&self) -> StarMode;

    /// Draw the view onto `surface`.
    fn draw(
        &mut self,
        surface: &mut SurfaceArea,
        camera: &dyn CameraView,
        closeup: &mut dyn StarCloseup,
    );

    /// Load the bright-star catalog this view shows.
    fn load_yale(&mut self, resources: &ResourceDir) -> Result<(), StarDataError>;

    /// Pick the star under `point`. Returns true if one was selected.
    fn select_star(
        &mut self,
        surface: &SurfaceArea,
        camera: &dyn CameraView,
        point: IVec2,
        handler: Option<&mut dyn SelectionHandler>,
    ) -> bool;

    /// Add `entry`, or remove it if already present at the same position.
    /// Returns true if the view changed.
    fn add_star(&mut self, entry: &BaseStarEntry) -> bool;

    /// Commit pending per-star state. Returns true if anything was committed.
    fn load_star(&mut self) -> bool;

    /// Restore view state from a save file.
    fn load(&mut self, file: &mut SaveReader<'_>) -> Result<(), SaveFileError>;

    /// Write view state to a save file at the given nesting depth.
    fn save(&self, file: &mut SaveWriter<'_>, indent: usize) -> Result<(), SaveFileError>;
}
