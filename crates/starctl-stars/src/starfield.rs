//! The main star-field view: the bright-star catalog with selection and
//! locking.

use glam::IVec2;
use tracing::{debug, info};

use crate::base_stars::BaseStars;
use crate::camera::{CameraView, MAX_LOCKED_STARS};
use crate::closeup::StarCloseup;
use crate::entry::{BaseStarEntry, Rgb};
use crate::error::{SaveFileError, StarDataError};
use crate::resources::ResourceDir;
use crate::save_file::{SaveReader, SaveWriter};
use crate::surface::SurfaceArea;
use crate::view::{SelectionHandler, StarMode, StarView};

/// Resource the bright-star catalog is read from by default.
pub const DEFAULT_CATALOG_RESOURCE: &str = "STARFIELD/DATA";

const SELECTION_COLOR: Rgb = Rgb::new(0xFF, 0xFF, 0x00);

/// Half-size of the box drawn around the selected star.
const SELECTION_BOX: i32 = 4;

#[derive(Clone, Debug)]
pub struct StarField {
    stars: BaseStars,
    mode: StarMode,
    catalog_resource: String,
    selected: Option<usize>,
    pending: bool,
    locked: Vec<usize>,
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_RESOURCE)
    }
}

impl StarField {
    pub fn new(catalog_resource: impl Into<String>) -> Self {
        Self {
            stars: BaseStars::new(),
            mode: StarMode::Starfield,
            catalog_resource: catalog_resource.into(),
            selected: None,
            pending: false,
            locked: Vec::new(),
        }
    }

    pub fn with_stars(stars: BaseStars) -> Self {
        Self {
            stars,
            ..Self::default()
        }
    }

    pub fn set_mode(&mut self, mode: StarMode) {
        self.mode = mode;
    }

    pub fn catalog_resource(&self) -> &str {
        &self.catalog_resource
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Catalog indices of committed stars, in commit order.
    pub fn locked(&self) -> &[usize] {
        &self.locked
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.pending = false;
    }
}

fn read_index(file: &mut SaveReader<'_>) -> Result<Option<usize>, SaveFileError> {
    let value = file.read_number()?;
    if value == -1 {
        return Ok(None);
    }
    usize::try_from(value)
        .map(Some)
        .map_err(|_| SaveFileError::Parse {
            line: file.line(),
            expected: "a star index or -1",
        })
}

fn index_number(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i64::try_from(i).unwrap_or(i64::MAX))
}

impl StarView for StarField {
    fn stars(&self) -> &BaseStars {
        &self.stars
    }

    fn stars_mut(&mut self) -> &mut BaseStars {
        &mut self.stars
    }

    fn mode(&self) -> StarMode {
        self.mode
    }

    fn draw(
        &mut self,
        surface: &mut SurfaceArea,
        camera: &dyn CameraView,
        closeup: &mut dyn StarCloseup,
    ) {
        self.stars.draw(surface, camera, closeup);

        if let Some(index) = self.selected
            && let Some(point) = self.stars.screen_point(surface, camera, index)
        {
            let half = IVec2::splat(SELECTION_BOX);
            surface.draw_rect(point - half, point + half, SELECTION_COLOR);
        }
    }

    fn load_yale(&mut self, resources: &ResourceDir) -> Result<(), StarDataError> {
        let count = self.stars.load_resource(resources, &self.catalog_resource)?;
        self.stars.initialize();
        self.clear_selection();
        self.locked.clear();
        info!(count, resource = %self.catalog_resource, "loaded bright-star catalog");
        Ok(())
    }

    fn select_star(
        &mut self,
        surface: &SurfaceArea,
        camera: &dyn CameraView,
        point: IVec2,
        handler: Option<&mut dyn SelectionHandler>,
    ) -> bool {
        let Some(index) = self.stars.find_star(surface, camera, point) else {
            return false;
        };

        self.selected = Some(index);
        self.pending = true;
        debug!(index, x = point.x, y = point.y, "selected star");

        if let Some(handler) = handler
            && let Some(entry) = self.stars.get(index)
        {
            let star_point = self
                .stars
                .screen_point(surface, camera, index)
                .unwrap_or(point);
            handler.star_selected(index, entry, star_point);
        }
        true
    }

    fn add_star(&mut self, _entry: &BaseStarEntry) -> bool {
        // The catalog is read-only.
        false
    }

    fn load_star(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;

        let Some(index) = self.selected else {
            return false;
        };
        if self.locked.contains(&index) || self.locked.len() >= MAX_LOCKED_STARS {
            return false;
        }
        self.locked.push(index);
        debug!(index, locked = self.locked.len(), "committed star");
        true
    }

    fn load(&mut self, file: &mut SaveReader<'_>) -> Result<(), SaveFileError> {
        let mode_number = file.read_number()?;
        let mode = StarMode::from_index(mode_number).ok_or(SaveFileError::Parse {
            line: file.line(),
            expected: "a star mode",
        })?;
        let selected = read_index(file)?;

        let locked_count = file.read_number()?;
        let locked_count = usize::try_from(locked_count)
            .ok()
            .filter(|&n| n <= MAX_LOCKED_STARS)
            .ok_or(SaveFileError::Parse {
                line: file.line(),
                expected: "a locked star count",
            })?;
        let mut locked = Vec::with_capacity(locked_count);
        for _ in 0..locked_count {
            match read_index(file)? {
                Some(index) => locked.push(index),
                None => {
                    return Err(SaveFileError::Parse {
                        line: file.line(),
                        expected: "a locked star index",
                    });
                }
            }
        }

        let mut tuning = [0.0; 4];
        for value in &mut tuning {
            *value = file.read_float()?;
        }
        let catalog_resource = file.read_quoted()?;

        self.mode = mode;
        self.catalog_resource = catalog_resource;
        self.selected = selected;
        self.pending = false;
        self.locked = locked;
        self.stars.ranges_mut().tuning = tuning;
        Ok(())
    }

    fn save(&self, file: &mut SaveWriter<'_>, indent: usize) -> Result<(), SaveFileError> {
        file.write_number_line(self.mode as i64, indent)?;
        file.write_number_line(index_number(self.selected), indent)?;
        file.write_number_line(self.locked.len() as i64, indent)?;
        for &index in &self.locked {
            file.write_number_line(index_number(Some(index)), indent + 1)?;
        }
        for &value in &self.stars.ranges().tuning {
            file.write_float_line(value, indent)?;
        }
        file.write_quoted_line(&self.catalog_resource, indent)?;
        Ok(())
    }
}
