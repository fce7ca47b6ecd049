//! Photo-mode markers: a small editable set of stars drawn as boxes.

use glam::{DVec3, IVec2};
use tracing::debug;

use crate::base_stars::BaseStars;
use crate::camera::CameraView;
use crate::closeup::StarCloseup;
use crate::entry::{BaseStarEntry, Rgb};
use crate::error::{SaveFileError, StarDataError};
use crate::resources::ResourceDir;
use crate::save_file::{SaveReader, SaveWriter};
use crate::surface::SurfaceArea;
use crate::view::{SelectionHandler, StarMode, StarView};

/// Markers allowed by default.
pub const DEFAULT_MARKER_CAPACITY: usize = 3;

/// Half-size of a marker box.
const MARKER_BOX: i32 = 2;

#[derive(Clone, Debug)]
pub struct StarMarkers {
    stars: BaseStars,
    capacity: usize,
}

impl Default for StarMarkers {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_CAPACITY)
    }
}

impl StarMarkers {
    pub fn new(capacity: usize) -> Self {
        Self {
            stars: BaseStars::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.stars.size() >= self.capacity
    }
}

fn read_channel(file: &mut SaveReader<'_>) -> Result<u8, SaveFileError> {
    let value = file.read_number()?;
    u8::try_from(value).map_err(|_| SaveFileError::Parse {
        line: file.line(),
        expected: "a colour channel in 0..=255",
    })
}

impl StarView for StarMarkers {
    fn stars(&self) -> &BaseStars {
        &self.stars
    }

    fn stars_mut(&mut self) -> &mut BaseStars {
        &mut self.stars
    }

    fn mode(&self) -> StarMode {
        StarMode::Photo
    }

    fn draw(
        &mut self,
        surface: &mut SurfaceArea,
        camera: &dyn CameraView,
        _closeup: &mut dyn StarCloseup,
    ) {
        let half = IVec2::splat(MARKER_BOX);
        for index in 0..self.stars.size() {
            let (Some(point), Some(entry)) = (
                self.stars.screen_point(surface, camera, index),
                self.stars.get(index),
            ) else {
                continue;
            };
            surface.draw_rect(point - half, point + half, entry.color);
        }
    }

    fn load_yale(&mut self, _resources: &ResourceDir) -> Result<(), StarDataError> {
        // Markers are placed by the player, not loaded from the catalog.
        Ok(())
    }

    fn select_star(
        &mut self,
        _surface: &SurfaceArea,
        _camera: &dyn CameraView,
        _point: IVec2,
        _handler: Option<&mut dyn SelectionHandler>,
    ) -> bool {
        false
    }

    fn add_star(&mut self, entry: &BaseStarEntry) -> bool {
        if let Some(index) = self.stars.position_of(entry.position) {
            self.stars.remove(index);
            debug!(index, "removed marker");
            return true;
        }
        if self.is_full() {
            return false;
        }
        let index = self.stars.push(entry.clone());
        debug!(index, "added marker");
        true
    }

    fn load_star(&mut self) -> bool {
        false
    }

    fn load(&mut self, file: &mut SaveReader<'_>) -> Result<(), SaveFileError> {
        let count = file.read_number()?;
        let count = usize::try_from(count)
            .ok()
            .filter(|&n| n <= self.capacity)
            .ok_or(SaveFileError::Parse {
                line: file.line(),
                expected: "a marker count within capacity",
            })?;

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let position = DVec3::new(file.read_float()?, file.read_float()?, file.read_float()?);
            let color = Rgb::new(read_channel(file)?, read_channel(file)?, read_channel(file)?);
            let value = file.read_float()?;
            entries.push(BaseStarEntry::new(color, value, position));
        }

        self.stars = BaseStars::from_entries(entries);
        Ok(())
    }

    fn save(&self, file: &mut SaveWriter<'_>, indent: usize) -> Result<(), SaveFileError> {
        file.write_number_line(self.stars.size() as i64, indent)?;
        for entry in self.stars.entries() {
            for c in entry.position.to_array() {
                file.write_float_line(c, indent + 1)?;
            }
            for channel in [entry.color.r, entry.color.g, entry.color.b] {
                file.write_number_line(i64::from(channel), indent + 1)?;
            }
            file.write_float_line(entry.value, indent + 1)?;
        }
        Ok(())
    }
}
