//! Shared star storage plus the drawing and picking every star view builds on.
//!
//! ## Catalog Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Header id (`u32`, little-endian, always 100) |
//! | 4 | 4 | Entry count (`u32`, little-endian, non-zero) |
//! | 8 | N×40 | Entry records, see [`crate::entry`] |

use std::io::{Read, Write};

use glam::{DVec2, DVec3, IVec2};
use tracing::{debug, trace};

use crate::camera::{CameraView, StarTint};
use crate::closeup::StarCloseup;
use crate::entry::{BaseStarEntry, Rgb, StarPosition};
use crate::error::StarDataError;
use crate::range::StarRanges;
use crate::resources::ResourceDir;
use crate::surface::{PixelDepth, SurfaceArea};
use crate::visitor::{PositionCollector, StarFinder, StarVisitor, VisibleCounter};

/// Header id every star catalog starts with.
pub const STAR_DATA_HEADER: u32 = 100;

/// Default half-size of the box a pick must land in.
pub const DEFAULT_PICK_RADIUS: i32 = 2;

/// Dimmest stars are still drawn at this fraction of their colour.
const MIN_INTENSITY: f64 = 0.35;

/// Colour pink-tinted stars are pulled toward.
const PINK: Rgb = Rgb::new(0xFF, 0x69, 0xB4);

/// How far pink-tinted stars are pulled toward [`PINK`].
const PINK_BLEND: f64 = 0.6;

/// Upper bound on entries pre-allocated from an untrusted header count.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

/// A star is on screen when its point lies in `[0, w - 1) x [0, h - 1)`,
/// leaving room for the 2x2 block of thick stars.
fn project_onto<C: CameraView + ?Sized>(
    surface: &SurfaceArea,
    camera: &C,
    position: DVec3,
) -> Option<(IVec2, DVec3, DVec2)> {
    let view = camera.to_view(position);
    if view.z <= camera.front_clip() {
        return None;
    }
    let screen = camera.project(view) + surface.center();
    let point = screen.floor().as_ivec2();
    let max_x = surface.width() as i32 - 1;
    let max_y = surface.height() as i32 - 1;
    (point.x >= 0 && point.x < max_x && point.y >= 0 && point.y < max_y)
        .then_some((point, view, screen))
}

fn intensity(brightness: f64) -> f64 {
    MIN_INTENSITY + (1.0 - MIN_INTENSITY) * brightness
}

/// An ordered star catalog; a star's index is its position in the catalog.
#[derive(Clone, Debug)]
pub struct BaseStars {
    entries: Vec<BaseStarEntry>,
    ranges: StarRanges,
    pick_radius: i32,
}

impl Default for BaseStars {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseStars {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            ranges: StarRanges::default(),
            pick_radius: DEFAULT_PICK_RADIUS,
        }
    }

    pub fn from_entries(entries: Vec<BaseStarEntry>) -> Self {
        Self {
            entries,
            ..Self::new()
        }
    }

    /// Replace the catalog with the entries read from `reader`.
    ///
    /// The previous entries are kept if reading fails. Returns the number of
    /// entries loaded.
    pub fn load_data<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize, StarDataError> {
        let mut header = [0u8; 8];
        reader.read_exact(&mut header)?;
        let header_id = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let count = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;

        if header_id != STAR_DATA_HEADER {
            return Err(StarDataError::InvalidHeader(header_id));
        }
        if count == 0 {
            return Err(StarDataError::EmptyCatalog);
        }

        let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATED_ENTRIES));
        for _ in 0..count {
            entries.push(BaseStarEntry::read_from(&mut *reader)?);
        }

        self.entries = entries;
        debug!(count, "loaded star catalog");
        Ok(count)
    }

    /// Replace the catalog with the contents of a named resource.
    pub fn load_resource(
        &mut self,
        resources: &ResourceDir,
        name: &str,
    ) -> Result<usize, StarDataError> {
        let mut reader = resources.open(name)?;
        self.load_data(&mut reader)
    }

    /// Write the catalog in the format [`load_data`](Self::load_data) reads.
    ///
    /// An empty catalog cannot be written since it could not be read back.
    pub fn write_data<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), StarDataError> {
        if self.entries.is_empty() {
            return Err(StarDataError::EmptyCatalog);
        }
        let count = u32::try_from(self.entries.len()).map_err(|_| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "too many star entries")
        })?;
        writer.write_all(&STAR_DATA_HEADER.to_le_bytes())?;
        writer.write_all(&count.to_le_bytes())?;
        for entry in &self.entries {
            entry.write_to(&mut *writer)?;
        }
        Ok(())
    }

    /// Restore `entry` to the cleared state.
    pub fn reset_entry(entry: &mut BaseStarEntry) {
        *entry = BaseStarEntry::default();
    }

    /// Reset the entry at `index`. Returns false if the index is out of range.
    pub fn reset_entry_at(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                Self::reset_entry(entry);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reset the cached ranges, then recompute them from the current entries.
    ///
    /// An empty catalog leaves the defaults in place.
    pub fn initialize(&mut self) {
        self.ranges = StarRanges::default();
        if self.entries.is_empty() {
            return;
        }

        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        for entry in &self.entries {
            self.ranges.bounds.expand(entry.position);
            min_value = min_value.min(entry.value);
            max_value = max_value.max(entry.value);
        }
        self.ranges.min_value = min_value;
        self.ranges.max_value = max_value;
        self.ranges.range = max_value - min_value;
        trace!(min_value, max_value, "initialized star ranges");
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BaseStarEntry] {
        &self.entries
    }

    /// Bounds-checked access to one entry.
    pub fn get(&self, index: usize) -> Option<&BaseStarEntry> {
        self.entries.get(index)
    }

    /// Append an entry, returning its index.
    pub fn push(&mut self, entry: BaseStarEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Remove the entry at `index`, shifting later indices down by one.
    pub fn remove(&mut self, index: usize) -> Option<BaseStarEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Index of the first entry at exactly `position`.
    pub fn position_of(&self, position: DVec3) -> Option<usize> {
        self.entries.iter().position(|e| e.position == position)
    }

    pub fn ranges(&self) -> &StarRanges {
        &self.ranges
    }

    pub fn ranges_mut(&mut self) -> &mut StarRanges {
        &mut self.ranges
    }

    pub fn pick_radius(&self) -> i32 {
        self.pick_radius
    }

    /// Set the pick box half-size; at least one pixel so a pick at a
    /// star's own point always hits.
    pub fn set_pick_radius(&mut self, radius: i32) {
        self.pick_radius = radius.max(1);
    }

    /// Draw every visible star.
    ///
    /// The variant is chosen by the camera's tint and the surface's pixel
    /// depth. The nearest star within the closeup's range is drawn by the
    /// closeup instead of as a point.
    pub fn draw<C: CameraView + ?Sized>(
        &self,
        surface: &mut SurfaceArea,
        camera: &C,
        closeup: &mut dyn StarCloseup,
    ) {
        if self.entries.is_empty() {
            return;
        }

        match (camera.star_tint(), surface.depth()) {
            (StarTint::White, PixelDepth::Indexed8) => self.draw_white_indexed(surface, camera, closeup),
            (StarTint::White, PixelDepth::Rgb565) => self.draw_white_rgb565(surface, camera, closeup),
            (StarTint::Pink, PixelDepth::Indexed8) => self.draw_pink_indexed(surface, camera, closeup),
            (StarTint::Pink, PixelDepth::Rgb565) => self.draw_pink_rgb565(surface, camera, closeup),
        }
    }

    fn draw_white_indexed<C: CameraView + ?Sized>(
        &self,
        surface: &mut SurfaceArea,
        camera: &C,
        closeup: &mut dyn StarCloseup,
    ) {
        self.render(surface, camera, closeup, |entry, brightness| {
            u16::from(entry.color.scaled(intensity(brightness)).luminance())
        });
    }

    fn draw_white_rgb565<C: CameraView + ?Sized>(
        &self,
        surface: &mut SurfaceArea,
        camera: &C,
        closeup: &mut dyn StarCloseup,
    ) {
        self.render(surface, camera, closeup, |entry, brightness| {
            entry.color.scaled(intensity(brightness)).to_rgb565()
        });
    }

    fn draw_pink_indexed<C: CameraView + ?Sized>(
        &self,
        surface: &mut SurfaceArea,
        camera: &C,
        closeup: &mut dyn StarCloseup,
    ) {
        self.render(surface, camera, closeup, |entry, brightness| {
            let tinted = entry.color.lerp(PINK, PINK_BLEND);
            u16::from(tinted.scaled(intensity(brightness)).luminance())
        });
    }

    fn draw_pink_rgb565<C: CameraView + ?Sized>(
        &self,
        surface: &mut SurfaceArea,
        camera: &C,
        closeup: &mut dyn StarCloseup,
    ) {
        self.render(surface, camera, closeup, |entry, brightness| {
            entry
                .color
                .lerp(PINK, PINK_BLEND)
                .scaled(intensity(brightness))
                .to_rgb565()
        });
    }

    fn render<C, F>(
        &self,
        surface: &mut SurfaceArea,
        camera: &C,
        closeup: &mut dyn StarCloseup,
        mut shade: F,
    ) where
        C: CameraView + ?Sized,
        F: FnMut(&BaseStarEntry, f64) -> u16,
    {
        let closeup_range = closeup.range();
        let mut nearest: Option<(usize, DVec3, DVec2)> = None;
        let mut plotted = 0usize;

        for (index, entry) in self.entries.iter().enumerate() {
            let Some((point, view, screen)) = project_onto(surface, camera, entry.position) else {
                continue;
            };
            if view.z < closeup_range {
                if nearest.is_none_or(|(_, best, _)| view.z < best.z) {
                    // The displaced star is drawn as a point.
                    if let Some((prev, _, _)) = nearest {
                        self.plot_star(surface, &self.entries[prev], &mut shade, camera);
                    }
                    nearest = Some((index, view, screen));
                    continue;
                }
            }

            let raw = shade(entry, self.ranges.normalize(entry.value));
            plot_raw(surface, point, entry.thickness, raw);
            plotted += 1;
        }

        if let Some((index, view, screen)) = nearest {
            closeup.draw(surface, &self.entries[index], view, screen);
        }
        trace!(plotted, closeup = nearest.is_some(), "drew stars");
    }

    fn plot_star<C, F>(&self, surface: &mut SurfaceArea, entry: &BaseStarEntry, shade: &mut F, camera: &C)
    where
        C: CameraView + ?Sized,
        F: FnMut(&BaseStarEntry, f64) -> u16,
    {
        if let Some((point, _, _)) = project_onto(surface, camera, entry.position) {
            let raw = shade(entry, self.ranges.normalize(entry.value));
            plot_raw(surface, point, entry.thickness, raw);
        }
    }

    /// Screen point of the star at `index`, if it is on the surface.
    pub fn screen_point<C: CameraView + ?Sized>(
        &self,
        surface: &SurfaceArea,
        camera: &C,
        index: usize,
    ) -> Option<IVec2> {
        let entry = self.entries.get(index)?;
        project_onto(surface, camera, entry.position).map(|(point, _, _)| point)
    }

    /// Hand every on-screen star to `visitor`, in index order, until it breaks.
    pub fn visit_visible<C, V>(&self, surface: &SurfaceArea, camera: &C, visitor: &mut V)
    where
        C: CameraView + ?Sized,
        V: StarVisitor + ?Sized,
    {
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some((point, _, _)) = project_onto(surface, camera, entry.position)
                && visitor.visit(point, index).is_break()
            {
                break;
            }
        }
    }

    /// Index of the first star drawn within the pick radius of `point`.
    pub fn find_star<C: CameraView + ?Sized>(
        &self,
        surface: &SurfaceArea,
        camera: &C,
        point: IVec2,
    ) -> Option<usize> {
        let mut finder = StarFinder::new(point, self.pick_radius);
        self.visit_visible(surface, camera, &mut finder);
        finder.found()
    }

    /// Number of stars that project onto the surface.
    pub fn count_visible_stars<C: CameraView + ?Sized>(
        &self,
        surface: &SurfaceArea,
        camera: &C,
    ) -> usize {
        let mut counter = VisibleCounter::default();
        self.visit_visible(surface, camera, &mut counter);
        counter.count
    }

    /// Screen positions of up to `limit` visible stars, tagged with their
    /// catalog index.
    pub fn visible_positions<C: CameraView + ?Sized>(
        &self,
        surface: &SurfaceArea,
        camera: &C,
        limit: usize,
    ) -> Vec<StarPosition> {
        let mut collector = PositionCollector::new(limit);
        self.visit_visible(surface, camera, &mut collector);
        collector.into_positions()
    }
}

fn plot_raw(surface: &mut SurfaceArea, point: IVec2, thickness: u8, raw: u16) {
    surface.set_pixel(point, raw);
    if thickness > 0 {
        surface.set_pixel(point + IVec2::X, raw);
        surface.set_pixel(point + IVec2::Y, raw);
        surface.set_pixel(point + IVec2::ONE, raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::StarCamera;
    use crate::closeup::{HaloCloseup, NoCloseup};

    /// Camera at the origin looking down +Z with a 100px focal length.
    fn camera() -> StarCamera {
        StarCamera::new(100.0, 0.1, StarTint::White)
    }

    fn surface(depth: PixelDepth) -> SurfaceArea {
        SurfaceArea::new(200, 100, depth)
    }

    /// Star that projects to screen pixel `(x, y)` on a 200x100 surface at depth 100.
    fn star_at(x: f64, y: f64, color: Rgb) -> BaseStarEntry {
        BaseStarEntry::new(color, 1.0, DVec3::new(x - 100.0, y - 50.0, 100.0))
    }

    fn catalog_bytes(entries: &[BaseStarEntry]) -> Vec<u8> {
        let mut bytes = Vec::new();
        BaseStars::from_entries(entries.to_vec())
            .write_data(&mut bytes)
            .unwrap();
        bytes
    }

    #[test]
    fn test_load_replaces_entries() {
        let mut stars = BaseStars::from_entries(vec![BaseStarEntry::default(); 5]);
        let loaded = vec![
            star_at(10.0, 10.0, Rgb::new(1, 2, 3)),
            star_at(20.0, 20.0, Rgb::new(4, 5, 6)),
        ];
        let count = stars.load_data(&mut catalog_bytes(&loaded).as_slice()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(stars.size(), 2);
        assert_eq!(stars.get(0), Some(&loaded[0]));
        assert_eq!(stars.get(1), Some(&loaded[1]));
        assert_eq!(stars.get(2), None);
    }

    #[test]
    fn test_load_rejects_bad_header() {
        let mut bytes = catalog_bytes(&[BaseStarEntry::default()]);
        bytes[0] = 99;
        let mut stars = BaseStars::new();
        assert!(matches!(
            stars.load_data(&mut bytes.as_slice()),
            Err(StarDataError::InvalidHeader(99))
        ));
    }

    #[test]
    fn test_load_rejects_zero_count() {
        let mut bytes = STAR_DATA_HEADER.to_le_bytes().to_vec();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        let mut stars = BaseStars::new();
        assert!(matches!(
            stars.load_data(&mut bytes.as_slice()),
            Err(StarDataError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_truncated_load_keeps_previous_entries() {
        let previous = vec![star_at(1.0, 1.0, Rgb::WHITE)];
        let mut stars = BaseStars::from_entries(previous.clone());

        let mut bytes = catalog_bytes(&[BaseStarEntry::default(), BaseStarEntry::default()]);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            stars.load_data(&mut bytes.as_slice()),
            Err(StarDataError::Io(_))
        ));
        assert_eq!(stars.entries(), previous.as_slice());
    }

    #[test]
    fn test_write_empty_catalog_fails() {
        let mut out = Vec::new();
        assert!(matches!(
            BaseStars::new().write_data(&mut out),
            Err(StarDataError::EmptyCatalog)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_clear_empties_catalog() {
        let mut stars = BaseStars::from_entries(vec![BaseStarEntry::default(); 3]);
        stars.clear();
        assert_eq!(stars.size(), 0);
        assert!(stars.is_empty());
    }

    #[test]
    fn test_reset_entry_matches_default() {
        let mut entry = BaseStarEntry {
            color: Rgb::new(1, 2, 3),
            thickness: 4,
            value: 5.0,
            position: DVec3::new(6.0, 7.0, 8.0),
            data: [9, 10, 11, 12, 13],
        };
        BaseStars::reset_entry(&mut entry);
        assert_eq!(entry, BaseStarEntry::default());
    }

    #[test]
    fn test_reset_entry_at_index() {
        let mut stars = BaseStars::from_entries(vec![star_at(5.0, 5.0, Rgb::new(9, 9, 9))]);
        assert!(stars.reset_entry_at(0));
        assert_eq!(stars.get(0), Some(&BaseStarEntry::default()));
        assert!(!stars.reset_entry_at(1));
    }

    #[test]
    fn test_initialize_computes_ranges() {
        let mut stars = BaseStars::from_entries(vec![
            BaseStarEntry::new(Rgb::WHITE, 2.0, DVec3::new(-1.0, 0.0, 5.0)),
            BaseStarEntry::new(Rgb::WHITE, 8.0, DVec3::new(3.0, -4.0, 1.0)),
        ]);
        stars.ranges_mut().tuning = [1.0; 4];
        stars.initialize();

        let ranges = stars.ranges();
        assert_eq!(ranges.min_value, 2.0);
        assert_eq!(ranges.max_value, 8.0);
        assert_eq!(ranges.range, 6.0);
        assert_eq!(ranges.bounds.min, DVec3::new(-1.0, -4.0, 1.0));
        assert_eq!(ranges.bounds.max, DVec3::new(3.0, 0.0, 5.0));
        assert_eq!(ranges.tuning, [0.0; 4]);
    }

    #[test]
    fn test_initialize_empty_restores_defaults() {
        let mut stars = BaseStars::new();
        stars.ranges_mut().range = 42.0;
        stars.initialize();
        assert_eq!(stars.ranges(), &StarRanges::default());
    }

    #[test]
    fn test_find_star_empty_catalog() {
        let stars = BaseStars::new();
        let surface = surface(PixelDepth::Rgb565);
        for point in [IVec2::ZERO, IVec2::new(100, 50), IVec2::new(-5, 500)] {
            assert_eq!(stars.find_star(&surface, &camera(), point), None);
        }
    }

    #[test]
    fn test_find_star_returns_first_hit() {
        let stars = BaseStars::from_entries(vec![
            star_at(40.0, 40.0, Rgb::WHITE),
            star_at(120.0, 60.0, Rgb::WHITE),
            star_at(121.0, 61.0, Rgb::WHITE),
        ]);
        let surface = surface(PixelDepth::Rgb565);
        let cam = camera();
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(121, 61)), Some(1));
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(40, 40)), Some(0));
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(80, 80)), None);
    }

    #[test]
    fn test_pick_radius_widens_hit_box() {
        let mut stars = BaseStars::from_entries(vec![star_at(50.0, 50.0, Rgb::WHITE)]);
        let surface = surface(PixelDepth::Rgb565);
        let cam = camera();
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(54, 50)), None);
        stars.set_pick_radius(5);
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(54, 50)), Some(0));
    }

    #[test]
    fn test_zero_pick_radius_still_hits_exact_point() {
        let mut stars = BaseStars::from_entries(vec![star_at(100.0, 50.0, Rgb::WHITE)]);
        let surface = surface(PixelDepth::Rgb565);
        stars.set_pick_radius(0);
        assert_eq!(stars.pick_radius(), 1);
        assert_eq!(stars.find_star(&surface, &camera(), IVec2::new(100, 50)), Some(0));
        assert_eq!(stars.find_star(&surface, &camera(), IVec2::new(101, 50)), None);
    }

    #[test]
    fn test_find_star_at_extreme_points_misses() {
        let mut stars = BaseStars::from_entries(vec![star_at(100.0, 50.0, Rgb::WHITE)]);
        let surface = surface(PixelDepth::Rgb565);
        let cam = camera();
        for point in [
            IVec2::new(i32::MIN, 0),
            IVec2::new(i32::MAX, i32::MAX),
            IVec2::new(0, i32::MIN),
        ] {
            assert_eq!(stars.find_star(&surface, &cam, point), None);
        }

        stars.set_pick_radius(i32::MAX);
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(i32::MIN, 0)), None);
        assert_eq!(stars.find_star(&surface, &cam, IVec2::ZERO), Some(0));
    }

    #[test]
    fn test_find_star_follows_rotated_camera() {
        // After turning to face +X, the star ahead of the old view axis lies
        // on the new clip plane and the one on -X is behind the camera.
        let stars = BaseStars::from_entries(vec![
            BaseStarEntry::new(Rgb::WHITE, 1.0, DVec3::new(0.0, 0.0, 100.0)),
            BaseStarEntry::new(Rgb::WHITE, 1.0, DVec3::new(-100.0, 0.0, 0.0)),
            BaseStarEntry::new(Rgb::WHITE, 1.0, DVec3::new(100.0, 0.0, 0.0)),
        ]);
        let surface = surface(PixelDepth::Rgb565);
        let mut cam = camera();
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(100, 50)), Some(0));

        crate::star_vector::StarVector::new(&mut cam, DVec3::new(100.0, 0.0, 0.0)).apply();
        assert_eq!(stars.find_star(&surface, &cam, IVec2::new(100, 50)), Some(2));
        assert_eq!(stars.count_visible_stars(&surface, &cam), 1);
    }

    #[test]
    fn test_stars_behind_camera_are_not_visible() {
        let mut behind = star_at(100.0, 50.0, Rgb::WHITE);
        behind.position.z = -100.0;
        let mut at_clip = star_at(100.0, 50.0, Rgb::WHITE);
        at_clip.position.z = 0.1;
        let stars = BaseStars::from_entries(vec![behind, at_clip]);
        let surface = surface(PixelDepth::Rgb565);
        assert_eq!(stars.count_visible_stars(&surface, &camera()), 0);
        assert_eq!(stars.find_star(&surface, &camera(), IVec2::new(100, 50)), None);
    }

    #[test]
    fn test_count_excludes_last_row_and_column() {
        let stars = BaseStars::from_entries(vec![
            star_at(0.0, 0.0, Rgb::WHITE),
            star_at(198.0, 98.0, Rgb::WHITE),
            star_at(199.0, 50.0, Rgb::WHITE),
            star_at(50.0, 99.0, Rgb::WHITE),
            star_at(-1.0, 50.0, Rgb::WHITE),
        ]);
        let surface = surface(PixelDepth::Rgb565);
        assert_eq!(stars.count_visible_stars(&surface, &camera()), 2);
    }

    #[test]
    fn test_visible_positions_carry_indices() {
        let stars = BaseStars::from_entries(vec![
            star_at(10.0, 10.0, Rgb::WHITE),
            star_at(500.0, 10.0, Rgb::WHITE),
            star_at(30.0, 20.0, Rgb::WHITE),
        ]);
        let surface = surface(PixelDepth::Rgb565);
        let positions = stars.visible_positions(&surface, &camera(), 10);
        assert_eq!(
            positions,
            vec![
                StarPosition::new(IVec2::new(10, 10), 0, 0),
                StarPosition::new(IVec2::new(30, 20), 2, 2),
            ]
        );
        assert_eq!(stars.visible_positions(&surface, &camera(), 1).len(), 1);
    }

    #[test]
    fn test_draw_empty_catalog_leaves_surface_untouched() {
        let mut surface = surface(PixelDepth::Rgb565);
        BaseStars::new().draw(&mut surface, &camera(), &mut NoCloseup);
        assert_eq!(surface.lit_pixel_count(), 0);
    }

    #[test]
    fn test_draw_white_rgb565_plots_star_colour() {
        let stars = BaseStars::from_entries(vec![star_at(20.0, 30.0, Rgb::new(0xFF, 0, 0))]);
        let mut surface = surface(PixelDepth::Rgb565);
        stars.draw(&mut surface, &camera(), &mut NoCloseup);
        assert_eq!(surface.lit_pixel_count(), 1);
        assert_eq!(surface.pixel(IVec2::new(20, 30)), Some(0xF800));
    }

    #[test]
    fn test_draw_white_indexed_writes_grey_level() {
        let stars = BaseStars::from_entries(vec![star_at(20.0, 30.0, Rgb::WHITE)]);
        let mut surface = surface(PixelDepth::Indexed8);
        stars.draw(&mut surface, &camera(), &mut NoCloseup);
        assert_eq!(surface.pixel(IVec2::new(20, 30)), Some(255));
    }

    #[test]
    fn test_draw_pink_shifts_colour() {
        let stars = BaseStars::from_entries(vec![star_at(20.0, 30.0, Rgb::WHITE)]);
        let mut cam = camera();
        cam.tint = StarTint::Pink;

        let mut rgb = surface(PixelDepth::Rgb565);
        stars.draw(&mut rgb, &cam, &mut NoCloseup);
        let color = rgb.color_at(IVec2::new(20, 30)).unwrap();
        assert!(color.r > color.g, "pink star should be red-heavy: {color:?}");
        assert!(color.b > color.g, "pink star should keep blue: {color:?}");

        let mut indexed = surface(PixelDepth::Indexed8);
        stars.draw(&mut indexed, &cam, &mut NoCloseup);
        let grey = indexed.pixel(IVec2::new(20, 30)).unwrap();
        assert!(grey > 0 && grey < 255);
    }

    #[test]
    fn test_dim_stars_are_drawn_darker() {
        let mut stars = BaseStars::from_entries(vec![
            BaseStarEntry::new(Rgb::WHITE, 0.0, DVec3::new(-90.0, -40.0, 100.0)),
            BaseStarEntry::new(Rgb::WHITE, 10.0, DVec3::new(-80.0, -40.0, 100.0)),
        ]);
        stars.initialize();
        let mut surface = surface(PixelDepth::Indexed8);
        stars.draw(&mut surface, &camera(), &mut NoCloseup);
        let dim = surface.pixel(IVec2::new(10, 10)).unwrap();
        let bright = surface.pixel(IVec2::new(20, 10)).unwrap();
        assert!(dim > 0 && dim < bright, "dim={dim} bright={bright}");
    }

    #[test]
    fn test_thick_star_draws_block() {
        let mut entry = star_at(20.0, 30.0, Rgb::WHITE);
        entry.thickness = 1;
        let stars = BaseStars::from_entries(vec![entry]);
        let mut surface = surface(PixelDepth::Rgb565);
        stars.draw(&mut surface, &camera(), &mut NoCloseup);
        assert_eq!(surface.lit_pixel_count(), 4);
        assert_eq!(surface.pixel(IVec2::new(21, 31)), Some(0xFFFF));
    }

    #[test]
    fn test_nearest_star_goes_to_closeup() {
        let near = BaseStarEntry::new(Rgb::new(0, 0xFF, 0), 1.0, DVec3::new(0.0, 0.0, 5.0));
        let nearer = BaseStarEntry::new(Rgb::new(0, 0, 0xFF), 1.0, DVec3::new(-0.5, 0.0, 2.0));
        let far = star_at(20.0, 30.0, Rgb::WHITE);
        let stars = BaseStars::from_entries(vec![near, far, nearer]);
        let mut surface = surface(PixelDepth::Rgb565);
        let mut closeup = HaloCloseup::new(10.0, 3);
        stars.draw(&mut surface, &camera(), &mut closeup);

        // Far star and the displaced near star are points.
        assert_eq!(surface.pixel(IVec2::new(20, 30)), Some(0xFFFF));
        assert_eq!(
            surface.color_at(IVec2::new(100, 50)).map(|c| c.g > 0),
            Some(true)
        );
        // Nearest star becomes a blue disc centred at x = 100 - 25.
        assert_eq!(surface.color_at(IVec2::new(75, 50)), Some(Rgb::new(0, 0, 0xFF)));
        assert_eq!(surface.color_at(IVec2::new(77, 50)), Some(Rgb::new(0, 0, 0xFF)));
    }

    #[test]
    fn test_offscreen_star_in_closeup_range_is_not_drawn() {
        // Within range but projected far right of the surface.
        let near = BaseStarEntry::new(Rgb::new(0, 0xFF, 0), 1.0, DVec3::new(50.0, 0.0, 5.0));
        let far = star_at(20.0, 30.0, Rgb::WHITE);
        let stars = BaseStars::from_entries(vec![near, far]);
        let mut surface = surface(PixelDepth::Rgb565);
        let mut closeup = HaloCloseup::new(10.0, 3);
        stars.draw(&mut surface, &camera(), &mut closeup);

        assert_eq!(surface.lit_pixel_count(), 1);
        assert_eq!(surface.pixel(IVec2::new(20, 30)), Some(0xFFFF));
    }
}
