//! Builds the camera and surface from config and writes finished frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use starctl_config::{CameraConfig, PixelDepthSetting, StarTintSetting, ViewConfig};
use starctl_stars::{
    PixelDepth, StarCamera, StarField, StarMarkers, StarTint, StarView, SurfaceArea,
};

/// Largest disc radius a closeup star is drawn with.
pub const CLOSEUP_MAX_RADIUS: i32 = 8;

pub fn camera_from_config(config: &CameraConfig) -> StarCamera {
    let tint = match config.tint {
        StarTintSetting::White => StarTint::White,
        StarTintSetting::Pink => StarTint::Pink,
    };
    StarCamera::new(config.focal_length, config.front_clip, tint)
}

pub fn surface_from_config(config: &ViewConfig) -> SurfaceArea {
    let depth = match config.pixel_depth {
        PixelDepthSetting::Indexed8 => PixelDepth::Indexed8,
        PixelDepthSetting::Rgb565 => PixelDepth::Rgb565,
    };
    SurfaceArea::new(config.width, config.height, depth)
}

/// Commit the field's pending selection and place a marker on it.
///
/// Returns false when nothing was committed or the markers are full.
pub fn mark_selection(field: &mut StarField, markers: &mut StarMarkers) -> bool {
    if !field.load_star() {
        return false;
    }
    let Some(entry) = field.selected().and_then(|i| field.stars().get(i)).cloned() else {
        return false;
    };
    markers.add_star(&entry)
}

/// Encode the surface as an RGBA PNG at `path`.
pub fn write_png(surface: &SurfaceArea, path: &Path) -> Result<(), crate::ViewerError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), surface.width(), surface.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&surface.to_rgba8())?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, IVec2};
    use starctl_stars::{BaseStarEntry, BaseStars, NoCloseup, Rgb};

    #[test]
    fn test_camera_follows_config() {
        let config = CameraConfig {
            focal_length: 250.0,
            front_clip: 2.0,
            tint: StarTintSetting::Pink,
        };
        let camera = camera_from_config(&config);
        assert_eq!(camera.focal_length, 250.0);
        assert_eq!(camera.front_clip, 2.0);
        assert_eq!(camera.tint, StarTint::Pink);
    }

    #[test]
    fn test_surface_follows_config() {
        let config = ViewConfig {
            width: 64,
            height: 32,
            pixel_depth: PixelDepthSetting::Indexed8,
        };
        let surface = surface_from_config(&config);
        assert_eq!((surface.width(), surface.height()), (64, 32));
        assert_eq!(surface.depth(), PixelDepth::Indexed8);
    }

    fn picked_field() -> (StarField, SurfaceArea, StarCamera) {
        let stars = BaseStars::from_entries(vec![BaseStarEntry::new(
            Rgb::WHITE,
            1.0,
            DVec3::new(0.0, 0.0, 100.0),
        )]);
        let mut field = StarField::with_stars(stars);
        let surface = SurfaceArea::new(64, 32, PixelDepth::Rgb565);
        let camera = StarCamera::default();
        assert!(field.select_star(&surface, &camera, IVec2::new(32, 16), None));
        (field, surface, camera)
    }

    #[test]
    fn test_mark_selection_places_marker() {
        let (mut field, mut surface, camera) = picked_field();
        let mut markers = StarMarkers::new(3);
        assert!(mark_selection(&mut field, &mut markers));
        assert_eq!(field.locked(), &[0]);
        assert_eq!(markers.stars().size(), 1);

        markers.draw(&mut surface, &camera, &mut NoCloseup);
        assert_eq!(surface.lit_pixel_count(), 16);

        // The selection was already committed.
        assert!(!mark_selection(&mut field, &mut markers));
    }

    #[test]
    fn test_mark_selection_respects_marker_capacity() {
        let (mut field, _, _) = picked_field();
        let mut markers = StarMarkers::new(0);
        assert!(!mark_selection(&mut field, &mut markers));
        assert!(markers.stars().is_empty());
        assert_eq!(field.locked(), &[0]);
    }

    #[test]
    fn test_write_png_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let surface = SurfaceArea::new(8, 4, PixelDepth::Rgb565);
        write_png(&surface, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
