//! Closeup rendering for a star that is very near the camera.

use glam::{DVec2, DVec3};

use crate::entry::BaseStarEntry;
use crate::surface::SurfaceArea;

/// Draws the single nearest star when it comes within [`range`](Self::range).
pub trait StarCloseup {
    /// View depth below which a star is handed to the closeup.
    fn range(&self) -> f64;

    /// Draw `entry`, seen at `view` depth and projected to `screen` (absolute
    /// surface coordinates).
    fn draw(&mut self, surface: &mut SurfaceArea, entry: &BaseStarEntry, view: DVec3, screen: DVec2);
}

/// Draws a nearby star as a filled disc that grows as the camera approaches.
#[derive(Clone, Debug)]
pub struct HaloCloseup {
    range: f64,
    max_radius: i32,
}

impl HaloCloseup {
    pub fn new(range: f64, max_radius: i32) -> Self {
        Self {
            range,
            max_radius: max_radius.max(1),
        }
    }

    /// Disc radius for a star at view depth `depth`.
    pub fn radius_at(&self, depth: f64) -> i32 {
        if depth <= 0.0 {
            return self.max_radius;
        }
        ((self.range / depth).ceil() as i32).clamp(1, self.max_radius)
    }
}

impl StarCloseup for HaloCloseup {
    fn range(&self) -> f64 {
        self.range
    }

    fn draw(&mut self, surface: &mut SurfaceArea, entry: &BaseStarEntry, view: DVec3, screen: DVec2) {
        let radius = self.radius_at(view.z);
        tracing::trace!(radius, depth = view.z, "drawing star closeup");
        surface.fill_disc(screen.floor().as_ivec2(), radius, entry.color);
    }
}

/// A closeup that never engages, for views drawn without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCloseup;

impl StarCloseup for NoCloseup {
    fn range(&self) -> f64 {
        0.0
    }

    fn draw(&mut self, _: &mut SurfaceArea, _: &BaseStarEntry, _: DVec3, _: DVec2) {}
}
