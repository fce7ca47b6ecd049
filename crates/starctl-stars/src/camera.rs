//! Star camera: maps catalog positions to view space and the screen.
//!
//! View space has +Z pointing away from the eye, +X to the right and +Y down
//! the screen, so a projected point can be added straight to the surface
//! centre.

use glam::{DQuat, DVec2, DVec3};

/// Maximum number of stars a camera can be locked onto.
pub const MAX_LOCKED_STARS: usize = 3;

/// Colour scheme a camera applies to the stars it shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StarTint {
    #[default]
    White,
    Pink,
}

/// Read-only projection contract used by star drawing and picking.
pub trait CameraView {
    /// Transform a catalog position into view space.
    fn to_view(&self, world: DVec3) -> DVec3;

    /// View depth at or below which stars are not drawn.
    fn front_clip(&self) -> f64;

    /// Project a view-space point onto the screen, relative to the surface
    /// centre. Only meaningful for points in front of the front clip.
    fn project(&self, view: DVec3) -> DVec2;

    fn star_tint(&self) -> StarTint;
}

/// A pinhole camera with an orientation and a list of locked stars.
#[derive(Clone, Debug)]
pub struct StarCamera {
    pub position: DVec3,
    /// Rotation from view space to catalog space.
    pub orientation: DQuat,
    /// Distance from the eye to the projection plane, in pixels.
    pub focal_length: f64,
    pub front_clip: f64,
    pub tint: StarTint,
    pub(crate) locked: Vec<DVec3>,
}

impl Default for StarCamera {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            focal_length: 400.0,
            front_clip: 0.1,
            tint: StarTint::White,
            locked: Vec::with_capacity(MAX_LOCKED_STARS),
        }
    }
}

impl StarCamera {
    pub fn new(focal_length: f64, front_clip: f64, tint: StarTint) -> Self {
        Self {
            focal_length,
            front_clip,
            tint,
            ..Self::default()
        }
    }

    /// Viewing direction in catalog space.
    pub fn forward(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Turn the camera so that `target` lies on the view axis.
    ///
    /// Does nothing when `target` coincides with the camera position.
    pub fn look_at(&mut self, target: DVec3) {
        let dir = target - self.position;
        if let Some(dir) = dir.try_normalize() {
            self.orientation = DQuat::from_rotation_arc(DVec3::Z, dir);
        }
    }

    /// Lock onto a star at `target` and turn to face it.
    ///
    /// Returns false, leaving the camera unchanged, once
    /// [`MAX_LOCKED_STARS`] stars are locked.
    pub fn lock_star(&mut self, target: DVec3) -> bool {
        if self.locked.len() >= MAX_LOCKED_STARS {
            tracing::warn!(?target, "camera already has the maximum locked stars");
            return false;
        }
        self.locked.push(target);
        self.look_at(target);
        tracing::debug!(?target, locked = self.locked.len(), "locked star");
        true
    }

    pub fn locked_stars(&self) -> &[DVec3] {
        &self.locked
    }
}

impl CameraView for StarCamera {
    fn to_view(&self, world: DVec3) -> DVec3 {
        self.orientation.inverse() * (world - self.position)
    }

    fn front_clip(&self) -> f64 {
        self.front_clip
    }

    fn project(&self, view: DVec3) -> DVec2 {
        DVec2::new(view.x, view.y) * (self.focal_length / view.z)
    }

    fn star_tint(&self) -> StarTint {
        self.tint
    }
}
