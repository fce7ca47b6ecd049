//! One-shot command that locks a camera onto a star.

use glam::DVec3;

use crate::camera::StarCamera;

/// Binds a camera to the position it should lock onto once applied.
///
/// The command is consumed by [`apply`](Self::apply), so it can run at most
/// once, and the camera borrow keeps it valid until then.
#[derive(Debug)]
pub struct StarVector<'a> {
    camera: &'a mut StarCamera,
    vector: DVec3,
}

impl<'a> StarVector<'a> {
    pub fn new(camera: &'a mut StarCamera, vector: DVec3) -> Self {
        Self { camera, vector }
    }

    pub fn vector(&self) -> DVec3 {
        self.vector
    }

    /// Lock the camera onto the stored position and turn it to face it.
    pub fn apply(self) {
        if !self.camera.lock_star(self.vector) {
            tracing::debug!(vector = ?self.vector, "star vector dropped, camera fully locked");
        }
    }
}
