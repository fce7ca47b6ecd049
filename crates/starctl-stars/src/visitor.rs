//! Visitors over the stars that project onto a surface.
//!
//! [`BaseStars::visit_visible`](crate::BaseStars::visit_visible) walks the
//! catalog in index order and hands each on-screen star to a visitor until the
//! visitor breaks.

use std::ops::ControlFlow;

use glam::IVec2;

use crate::entry::StarPosition;

pub trait StarVisitor {
    /// Called with the star's screen point and catalog index.
    fn visit(&mut self, point: IVec2, index: usize) -> ControlFlow<()>;
}

/// Finds the first star whose screen point lies in the half-open box
/// `[target - radius, target + radius)`.
#[derive(Clone, Debug)]
pub struct StarFinder {
    target: IVec2,
    radius: i32,
    found: Option<usize>,
}

impl StarFinder {
    pub fn new(target: IVec2, radius: i32) -> Self {
        Self {
            target,
            radius,
            found: None,
        }
    }

    pub fn found(&self) -> Option<usize> {
        self.found
    }

    fn hits(&self, point: IVec2) -> bool {
        // Widened so extreme targets and radii cannot overflow.
        let radius = i64::from(self.radius);
        let dx = i64::from(point.x) - i64::from(self.target.x);
        let dy = i64::from(point.y) - i64::from(self.target.y);
        (-radius..radius).contains(&dx) && (-radius..radius).contains(&dy)
    }
}

impl StarVisitor for StarFinder {
    fn visit(&mut self, point: IVec2, index: usize) -> ControlFlow<()> {
        if self.hits(point) {
            self.found = Some(index);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Counts every visible star.
#[derive(Clone, Copy, Debug, Default)]
pub struct VisibleCounter {
    pub count: usize,
}

impl StarVisitor for VisibleCounter {
    fn visit(&mut self, _point: IVec2, _index: usize) -> ControlFlow<()> {
        self.count += 1;
        ControlFlow::Continue(())
    }
}

/// Records screen positions of visible stars, up to a limit.
#[derive(Clone, Debug)]
pub struct PositionCollector {
    limit: usize,
    positions: Vec<StarPosition>,
}

impl PositionCollector {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            positions: Vec::new(),
        }
    }

    pub fn into_positions(self) -> Vec<StarPosition> {
        self.positions
    }
}

impl StarVisitor for PositionCollector {
    fn visit(&mut self, point: IVec2, index: usize) -> ControlFlow<()> {
        if self.positions.len() >= self.limit {
            return ControlFlow::Break(());
        }
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.positions.push(StarPosition::new(point, index, index));
        if self.positions.len() >= self.limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
