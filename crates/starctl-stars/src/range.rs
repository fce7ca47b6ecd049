//! Cached bounds over a star catalog.

use glam::DVec3;

/// Sentinel magnitude the empty range is inverted to.
const RANGE_SENTINEL: f64 = 9.999_999_8e10;

/// Axis-aligned min/max bounds over star positions.
///
/// An empty range has `min > max` on every axis until the first `expand`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FRange {
    pub min: DVec3,
    pub max: DVec3,
}

impl Default for FRange {
    fn default() -> Self {
        Self {
            min: DVec3::splat(RANGE_SENTINEL),
            max: DVec3::splat(-RANGE_SENTINEL),
        }
    }
}

impl FRange {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Grow the range so it contains `v`.
    pub fn expand(&mut self, v: DVec3) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }
}

/// Scalars a star view caches for normalising brightness while drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct StarRanges {
    pub bounds: FRange,
    pub min_value: f64,
    pub max_value: f64,
    /// `max_value - min_value` once computed; zero means "no spread".
    pub range: f64,
    /// View-specific tuning values; opaque to the base layer.
    pub tuning: [f64; 4],
}

impl Default for StarRanges {
    fn default() -> Self {
        Self {
            bounds: FRange::default(),
            min_value: 0.0,
            max_value: 1.0,
            range: 0.0,
            tuning: [0.0; 4],
        }
    }
}

impl StarRanges {
    /// Map a star value into [0, 1] relative to the cached spread.
    ///
    /// With no spread every star is treated as fully bright.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.range > 0.0 {
            ((value - self.min_value) / self.range).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_empty() {
        let range = FRange::default();
        assert!(range.is_empty());
        assert!(range.min.cmpgt(range.max).all());
    }

    #[test]
    fn test_expand_tracks_extremes() {
        let mut range = FRange::default();
        range.expand(DVec3::new(1.0, -2.0, 3.0));
        range.expand(DVec3::new(-1.0, 4.0, 0.5));
        assert!(!range.is_empty());
        assert_eq!(range.min, DVec3::new(-1.0, -2.0, 0.5));
        assert_eq!(range.max, DVec3::new(1.0, 4.0, 3.0));

        range.reset();
        assert!(range.is_empty());
    }

    #[test]
    fn test_single_point_range() {
        let mut range = FRange::default();
        range.expand(DVec3::ONE);
        assert!(!range.is_empty());
        assert_eq!(range.min, range.max);
    }

    #[test]
    fn test_normalize() {
        let ranges = StarRanges {
            min_value: 2.0,
            max_value: 6.0,
            range: 4.0,
            ..StarRanges::default()
        };
        assert_eq!(ranges.normalize(2.0), 0.0);
        assert_eq!(ranges.normalize(4.0), 0.5);
        assert_eq!(ranges.normalize(100.0), 1.0);
        assert_eq!(StarRanges::default().normalize(-3.0), 1.0);
    }
}
