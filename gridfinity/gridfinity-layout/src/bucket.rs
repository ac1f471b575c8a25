//! Positioned bucket rectangles.

use nalgebra::Point2;
use serde::Serialize;

/// One rectangular cavity of a partitioned bin.
///
/// Position is measured from the front-left corner of the footprint, with
/// y growing toward the back row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bucket {
    /// Zero-based row index, counted from the front.
    pub row: usize,
    /// Zero-based bucket index within the row, counted from the left.
    pub column: usize,
    /// Left edge in mm.
    pub x_origin: f64,
    /// Front edge in mm.
    pub y_origin: f64,
    /// Extent along x in mm.
    pub width_mm: f64,
    /// Extent along y in mm.
    pub height_mm: f64,
    /// Vertical corner radius in mm.
    pub corner_radius_mm: f64,
}

impl Bucket {
    /// Right edge in mm.
    #[must_use]
    pub fn x_end(&self) -> f64 {
        self.x_origin + self.width_mm
    }

    /// Back edge in mm.
    #[must_use]
    pub fn y_end(&self) -> f64 {
        self.y_origin + self.height_mm
    }

    /// Centre of the bucket in footprint coordinates.
    #[must_use]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            self.x_origin + self.width_mm / 2.0,
            self.y_origin + self.height_mm / 2.0,
        )
    }

    /// Whether two buckets share any interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x_origin < other.x_end()
            && other.x_origin < self.x_end()
            && self.y_origin < other.y_end()
            && other.y_origin < self.y_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bucket(x: f64, y: f64, w: f64, h: f64) -> Bucket {
        Bucket {
            row: 0,
            column: 0,
            x_origin: x,
            y_origin: y,
            width_mm: w,
            height_mm: h,
            corner_radius_mm: 2.95,
        }
    }

    #[test]
    fn test_extents() {
        let b = bucket(0.8, 0.8, 10.0, 20.0);
        assert_relative_eq!(b.x_end(), 10.8);
        assert_relative_eq!(b.y_end(), 20.8);
        assert_relative_eq!(b.center().x, 5.8);
    }

    #[test]
    fn test_overlap() {
        let a = bucket(0.0, 0.0, 10.0, 10.0);
        let touching = bucket(10.0, 0.0, 10.0, 10.0);
        let inside = bucket(5.0, 5.0, 2.0, 2.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }
}
