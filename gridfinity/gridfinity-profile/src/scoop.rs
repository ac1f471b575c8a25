//! Finger scoop profiles.
//!
//! A scoop fills the corner between a row's front wall and the cavity floor
//! with a concave cove so small parts can be slid out with a fingertip.

use gridfinity_layout::RowStepping;
use gridfinity_types::GridDimension;
use gridfinity_types::standard::FLOOR_THICKNESS_MM;
use nalgebra::Point2;
use serde::Serialize;

use crate::base::BASE_HEIGHT_MM;
use crate::sketch::{QuarterCove, SketchPlane};

/// Extra setback of the front row's scoop, in mm.
pub const SCOOP_FIRST_ROW_INSET_MM: f64 = 1.6;

/// Scoop radius as a fraction of body height.
pub const SCOOP_HEIGHT_FRACTION: f64 = 0.3;

/// Scoop radius as a fraction of row depth.
pub const SCOOP_DEPTH_FRACTION: f64 = 0.9;

/// Scoop profile for one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FingerScoop {
    /// Row index, counted from the front.
    pub row: usize,
    /// Plane the cove is drawn on.
    pub plane: SketchPlane,
    /// Cove in `(y, z)` coordinates.
    pub cove: QuarterCove,
    /// Extrusion length along `+x` in mm.
    pub extrude_length: f64,
}

/// Scoop radius for a bin, in mm.
///
/// Limited by body height and by row depth so a scoop never fills a row.
#[must_use]
pub fn scoop_radius(dimension: GridDimension, wall_thickness: f64) -> f64 {
    let depth = RowStepping::new(dimension, wall_thickness).depth();
    (SCOOP_HEIGHT_FRACTION * dimension.z_mm()).min(SCOOP_DEPTH_FRACTION * depth)
}

/// Build the finger scoop for one row.
///
/// # Example
///
/// ```
/// use gridfinity_profile::scoop::finger_scoop;
/// use gridfinity_types::GridDimension;
///
/// let dim = GridDimension::new(1, 2, 3).unwrap();
/// let scoop = finger_scoop(dim, 0.8, 1);
/// // 0.3 * (3 * 7 - 5.6)
/// assert!((scoop.cove.radius - 4.62).abs() < 1e-9);
/// ```
#[must_use]
pub fn finger_scoop(dimension: GridDimension, wall_thickness: f64, row: usize) -> FingerScoop {
    let stepping = RowStepping::new(dimension, wall_thickness);
    debug_assert!(row < stepping.rows());
    let setback = if row == 0 {
        SCOOP_FIRST_ROW_INSET_MM
    } else {
        0.0
    };

    let cove = QuarterCove {
        corner: Point2::new(
            stepping.front(row) + setback,
            BASE_HEIGHT_MM + FLOOR_THICKNESS_MM,
        ),
        radius: scoop_radius(dimension, wall_thickness),
    };

    FingerScoop {
        row,
        plane: SketchPlane::Yz { x: wall_thickness },
        cove,
        extrude_length: dimension.x_mm() - 2.0 * wall_thickness,
    }
}

/// Build the finger scoops for every row, front first.
#[must_use]
pub fn finger_scoops(dimension: GridDimension, wall_thickness: f64) -> Vec<FingerScoop> {
    let rows = RowStepping::new(dimension, wall_thickness).rows();
    (0..rows)
        .map(|row| finger_scoop(dimension, wall_thickness, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_radius_limited_by_height() {
        // z_mm = 3 * 7 - 5.6 = 15.4
        let dim = GridDimension::new(1, 1, 3).unwrap();
        assert_relative_eq!(scoop_radius(dim, 0.8), 0.3 * 15.4, epsilon = 1e-12);
    }

    #[test]
    fn test_radius_limited_by_depth() {
        // Row depth (41.5 - 1.6) = 39.9, tall bin so 0.9 * depth wins
        let dim = GridDimension::new(1, 1, 30).unwrap();
        assert_relative_eq!(scoop_radius(dim, 0.8), 0.9 * 39.9, epsilon = 1e-9);
    }

    #[test]
    fn test_scoops_sit_on_floor_at_row_fronts() {
        let dim = GridDimension::new(2, 3, 5).unwrap();
        let stepping = RowStepping::new(dim, 0.8);
        let scoops = finger_scoops(dim, 0.8);

        assert_eq!(scoops.len(), 3);
        assert_relative_eq!(scoops[0].cove.corner.x, 0.8 + 1.6, epsilon = 1e-12);
        assert_relative_eq!(scoops[1].cove.corner.x, stepping.front(1));
        assert_relative_eq!(scoops[2].cove.corner.x, stepping.front(2));
        for scoop in &scoops {
            assert_relative_eq!(scoop.cove.corner.y, 7.0);
            assert_relative_eq!(scoop.extrude_length, dim.x_mm() - 1.6, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_all_rows_share_radius() {
        let dim = GridDimension::new(1, 4, 6).unwrap();
        let scoops = finger_scoops(dim, 1.2);
        let r = scoops[0].cove.radius;
        assert!(scoops.iter().all(|s| s.cove.radius.to_bits() == r.to_bits()));
    }
}
