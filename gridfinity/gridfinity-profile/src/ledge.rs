//! Label ledge profiles.
//!
//! A label ledge is a shelf hanging from the top of each row's back wall,
//! sized for a standard label insert. Its underside is cut at 45 degrees so
//! it prints without support. When the bin is too low for the full 45 degree
//! underside the ledge is truncated with a flat bottom.
//!
//! Profiles are drawn on the `yz` plane at the inner left wall and extruded
//! across the interior width.

use gridfinity_layout::RowStepping;
use gridfinity_types::standard::FLOOR_THICKNESS_MM;
use gridfinity_types::{Advisory, GridDimension};
use nalgebra::Point2;
use serde::Serialize;
use tracing::debug;

use crate::base::body_top;
use crate::sketch::{Polygon, SketchPlane};

/// Horizontal depth of a ledge in mm.
pub const LEDGE_LENGTH_MM: f64 = 12.0 + 0.75;

/// Extra depth given to the back row's ledge to clear the stacking lip, in mm.
pub const BACK_LEDGE_OFFSET_MM: f64 = 2.9;

/// Fillet on the ledge's front edge in mm.
pub const LEDGE_TIP_FILLET_MM: f64 = 0.6;

/// Ledge profile for one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelLedge {
    /// Row index, counted from the front.
    pub row: usize,
    /// Plane the outline is drawn on.
    pub plane: SketchPlane,
    /// Closed outline in `(y, z)` coordinates.
    pub outline: Polygon,
    /// Extrusion length along `+x` in mm.
    pub extrude_length: f64,
    /// Vertical extent of the ledge in mm.
    pub height: f64,
    /// Horizontal extent of the ledge in mm.
    pub run: f64,
}

impl LabelLedge {
    /// Whether the underside had to be flattened for lack of height.
    ///
    /// Only a clearance below [`LEDGE_LENGTH_MM`] truncates; the back row's
    /// extra offset never does.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.height < LEDGE_LENGTH_MM
    }

    /// Advisory for a truncated ledge, if any.
    #[must_use]
    pub fn advisory(&self) -> Option<Advisory> {
        self.is_truncated().then_some(Advisory::LabelLedgeTruncated {
            row: self.row,
            height_mm: self.height,
            run_mm: self.run,
        })
    }
}

/// Vertical room available for a ledge in mm.
///
/// Body height less the cavity floor and one wall. Negative when the wall
/// is thicker than the body leaves room for.
#[must_use]
pub fn ledge_clearance(dimension: GridDimension, wall_thickness: f64) -> f64 {
    dimension.z_mm() - FLOOR_THICKNESS_MM - wall_thickness
}

/// Build the label ledge for one row.
///
/// The ledge hangs from the row's back wall. The back row reaches a further
/// [`BACK_LEDGE_OFFSET_MM`] forward and may be taller by the same amount.
///
/// Returns `None` when there is no clearance at all; a ledge of zero
/// height would hang above the body.
#[must_use]
pub fn label_ledge(
    dimension: GridDimension,
    wall_thickness: f64,
    row: usize,
) -> Option<LabelLedge> {
    let stepping = RowStepping::new(dimension, wall_thickness);
    debug_assert!(row < stepping.rows());

    let max_height = ledge_clearance(dimension, wall_thickness);
    if max_height <= 0.0 {
        debug!(row, clearance = max_height, "No room for label ledge");
        return None;
    }

    let offset = if stepping.is_last(row) {
        BACK_LEDGE_OFFSET_MM
    } else {
        0.0
    };
    let run = LEDGE_LENGTH_MM + offset;
    let height = max_height.min(run);

    let back = stepping.back(row);
    let top = body_top(dimension);

    let mut vertices = vec![
        Point2::new(back, top - height),
        Point2::new(back, top),
        Point2::new(back - run, top),
    ];
    if height < LEDGE_LENGTH_MM {
        debug!(row, height, run, "Label ledge truncated");
        vertices.push(Point2::new(back - run + height, top - height));
    }
    let outline = Polygon::new(vertices).with_fillet(2, LEDGE_TIP_FILLET_MM);

    Some(LabelLedge {
        row,
        plane: SketchPlane::Yz { x: wall_thickness },
        outline,
        extrude_length: dimension.x_mm() - 2.0 * wall_thickness,
        height,
        run,
    })
}

/// Build the label ledges for every row that has room, front first.
#[must_use]
pub fn label_ledges(dimension: GridDimension, wall_thickness: f64) -> Vec<LabelLedge> {
    let rows = RowStepping::new(dimension, wall_thickness).rows();
    (0..rows)
        .filter_map(|row| label_ledge(dimension, wall_thickness, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_height_ledges() {
        // z_mm = 8 * 7 - 5.6 = 50.4, plenty of room
        let dim = GridDimension::new(1, 3, 8).unwrap();
        let ledges = label_ledges(dim, 0.8);

        assert_eq!(ledges.len(), 3);
        assert_relative_eq!(ledges[0].height, 12.75);
        assert_relative_eq!(ledges[1].height, 12.75);
        assert_relative_eq!(ledges[2].height, 15.65, epsilon = 1e-12);
        assert!(ledges.iter().all(|l| !l.is_truncated()));
        assert_eq!(ledges[0].outline.vertices.len(), 3);
    }

    #[test]
    fn test_back_row_height_is_clamped() {
        // z_mm = 4 * 7 - 5.6 = 22.4, clearance 22.4 - 2 - 0.8 = 19.6
        let dim = GridDimension::new(2, 2, 4).unwrap();
        let max_height = ledge_clearance(dim, 0.8);
        let ledge = label_ledge(dim, 0.8, 1).unwrap();
        assert_relative_eq!(ledge.height, max_height.min(15.65));
        assert_relative_eq!(ledge.height, 15.65, epsilon = 1e-12);
    }

    #[test]
    fn test_back_row_between_length_and_offset_run() {
        // z_mm = 4 * 7 - 5.6 = 22.4, clearance 22.4 - 2 - 5 = 15.4
        let dim = GridDimension::new(1, 1, 4).unwrap();
        let ledge = label_ledge(dim, 5.0, 0).unwrap();

        assert_relative_eq!(ledge.height, 15.4, epsilon = 1e-12);
        assert_relative_eq!(ledge.run, 15.65, epsilon = 1e-12);
        assert!(!ledge.is_truncated());
        assert!(ledge.advisory().is_none());
        assert_eq!(ledge.outline.vertices.len(), 3);
    }

    #[test]
    fn test_truncated_ledge() {
        // z_mm = 2 * 7 - 5.6 = 8.4, clearance 8.4 - 2 - 0.8 = 5.6
        let dim = GridDimension::new(1, 1, 2).unwrap();
        let ledge = label_ledge(dim, 0.8, 0).unwrap();

        assert!(ledge.is_truncated());
        assert_relative_eq!(ledge.height, 5.6, epsilon = 1e-12);
        assert_eq!(ledge.outline.vertices.len(), 4);

        // Flat bottom at the truncated height, 45 degree underside before it
        let v = &ledge.outline.vertices;
        assert_relative_eq!(v[3].y, v[0].y, epsilon = 1e-12);
        assert_relative_eq!(v[3].x - v[2].x, v[1].y - v[3].y, epsilon = 1e-12);

        assert!(matches!(
            ledge.advisory(),
            Some(Advisory::LabelLedgeTruncated { row: 0, .. })
        ));
    }

    #[test]
    fn test_no_ledge_without_clearance() {
        // z_mm = 8.4, clearance 8.4 - 2 - 7 = -0.6
        let dim = GridDimension::new(1, 1, 2).unwrap();
        assert!(ledge_clearance(dim, 7.0) < 0.0);
        assert!(label_ledge(dim, 7.0, 0).is_none());
        assert!(label_ledges(dim, 7.0).is_empty());
    }

    #[test]
    fn test_ledge_stays_below_body_top() {
        let top = body_top(GridDimension::new(1, 2, 2).unwrap());
        for wall in [0.4, 0.8, 2.0, 5.0, 6.39] {
            for ledge in label_ledges(GridDimension::new(1, 2, 2).unwrap(), wall) {
                assert!(ledge.height > 0.0);
                assert!(ledge.outline.vertices.iter().all(|v| v.y <= top));
            }
        }
    }

    #[test]
    fn test_ledge_aligned_with_row_back_wall() {
        let dim = GridDimension::new(2, 3, 6).unwrap();
        let stepping = RowStepping::new(dim, 1.2);
        for ledge in label_ledges(dim, 1.2) {
            let back = stepping.back(ledge.row);
            assert_relative_eq!(ledge.outline.vertices[0].x, back);
            assert_relative_eq!(ledge.outline.vertices[1].x, back);
            assert_relative_eq!(ledge.outline.vertices[1].y, body_top(dim));
        }
    }

    #[test]
    fn test_ledge_spans_interior() {
        let dim = GridDimension::new(2, 1, 6).unwrap();
        let ledge = label_ledge(dim, 0.8, 0).unwrap();
        assert_relative_eq!(ledge.extrude_length, 83.5 - 1.6, epsilon = 1e-12);
        assert_eq!(ledge.plane, SketchPlane::Yz { x: 0.8 });
        assert_eq!(ledge.outline.fillets.len(), 1);
        assert_eq!(ledge.outline.fillets[0].vertex, 2);
    }
}
