//! Row stepping shared by buckets and per-row features.
//!
//! Label ledges and finger scoops are positioned per row. They must use the
//! same stepping rule as the bucket layout so features stay aligned with
//! the cavities they decorate.

use gridfinity_types::GridDimension;

/// Uniform row depth and spacing along y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStepping {
    wall_thickness: f64,
    depth: f64,
    rows: usize,
}

impl RowStepping {
    /// Row stepping for a bin of this dimension and wall thickness.
    ///
    /// One row per y grid unit; `y_mm` is shared between the rows and
    /// `rows + 1` walls.
    #[must_use]
    pub fn new(dimension: GridDimension, wall_thickness: f64) -> Self {
        let rows = dimension.y() as usize;
        let walls = f64::from(dimension.y() + 1);
        let depth = (dimension.y_mm() - walls * wall_thickness) / f64::from(dimension.y());
        Self {
            wall_thickness,
            depth,
            rows,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Depth of every row in mm.
    #[must_use]
    pub const fn depth(&self) -> f64 {
        self.depth
    }

    /// Wall thickness in mm.
    #[must_use]
    pub const fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    /// Front edge of row `row` in mm.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn front(&self, row: usize) -> f64 {
        self.wall_thickness + row as f64 * (self.depth + self.wall_thickness)
    }

    /// Back edge of row `row` in mm.
    #[must_use]
    pub fn back(&self, row: usize) -> f64 {
        self.front(row) + self.depth
    }

    /// Whether `row` is the back-most row.
    #[must_use]
    pub const fn is_last(&self, row: usize) -> bool {
        row + 1 == self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_row() {
        let dim = GridDimension::new(1, 1, 3).unwrap();
        let rows = RowStepping::new(dim, 0.8);
        assert_eq!(rows.rows(), 1);
        assert_relative_eq!(rows.depth(), 41.5 - 1.6, epsilon = 1e-12);
        assert_relative_eq!(rows.front(0), 0.8);
        assert_relative_eq!(rows.back(0), 41.5 - 0.8, epsilon = 1e-12);
        assert!(rows.is_last(0));
    }

    #[test]
    fn test_rows_end_one_wall_before_back() {
        let dim = GridDimension::new(2, 3, 4).unwrap();
        let rows = RowStepping::new(dim, 1.2);
        assert_relative_eq!(rows.back(2) + 1.2, dim.y_mm(), epsilon = 1e-9);
        assert_relative_eq!(rows.front(1) - rows.back(0), 1.2, epsilon = 1e-12);
    }
}
