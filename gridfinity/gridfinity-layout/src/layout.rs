//! Bucket layout computation.

use gridfinity_types::standard::{MIN_BUCKET_WIDTH_MM, OUTER_CORNER_RADIUS_MM};
use gridfinity_types::{
    Advisory, BinResult, Divisions, GridDimension, Properties, validate_wall_thickness,
};
use tracing::{debug, warn};

use crate::bucket::Bucket;
use crate::rows::RowStepping;

/// Result of partitioning a bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    buckets: Vec<Bucket>,
    /// Index into `buckets` where each row starts, plus a final end index.
    row_bounds: Vec<usize>,
    stepping: RowStepping,
    advisories: Vec<Advisory>,
}

impl Layout {
    /// All buckets, row-major from the front-left.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_bounds.len().saturating_sub(1)
    }

    /// Buckets of one row, left to right.
    ///
    /// Returns an empty slice for an out-of-range row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Bucket] {
        match (self.row_bounds.get(row), self.row_bounds.get(row + 1)) {
            (Some(&start), Some(&end)) => &self.buckets[start..end],
            _ => &[],
        }
    }

    /// Iterate over rows, front first.
    pub fn rows(&self) -> impl Iterator<Item = &[Bucket]> {
        self.row_bounds
            .windows(2)
            .map(|w| &self.buckets[w[0]..w[1]])
    }

    /// Row stepping used for this layout.
    #[must_use]
    pub const fn stepping(&self) -> RowStepping {
        self.stepping
    }

    /// Advisories raised while partitioning.
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Whether the layout raised no advisories.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.advisories.is_empty()
    }
}

/// Partition a bin footprint into buckets.
///
/// Inputs are validated the same way [`Properties::new`] validates them, so
/// this can be called directly without building a `Properties`.
///
/// # Errors
///
/// Returns an error if the divisions do not have one row per y grid unit,
/// a row cannot be partitioned, or the wall thickness is not positive.
pub fn layout(
    dimension: GridDimension,
    divisions: &Divisions,
    wall_thickness: f64,
) -> BinResult<Layout> {
    divisions.validate(dimension.y())?;
    validate_wall_thickness(wall_thickness)?;
    Ok(compute(dimension, divisions, wall_thickness))
}

/// Partition the footprint described by validated properties.
#[must_use]
pub fn layout_properties(props: &Properties) -> Layout {
    compute(props.dimension(), props.divisions(), props.wall_thickness())
}

/// Bucket corner radius: the outer radius less one wall, never negative.
fn corner_radius(wall_thickness: f64) -> f64 {
    (OUTER_CORNER_RADIUS_MM - wall_thickness).max(0.0)
}

fn compute(dimension: GridDimension, divisions: &Divisions, wall_thickness: f64) -> Layout {
    let stepping = RowStepping::new(dimension, wall_thickness);
    let radius = corner_radius(wall_thickness);
    let x_mm = dimension.x_mm();

    let mut buckets = Vec::with_capacity(divisions.bucket_count());
    let mut row_bounds = Vec::with_capacity(divisions.len() + 1);
    let mut advisories = Vec::new();

    for (row_index, row) in divisions.rows().iter().enumerate() {
        row_bounds.push(buckets.len());

        let weights = row.weights();
        // Scaled by the largest weight so the sum stays finite
        let largest = weights.iter().copied().fold(0.0, f64::max);
        let total: f64 = weights.iter().map(|w| w / largest).sum();
        #[allow(clippy::cast_precision_loss)]
        let available = x_mm - (weights.len() + 1) as f64 * wall_thickness;
        let y_origin = stepping.front(row_index);

        let mut x_origin = wall_thickness;
        for (column, weight) in weights.iter().enumerate() {
            let width = weight / largest / total * available;

            if width <= MIN_BUCKET_WIDTH_MM {
                let advisory = Advisory::SmallBucket {
                    row: row_index,
                    column,
                    width_mm: width,
                };
                warn!("{advisory}");
                advisories.push(advisory);
            }

            buckets.push(Bucket {
                row: row_index,
                column,
                x_origin,
                y_origin,
                width_mm: width,
                height_mm: stepping.depth(),
                corner_radius_mm: radius,
            });
            x_origin += width + wall_thickness;
        }
    }
    row_bounds.push(buckets.len());

    debug!(
        buckets = buckets.len(),
        rows = stepping.rows(),
        advisories = advisories.len(),
        "Computed bucket layout"
    );

    Layout {
        buckets,
        row_bounds,
        stepping,
        advisories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gridfinity_types::{BinError, FeatureFlags, Row};

    fn dim(x: u32, y: u32, z: u32) -> GridDimension {
        GridDimension::new(x, y, z).unwrap()
    }

    #[test]
    fn test_single_bucket_spans_footprint() {
        let result = layout(dim(1, 1, 7), &Divisions::single(1), 0.8).unwrap();
        assert_eq!(result.buckets().len(), 1);

        let b = result.buckets()[0];
        assert_relative_eq!(b.width_mm, 41.5 - 1.6, epsilon = 1e-9);
        assert_relative_eq!(b.height_mm, 41.5 - 1.6, epsilon = 1e-9);
        assert_relative_eq!(b.x_origin, 0.8);
        assert_relative_eq!(b.y_origin, 0.8);
        // Centered on the footprint
        assert_relative_eq!(b.center().x, 41.5 / 2.0, epsilon = 1e-9);
        assert_relative_eq!(b.center().y, 41.5 / 2.0, epsilon = 1e-9);
        assert!(result.is_clear());
    }

    #[test]
    fn test_weighted_row() {
        let divisions = Divisions::new(vec![Row::Weights(vec![2.0, 1.0])]);
        let result = layout(dim(1, 1, 3), &divisions, 0.8).unwrap();
        let row = result.row(0);

        assert_eq!(row.len(), 2);
        assert_relative_eq!(row[0].width_mm / row[1].width_mm, 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            row[0].width_mm + row[1].width_mm + 3.0 * 0.8,
            41.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(row[1].x_origin, row[0].x_end() + 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_row_major_order() {
        let divisions = Divisions::from_counts([2, 3]);
        let result = layout(dim(2, 2, 3), &divisions, 1.0).unwrap();

        let order: Vec<(usize, usize)> = result.buckets().iter().map(|b| (b.row, b.column)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.rows().count(), 2);
        assert!(result.row(2).is_empty());

        let front = result.row(0)[0];
        let back = result.row(1)[0];
        assert_relative_eq!(back.y_origin, front.y_end() + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_huge_weights_still_tile_width() {
        // Each weight is finite but their plain sum overflows
        let divisions = Divisions::new(vec![Row::Weights(vec![f64::MAX, f64::MAX])]);
        let result = layout(dim(1, 1, 3), &divisions, 0.8).unwrap();
        let row = result.row(0);

        assert_relative_eq!(row[0].width_mm, (41.5 - 2.4) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(row[0].width_mm, row[1].width_mm);
        assert_relative_eq!(row[1].x_end() + 0.8, 41.5, epsilon = 1e-9);
    }

    #[test]
    fn test_corner_radius_floor() {
        assert_relative_eq!(corner_radius(0.8), 2.95, epsilon = 1e-12);
        assert_relative_eq!(corner_radius(3.75), 0.0);
        assert_relative_eq!(corner_radius(5.0), 0.0);
    }

    #[test]
    fn test_small_bucket_advisory() {
        // 41.5 - 5 * 0.8 = 37.5 shared by 4 buckets
        let result = layout(dim(1, 1, 3), &Divisions::from_counts([4]), 0.8).unwrap();
        assert_eq!(result.buckets().len(), 4);
        assert_eq!(result.advisories().len(), 4);
        assert!(matches!(
            result.advisories()[0],
            Advisory::SmallBucket { row: 0, column: 0, .. }
        ));
    }

    #[test]
    fn test_advisory_only_for_narrow_buckets() {
        // (41.5 - 2.4) / 2 = 19.55 mm each
        let wide = layout(dim(1, 1, 3), &Divisions::from_counts([2]), 0.8).unwrap();
        assert!(wide.is_clear());

        // Weights 3:1 leave the right bucket at 9.775 mm
        let divisions = Divisions::new(vec![Row::Weights(vec![3.0, 1.0])]);
        let skewed = layout(dim(1, 1, 3), &divisions, 0.8).unwrap();
        assert_eq!(skewed.advisories().len(), 1);
        assert!(matches!(
            skewed.advisories()[0],
            Advisory::SmallBucket { column: 1, .. }
        ));
    }

    #[test]
    fn test_layout_validates_inputs() {
        let err = layout(dim(2, 3, 4), &Divisions::from_counts([1, 1]), 0.8);
        assert!(matches!(err, Err(BinError::RowCountMismatch { .. })));

        let err = layout(dim(1, 1, 3), &Divisions::from_counts([0]), 0.8);
        assert!(matches!(err, Err(BinError::InvalidDivision { .. })));

        let err = layout(dim(1, 1, 3), &Divisions::single(1), 0.0);
        assert!(matches!(err, Err(BinError::InvalidWallThickness(_))));
    }

    #[test]
    fn test_layout_properties_matches_layout() {
        let props = Properties::new(
            dim(3, 2, 4),
            Divisions::new(vec![Row::Count(3), Row::Weights(vec![1.0, 2.0, 1.0])]),
            1.2,
            FeatureFlags::default(),
        )
        .unwrap();
        let direct = layout(props.dimension(), props.divisions(), props.wall_thickness()).unwrap();
        assert_eq!(layout_properties(&props), direct);
    }
}
