//! The validated design input for one bin.

use serde::{Deserialize, Serialize};

use crate::dimension::GridDimension;
use crate::divisions::Divisions;
use crate::error::{BinError, BinResult};
use crate::standard::DEFAULT_WALL_THICKNESS_MM;

/// Optional features of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Cut a concave scoop at the front of every row.
    pub draw_finger_scoop: bool,
    /// Add an angled label shelf at the back of every row.
    pub draw_label_ledge: bool,
    /// Cut magnet pockets into each base tile.
    pub make_magnet_hole: bool,
    /// Cut counterbored screw holes into the base underside.
    pub make_screw_hole: bool,
}

impl FeatureFlags {
    /// All features enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            draw_finger_scoop: true,
            draw_label_ledge: true,
            make_magnet_hole: true,
            make_screw_hole: true,
        }
    }

    /// Name tokens of the enabled features in canonical order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.draw_finger_scoop, "finger-scoop"),
            (self.draw_label_ledge, "label-ledge"),
            (self.make_magnet_hole, "magnet-holes"),
            (self.make_screw_hole, "screw-holes"),
        ]
        .into_iter()
        .filter_map(|(enabled, token)| enabled.then_some(token))
    }
}

/// Check that a wall thickness is a finite positive length.
///
/// # Errors
///
/// Returns [`BinError::InvalidWallThickness`] otherwise.
pub fn validate_wall_thickness(wall_thickness: f64) -> BinResult<()> {
    if wall_thickness.is_finite() && wall_thickness > 0.0 {
        Ok(())
    } else {
        Err(BinError::InvalidWallThickness(wall_thickness))
    }
}

/// Full design input for one bin.
///
/// Immutable once constructed: every invariant is checked in
/// [`Properties::new`], so downstream stages never see invalid input.
///
/// # Example
///
/// ```
/// use gridfinity_types::{Divisions, FeatureFlags, GridDimension, Properties};
///
/// let dimension = GridDimension::new(2, 3, 4).unwrap();
///
/// // Two rows for a three-unit-deep bin
/// let result = Properties::new(dimension, Divisions::from_counts([1, 1]), 0.8, FeatureFlags::default());
/// assert!(result.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Properties {
    dimension: GridDimension,
    divisions: Divisions,
    wall_thickness: f64,
    features: FeatureFlags,
}

impl Properties {
    /// Create validated properties.
    ///
    /// # Errors
    ///
    /// - [`BinError::RowCountMismatch`] if `divisions.len() != dimension.y()`
    /// - [`BinError::InvalidDivision`] if a row cannot be partitioned
    /// - [`BinError::InvalidWallThickness`] if the wall is not a positive length
    pub fn new(
        dimension: GridDimension,
        divisions: Divisions,
        wall_thickness: f64,
        features: FeatureFlags,
    ) -> BinResult<Self> {
        divisions.validate(dimension.y())?;
        validate_wall_thickness(wall_thickness)?;
        Ok(Self {
            dimension,
            divisions,
            wall_thickness,
            features,
        })
    }

    /// Start a builder for the given dimension.
    #[must_use]
    pub fn builder(dimension: GridDimension) -> PropertiesBuilder {
        PropertiesBuilder::new(dimension)
    }

    /// Bin dimension.
    #[must_use]
    pub const fn dimension(&self) -> GridDimension {
        self.dimension
    }

    /// Partition rows.
    #[must_use]
    pub const fn divisions(&self) -> &Divisions {
        &self.divisions
    }

    /// Wall thickness in mm.
    #[must_use]
    pub const fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    /// Feature flags.
    #[must_use]
    pub const fn features(&self) -> FeatureFlags {
        self.features
    }

    /// Deterministic descriptive name.
    ///
    /// Encodes the dimension, wall thickness and each enabled feature in
    /// canonical order. Used for file naming, not for identity.
    ///
    /// # Example
    ///
    /// ```
    /// use gridfinity_types::{Divisions, FeatureFlags, GridDimension, Properties};
    ///
    /// let dimension = GridDimension::new(2, 1, 3).unwrap();
    /// let features = FeatureFlags { draw_label_ledge: true, make_screw_hole: true, ..Default::default() };
    /// let props = Properties::new(dimension, Divisions::single(1), 1.2, features).unwrap();
    ///
    /// assert_eq!(props.describe(), "gridfinity-2x1x3-w1.2-label-ledge-screw-holes");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        std::iter::once(format!(
            "gridfinity-{}-w{}",
            self.dimension, self.wall_thickness
        ))
        .chain(self.features.tokens().map(str::to_string))
        .collect::<Vec<_>>()
        .join("-")
    }
}

/// Fluent builder for [`Properties`].
///
/// Divisions default to one undivided bucket per row and the wall to
/// 0.8 mm. Validation happens in [`PropertiesBuilder::build`].
#[derive(Debug, Clone)]
pub struct PropertiesBuilder {
    dimension: GridDimension,
    divisions: Option<Divisions>,
    wall_thickness: f64,
    features: FeatureFlags,
}

impl PropertiesBuilder {
    /// Create a builder for the given dimension.
    #[must_use]
    pub const fn new(dimension: GridDimension) -> Self {
        Self {
            dimension,
            divisions: None,
            wall_thickness: DEFAULT_WALL_THICKNESS_MM,
            features: FeatureFlags {
                draw_finger_scoop: false,
                draw_label_ledge: false,
                make_magnet_hole: false,
                make_screw_hole: false,
            },
        }
    }

    /// Set the partition rows.
    #[must_use]
    pub fn divisions(mut self, divisions: Divisions) -> Self {
        self.divisions = Some(divisions);
        self
    }

    /// Set the wall thickness in mm.
    #[must_use]
    pub const fn wall_thickness(mut self, thickness: f64) -> Self {
        self.wall_thickness = thickness;
        self
    }

    /// Replace all feature flags.
    #[must_use]
    pub const fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Enable the finger scoop.
    #[must_use]
    pub const fn finger_scoop(mut self, enable: bool) -> Self {
        self.features.draw_finger_scoop = enable;
        self
    }

    /// Enable the label ledge.
    #[must_use]
    pub const fn label_ledge(mut self, enable: bool) -> Self {
        self.features.draw_label_ledge = enable;
        self
    }

    /// Enable magnet holes.
    #[must_use]
    pub const fn magnet_holes(mut self, enable: bool) -> Self {
        self.features.make_magnet_hole = enable;
        self
    }

    /// Enable screw holes.
    #[must_use]
    pub const fn screw_holes(mut self, enable: bool) -> Self {
        self.features.make_screw_hole = enable;
        self
    }

    /// Validate and build.
    ///
    /// # Errors
    ///
    /// See [`Properties::new`].
    pub fn build(self) -> BinResult<Properties> {
        let divisions = self
            .divisions
            .unwrap_or_else(|| Divisions::single(self.dimension.y()));
        Properties::new(
            self.dimension,
            divisions,
            self.wall_thickness,
            self.features,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divisions::Row;

    fn dim(x: u32, y: u32, z: u32) -> GridDimension {
        GridDimension::new(x, y, z).unwrap()
    }

    #[test]
    fn test_row_count_mismatch() {
        let result = Properties::new(
            dim(2, 3, 4),
            Divisions::from_counts([1, 1]),
            0.8,
            FeatureFlags::default(),
        );
        assert!(matches!(result, Err(BinError::RowCountMismatch { .. })));
    }

    #[test]
    fn test_wall_thickness_validated() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Properties::new(
                dim(1, 1, 3),
                Divisions::single(1),
                bad,
                FeatureFlags::default(),
            );
            assert!(matches!(result, Err(BinError::InvalidWallThickness(_))));
        }
    }

    #[test]
    fn test_describe_plain() {
        let props = Properties::new(
            dim(2, 3, 4),
            Divisions::single(3),
            0.8,
            FeatureFlags::default(),
        )
        .unwrap();
        assert_eq!(props.describe(), "gridfinity-2x3x4-w0.8");
    }

    #[test]
    fn test_describe_token_order() {
        let props = Properties::new(dim(1, 1, 7), Divisions::single(1), 0.8, FeatureFlags::all())
            .unwrap();
        assert_eq!(
            props.describe(),
            "gridfinity-1x1x7-w0.8-finger-scoop-label-ledge-magnet-holes-screw-holes"
        );
    }

    #[test]
    fn test_describe_is_deterministic() {
        let make = || {
            Properties::builder(dim(3, 2, 5))
                .divisions(Divisions::new(vec![Row::Count(2), Row::Weights(vec![1.0, 3.0])]))
                .magnet_holes(true)
                .finger_scoop(true)
                .build()
                .unwrap()
        };
        assert_eq!(make().describe(), make().describe());
        assert_eq!(make().describe(), "gridfinity-3x2x5-w0.8-finger-scoop-magnet-holes");
    }

    #[test]
    fn test_builder_defaults() {
        let props = Properties::builder(dim(1, 2, 3)).build().unwrap();
        assert_eq!(props.divisions().len(), 2);
        assert!((props.wall_thickness() - DEFAULT_WALL_THICKNESS_MM).abs() < f64::EPSILON);
        assert_eq!(props.features(), FeatureFlags::default());
    }
}
