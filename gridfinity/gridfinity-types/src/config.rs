//! Serde-facing bin configuration.

use serde::{Deserialize, Serialize};

use crate::dimension::GridDimension;
use crate::divisions::Divisions;
use crate::error::BinResult;
use crate::properties::{FeatureFlags, Properties};
use crate::standard::DEFAULT_WALL_THICKNESS_MM;

/// Unvalidated bin configuration as read from a file or command line.
///
/// Missing divisions default to one bucket per row, missing wall thickness
/// to 0.8 mm and missing flags to `false`.
///
/// # Example
///
/// ```
/// use gridfinity_types::BinConfig;
///
/// let config: BinConfig = serde_json::from_str(
///     r#"{ "x": 2, "y": 2, "z": 3, "divisions": [3, [2, 1]], "draw_label_ledge": true }"#,
/// ).unwrap();
///
/// let props = config.into_properties().unwrap();
/// assert_eq!(props.describe(), "gridfinity-2x2x3-w0.8-label-ledge");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinConfig {
    /// Width in grid units.
    pub x: u32,
    /// Depth in grid units.
    pub y: u32,
    /// Height in grid units.
    pub z: u32,
    /// Partition rows, front first.
    #[serde(default)]
    pub divisions: Option<Divisions>,
    /// Wall thickness in mm.
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f64,
    /// Feature flags.
    #[serde(flatten)]
    pub features: FeatureFlags,
}

const fn default_wall_thickness() -> f64 {
    DEFAULT_WALL_THICKNESS_MM
}

impl BinConfig {
    /// Create a configuration with default divisions, wall and features.
    #[must_use]
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self {
            x,
            y,
            z,
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

    /// Validate into [`Properties`].
    ///
    /// # Errors
    ///
    /// Any error from [`GridDimension::new`] or [`Properties::new`].
    pub fn into_properties(self) -> BinResult<Properties> {
        let dimension = GridDimension::new(self.x, self.y, self.z)?;
        let divisions = self
            .divisions
            .unwrap_or_else(|| Divisions::single(dimension.y()));
        Properties::new(dimension, divisions, self.wall_thickness, self.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BinError;

    #[test]
    fn test_defaults() {
        let config: BinConfig = serde_json::from_str(r#"{ "x": 1, "y": 3, "z": 2 }"#).unwrap();
        assert!(config.divisions.is_none());
        assert!((config.wall_thickness - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.features, FeatureFlags::default());

        let props = config.into_properties().unwrap();
        assert_eq!(props.divisions().len(), 3);
    }

    #[test]
    fn test_flags_flattened() {
        let config: BinConfig = serde_json::from_str(
            r#"{ "x": 1, "y": 1, "z": 2, "make_magnet_hole": true, "make_screw_hole": true }"#,
        )
        .unwrap();
        assert!(config.features.make_magnet_hole);
        assert!(config.features.make_screw_hole);
        assert!(!config.features.draw_finger_scoop);
    }

    #[test]
    fn test_invalid_config_surfaces_error() {
        let config = BinConfig::new(1, 1, 1);
        assert!(matches!(
            config.into_properties(),
            Err(BinError::InvalidDimension { .. })
        ));

        let mut config = BinConfig::new(2, 3, 4);
        config.divisions = Some(Divisions::from_counts([1, 1]));
        assert!(matches!(
            config.into_properties(),
            Err(BinError::RowCountMismatch { .. })
        ));
    }
}
