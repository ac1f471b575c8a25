//! Grid-unit dimensions and their millimeter extents.

use serde::{Deserialize, Serialize};

use crate::error::{BinError, BinResult};
use crate::standard::{
    BASE_CLEARANCE_MM, FOOTPRINT_CLEARANCE_MM, GRID_PITCH_MM, HEIGHT_UNIT_MM, MIN_HEIGHT_UNITS,
};

/// Bin size in grid units.
///
/// Width and depth are multiples of the 42 mm pitch, height is a multiple
/// of the 7 mm height unit.
///
/// # Example
///
/// ```
/// use gridfinity_types::GridDimension;
///
/// let dim = GridDimension::new(1, 1, 2).unwrap();
/// assert!((dim.x_mm() - 41.5).abs() < 1e-9);
///
/// assert!(GridDimension::new(1, 1, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridDimension {
    x: u32,
    y: u32,
    z: u32,
}

impl GridDimension {
    /// Create a validated dimension.
    ///
    /// # Errors
    ///
    /// Returns [`BinError::InvalidDimension`] if `x < 1`, `y < 1` or `z < 2`.
    pub fn new(x: u32, y: u32, z: u32) -> BinResult<Self> {
        if x < 1 || y < 1 {
            return Err(BinError::invalid_dimension(
                x,
                y,
                z,
                "width or length cannot be less than 1",
            ));
        }
        if z < MIN_HEIGHT_UNITS {
            return Err(BinError::invalid_dimension(
                x,
                y,
                z,
                "units high cannot be less than 2",
            ));
        }
        Ok(Self { x, y, z })
    }

    /// Width in grid units.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Depth in grid units. Equals the number of partition rows.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Height in grid units.
    #[must_use]
    pub const fn z(&self) -> u32 {
        self.z
    }

    /// Outer width in mm, including slip-fit clearance.
    #[must_use]
    pub fn x_mm(&self) -> f64 {
        f64::from(self.x) * GRID_PITCH_MM - FOOTPRINT_CLEARANCE_MM
    }

    /// Outer depth in mm, including slip-fit clearance.
    #[must_use]
    pub fn y_mm(&self) -> f64 {
        f64::from(self.y) * GRID_PITCH_MM - FOOTPRINT_CLEARANCE_MM
    }

    /// Body height in mm: the nominal height less the base clearance.
    ///
    /// This is the height of the partitioned box that sits on top of the
    /// base feet, and the reference for every feature profile.
    #[must_use]
    pub fn z_mm(&self) -> f64 {
        self.height_mm() - BASE_CLEARANCE_MM
    }

    /// Nominal height in mm (`z` height units).
    #[must_use]
    pub fn height_mm(&self) -> f64 {
        f64::from(self.z) * HEIGHT_UNIT_MM
    }

    /// Number of base tiles under the bin.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.x as usize * self.y as usize
    }
}

impl std::fmt::Display for GridDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

#[derive(Deserialize)]
struct RawDimension {
    x: u32,
    y: u32,
    z: u32,
}

impl<'de> Deserialize<'de> for GridDimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawDimension::deserialize(deserializer)?;
        Self::new(raw.x, raw.y, raw.z).map_err(serde::de::Error::custom)
    }
}
