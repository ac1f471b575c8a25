//! Magnet and screw hole placement.
//!
//! Each base tile carries four holes on the corners of a 26 mm square
//! centred on the tile. Holes are drilled from the underside.

use gridfinity_types::GridDimension;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::base::tile_centers;

/// Side of the square the holes sit on, in mm.
pub const HOLE_SQUARE_MM: f64 = 26.0;

/// Magnet pocket diameter in mm.
pub const MAGNET_DIAMETER_MM: f64 = 6.5;
/// Magnet pocket depth in mm.
pub const MAGNET_DEPTH_MM: f64 = 2.4;

/// Screw shaft diameter in mm.
pub const SCREW_SHAFT_DIAMETER_MM: f64 = 3.0;
/// Screw counterbore diameter in mm.
pub const SCREW_HEAD_DIAMETER_MM: f64 = 6.5;
/// Screw counterbore depth in mm.
pub const SCREW_HEAD_DEPTH_MM: f64 = 2.4;
/// Screw hole depth in mm.
pub const SCREW_DEPTH_MM: f64 = 6.0;

/// Shape of a hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoleKind {
    /// Blind cylindrical pocket.
    Magnet {
        /// Pocket diameter in mm.
        diameter: f64,
        /// Pocket depth in mm.
        depth: f64,
    },
    /// Counterbored through-hole.
    Screw {
        /// Shaft diameter in mm.
        shaft_diameter: f64,
        /// Counterbore diameter in mm.
        head_diameter: f64,
        /// Counterbore depth in mm.
        head_depth: f64,
        /// Total depth in mm.
        depth: f64,
    },
}

impl HoleKind {
    /// Standard magnet pocket.
    #[must_use]
    pub const fn magnet() -> Self {
        Self::Magnet {
            diameter: MAGNET_DIAMETER_MM,
            depth: MAGNET_DEPTH_MM,
        }
    }

    /// Standard counterbored screw hole.
    #[must_use]
    pub const fn screw() -> Self {
        Self::Screw {
            shaft_diameter: SCREW_SHAFT_DIAMETER_MM,
            head_diameter: SCREW_HEAD_DIAMETER_MM,
            head_depth: SCREW_HEAD_DEPTH_MM,
            depth: SCREW_DEPTH_MM,
        }
    }

    /// Deepest point of the hole, in mm from the face it starts on.
    #[must_use]
    pub const fn depth(&self) -> f64 {
        match *self {
            Self::Magnet { depth, .. } | Self::Screw { depth, .. } => depth,
        }
    }
}

/// Direction holes are drilled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleOrientation {
    /// From the bottom face upward; the face normal is `-z`.
    #[default]
    Underside,
    /// From the top face downward; the face normal is `+z`.
    Top,
}

/// Hole centres for one base tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileHoles {
    /// Tile centre in footprint coordinates.
    pub tile_center: Point2<f64>,
    /// The four hole centres, counter-clockwise from front-left.
    pub corners: [Point2<f64>; 4],
}

/// A set of identical holes to cut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolePattern {
    /// Hole shape.
    pub kind: HoleKind,
    /// Drilling direction.
    pub orientation: HoleOrientation,
    /// Hole centres.
    pub positions: Vec<Point2<f64>>,
}

impl HolePattern {
    /// Magnet pockets on a single tile centred on the origin.
    #[must_use]
    pub fn magnets_on_tile() -> Self {
        Self {
            kind: HoleKind::magnet(),
            orientation: HoleOrientation::Underside,
            positions: tile_hole_offsets()
                .iter()
                .map(|offset| Point2::origin() + offset)
                .collect(),
        }
    }

    /// Screw holes under every tile of a bin.
    #[must_use]
    pub fn screws(dimension: GridDimension) -> Self {
        Self {
            kind: HoleKind::screw(),
            orientation: HoleOrientation::Underside,
            positions: hole_positions(dimension)
                .iter()
                .flat_map(|tile| tile.corners)
                .collect(),
        }
    }

    /// Use a different drilling direction.
    #[must_use]
    pub fn with_orientation(mut self, orientation: HoleOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Number of holes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the pattern has no holes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Hole offsets relative to a tile centre, counter-clockwise from
/// front-left.
#[must_use]
pub fn tile_hole_offsets() -> [Vector2<f64>; 4] {
    let h = HOLE_SQUARE_MM / 2.0;
    [
        Vector2::new(-h, -h),
        Vector2::new(h, -h),
        Vector2::new(h, h),
        Vector2::new(-h, h),
    ]
}

/// Hole centres for every base tile of a bin, in tile order.
#[must_use]
pub fn hole_positions(dimension: GridDimension) -> Vec<TileHoles> {
    let offsets = tile_hole_offsets();
    tile_centers(dimension)
        .into_iter()
        .map(|tile_center| TileHoles {
            tile_center,
            corners: offsets.map(|offset| tile_center + offset),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_offsets_on_square() {
        for offset in tile_hole_offsets() {
            assert_relative_eq!(offset.x.abs(), 13.0);
            assert_relative_eq!(offset.y.abs(), 13.0);
        }
    }

    #[test]
    fn test_positions_per_tile() {
        let dim = GridDimension::new(3, 2, 4).unwrap();
        let tiles = hole_positions(dim);
        assert_eq!(tiles.len(), 6);
        for tile in &tiles {
            for corner in tile.corners {
                let d = corner - tile.tile_center;
                assert_relative_eq!(d.x.abs(), 13.0, epsilon = 1e-9);
                assert_relative_eq!(d.y.abs(), 13.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_single_tile_holes_inside_footprint() {
        let dim = GridDimension::new(1, 1, 3).unwrap();
        let tile = hole_positions(dim)[0];
        assert_relative_eq!(tile.corners[0].x, 20.75 - 13.0);
        assert_relative_eq!(tile.corners[2].y, 20.75 + 13.0);
    }

    #[test]
    fn test_hole_kinds() {
        assert_eq!(
            HoleKind::magnet(),
            HoleKind::Magnet {
                diameter: 6.5,
                depth: 2.4
            }
        );
        assert_relative_eq!(HoleKind::screw().depth(), 6.0);
    }

    #[test]
    fn test_patterns() {
        let magnets = HolePattern::magnets_on_tile();
        assert_eq!(magnets.len(), 4);
        assert_eq!(magnets.orientation, HoleOrientation::Underside);

        let dim = GridDimension::new(2, 2, 3).unwrap();
        let screws = HolePattern::screws(dim).with_orientation(HoleOrientation::Top);
        assert_eq!(screws.len(), 16);
        assert_eq!(screws.orientation, HoleOrientation::Top);
    }
}
