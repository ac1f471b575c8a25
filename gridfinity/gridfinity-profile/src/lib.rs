//! Cross-section profiles and hole placement for Gridfinity bins.
//!
//! Each module turns a bin's dimension (and, for per-row features, its wall
//! thickness and row index) into plain geometric descriptions: rounded
//! rectangles, polygons, coves and boxes. Nothing here talks to a geometry
//! kernel; the assembly crate feeds these descriptions to one.
//!
//! # Coordinates
//!
//! - `x` runs left to right, `y` front to back, `z` upward
//! - The footprint occupies `[0, x_mm] × [0, y_mm]`
//! - `z = 0` is the underside of the feet; the body starts at
//!   [`base::BASE_HEIGHT_MM`]
//!
//! # Modules
//!
//! - [`base`]: standard foot and tile grid
//! - [`mate`]: stacking lip, lofted or legacy tapered-cut
//! - [`ledge`]: label ledges
//! - [`scoop`]: finger scoops
//! - [`holes`]: magnet and screw holes
//! - [`sketch`]: the primitive shapes above are built from
//!
//! # Example
//!
//! ```
//! use gridfinity_profile::{base_tile, label_ledges, stacking_lip};
//! use gridfinity_types::GridDimension;
//!
//! let dim = GridDimension::new(2, 1, 2).unwrap();
//!
//! assert!((base_tile().height() - 5.0).abs() < 1e-9);
//! assert_eq!(stacking_lip(dim).sections.len(), 6);
//!
//! // A 2-unit bin is too low for a full ledge
//! assert!(label_ledges(dim, 0.8)[0].is_truncated());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod base;
pub mod holes;
pub mod ledge;
pub mod mate;
pub mod scoop;
pub mod sketch;

pub use base::{BaseTile, base_tile, body_box, body_top, footprint, tile_centers};
pub use holes::{
    HoleKind, HoleOrientation, HolePattern, TileHoles, hole_positions, tile_hole_offsets,
};
pub use ledge::{LabelLedge, label_ledge, label_ledges};
pub use mate::{LegacyLip, LipStyle, StackingLip, legacy_lip, stacking_lip};
pub use scoop::{FingerScoop, finger_scoop, finger_scoops};
pub use sketch::{Polygon, Profile, QuarterCove, RoundedBox, RoundedRect, SketchPlane};
