//! Base tile and body profiles.
//!
//! Every bin stands on an `x × y` array of identical feet that register in a
//! baseplate. The partitioned body sits on top of the feet.

use gridfinity_types::GridDimension;
use gridfinity_types::standard::{GRID_PITCH_MM, OUTER_CORNER_RADIUS_MM};
use nalgebra::Point2;
use serde::Serialize;

use crate::sketch::{RoundedBox, RoundedRect};

/// Lower foot section side in mm.
pub const FOOT_LOWER_SIZE_MM: f64 = 36.7;
/// Lower foot section height in mm.
pub const FOOT_LOWER_HEIGHT_MM: f64 = 2.6;
/// Lower foot vertical corner radius in mm.
pub const FOOT_LOWER_RADIUS_MM: f64 = 1.6;
/// Chamfer at the very bottom of the foot in mm.
pub const FOOT_LOWER_CHAMFER_MM: f64 = 0.8;
/// Upper foot section side in mm.
pub const FOOT_UPPER_SIZE_MM: f64 = 41.5;
/// Upper foot section height in mm.
pub const FOOT_UPPER_HEIGHT_MM: f64 = 2.4;
/// Chamfer at the bottom of the upper section in mm.
///
/// Just under the section height so the kernel keeps a sliver of vertical
/// face to select.
pub const FOOT_UPPER_CHAMFER_MM: f64 = 2.4 - 0.000_001;
/// Total foot height; the body starts here, in mm.
pub const BASE_HEIGHT_MM: f64 = FOOT_LOWER_HEIGHT_MM + FOOT_UPPER_HEIGHT_MM;

/// The standard foot, centred on the origin, bottom at `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseTile {
    /// Narrow chamfered section that drops into the baseplate.
    pub lower: RoundedBox,
    /// Wide section that seats on the baseplate rim.
    pub upper: RoundedBox,
}

impl BaseTile {
    /// Total height in mm.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.upper.top_z()
    }
}

/// Build the standard base tile.
#[must_use]
pub fn base_tile() -> BaseTile {
    let lower = RoundedBox::new(
        RoundedRect::new(
            Point2::origin(),
            FOOT_LOWER_SIZE_MM,
            FOOT_LOWER_SIZE_MM,
            FOOT_LOWER_RADIUS_MM,
        ),
        0.0,
        FOOT_LOWER_HEIGHT_MM,
    )
    .with_bottom_chamfer(FOOT_LOWER_CHAMFER_MM);

    let upper = RoundedBox::new(
        RoundedRect::new(
            Point2::origin(),
            FOOT_UPPER_SIZE_MM,
            FOOT_UPPER_SIZE_MM,
            OUTER_CORNER_RADIUS_MM,
        ),
        FOOT_LOWER_HEIGHT_MM,
        FOOT_UPPER_HEIGHT_MM,
    )
    .with_bottom_chamfer(FOOT_UPPER_CHAMFER_MM);

    BaseTile { lower, upper }
}

/// Centres of the base tiles in footprint coordinates, row-major from the
/// front-left.
///
/// Tiles sit on the 42 mm pitch, centred on the footprint.
#[must_use]
pub fn tile_centers(dimension: GridDimension) -> Vec<Point2<f64>> {
    let cx = dimension.x_mm() / 2.0;
    let cy = dimension.y_mm() / 2.0;
    let half_x = f64::from(dimension.x() - 1) / 2.0;
    let half_y = f64::from(dimension.y() - 1) / 2.0;

    let mut centers = Vec::with_capacity(dimension.tile_count());
    for j in 0..dimension.y() {
        for i in 0..dimension.x() {
            centers.push(Point2::new(
                cx + (f64::from(i) - half_x) * GRID_PITCH_MM,
                cy + (f64::from(j) - half_y) * GRID_PITCH_MM,
            ));
        }
    }
    centers
}

/// Solid body of the bin before any cavity is cut, standing on the feet.
#[must_use]
pub fn body_box(dimension: GridDimension) -> RoundedBox {
    RoundedBox::new(footprint(dimension), BASE_HEIGHT_MM, dimension.z_mm())
}

/// Outer footprint outline of the bin.
#[must_use]
pub fn footprint(dimension: GridDimension) -> RoundedRect {
    RoundedRect::new(
        Point2::new(dimension.x_mm() / 2.0, dimension.y_mm() / 2.0),
        dimension.x_mm(),
        dimension.y_mm(),
        OUTER_CORNER_RADIUS_MM,
    )
}

/// Height of the body's top face in mm.
#[must_use]
pub fn body_top(dimension: GridDimension) -> f64 {
    BASE_HEIGHT_MM + dimension.z_mm()
}
