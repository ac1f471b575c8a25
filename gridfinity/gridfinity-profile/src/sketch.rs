//! 2D profile and solid primitives handed to the geometry kernel.
//!
//! Profiles live on one of two sketch planes:
//!
//! - [`SketchPlane::Xy`]: footprint coordinates `(x, y)` at a fixed height
//! - [`SketchPlane::Yz`]: side coordinates `(y, z)` at a fixed `x`, extruded
//!   toward `+x`

use nalgebra::Point2;
use serde::Serialize;

/// Plane a profile is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "plane", rename_all = "snake_case")]
pub enum SketchPlane {
    /// Horizontal plane at height `z`.
    Xy {
        /// Height of the plane in mm.
        z: f64,
    },
    /// Vertical plane at `x`, normal `+x`.
    Yz {
        /// Position of the plane in mm.
        x: f64,
    },
}

/// Rectangle with rounded corners, centred on `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedRect {
    /// Centre in plane coordinates.
    pub center: Point2<f64>,
    /// Extent along the first plane axis in mm.
    pub width: f64,
    /// Extent along the second plane axis in mm.
    pub length: f64,
    /// Corner fillet radius in mm.
    pub corner_radius: f64,
}

impl RoundedRect {
    /// Create a rounded rectangle.
    #[must_use]
    pub const fn new(center: Point2<f64>, width: f64, length: f64, corner_radius: f64) -> Self {
        Self {
            center,
            width,
            length,
            corner_radius,
        }
    }

    /// Shrink every side by `inset` (negative grows), keeping the centre.
    #[must_use]
    pub fn inset(&self, inset: f64, corner_radius: f64) -> Self {
        Self {
            center: self.center,
            width: self.width - 2.0 * inset,
            length: self.length - 2.0 * inset,
            corner_radius,
        }
    }
}

/// Fillet applied at one polygon vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VertexFillet {
    /// Index into the polygon's vertices.
    pub vertex: usize,
    /// Fillet radius in mm.
    pub radius: f64,
}

/// Closed polygon built from a chain of straight segments.
///
/// The closing segment from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    /// Vertices in order.
    pub vertices: Vec<Point2<f64>>,
    /// Vertex fillets.
    pub fillets: Vec<VertexFillet>,
}

impl Polygon {
    /// Create a polygon without fillets.
    #[must_use]
    pub const fn new(vertices: Vec<Point2<f64>>) -> Self {
        Self {
            vertices,
            fillets: Vec::new(),
        }
    }

    /// Add a fillet at `vertex`.
    #[must_use]
    pub fn with_fillet(mut self, vertex: usize, radius: f64) -> Self {
        self.fillets.push(VertexFillet { vertex, radius });
        self
    }

    /// Signed area by the shoelace formula (positive when counter-clockwise).
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }
}

/// Square with a quarter disc removed: a concave cove.
///
/// The square spans `[corner, corner + radius]` on both axes; the removed
/// disc is centred on the square's far corner `corner + (radius, radius)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuarterCove {
    /// Near corner of the square in plane coordinates.
    pub corner: Point2<f64>,
    /// Square side and disc radius in mm.
    pub radius: f64,
}

impl QuarterCove {
    /// Centre of the removed disc.
    #[must_use]
    pub fn arc_center(&self) -> Point2<f64> {
        Point2::new(self.corner.x + self.radius, self.corner.y + self.radius)
    }

    /// Area of the remaining material in mm².
    #[must_use]
    pub fn area(&self) -> f64 {
        self.radius * self.radius * (1.0 - std::f64::consts::FRAC_PI_4)
    }
}

/// Any 2D profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Profile {
    /// Rounded rectangle.
    RoundedRect(RoundedRect),
    /// Segment-chain polygon.
    Polygon(Polygon),
    /// Square minus quarter disc.
    QuarterCove(QuarterCove),
}

/// Box with rounded vertical edges and an optional bottom chamfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoundedBox {
    /// Footprint of the box.
    pub footprint: RoundedRect,
    /// Height of the bottom face in mm.
    pub base_z: f64,
    /// Height of the box in mm.
    pub height: f64,
    /// Chamfer on the bottom edges in mm (0 for none).
    pub bottom_chamfer: f64,
}

impl RoundedBox {
    /// Box without a chamfer.
    #[must_use]
    pub const fn new(footprint: RoundedRect, base_z: f64, height: f64) -> Self {
        Self {
            footprint,
            base_z,
            height,
            bottom_chamfer: 0.0,
        }
    }

    /// Set the bottom chamfer.
    #[must_use]
    pub const fn with_bottom_chamfer(mut self, chamfer: f64) -> Self {
        self.bottom_chamfer = chamfer;
        self
    }

    /// Height of the top face in mm.
    #[must_use]
    pub fn top_z(&self) -> f64 {
        self.base_z + self.height
    }
}
