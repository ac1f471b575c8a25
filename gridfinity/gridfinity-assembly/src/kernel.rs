//! The geometry kernel seam.
//!
//! Assembly never builds B-rep geometry itself. It drives an implementation
//! of [`GeometryKernel`] with the profiles from `gridfinity-profile`. The
//! in-tree [`RecordingKernel`](crate::RecordingKernel) records the calls;
//! a CAD backend would execute them.
//!
//! All kernel methods take their inputs by reference and return a new solid.
//! Solids are never mutated in place.

use gridfinity_profile::holes::{HoleOrientation, HolePattern};
use gridfinity_profile::mate::{LoftSection, TaperedCut};
use gridfinity_profile::sketch::{Profile, RoundedBox, SketchPlane};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Signed coordinate axis, used as a face normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// `+x`
    PlusX,
    /// `-x`
    MinusX,
    /// `+y`
    PlusY,
    /// `-y`
    MinusY,
    /// `+z`
    PlusZ,
    /// `-z`
    MinusZ,
}

/// Selects a planar face of a solid by its outward normal.
///
/// Among faces sharing the normal, `ordinal` counts from the outermost
/// (0) inward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceSelector {
    /// Outward normal of the face.
    pub normal: Axis,
    /// Index among faces with that normal, outermost first.
    pub ordinal: usize,
}

impl FaceSelector {
    /// The outermost face with this normal.
    #[must_use]
    pub const fn outermost(normal: Axis) -> Self {
        Self { normal, ordinal: 0 }
    }
}

impl From<HoleOrientation> for FaceSelector {
    fn from(orientation: HoleOrientation) -> Self {
        match orientation {
            HoleOrientation::Underside => Self::outermost(Axis::MinusZ),
            HoleOrientation::Top => Self::outermost(Axis::PlusZ),
        }
    }
}

/// Whether an extrusion adds or removes material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrudeMode {
    /// Union the extruded profiles with the target.
    Add,
    /// Subtract the extruded profiles from the target.
    Cut,
}

/// Operations a geometry backend must provide to assemble a bin.
///
/// Implementations report failures through [`GeometryKernel::Error`]; the
/// assembly passes them through unmodified.
pub trait GeometryKernel {
    /// Handle to a solid owned by the kernel.
    type Solid: Clone;

    /// Kernel failure.
    type Error: std::error::Error;

    /// Create a box with rounded vertical edges.
    ///
    /// # Errors
    ///
    /// Kernel-specific; typically a non-positive extent.
    fn rounded_box(&mut self, shape: &RoundedBox) -> Result<Self::Solid, Self::Error>;

    /// Extrude profiles drawn on `plane` by `length` along the plane normal
    /// (negative goes against it) and add them to or cut them from `target`.
    ///
    /// # Errors
    ///
    /// Kernel-specific; typically an empty or degenerate profile.
    fn extrude_profiles(
        &mut self,
        target: &Self::Solid,
        plane: SketchPlane,
        profiles: &[Profile],
        length: f64,
        mode: ExtrudeMode,
    ) -> Result<Self::Solid, Self::Error>;

    /// Subtract a loft through `sections` (bottom first) from `target`.
    ///
    /// # Errors
    ///
    /// Kernel-specific; typically fewer than two sections.
    fn loft_cut(
        &mut self,
        target: &Self::Solid,
        sections: &[LoftSection],
    ) -> Result<Self::Solid, Self::Error>;

    /// Apply a through-cut, tapered or straight, to `target`.
    ///
    /// # Errors
    ///
    /// Kernel-specific.
    fn tapered_cut(
        &mut self,
        target: &Self::Solid,
        cut: &TaperedCut,
    ) -> Result<Self::Solid, Self::Error>;

    /// Boolean union.
    ///
    /// # Errors
    ///
    /// Kernel-specific.
    fn union(&mut self, a: &Self::Solid, b: &Self::Solid) -> Result<Self::Solid, Self::Error>;

    /// Boolean difference `a - b`.
    ///
    /// # Errors
    ///
    /// Kernel-specific.
    fn cut(&mut self, a: &Self::Solid, b: &Self::Solid) -> Result<Self::Solid, Self::Error>;

    /// Union of copies of `solid` translated by each offset in the `xy`
    /// plane.
    ///
    /// # Errors
    ///
    /// Kernel-specific; typically no offsets.
    fn replicate(
        &mut self,
        solid: &Self::Solid,
        offsets: &[Vector2<f64>],
    ) -> Result<Self::Solid, Self::Error>;

    /// Drill a hole pattern into the selected face of `target`.
    ///
    /// # Errors
    ///
    /// Kernel-specific; typically an empty pattern.
    fn holes(
        &mut self,
        target: &Self::Solid,
        face: FaceSelector,
        pattern: &HolePattern,
    ) -> Result<Self::Solid, Self::Error>;
}
