//! A kernel that records operations instead of building geometry.
//!
//! [`RecordingKernel`] checks its inputs the way a real kernel would reject
//! them (non-positive extents, too few loft sections, empty patterns) and
//! otherwise appends a [`KernelOp`] to its log. The log is the bin's
//! construction plan: it can be inspected in tests, serialized to JSON, or
//! replayed against a CAD backend.

use std::fmt;

use gridfinity_profile::holes::HolePattern;
use gridfinity_profile::mate::{LoftSection, TaperedCut};
use gridfinity_profile::sketch::{Profile, RoundedBox, RoundedRect, SketchPlane};
use nalgebra::Vector2;
use serde::Serialize;
use tracing::trace;

use crate::error::{KernelError, KernelResult};
use crate::kernel::{ExtrudeMode, FaceSelector, GeometryKernel};

/// Handle to a recorded solid.
///
/// Solid `n` is the result of the `n`-th recorded operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SolidId(usize);

impl SolidId {
    /// Wrap a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index into the operation log.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SolidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One recorded kernel call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum KernelOp {
    /// [`GeometryKernel::rounded_box`]
    RoundedBox {
        /// Produced solid.
        result: SolidId,
        /// Box description.
        shape: RoundedBox,
    },
    /// [`GeometryKernel::extrude_profiles`]
    Extrude {
        /// Produced solid.
        result: SolidId,
        /// Input solid.
        target: SolidId,
        /// Sketch plane.
        plane: SketchPlane,
        /// Profiles drawn on the plane.
        profiles: Vec<Profile>,
        /// Signed extrusion length in mm.
        length: f64,
        /// Add or cut.
        mode: ExtrudeMode,
    },
    /// [`GeometryKernel::loft_cut`]
    LoftCut {
        /// Produced solid.
        result: SolidId,
        /// Input solid.
        target: SolidId,
        /// Sections, bottom first.
        sections: Vec<LoftSection>,
    },
    /// [`GeometryKernel::tapered_cut`]
    TaperedCut {
        /// Produced solid.
        result: SolidId,
        /// Input solid.
        target: SolidId,
        /// Cut description.
        cut: TaperedCut,
    },
    /// [`GeometryKernel::union`]
    Union {
        /// Produced solid.
        result: SolidId,
        /// First operand.
        a: SolidId,
        /// Second operand.
        b: SolidId,
    },
    /// [`GeometryKernel::cut`]
    Cut {
        /// Produced solid.
        result: SolidId,
        /// Solid cut from.
        a: SolidId,
        /// Solid removed.
        b: SolidId,
    },
    /// [`GeometryKernel::replicate`]
    Replicate {
        /// Produced solid.
        result: SolidId,
        /// Solid copied.
        source: SolidId,
        /// Translations in the `xy` plane.
        offsets: Vec<Vector2<f64>>,
    },
    /// [`GeometryKernel::holes`]
    Holes {
        /// Produced solid.
        result: SolidId,
        /// Input solid.
        target: SolidId,
        /// Face drilled into.
        face: FaceSelector,
        /// Holes drilled.
        pattern: HolePattern,
    },
}

impl KernelOp {
    /// Short operation name, as used in the serialized `op` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RoundedBox { .. } => "rounded_box",
            Self::Extrude { .. } => "extrude",
            Self::LoftCut { .. } => "loft_cut",
            Self::TaperedCut { .. } => "tapered_cut",
            Self::Union { .. } => "union",
            Self::Cut { .. } => "cut",
            Self::Replicate { .. } => "replicate",
            Self::Holes { .. } => "holes",
        }
    }

    /// Solid this operation produced.
    #[must_use]
    pub const fn result(&self) -> SolidId {
        match *self {
            Self::RoundedBox { result, .. }
            | Self::Extrude { result, .. }
            | Self::LoftCut { result, .. }
            | Self::TaperedCut { result, .. }
            | Self::Union { result, .. }
            | Self::Cut { result, .. }
            | Self::Replicate { result, .. }
            | Self::Holes { result, .. } => result,
        }
    }
}

/// Kernel that records every call.
///
/// # Example
///
/// ```
/// use gridfinity_assembly::{GeometryKernel, RecordingKernel};
/// use gridfinity_profile::base::base_tile;
///
/// let mut kernel = RecordingKernel::new();
/// let tile = base_tile();
/// let lower = kernel.rounded_box(&tile.lower).unwrap();
/// let upper = kernel.rounded_box(&tile.upper).unwrap();
/// let foot = kernel.union(&lower, &upper).unwrap();
///
/// assert_eq!(kernel.len(), 3);
/// assert_eq!(kernel.history(foot).unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingKernel {
    ops: Vec<KernelOp>,
}

impl RecordingKernel {
    /// Create an empty kernel.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// All recorded operations, in call order.
    #[must_use]
    pub fn ops(&self) -> &[KernelOp] {
        &self.ops
    }

    /// Number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operations up to and including the one that produced `solid`.
    #[must_use]
    pub fn history(&self, solid: SolidId) -> Option<&[KernelOp]> {
        self.ops.get(..=solid.index())
    }

    /// Names of the recorded operations, in call order.
    pub fn op_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.iter().map(KernelOp::name)
    }

    fn next_id(&self) -> SolidId {
        SolidId(self.ops.len())
    }

    fn check(&self, solid: SolidId) -> KernelResult<()> {
        if solid.index() < self.ops.len() {
            Ok(())
        } else {
            Err(KernelError::UnknownSolid(solid))
        }
    }

    fn record(&mut self, op: KernelOp) -> SolidId {
        let id = op.result();
        trace!(op = op.name(), result = %id, "Recorded kernel op");
        self.ops.push(op);
        id
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_rect(rect: &RoundedRect) -> KernelResult<()> {
    if positive(rect.width) && positive(rect.length) && rect.corner_radius >= 0.0 {
        Ok(())
    } else {
        Err(KernelError::degenerate_profile(format!(
            "rounded rectangle {} x {} r {}",
            rect.width, rect.length, rect.corner_radius
        )))
    }
}

fn check_profile(profile: &Profile) -> KernelResult<()> {
    match profile {
        Profile::RoundedRect(rect) => check_rect(rect),
        Profile::Polygon(polygon) => {
            if polygon.vertices.len() < 3 || polygon.signed_area().abs() <= f64::EPSILON {
                Err(KernelError::degenerate_profile(format!(
                    "polygon with {} vertices has no area",
                    polygon.vertices.len()
                )))
            } else {
                Ok(())
            }
        }
        Profile::QuarterCove(cove) => {
            if positive(cove.area()) {
                Ok(())
            } else {
                Err(KernelError::degenerate_profile(format!(
                    "cove radius {}",
                    cove.radius
                )))
            }
        }
    }
}

impl GeometryKernel for RecordingKernel {
    type Solid = SolidId;
    type Error = KernelError;

    fn rounded_box(&mut self, shape: &RoundedBox) -> KernelResult<SolidId> {
        let rect = &shape.footprint;
        if !(positive(rect.width) && positive(rect.length) && positive(shape.height)) {
            return Err(KernelError::DegenerateBox {
                width: rect.width,
                length: rect.length,
                height: shape.height,
            });
        }
        let result = self.next_id();
        Ok(self.record(KernelOp::RoundedBox {
            result,
            shape: *shape,
        }))
    }

    fn extrude_profiles(
        &mut self,
        target: &SolidId,
        plane: SketchPlane,
        profiles: &[Profile],
        length: f64,
        mode: ExtrudeMode,
    ) -> KernelResult<SolidId> {
        self.check(*target)?;
        if profiles.is_empty() {
            return Err(KernelError::degenerate_profile("nothing to extrude"));
        }
        if !length.is_finite() || length.abs() < f64::EPSILON {
            return Err(KernelError::degenerate_profile(format!(
                "extrusion length {length}"
            )));
        }
        profiles.iter().try_for_each(check_profile)?;

        let result = self.next_id();
        Ok(self.record(KernelOp::Extrude {
            result,
            target: *target,
            plane,
            profiles: profiles.to_vec(),
            length,
            mode,
        }))
    }

    fn loft_cut(&mut self, target: &SolidId, sections: &[LoftSection]) -> KernelResult<SolidId> {
        self.check(*target)?;
        if sections.len() < 2 {
            return Err(KernelError::TooFewSections(sections.len()));
        }
        for section in sections {
            check_rect(&section.outline)?;
        }
        let result = self.next_id();
        Ok(self.record(KernelOp::LoftCut {
            result,
            target: *target,
            sections: sections.to_vec(),
        }))
    }

    fn tapered_cut(&mut self, target: &SolidId, cut: &TaperedCut) -> KernelResult<SolidId> {
        self.check(*target)?;
        check_rect(&cut.outline)?;
        let result = self.next_id();
        Ok(self.record(KernelOp::TaperedCut {
            result,
            target: *target,
            cut: *cut,
        }))
    }

    fn union(&mut self, a: &SolidId, b: &SolidId) -> KernelResult<SolidId> {
        self.check(*a)?;
        self.check(*b)?;
        let result = self.next_id();
        Ok(self.record(KernelOp::Union {
            result,
            a: *a,
            b: *b,
        }))
    }

    fn cut(&mut self, a: &SolidId, b: &SolidId) -> KernelResult<SolidId> {
        self.check(*a)?;
        self.check(*b)?;
        let result = self.next_id();
        Ok(self.record(KernelOp::Cut {
            result,
            a: *a,
            b: *b,
        }))
    }

    fn replicate(&mut self, solid: &SolidId, offsets: &[Vector2<f64>]) -> KernelResult<SolidId> {
        self.check(*solid)?;
        if offsets.is_empty() {
            return Err(KernelError::EmptyReplication);
        }
        let result = self.next_id();
        Ok(self.record(KernelOp::Replicate {
            result,
            source: *solid,
            offsets: offsets.to_vec(),
        }))
    }

    fn holes(
        &mut self,
        target: &SolidId,
        face: FaceSelector,
        pattern: &HolePattern,
    ) -> KernelResult<SolidId> {
        self.check(*target)?;
        if pattern.is_empty() {
            return Err(KernelError::EmptyHolePattern);
        }
        let result = self.next_id();
        Ok(self.record(KernelOp::Holes {
            result,
            target: *target,
            face,
            pattern: pattern.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::Axis;
    use gridfinity_profile::sketch::{Polygon, QuarterCove};
    use nalgebra::Point2;

    fn unit_box() -> RoundedBox {
        RoundedBox::new(RoundedRect::new(Point2::origin(), 10.0, 10.0, 1.0), 0.0, 5.0)
    }

    #[test]
    fn test_records_in_order() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.rounded_box(&unit_box()).unwrap();
        let b = kernel.rounded_box(&unit_box()).unwrap();
        let c = kernel.cut(&a, &b).unwrap();

        assert_eq!(a, SolidId::new(0));
        assert_eq!(c, SolidId::new(2));
        let names: Vec<_> = kernel.op_names().collect();
        assert_eq!(names, vec!["rounded_box", "rounded_box", "cut"]);
    }

    #[test]
    fn test_rejects_degenerate_box() {
        let mut kernel = RecordingKernel::new();
        let mut shape = unit_box();
        shape.footprint.width = -2.0;
        let err = kernel.rounded_box(&shape).unwrap_err();
        assert!(matches!(err, KernelError::DegenerateBox { .. }));
        assert!(kernel.is_empty());
    }

    #[test]
    fn test_rejects_unknown_solid() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.rounded_box(&unit_box()).unwrap();
        let ghost = SolidId::new(5);
        assert_eq!(
            kernel.union(&a, &ghost),
            Err(KernelError::UnknownSolid(ghost))
        );
    }

    #[test]
    fn test_rejects_short_loft() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.rounded_box(&unit_box()).unwrap();
        let section = LoftSection {
            z: 0.0,
            inset: 0.0,
            outline: unit_box().footprint,
        };
        assert_eq!(
            kernel.loft_cut(&a, &[section]),
            Err(KernelError::TooFewSections(1))
        );
    }

    #[test]
    fn test_rejects_empty_replication() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.rounded_box(&unit_box()).unwrap();
        assert_eq!(kernel.replicate(&a, &[]), Err(KernelError::EmptyReplication));
    }

    #[test]
    fn test_rejects_degenerate_profiles() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.rounded_box(&unit_box()).unwrap();
        let plane = SketchPlane::Xy { z: 5.0 };

        let flat = Profile::Polygon(Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ]));
        assert!(
            kernel
                .extrude_profiles(&a, plane, &[flat], 1.0, ExtrudeMode::Add)
                .is_err()
        );

        let cove = Profile::QuarterCove(QuarterCove {
            corner: Point2::origin(),
            radius: 0.0,
        });
        assert!(
            kernel
                .extrude_profiles(&a, plane, &[cove], 1.0, ExtrudeMode::Cut)
                .is_err()
        );
        assert!(
            kernel
                .extrude_profiles(&a, plane, &[], 1.0, ExtrudeMode::Cut)
                .is_err()
        );
        assert_eq!(kernel.len(), 1);
    }

    #[test]
    fn test_holes_and_history() {
        let mut kernel = RecordingKernel::new();
        let a = kernel.rounded_box(&unit_box()).unwrap();
        let b = kernel
            .holes(
                &a,
                FaceSelector::outermost(Axis::MinusZ),
                &HolePattern::magnets_on_tile(),
            )
            .unwrap();

        assert_eq!(kernel.history(b).unwrap().len(), 2);
        assert_eq!(kernel.history(a).unwrap().len(), 1);
        assert!(kernel.history(SolidId::new(9)).is_none());
    }

    #[test]
    fn test_ops_serialize_with_tag() {
        let mut kernel = RecordingKernel::new();
        kernel.rounded_box(&unit_box()).unwrap();
        let json = serde_json::to_value(kernel.ops()).unwrap();
        assert_eq!(json[0]["op"], "rounded_box");
        assert_eq!(json[0]["result"], 0);
    }
}
