//! Precomputed construction plan for one bin.

use std::fmt;

use gridfinity_layout::{Layout, layout_properties};
use gridfinity_profile::base::{BaseTile, base_tile, body_box, body_top, tile_centers};
use gridfinity_profile::holes::HolePattern;
use gridfinity_profile::ledge::{LabelLedge, label_ledges, ledge_clearance};
use gridfinity_profile::mate::{LegacyLip, LipStyle, StackingLip, legacy_lip, stacking_lip};
use gridfinity_profile::scoop::{FingerScoop, finger_scoops};
use gridfinity_profile::sketch::{Profile, RoundedBox, RoundedRect, SketchPlane};
use gridfinity_types::standard::FLOOR_THICKNESS_MM;
use gridfinity_types::{Advisory, Properties};
use nalgebra::Vector2;
use serde::Serialize;
use tracing::{debug, warn};

/// One stage of bin assembly, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyStep {
    /// Build a single foot.
    BaseTile,
    /// Cut magnet pockets into the single foot.
    MagnetHoles,
    /// Copy the foot across the grid.
    ReplicateBases,
    /// Add the body on top of the feet.
    Body,
    /// Cut the bucket cavities.
    Buckets,
    /// Drill screw holes from the underside.
    ScrewHoles,
    /// Add finger scoops.
    FingerScoops,
    /// Add label ledges.
    LabelLedges,
    /// Add the stacking lip.
    StackingLip,
}

impl AssemblyStep {
    /// Step name as used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseTile => "base-tile",
            Self::MagnetHoles => "magnet-holes",
            Self::ReplicateBases => "replicate-bases",
            Self::Body => "body",
            Self::Buckets => "buckets",
            Self::ScrewHoles => "screw-holes",
            Self::FingerScoops => "finger-scoops",
            Self::LabelLedges => "label-ledges",
            Self::StackingLip => "stacking-lip",
        }
    }
}

impl fmt::Display for AssemblyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stacking lip in either construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum Lip {
    /// Lofted lip.
    Loft(StackingLip),
    /// Legacy tapered-cut lip.
    TaperedCut(LegacyLip),
}

impl Lip {
    /// Which construction this is.
    #[must_use]
    pub const fn style(&self) -> LipStyle {
        match self {
            Self::Loft(_) => LipStyle::Loft,
            Self::TaperedCut(_) => LipStyle::TaperedCut,
        }
    }
}

/// Everything needed to assemble a bin, computed up front.
///
/// Building a plan never fails: [`Properties`] are already validated, and
/// geometric trouble (narrow buckets, low ledges) is reported through
/// [`BinPlan::advisories`] rather than as an error.
///
/// # Example
///
/// ```
/// use gridfinity_assembly::{AssemblyStep, BinPlan};
/// use gridfinity_types::{GridDimension, Properties};
///
/// let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
///     .magnet_holes(true)
///     .build()
///     .unwrap();
/// let plan = BinPlan::new(&props);
///
/// assert_eq!(plan.steps()[1], AssemblyStep::MagnetHoles);
/// assert_eq!(plan.steps().last(), Some(&AssemblyStep::StackingLip));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinPlan {
    name: String,
    properties: Properties,
    base: BaseTile,
    tile_offsets: Vec<Vector2<f64>>,
    magnet_holes: Option<HolePattern>,
    body: RoundedBox,
    #[serde(skip)]
    layout: Layout,
    cavities: Vec<Profile>,
    cavity_depth: f64,
    screw_holes: Option<HolePattern>,
    scoops: Vec<FingerScoop>,
    ledges: Vec<LabelLedge>,
    lip: Lip,
    advisories: Vec<Advisory>,
}

impl BinPlan {
    /// Plan a bin with the lofted lip.
    #[must_use]
    pub fn new(properties: &Properties) -> Self {
        let dimension = properties.dimension();
        let wall = properties.wall_thickness();
        let features = properties.features();

        let layout = layout_properties(properties);
        let cavities = layout
            .buckets()
            .iter()
            .map(|bucket| {
                Profile::RoundedRect(RoundedRect::new(
                    bucket.center(),
                    bucket.width_mm,
                    bucket.height_mm,
                    bucket.corner_radius_mm,
                ))
            })
            .collect();

        let scoops = if features.draw_finger_scoop {
            finger_scoops(dimension, wall)
        } else {
            Vec::new()
        };
        let ledges = if features.draw_label_ledge {
            label_ledges(dimension, wall)
        } else {
            Vec::new()
        };

        let ledge_advisories: Vec<Advisory> = if features.draw_label_ledge && ledges.is_empty() {
            let clearance_mm = ledge_clearance(dimension, wall);
            (0..layout.stepping().rows())
                .map(|row| Advisory::LabelLedgeOmitted { row, clearance_mm })
                .collect()
        } else {
            ledges.iter().filter_map(LabelLedge::advisory).collect()
        };
        for advisory in &ledge_advisories {
            warn!(row = advisory.row(), %advisory, "Label ledge does not fit");
        }
        let mut advisories = layout.advisories().to_vec();
        advisories.extend(ledge_advisories);

        let plan = Self {
            name: properties.describe(),
            properties: properties.clone(),
            base: base_tile(),
            tile_offsets: tile_centers(dimension)
                .into_iter()
                .map(|center| center.coords)
                .collect(),
            magnet_holes: features
                .make_magnet_hole
                .then(HolePattern::magnets_on_tile),
            body: body_box(dimension),
            cavities,
            cavity_depth: dimension.z_mm() - FLOOR_THICKNESS_MM,
            layout,
            screw_holes: features
                .make_screw_hole
                .then(|| HolePattern::screws(dimension)),
            scoops,
            ledges,
            lip: Lip::Loft(stacking_lip(dimension)),
            advisories,
        };

        debug!(
            name = %plan.name,
            steps = plan.steps().len(),
            advisories = plan.advisories.len(),
            "Planned bin"
        );
        plan
    }

    /// Swap the stacking lip construction.
    #[must_use]
    pub fn with_lip_style(mut self, style: LipStyle) -> Self {
        let dimension = self.properties.dimension();
        self.lip = match style {
            LipStyle::Loft => Lip::Loft(stacking_lip(dimension)),
            LipStyle::TaperedCut => Lip::TaperedCut(legacy_lip(dimension)),
        };
        self
    }

    /// Steps [`assemble`](crate::assemble) will run, in order.
    #[must_use]
    pub fn steps(&self) -> Vec<AssemblyStep> {
        let mut steps = vec![AssemblyStep::BaseTile];
        if self.magnet_holes.is_some() {
            steps.push(AssemblyStep::MagnetHoles);
        }
        steps.extend([
            AssemblyStep::ReplicateBases,
            AssemblyStep::Body,
            AssemblyStep::Buckets,
        ]);
        if self.screw_holes.is_some() {
            steps.push(AssemblyStep::ScrewHoles);
        }
        if !self.scoops.is_empty() {
            steps.push(AssemblyStep::FingerScoops);
        }
        if !self.ledges.is_empty() {
            steps.push(AssemblyStep::LabelLedges);
        }
        steps.push(AssemblyStep::StackingLip);
        steps
    }

    /// Descriptive name, see [`Properties::describe`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input properties.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The single foot.
    #[must_use]
    pub const fn base(&self) -> &BaseTile {
        &self.base
    }

    /// Translation of each foot from the origin.
    #[must_use]
    pub fn tile_offsets(&self) -> &[Vector2<f64>] {
        &self.tile_offsets
    }

    /// Magnet pockets on the single foot, if enabled.
    #[must_use]
    pub const fn magnet_holes(&self) -> Option<&HolePattern> {
        self.magnet_holes.as_ref()
    }

    /// Solid body before cavities are cut.
    #[must_use]
    pub const fn body(&self) -> &RoundedBox {
        &self.body
    }

    /// Bucket layout.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Plane the cavities are sketched on: the body's top face.
    #[must_use]
    pub fn cavity_plane(&self) -> SketchPlane {
        SketchPlane::Xy {
            z: body_top(self.properties.dimension()),
        }
    }

    /// One rounded rectangle per bucket.
    #[must_use]
    pub fn cavities(&self) -> &[Profile] {
        &self.cavities
    }

    /// Cavity depth below the body top, leaving the floor.
    #[must_use]
    pub const fn cavity_depth(&self) -> f64 {
        self.cavity_depth
    }

    /// Screw holes under every foot, if enabled.
    #[must_use]
    pub const fn screw_holes(&self) -> Option<&HolePattern> {
        self.screw_holes.as_ref()
    }

    /// Finger scoops, one per row, empty when disabled.
    #[must_use]
    pub fn scoops(&self) -> &[FingerScoop] {
        &self.scoops
    }

    /// Label ledges, one per row, empty when disabled.
    #[must_use]
    pub fn ledges(&self) -> &[LabelLedge] {
        &self.ledges
    }

    /// Stacking lip.
    #[must_use]
    pub const fn lip(&self) -> &Lip {
        &self.lip
    }

    /// Non-fatal diagnostics from layout and profiles.
    #[must_use]
    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use gridfinity_types::{Divisions, GridDimension};

    fn props(y: u32, z: u32) -> gridfinity_types::PropertiesBuilder {
        Properties::builder(GridDimension::new(2, y, z).unwrap())
    }

    #[test]
    fn test_minimal_plan() {
        let plan = BinPlan::new(&props(1, 3).build().unwrap());
        assert_eq!(
            plan.steps(),
            vec![
                AssemblyStep::BaseTile,
                AssemblyStep::ReplicateBases,
                AssemblyStep::Body,
                AssemblyStep::Buckets,
                AssemblyStep::StackingLip,
            ]
        );
        assert_eq!(plan.tile_offsets().len(), 2);
        assert_eq!(plan.cavities().len(), 1);
        assert!(plan.scoops().is_empty());
        assert!(plan.advisories().is_empty());
        assert_eq!(plan.lip().style(), LipStyle::Loft);
    }

    #[test]
    fn test_full_plan() {
        let props = props(2, 6)
            .divisions(Divisions::from_counts([2, 3]))
            .features(gridfinity_types::FeatureFlags::all())
            .build()
            .unwrap();
        let plan = BinPlan::new(&props);

        assert_eq!(plan.steps().len(), 9);
        assert_eq!(plan.cavities().len(), 5);
        assert_eq!(plan.scoops().len(), 2);
        assert_eq!(plan.ledges().len(), 2);
        assert_eq!(plan.magnet_holes().map(HolePattern::len), Some(4));
        assert_eq!(plan.screw_holes().map(HolePattern::len), Some(16));
        assert_eq!(plan.name(), props.describe());
    }

    #[test]
    fn test_cavities_leave_floor() {
        let plan = BinPlan::new(&props(1, 4).build().unwrap());
        // z_mm = 28 - 5.6 = 22.4
        assert_relative_eq!(plan.cavity_depth(), 20.4, epsilon = 1e-9);
        assert_eq!(plan.cavity_plane(), SketchPlane::Xy { z: plan.body().top_z() });
    }

    #[test]
    fn test_low_bin_collects_ledge_advisories() {
        let plan = BinPlan::new(&props(2, 2).label_ledge(true).build().unwrap());
        let truncated = plan
            .advisories()
            .iter()
            .filter(|a| matches!(a, Advisory::LabelLedgeTruncated { .. }))
            .count();
        assert_eq!(truncated, 2);
    }

    #[test]
    fn test_thick_walls_omit_ledges() {
        // z_mm = 8.4 leaves -0.6 mm under a 7 mm wall
        let props = props(2, 2).wall_thickness(7.0).label_ledge(true).build().unwrap();
        let plan = BinPlan::new(&props);

        assert!(plan.ledges().is_empty());
        assert!(!plan.steps().contains(&AssemblyStep::LabelLedges));
        let rows: Vec<usize> = plan
            .advisories()
            .iter()
            .filter(|a| matches!(a, Advisory::LabelLedgeOmitted { .. }))
            .map(Advisory::row)
            .collect();
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn test_back_row_ledge_is_not_truncated_by_offset() {
        // Clearance 15.4 mm: short of the back row's 15.65 mm run, over 12.75 mm
        let props = props(1, 4).wall_thickness(5.0).label_ledge(true).build().unwrap();
        let plan = BinPlan::new(&props);
        assert_eq!(plan.ledges().len(), 1);
        assert!(plan.advisories().is_empty());
    }

    #[test]
    fn test_narrow_buckets_carried_over() {
        let props = props(1, 3)
            .divisions(Divisions::from_counts([8]))
            .build()
            .unwrap();
        let plan = BinPlan::new(&props);
        assert_eq!(plan.advisories().len(), 8);
    }

    #[test]
    fn test_lip_style_switch() {
        let plan = BinPlan::new(&props(1, 3).build().unwrap()).with_lip_style(LipStyle::TaperedCut);
        assert_eq!(plan.lip().style(), LipStyle::TaperedCut);
        assert_eq!(plan.steps().last(), Some(&AssemblyStep::StackingLip));
    }

    #[test]
    fn test_step_names() {
        assert_eq!(AssemblyStep::ReplicateBases.to_string(), "replicate-bases");
        assert!(AssemblyStep::MagnetHoles < AssemblyStep::ReplicateBases);
    }
}
