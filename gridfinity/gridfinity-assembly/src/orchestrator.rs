//! Drives a [`GeometryKernel`] through a [`BinPlan`].

use gridfinity_profile::sketch::Profile;
use tracing::debug;

use crate::kernel::{ExtrudeMode, FaceSelector, GeometryKernel};
use crate::plan::{AssemblyStep, BinPlan, Lip};

/// Assemble the bin described by `plan`.
///
/// Steps run in the order given by [`BinPlan::steps`]:
///
/// 1. One foot, with magnet pockets when enabled, copied across the grid
/// 2. The body on top of the feet, with the bucket cavities cut
/// 3. Screw holes from the underside
/// 4. Finger scoops, then label ledges
/// 5. The stacking lip
///
/// Magnet pockets go into the single foot before replication so each is cut
/// once.
///
/// # Errors
///
/// The first kernel error, unmodified.
///
/// # Example
///
/// ```
/// use gridfinity_assembly::{BinPlan, RecordingKernel, assemble};
/// use gridfinity_types::{GridDimension, Properties};
///
/// let props = Properties::builder(GridDimension::new(2, 2, 3).unwrap())
///     .build()
///     .unwrap();
/// let mut kernel = RecordingKernel::new();
/// let bin = assemble(&mut kernel, &BinPlan::new(&props)).unwrap();
///
/// assert_eq!(kernel.history(bin).unwrap().len(), kernel.len());
/// ```
pub fn assemble<K: GeometryKernel>(kernel: &mut K, plan: &BinPlan) -> Result<K::Solid, K::Error> {
    debug!(step = %AssemblyStep::BaseTile, "Assembly step");
    let base = plan.base();
    let lower = kernel.rounded_box(&base.lower)?;
    let upper = kernel.rounded_box(&base.upper)?;
    let mut tile = kernel.union(&lower, &upper)?;

    if let Some(magnets) = plan.magnet_holes() {
        debug!(step = %AssemblyStep::MagnetHoles, holes = magnets.len(), "Assembly step");
        tile = kernel.holes(&tile, FaceSelector::from(magnets.orientation), magnets)?;
    }

    debug!(step = %AssemblyStep::ReplicateBases, tiles = plan.tile_offsets().len(), "Assembly step");
    let bases = kernel.replicate(&tile, plan.tile_offsets())?;

    debug!(step = %AssemblyStep::Body, "Assembly step");
    let body = kernel.rounded_box(plan.body())?;
    let mut bin = kernel.union(&bases, &body)?;

    debug!(step = %AssemblyStep::Buckets, buckets = plan.cavities().len(), "Assembly step");
    bin = kernel.extrude_profiles(
        &bin,
        plan.cavity_plane(),
        plan.cavities(),
        -plan.cavity_depth(),
        ExtrudeMode::Cut,
    )?;

    if let Some(screws) = plan.screw_holes() {
        debug!(step = %AssemblyStep::ScrewHoles, holes = screws.len(), "Assembly step");
        bin = kernel.holes(&bin, FaceSelector::from(screws.orientation), screws)?;
    }

    if let Some(first) = plan.scoops().first() {
        debug!(step = %AssemblyStep::FingerScoops, rows = plan.scoops().len(), "Assembly step");
        let profiles: Vec<Profile> = plan
            .scoops()
            .iter()
            .map(|scoop| Profile::QuarterCove(scoop.cove))
            .collect();
        bin = kernel.extrude_profiles(
            &bin,
            first.plane,
            &profiles,
            first.extrude_length,
            ExtrudeMode::Add,
        )?;
    }

    if let Some(first) = plan.ledges().first() {
        debug!(step = %AssemblyStep::LabelLedges, rows = plan.ledges().len(), "Assembly step");
        let profiles: Vec<Profile> = plan
            .ledges()
            .iter()
            .map(|ledge| Profile::Polygon(ledge.outline.clone()))
            .collect();
        bin = kernel.extrude_profiles(
            &bin,
            first.plane,
            &profiles,
            first.extrude_length,
            ExtrudeMode::Add,
        )?;
    }

    debug!(step = %AssemblyStep::StackingLip, style = %plan.lip().style(), "Assembly step");
    let lip = match plan.lip() {
        Lip::Loft(lip) => {
            let block = kernel.rounded_box(&lip.block)?;
            kernel.loft_cut(&block, &lip.sections)?
        }
        Lip::TaperedCut(lip) => {
            let mut block = kernel.rounded_box(&lip.block)?;
            for cut in &lip.cuts {
                block = kernel.tapered_cut(&block, cut)?;
            }
            block
        }
    };
    kernel.union(&bin, &lip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KernelError;
    use crate::recording::{KernelOp, RecordingKernel};
    use gridfinity_profile::mate::LipStyle;
    use gridfinity_types::{Divisions, GridDimension, Properties};

    #[test]
    fn test_minimal_sequence() {
        let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
            .build()
            .unwrap();
        let mut kernel = RecordingKernel::new();
        assemble(&mut kernel, &BinPlan::new(&props)).unwrap();

        let names: Vec<_> = kernel.op_names().collect();
        assert_eq!(
            names,
            vec![
                "rounded_box",
                "rounded_box",
                "union",
                "replicate",
                "rounded_box",
                "union",
                "extrude",
                "rounded_box",
                "loft_cut",
                "union",
            ]
        );
    }

    #[test]
    fn test_cavities_cut_downward() {
        let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
            .build()
            .unwrap();
        let mut kernel = RecordingKernel::new();
        assemble(&mut kernel, &BinPlan::new(&props)).unwrap();

        let Some(KernelOp::Extrude { length, mode, .. }) = kernel.ops().get(6) else {
            panic!("expected cavity extrusion");
        };
        assert!(*length < 0.0);
        assert_eq!(*mode, ExtrudeMode::Cut);
    }

    #[test]
    fn test_legacy_lip_cuts() {
        let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
            .build()
            .unwrap();
        let plan = BinPlan::new(&props).with_lip_style(LipStyle::TaperedCut);
        let mut kernel = RecordingKernel::new();
        assemble(&mut kernel, &plan).unwrap();

        let tail: Vec<_> = kernel.op_names().skip(7).collect();
        assert_eq!(
            tail,
            vec!["rounded_box", "tapered_cut", "tapered_cut", "tapered_cut", "union"]
        );
    }

    #[test]
    fn test_kernel_error_propagates() {
        // Ten buckets in 41.5 mm with 4 mm walls leave no room at all
        let props = Properties::builder(GridDimension::new(1, 1, 3).unwrap())
            .divisions(Divisions::from_counts([10]))
            .wall_thickness(4.0)
            .build()
            .unwrap();
        let plan = BinPlan::new(&props);
        assert!(!plan.advisories().is_empty());

        let mut kernel = RecordingKernel::new();
        let err = assemble(&mut kernel, &plan).unwrap_err();
        assert!(matches!(err, KernelError::DegenerateProfile { .. }));
    }
}
