//! Stacking interface (lip) profiles.
//!
//! The lip on top of a bin is what the feet of the bin above register in.
//! Its cross-section is fixed by the standard; the section heights, insets
//! and radii below are reproduced exactly.
//!
//! Two constructions exist:
//!
//! - [`stacking_lip`]: a block with a lofted void subtracted, passing through
//!   six rounded-rectangle sections. This is the canonical construction.
//! - [`legacy_lip`]: a shorter block shaped by one straight and two 45 degree
//!   tapered cuts. It predates the loft and yields a different lip; it is
//!   kept selectable through [`LipStyle`] rather than merged.

use gridfinity_types::GridDimension;
use gridfinity_types::standard::OUTER_CORNER_RADIUS_MM;
use serde::{Deserialize, Serialize};

use crate::base::{body_top, footprint};
use crate::sketch::{RoundedBox, RoundedRect};

/// Height of the lofted lip block in mm.
pub const LIP_HEIGHT_MM: f64 = 7.24;

/// How far the lip block reaches down into the body, in mm.
pub const LIP_OVERLAP_MM: f64 = 2.84;

/// Loft sections as `(depth below lip top, inset, corner radius)`, top first.
pub const LIP_SECTIONS: [(f64, f64, f64); 6] = [
    (0.0, 0.0, OUTER_CORNER_RADIUS_MM),
    (1.9, 1.9, OUTER_CORNER_RADIUS_MM - 1.9),
    (3.7, 1.9, OUTER_CORNER_RADIUS_MM - 1.9),
    (4.4, 2.6, OUTER_CORNER_RADIUS_MM - 2.6),
    (5.6, 2.6, OUTER_CORNER_RADIUS_MM - 2.6),
    (7.24, 0.8, OUTER_CORNER_RADIUS_MM - 1.0),
];

/// Height of the legacy lip block in mm.
pub const LEGACY_LIP_HEIGHT_MM: f64 = 2.4 + 1.0 + 1.6;

/// Which lip construction to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LipStyle {
    /// Lofted six-section lip.
    #[default]
    Loft,
    /// Straight plus tapered cuts.
    TaperedCut,
}

impl std::fmt::Display for LipStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loft => write!(f, "loft"),
            Self::TaperedCut => write!(f, "tapered-cut"),
        }
    }
}

/// One cross-section of the lofted void.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoftSection {
    /// Absolute height of the section in mm.
    pub z: f64,
    /// Inset from the outer footprint in mm.
    pub inset: f64,
    /// Section outline.
    pub outline: RoundedRect,
}

/// Lofted stacking lip.
///
/// The lip solid is `block` minus the loft through `sections`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackingLip {
    /// Solid block the void is subtracted from.
    pub block: RoundedBox,
    /// Loft sections, bottom first.
    pub sections: Vec<LoftSection>,
}

/// Build the lofted stacking lip for a bin.
///
/// # Example
///
/// ```
/// use gridfinity_profile::mate::stacking_lip;
/// use gridfinity_types::GridDimension;
///
/// let lip = stacking_lip(GridDimension::new(1, 1, 3).unwrap());
/// assert_eq!(lip.sections.len(), 6);
/// assert!((lip.sections[1].inset - 2.6).abs() < 1e-12);
/// ```
#[must_use]
pub fn stacking_lip(dimension: GridDimension) -> StackingLip {
    let outline = footprint(dimension);
    let block = RoundedBox::new(
        outline,
        body_top(dimension) - LIP_OVERLAP_MM,
        LIP_HEIGHT_MM,
    );
    let top = block.top_z();

    let sections = LIP_SECTIONS
        .iter()
        .rev()
        .map(|&(depth, inset, radius)| LoftSection {
            z: top - depth,
            inset,
            outline: outline.inset(inset, radius),
        })
        .collect();

    StackingLip { block, sections }
}

/// Face a tapered cut starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CutFace {
    /// Top face, cutting downward.
    Top,
    /// Bottom face, cutting upward.
    Bottom,
}

/// A through-cut of a rounded rectangle, optionally tapered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaperedCut {
    /// Face the cut is sketched on.
    pub face: CutFace,
    /// Outline on that face.
    pub outline: RoundedRect,
    /// Taper angle in degrees; positive narrows into the material.
    pub taper_deg: f64,
}

/// Cut-based stacking lip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyLip {
    /// Block standing on the body top.
    pub block: RoundedBox,
    /// Cuts applied to the block in order.
    pub cuts: Vec<TaperedCut>,
}

/// Build the legacy cut-based lip for a bin.
#[must_use]
pub fn legacy_lip(dimension: GridDimension) -> LegacyLip {
    let outline = footprint(dimension);
    let block = RoundedBox::new(outline, body_top(dimension), LEGACY_LIP_HEIGHT_MM);

    let cuts = vec![
        TaperedCut {
            face: CutFace::Top,
            outline: outline.inset(2.4, OUTER_CORNER_RADIUS_MM - 2.4),
            taper_deg: 0.0,
        },
        TaperedCut {
            face: CutFace::Top,
            outline,
            taper_deg: 45.0,
        },
        TaperedCut {
            face: CutFace::Bottom,
            outline: outline.inset(0.8, OUTER_CORNER_RADIUS_MM),
            taper_deg: -45.0,
        },
    ];

    LegacyLip { block, cuts }
}
