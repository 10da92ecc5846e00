//! Nozzle tables for revolver
//!
//! This module contains the static lookup data the rewriter consults:
//! - NozzleTable: physical nozzle profiles indexed by nozzle id
//! - FeatureMap: slicer feature names mapped to a preferred orifice diameter

pub mod features;
pub mod profile;

pub use features::{FeatureMap, normalize_feature};
pub use profile::{
    DEFAULT_TOLERANCE_MM, NozzleProfile, NozzleTable, REVOLVER_POSITIONS, format_diameter,
    nozzle_for_tool,
};
