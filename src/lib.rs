//! Revolver - G-code post-processor for a revolver nozzle changer
//!
//! Rewrites slicer output so that tool changes and `;TYPE:` feature
//! annotations become `REVOLVER_SELECT` commands, with matching hotend
//! temperature changes.

pub mod error;
pub mod nozzle;
pub mod processor;
pub mod rewrite;

pub use error::{Result, RevolverError};
pub use nozzle::{FeatureMap, NozzleProfile, NozzleTable};
pub use processor::{FileProcessor, ProcessOutcome, ProcessSummary, default_output_path};
pub use rewrite::{LineRewriter, Rewrite, SessionState};
