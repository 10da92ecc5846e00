//! Line rewriting for revolver
//!
//! - patterns: anchored matching of the slicer conventions we react to
//! - state: the per-run session state threaded through each line
//! - rewriter: the single-line rewrite itself

pub mod patterns;
pub mod rewriter;
pub mod state;

pub use patterns::{LineKind, classify};
pub use rewriter::{LineRewriter, Rewrite, SELECT_COMMAND};
pub use state::SessionState;
