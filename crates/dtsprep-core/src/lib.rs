//! dtsprep core - device-tree source rewrite engine
//!
//! Rewrites a `pl.dtsi`-style source in a single pass:
//!
//! - **Disable**: blocks of the configured target devices are wrapped in a
//!   comment, preceded by a banner.
//! - **Inject**: every FIFO node gets extra property lines right after its
//!   trigger line.
//!
//! Lines neither rule touches are written back byte for byte. Running the
//! engine over its own output changes nothing.
//!
//! # Architecture
//!
//! ```text
//! source text → SourceLines → LineTransformer ─┬→ disable::step
//!                                              └→ inject::step
//!                                   ↓
//!                              sink + RewriteReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use dtsprep_core::{rewrite, RewriteOptions};
//!
//! let source = "axi_fifo_mm_s@40000000 {\n\txlnx,use-tx-data = <0x1>;\n};\n";
//! let (output, report) = rewrite(source, &RewriteOptions::default()).unwrap();
//!
//! assert_eq!(report.counters.nodes_injected, 1);
//! assert!(output.contains("xlnx,tx-max-pkt-size = <511>;"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod action;
pub mod banner;
pub mod error;
pub mod line;
pub mod matcher;
pub mod options;
pub mod report;
pub mod state_machine;
pub mod transformer;

// Re-exports for convenience
pub use action::{Action, Transition};
pub use error::{RewriteError, RewriteResult};
pub use line::{LineView, SourceLines};
pub use matcher::{LineMatcher, MatchPatterns, SubstringMatcher};
pub use options::{RewriteOptions, StructurePolicy};
pub use report::{DisabledBlock, InjectedNode, RewriteReport, RunCounters};
pub use state_machine::{DisableEvent, DisableSpan, DisableState, FifoNode, InjectEvent, InjectState};
pub use transformer::{rewrite, LineTransformer, TransformContext};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the rewrite engine
    pub use crate::error::{RewriteError, RewriteResult};
    pub use crate::options::{RewriteOptions, StructurePolicy};
    pub use crate::report::{RewriteReport, RunCounters};
    pub use crate::transformer::{rewrite, LineTransformer};
}
