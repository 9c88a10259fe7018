//! dtsprep - device-tree source preparation
//!
//! Checks that the OS-developer and FPGA device-tree sources are present,
//! rewrites `pl.dtsi` into `mod_pl.dtsi` with [`dtsprep_core`], and runs
//! `dtc` to build `radiomodule.dtb`.
//!
//! # Architecture
//!
//! ```text
//! cli → PrepConfig → Preparer ─┬→ presence (OS-dev files, FPGA files)
//!                              ├→ rewrite → output (temp file + persist)
//!                              └→ dtc
//!                         ↓
//!                 Reporter (stdout) + tracing (stderr)
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod config;
pub mod dtc;
pub mod error;
pub mod logging;
pub mod output;
pub mod paths;
pub mod permissions;
pub mod pipeline;
pub mod presence;
pub mod report;

pub use cli::CliArgs;
pub use config::PrepConfig;
pub use dtc::DeviceTreeCompiler;
pub use error::{PrepError, ToolError};
pub use pipeline::{PrepSummary, Preparer, RewriteOutcome};
pub use presence::FileCheck;
pub use report::Reporter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
