//! Pipeline configuration
//!
//! There is no config file: the fixed file sets and names live in
//! [`PrepConfig::default`], and the CLI only toggles ignore-errors mode.

use dtsprep_core::{RewriteOptions, StructurePolicy};
use std::path::{Path, PathBuf};

/// Files the OS developers supply
pub const OS_DEV_FILES: [&str; 7] = [
    "adi-fmcomms2.dtsi",
    "ethernet.dtsi",
    "pl_ad9361.dtsi",
    "pl_int_rs485.dtsi",
    "pl_software.dtsi",
    "qspi.dtsi",
    "system-top.dts",
];

/// Files exported by the FPGA toolchain
pub const FPGA_FILES: [&str; 3] = ["pcw.dtsi", "pl.dtsi", "zynq-7000.dtsi"];

/// File rewritten by the pipeline
pub const DEFAULT_REWRITE_TARGET: &str = "pl.dtsi";

/// Prefix of the rewritten file's name
pub const DEFAULT_OUTPUT_PREFIX: &str = "mod_";

/// Top-level source handed to the compiler
pub const DEFAULT_TOP_LEVEL_SOURCE: &str = "system-top.dts";

/// Name of the produced blob
pub const DEFAULT_DTB_NAME: &str = "radiomodule.dtb";

/// Device-tree compiler program
pub const DEFAULT_DTC_PROGRAM: &str = "dtc";

/// Configuration of one preparation run
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Directory holding every source file
    pub work_dir: PathBuf,
    /// OS-developer files that must be present
    pub os_dev_files: Vec<String>,
    /// FPGA files that must be present
    pub fpga_files: Vec<String>,
    /// File to rewrite
    pub rewrite_target: String,
    /// Prefix added to the rewritten file's name
    pub output_prefix: String,
    /// Source compiled into the blob
    pub top_level_source: String,
    /// Blob file name
    pub dtb_name: String,
    /// Compiler program
    pub dtc_program: String,
    /// Report missing files instead of stopping
    pub ignore_errors: bool,
    /// Rewrite rules; the policy is derived from `ignore_errors`
    pub rewrite: RewriteOptions,
}

impl PrepConfig {
    /// Create default configuration rooted at `work_dir`
    #[inline]
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            ..Self::default()
        }
    }

    /// Create default configuration rooted at the current directory
    ///
    /// # Errors
    /// Fails if the current directory is unavailable.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// With ignore-errors mode
    #[inline]
    #[must_use]
    pub fn with_ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }

    /// With compiler program
    #[inline]
    #[must_use]
    pub fn with_dtc_program(mut self, program: impl Into<String>) -> Self {
        self.dtc_program = program.into();
        self
    }

    /// With rewrite rules
    #[inline]
    #[must_use]
    pub fn with_rewrite_options(mut self, options: RewriteOptions) -> Self {
        self.rewrite = options;
        self
    }

    /// Path of `name` inside the working directory
    #[inline]
    #[must_use]
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        self.work_dir.join(name)
    }

    /// Rewrite options with the policy matching the error mode
    #[must_use]
    pub fn rewrite_options(&self) -> RewriteOptions {
        let policy = if self.ignore_errors {
            StructurePolicy::BestEffort
        } else {
            StructurePolicy::Strict
        };
        self.rewrite.clone().with_policy(policy)
    }
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            os_dev_files: OS_DEV_FILES.iter().map(ToString::to_string).collect(),
            fpga_files: FPGA_FILES.iter().map(ToString::to_string).collect(),
            rewrite_target: DEFAULT_REWRITE_TARGET.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            top_level_source: DEFAULT_TOP_LEVEL_SOURCE.to_string(),
            dtb_name: DEFAULT_DTB_NAME.to_string(),
            dtc_program: DEFAULT_DTC_PROGRAM.to_string(),
            ignore_errors: false,
            rewrite: RewriteOptions::default(),
        }
    }
}
