//! The preparation run
//!
//! Order is fixed: OS-developer files, FPGA files, the `pl.dtsi` rewrite,
//! then the compiler. Only the compiler step is allowed to fail quietly.

use crate::config::PrepConfig;
use crate::dtc::DeviceTreeCompiler;
use crate::error::{PrepError, ToolError};
use crate::output::write_atomically;
use crate::paths::prefixed_sibling;
use crate::permissions::{adjust_mode, PRODUCT_MODE, SOURCE_MODE};
use crate::presence::{check_files, FileCheck};
use crate::report::Reporter;
use dtsprep_core::{LineTransformer, RewriteReport};
use std::io::Write;
use std::path::PathBuf;

/// Heading printed before the OS-developer file check
pub const OS_DEV_HEADING: &str = "Check for OS-developers files in current directory:";

/// Heading printed before the FPGA file check
pub const FPGA_HEADING: &str = "Check for FPGA-files in current directory:";

/// Result of rewriting the target file
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    /// File that was read
    pub source: PathBuf,
    /// File that was written
    pub output: PathBuf,
    /// What the pass changed
    pub report: RewriteReport,
}

/// Everything a completed run produced
#[derive(Debug)]
pub struct PrepSummary {
    /// OS-developer file check
    pub os_dev_files: FileCheck,
    /// FPGA file check
    pub fpga_files: FileCheck,
    /// Rewrite of the target file
    pub rewrite: RewriteOutcome,
    /// Compiler outcome; failure does not fail the run
    pub dtb: Result<PathBuf, ToolError>,
}

impl PrepSummary {
    /// Files reported missing across both checks
    pub fn missing_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.os_dev_files.missing.iter().chain(&self.fpga_files.missing)
    }
}

/// Drives one preparation run
#[derive(Debug)]
pub struct Preparer<W: Write> {
    config: PrepConfig,
    reporter: Reporter<W>,
}

impl<W: Write> Preparer<W> {
    /// Create preparer
    #[must_use]
    pub fn new(config: PrepConfig, reporter: Reporter<W>) -> Self {
        Self { config, reporter }
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Consume the preparer, returning its reporter
    #[must_use]
    pub fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }

    /// Run every step in order
    ///
    /// # Errors
    /// Any fatal [`PrepError`]; the compiler step never fails the run.
    pub fn run(&mut self) -> Result<PrepSummary, PrepError> {
        tracing::info!(work_dir = %self.config.work_dir.display(), ignore_errors = self.config.ignore_errors, "preparation started");

        let os_dev_names = self.config.os_dev_files.clone();
        let fpga_names = self.config.fpga_files.clone();
        let os_dev_files = self.check(OS_DEV_HEADING, &os_dev_names)?;
        let fpga_files = self.check(FPGA_HEADING, &fpga_names)?;
        let rewrite = self.rewrite_target()?;
        let dtb = self.build_dtb()?;

        tracing::info!(
            disabled = rewrite.report.counters.blocks_disabled,
            injected = rewrite.report.counters.nodes_injected,
            dtb_ok = dtb.is_ok(),
            "preparation finished"
        );
        Ok(PrepSummary {
            os_dev_files,
            fpga_files,
            rewrite,
            dtb,
        })
    }

    fn check(&mut self, heading: &str, names: &[String]) -> Result<FileCheck, PrepError> {
        self.reporter.heading(heading).map_err(PrepError::Report)?;
        check_files(&self.config.work_dir, names, self.config.ignore_errors, &mut self.reporter)
    }

    /// Rewrite the target file into its prefixed sibling
    ///
    /// # Errors
    /// Missing target, unreadable input, underivable output name, a failed
    /// pass, or a failed write.
    pub fn rewrite_target(&mut self) -> Result<RewriteOutcome, PrepError> {
        let source = self.config.resolve(&self.config.rewrite_target);
        if !source.is_file() {
            tracing::error!(path = %source.display(), "rewrite target missing");
            return Err(PrepError::MissingRewriteTarget { path: source });
        }
        let output = prefixed_sibling(&source, &self.config.output_prefix)?;

        adjust_mode(&source, SOURCE_MODE);
        let text = std::fs::read_to_string(&source).map_err(|e| PrepError::ReadInput {
            path: source.clone(),
            source: e,
        })?;

        let transformer = LineTransformer::new(self.config.rewrite_options());
        let report = write_atomically(&output, |sink| Ok(transformer.run(&text, sink)?))?;

        adjust_mode(&output, PRODUCT_MODE);
        adjust_mode(&source, SOURCE_MODE);

        self.reporter.changes(&report).map_err(PrepError::Report)?;
        self.reporter
            .structure_warnings(&report)
            .map_err(PrepError::Report)?;
        self.reporter
            .summary(&output, &report)
            .map_err(PrepError::Report)?;

        Ok(RewriteOutcome {
            source,
            output,
            report,
        })
    }

    /// Compile the top-level source; failure is reported, not returned
    ///
    /// # Errors
    /// Only `Report` if console output fails.
    pub fn build_dtb(&mut self) -> Result<Result<PathBuf, ToolError>, PrepError> {
        let compiler = DeviceTreeCompiler::new(&self.config.dtc_program, &self.config.work_dir);
        let result = compiler.compile(&self.config.top_level_source, &self.config.dtb_name);
        match &result {
            Ok(dtb) => adjust_mode(dtb, PRODUCT_MODE),
            Err(e) => tracing::warn!(error = %e, "DTB not created"),
        }
        self.reporter
            .dtb_result(&self.config.dtb_name, &result)
            .map_err(PrepError::Report)?;
        Ok(result)
    }
}
