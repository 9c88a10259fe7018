//! Device-tree compiler invocation

use crate::error::ToolError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs `dtc` over the top-level source in a working directory
#[derive(Debug, Clone)]
pub struct DeviceTreeCompiler {
    program: String,
    work_dir: PathBuf,
}

impl DeviceTreeCompiler {
    /// Create compiler invocation
    #[must_use]
    pub fn new(program: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Program name
    #[inline]
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command line for compiling `source` into `dtb_name`
    #[must_use]
    pub fn command(&self, source: &str, dtb_name: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-I", "dts", source, "-O", "dtb", "-o", dtb_name])
            .current_dir(&self.work_dir)
            .stdin(Stdio::null());
        cmd
    }

    /// Compile `source` into `dtb_name`, returning the blob's path
    ///
    /// # Errors
    /// `ToolError::Spawn` if the program cannot start, and
    /// `ToolError::ExitStatus` if it exits unsuccessfully.
    pub fn compile(&self, source: &str, dtb_name: &str) -> Result<PathBuf, ToolError> {
        tracing::info!(program = %self.program, source, dtb = dtb_name, "running device-tree compiler");
        let status = self
            .command(source, dtb_name)
            .status()
            .map_err(|source| ToolError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ToolError::ExitStatus {
                program: self.program.clone(),
                status,
            });
        }
        Ok(self.work_dir.join(dtb_name))
    }

    /// Working directory the compiler runs in
    #[inline]
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}
