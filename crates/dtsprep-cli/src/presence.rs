//! Required-file presence checks

use crate::error::PrepError;
use crate::permissions::{adjust_mode, SOURCE_MODE};
use crate::report::Reporter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of checking one file set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCheck {
    /// Files found
    pub present: Vec<PathBuf>,
    /// Files missing; only populated when errors are ignored
    pub missing: Vec<PathBuf>,
}

impl FileCheck {
    /// Whether every file was found
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that each of `names` exists under `dir`
///
/// Each file is reported as it is checked. Present files get the source
/// mode. A missing file stops the check unless `ignore_errors` is set.
///
/// # Errors
/// `MissingFile` for the first absent file when errors are not ignored,
/// `Report` if console output fails.
pub fn check_files<W: Write>(
    dir: &Path,
    names: &[String],
    ignore_errors: bool,
    reporter: &mut Reporter<W>,
) -> Result<FileCheck, PrepError> {
    let mut check = FileCheck::default();
    for name in names {
        let path = dir.join(name);
        let present = path.is_file();
        reporter.file_status(&path, present).map_err(PrepError::Report)?;

        if present {
            adjust_mode(&path, SOURCE_MODE);
            check.present.push(path);
        } else if ignore_errors {
            tracing::warn!(path = %path.display(), "required file missing, continuing");
            check.missing.push(path);
        } else {
            tracing::error!(path = %path.display(), "required file missing");
            return Err(PrepError::MissingFile { path });
        }
    }
    Ok(check)
}
