//! Atomic output files
//!
//! The destination is written to a temp file in its own directory and
//! renamed into place only after the writer succeeds.

use crate::error::PrepError;
use dtsprep_core::RewriteError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `dest` through `fill`, replacing it only if `fill` succeeds
///
/// # Errors
/// `OutputOpen` if the temp file cannot be created, whatever `fill`
/// returns, a write error if flushing fails, and `Persist` if the rename
/// fails. On error `dest` is left untouched.
pub fn write_atomically<T, F>(dest: &Path, fill: F) -> Result<T, PrepError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<T, PrepError>,
{
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| PrepError::OutputOpen {
        path: dest.to_path_buf(),
        source,
    })?;

    let value = {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let value = fill(&mut writer)?;
        writer
            .into_inner()
            .map_err(|e| RewriteError::Write(e.into_error()))?;
        value
    };

    tmp.persist(dest).map_err(|e| PrepError::Persist {
        path: dest.to_path_buf(),
        source: e.error,
    })?;
    tracing::debug!(path = %dest.display(), "output persisted");
    Ok(value)
}
