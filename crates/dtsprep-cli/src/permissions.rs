//! File mode adjustment
//!
//! Purely operational: failures are logged and never stop the run.

use std::io;
use std::path::Path;

/// Mode for source files: read/write for everyone, no execute bit
pub const SOURCE_MODE: u32 = 0o666;

/// Mode for produced files
pub const PRODUCT_MODE: u32 = 0o777;

/// Set the permission bits of `path`
///
/// # Errors
/// Fails if the metadata cannot be read or the mode cannot be set.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    std::fs::set_permissions(path, perms)
}

/// Set the permission bits of `path`; no-op off Unix
///
/// # Errors
/// Never fails on this platform.
#[cfg(not(unix))]
pub fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Set the mode, logging a warning on failure
pub fn adjust_mode(path: &Path, mode: u32) {
    if let Err(e) = set_mode(path, mode) {
        tracing::warn!(path = %path.display(), mode = format_args!("{mode:o}"), error = %e, "can't change file mode");
    }
}
