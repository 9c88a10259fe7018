//! Output path derivation

use crate::error::PrepError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Sibling of `path` whose file name carries `prefix`
///
/// `/x/y/pl.dtsi` with `mod_` becomes `/x/y/mod_pl.dtsi`.
///
/// # Errors
/// `PrepError::InvalidFileName` if `path` has no file name.
pub fn prefixed_sibling(path: &Path, prefix: &str) -> Result<PathBuf, PrepError> {
    let name = path.file_name().ok_or_else(|| PrepError::InvalidFileName {
        path: path.to_path_buf(),
    })?;
    let mut renamed = OsString::from(prefix);
    renamed.push(name);
    Ok(path.with_file_name(renamed))
}
