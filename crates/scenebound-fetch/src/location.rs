use std::path::{Path, PathBuf};

use crate::FetchError;

pub const FILE_SCHEME: &str = "file://";

/// Turns a location string into a path on disk.
///
/// Accepts plain paths and `file://` urls. Relative paths are joined onto `base_dir`,
/// any other `<scheme>://` prefix is rejected.
pub fn resolve_location(location: &str, base_dir: &Path) -> Result<PathBuf, FetchError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(FetchError::EmptyLocation);
    }

    let path = if let Some(stripped) = trimmed.strip_prefix(FILE_SCHEME) {
        stripped
    } else if let Some((scheme, _)) = trimmed.split_once("://") {
        return Err(FetchError::UnsupportedScheme {
            scheme: scheme.to_owned(),
        });
    } else {
        trimmed
    };

    let path = Path::new(path);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(base_dir.join(path))
    }
}

/// Lowercase extension of the location, without the leading dot.
pub fn location_extension(location: &str) -> Option<String> {
    let name = location.rsplit(['/', '\\']).next()?;
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        None
    } else {
        Some(extension.to_ascii_lowercase())
    }
}
