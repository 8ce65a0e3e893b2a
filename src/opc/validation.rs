//! Archive member path validation

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Validate an archive member name and return its path relative to the
/// extraction root.
///
/// Rejects absolute names and names whose `..` components would climb above
/// the extraction root. `.` components are dropped and interior `..` are
/// collapsed, so the returned path never contains either.
pub(crate) fn validate_member_path(member: &str) -> Result<PathBuf> {
    // A leading separator is absolute in the archive even on platforms where
    // `Path::is_absolute` needs a drive prefix.
    if member.starts_with('/') || member.starts_with('\\') || Path::new(member).is_absolute() {
        return Err(Error::unsafe_path(member, "absolute path"));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(member).components() {
        match component {
            Component::Normal(segment) => relative.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(Error::unsafe_path(member, "escapes extraction directory"));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::unsafe_path(member, "absolute path"));
            }
        }
    }

    Ok(relative)
}

/// Normalize a part name by removing the leading slash
pub(crate) fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
