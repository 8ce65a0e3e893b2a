//! Archive extraction

use super::validation::validate_member_path;
use crate::error::Result;
use std::fs;
use std::io::{self, Read, Seek};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Extract every member of the archive below `dest`
///
/// All member names are validated before the first byte is written, so an
/// unsafe archive never produces a partial extraction. Returns the member
/// names in archive order.
pub(super) fn extract_all<R: Read + Seek>(reader: R, dest: &Path) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(reader)?;

    for name in archive.file_names() {
        validate_member_path(name)?;
    }

    debug!(members = archive.len(), dest = %dest.display(), "extracting archive");

    let mut members = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let relative = validate_member_path(entry.name())?;
        members.push(entry.name().to_string());

        // "./" style entries resolve to the root itself
        if relative.as_os_str().is_empty() {
            continue;
        }

        let output_path = dest.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = fs::File::create(&output_path)?;
            io::copy(&mut entry, &mut outfile)?;
        }
    }

    Ok(members)
}

/// Read an extracted part as text, replacing invalid UTF-8
pub(super) fn read_text(root: &Path, name: &str) -> Result<Option<String>> {
    let path = root.join(validate_member_path(name)?);
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(&path)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
