//! File-intake validation.
//!
//! Intake producers (file picker, drag-and-drop) enforce the allow-list at
//! their boundary; the session re-validates through the same functions.

use bytes::Bytes;

use papermint_shared::constants::ACCEPTED_EXTENSIONS;
use papermint_shared::error::IntakeError;
use papermint_shared::models::UploadItem;

/// Check a file name against the accepted-extension allow-list.
pub fn validate_file_name(name: &str) -> Result<(), IntakeError> {
    let accepted = name
        .rsplit_once('.')
        .map(|(stem, ext)| !stem.is_empty() && ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if accepted {
        Ok(())
    } else {
        Err(IntakeError::UnsupportedFileType {
            name: name.to_string(),
        })
    }
}

/// Build an [`UploadItem`] from a validated name and raw content.
pub fn upload_item(name: &str, data: Bytes) -> Result<UploadItem, IntakeError> {
    validate_file_name(name)?;
    Ok(UploadItem {
        name: name.to_string(),
        size_bytes: data.len() as u64,
        data,
    })
}
