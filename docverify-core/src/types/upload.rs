//! What the upload collaborator hands to the registry.
//!
//! Receiving bytes and storing them is not part of this crate; the registry only
//! ever sees the resulting file description.

use serde::{Deserialize, Serialize};

/// A stored file, as reported by the upload collaborator.
///
/// The size is informational only. It is neither validated nor persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Storage identifier of the file
    pub filename: String,
    /// Public location of the stored bytes, if the store returned one
    #[serde(default, alias = "url", skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}

/// Builds the storage filename for an upload.
///
/// Produces `<millis>_<name>` where every character of `original_name`
/// outside `[A-Za-z0-9.-]` is replaced with `_`.
pub fn storage_filename(original_name: &str, timestamp_millis: i64) -> String {
    let sanitized: String = original_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}", timestamp_millis, sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_filename() {
        assert_eq!(
            storage_filename("Transcript 2023 (final).pdf", 1700000000000),
            "1700000000000_Transcript_2023__final_.pdf"
        );
        assert_eq!(storage_filename("cert-1.pdf", 5), "5_cert-1.pdf");
        assert_eq!(storage_filename("résumé.pdf", 5), "5_r_sum_.pdf");
    }

    #[test]
    fn test_upload_accepts_url_alias() {
        let upload: UploadedFile =
            serde_json::from_str(r#"{"filename":"f.pdf","url":"/uploads/f.pdf","size":1024}"#)
                .unwrap();
        assert_eq!(upload.storage_url.as_deref(), Some("/uploads/f.pdf"));
        assert_eq!(upload.size, 1024);
    }
}
