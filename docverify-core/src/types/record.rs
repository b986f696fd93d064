//! Document records and their composite key.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DocVerifyError, Result};
use crate::types::Metadata;

/// Field names as they appear on the wire and on disk.
pub mod fields {
    /// Registration number field
    pub const REGISTRATION_NUMBER: &str = "registrationNumber";
    /// Document type field
    pub const DOCUMENT_TYPE: &str = "documentType";
    /// Storage filename field
    pub const FILENAME: &str = "filename";
}

/// The composite key identifying a registration.
///
/// At most one [`DocumentRecord`] exists per key. Matching is exact and
/// case-sensitive on both parts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentKey {
    /// Document category, e.g. "Transcript"
    pub document_type: String,
    /// Registration number, e.g. "KU0040642023"
    pub registration_number: String,
}

impl DocumentKey {
    /// Creates a key from its two parts.
    pub fn new(document_type: impl Into<String>, registration_number: impl Into<String>) -> Self {
        Self {
            document_type: document_type.into(),
            registration_number: registration_number.into(),
        }
    }

    /// Checks that both parts are non-empty. Whitespace is a value like any other.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.registration_number.is_empty() {
            missing.push(fields::REGISTRATION_NUMBER);
        }
        if self.document_type.is_empty() {
            missing.push(fields::DOCUMENT_TYPE);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocVerifyError::missing_fields(&missing))
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.document_type, self.registration_number)
    }
}

fn default_verified() -> bool {
    true
}

/// One registered document.
///
/// Records are replaced wholesale on re-registration and never edited in
/// place. Fields this version does not know about are kept in `extra` so a
/// load/save cycle does not drop them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Registration number (non-empty)
    pub registration_number: String,
    /// Document category (non-empty, open-ended)
    pub document_type: String,
    /// Opaque storage identifier
    pub filename: String,
    /// Where the file can be fetched; derived from `filename` when absent
    #[serde(default, alias = "publicUrl", skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
    /// When this version of the record was registered
    #[serde(alias = "uploadedAt")]
    pub registered_at: DateTime<Utc>,
    /// Always true for a persisted record
    #[serde(default = "default_verified")]
    pub verified: bool,
    /// Holder of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Issuing institution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Unknown fields, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DocumentRecord {
    /// Creates a record registered now, with no optional fields.
    pub fn new(
        document_type: impl Into<String>,
        registration_number: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            registration_number: registration_number.into(),
            document_type: document_type.into(),
            filename: filename.into(),
            storage_url: None,
            registered_at: Utc::now(),
            verified: true,
            student_name: None,
            institution: None,
            metadata: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Returns the composite key of this record.
    pub fn key(&self) -> DocumentKey {
        DocumentKey::new(&self.document_type, &self.registration_number)
    }

    /// Returns true if this record is registered under `key`.
    pub fn matches(&self, key: &DocumentKey) -> bool {
        self.document_type == key.document_type
            && self.registration_number == key.registration_number
    }

    /// Resolves the URL a viewer should open.
    ///
    /// Uses the storage URL when one was recorded, otherwise `prefix` joined
    /// with the filename.
    pub fn view_url(&self, uploads_prefix: &str) -> String {
        match &self.storage_url {
            Some(url) if !url.is_empty() => url.clone(),
            _ => format!("{}{}", uploads_prefix, self.filename),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Transcript", "KU0040642023", true ; "both present")]
    #[test_case("", "KU0040642023", false ; "missing type")]
    #[test_case("Transcript", "", false ; "missing registration")]
    #[test_case("  ", "KU0040642023", true ; "whitespace type")]
    #[test_case("Transcript", " ", true ; "whitespace registration")]
    #[test_case("", "", false ; "both missing")]
    fn test_key_validation(doc: &str, reg: &str, ok: bool) {
        let result = DocumentKey::new(doc, reg).validate();
        assert_eq!(result.is_ok(), ok);
        if let Err(err) = result {
            assert!(err.is_validation_error());
        }
    }

    #[test]
    fn test_key_validation_names_all_missing_fields() {
        let err = DocumentKey::new("", "").validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("registrationNumber"));
        assert!(msg.contains("documentType"));
    }

    #[test]
    fn test_matches_is_exact() {
        let record = DocumentRecord::new("Transcript", "KU0040642023", "a.pdf");
        assert!(record.matches(&DocumentKey::new("Transcript", "KU0040642023")));
        assert!(!record.matches(&DocumentKey::new("transcript", "KU0040642023")));
        assert!(!record.matches(&DocumentKey::new("Transcript", "KU0040642023 ")));
        assert!(!record.matches(&DocumentKey::new("Certificate", "KU0040642023")));
    }

    #[test]
    fn test_view_url() {
        let mut record = DocumentRecord::new("Transcript", "KU1", "1700000000000_t.pdf");
        assert_eq!(record.view_url("/uploads/"), "/uploads/1700000000000_t.pdf");

        record.storage_url = Some(String::new());
        assert_eq!(record.view_url("/uploads/"), "/uploads/1700000000000_t.pdf");

        record.storage_url = Some("https://blob.example/t.pdf".into());
        assert_eq!(record.view_url("/uploads/"), "https://blob.example/t.pdf");
    }

    #[test]
    fn test_serialized_field_names() {
        let mut record = DocumentRecord::new("Certificate", "ABC-1", "f1.pdf");
        record.student_name = Some("Amina Otieno".into());

        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("registrationNumber"));
        assert!(obj.contains_key("documentType"));
        assert!(obj.contains_key("registeredAt"));
        assert!(obj.contains_key("studentName"));
        assert_eq!(obj["verified"], serde_json::Value::Bool(true));
        // Absent optionals are omitted, not written as null
        assert!(!obj.contains_key("storageUrl"));
        assert!(!obj.contains_key("institution"));
        assert!(!obj.contains_key("metadata"));
    }

    #[test]
    fn test_legacy_field_names_accepted() {
        let json = r#"{
            "registrationNumber": "KU0040642023",
            "documentType": "Transcript",
            "filename": "1700000000000_t.pdf",
            "publicUrl": "data:application/pdf;base64,AAAA",
            "uploadedAt": "2024-03-01T10:15:30.000Z",
            "verified": true
        }"#;

        let record: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.storage_url.as_deref(), Some("data:application/pdf;base64,AAAA"));
        assert_eq!(record.registered_at.to_rfc3339(), "2024-03-01T10:15:30+00:00");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let json = r#"{
            "registrationNumber": "R1",
            "documentType": "Diploma",
            "filename": "d.pdf",
            "registeredAt": "2024-03-01T10:15:30Z",
            "verified": true,
            "graduationYear": 2023
        }"#;

        let record: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra["graduationYear"], serde_json::json!(2023));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["graduationYear"], serde_json::json!(2023));
    }
}
