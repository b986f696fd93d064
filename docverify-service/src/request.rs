//! Registration requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docverify_core::error::{DocVerifyError, Result};
use docverify_core::types::{fields, DocumentKey, DocumentRecord, Metadata, UploadedFile};

/// Everything needed to register (or re-register) a document.
///
/// Optional fields left out here are absent from the stored record, even if a
/// previous registration under the same key had them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Document category
    #[serde(default)]
    pub document_type: String,
    /// Registration number
    #[serde(default)]
    pub registration_number: String,
    /// Storage identifier of the uploaded file
    #[serde(default)]
    pub filename: String,
    /// Public location of the file
    #[serde(default, alias = "publicUrl", skip_serializing_if = "Option::is_none")]
    pub storage_url: Option<String>,
    /// Holder of the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Issuing institution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Free-form metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl RegisterRequest {
    /// Creates a request with the three required fields.
    pub fn new(
        document_type: impl Into<String>,
        registration_number: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            registration_number: registration_number.into(),
            filename: filename.into(),
            ..Default::default()
        }
    }

    /// Creates a request for a file handed over by the upload collaborator.
    pub fn from_upload(key: DocumentKey, upload: UploadedFile) -> Self {
        Self {
            document_type: key.document_type,
            registration_number: key.registration_number,
            filename: upload.filename,
            storage_url: upload.storage_url,
            ..Default::default()
        }
    }

    /// Sets the storage URL.
    pub fn with_storage_url(mut self, url: impl Into<String>) -> Self {
        self.storage_url = Some(url.into());
        self
    }

    /// Sets the student name.
    pub fn with_student_name(mut self, name: impl Into<String>) -> Self {
        self.student_name = Some(name.into());
        self
    }

    /// Sets the issuing institution.
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// Sets the metadata bag.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the composite key this request registers under.
    pub fn key(&self) -> DocumentKey {
        DocumentKey::new(&self.document_type, &self.registration_number)
    }

    /// Checks that the required fields are present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            (fields::REGISTRATION_NUMBER, &self.registration_number),
            (fields::DOCUMENT_TYPE, &self.document_type),
            (fields::FILENAME, &self.filename),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DocVerifyError::missing_fields(&missing))
        }
    }

    /// Builds the record to store, stamped with `registered_at`.
    pub(crate) fn into_record(self, registered_at: DateTime<Utc>) -> DocumentRecord {
        let mut record =
            DocumentRecord::new(self.document_type, self.registration_number, self.filename);
        record.storage_url = self.storage_url;
        record.registered_at = registered_at;
        record.student_name = self.student_name;
        record.institution = self.institution;
        record.metadata = self.metadata;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_fields() {
        assert!(RegisterRequest::new("Transcript", "KU1", "t.pdf").validate().is_ok());

        let err = RegisterRequest::new("Transcript", "", "").validate().unwrap_err();
        assert!(err.is_validation_error());
        let msg = err.to_string();
        assert!(msg.contains("registrationNumber"));
        assert!(msg.contains("filename"));
        assert!(!msg.contains("documentType"));
    }

    #[test]
    fn test_deserialize_original_body() {
        let body = r#"{
            "registrationNumber": "KU0040642023",
            "documentType": "Transcript",
            "filename": "1700000000000_t.pdf",
            "publicUrl": "https://blob.example/t.pdf",
            "studentName": "Amina Otieno",
            "institution": "Kenyatta University"
        }"#;

        let req: RegisterRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.storage_url.as_deref(), Some("https://blob.example/t.pdf"));
        assert_eq!(req.key(), DocumentKey::new("Transcript", "KU0040642023"));
        assert!(req.metadata.is_none());
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"documentType":"Transcript"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_from_upload() {
        let upload = UploadedFile {
            filename: "1700000000000_c.pdf".into(),
            storage_url: Some("/uploads/1700000000000_c.pdf".into()),
            size: 52_431,
        };

        let req = RegisterRequest::from_upload(DocumentKey::new("Certificate", "ABC-1"), upload)
            .with_student_name("Brian Kamau");

        assert_eq!(req.filename, "1700000000000_c.pdf");
        assert_eq!(req.storage_url.as_deref(), Some("/uploads/1700000000000_c.pdf"));
        assert_eq!(req.student_name.as_deref(), Some("Brian Kamau"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_into_record_marks_verified() {
        let now = Utc::now();
        let record = RegisterRequest::new("Diploma", "D-1", "d.pdf")
            .with_institution("Moi University")
            .into_record(now);

        assert!(record.verified);
        assert_eq!(record.registered_at, now);
        assert_eq!(record.institution.as_deref(), Some("Moi University"));
        assert!(record.extra.is_empty());
    }
}
