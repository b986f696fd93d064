//! DTOs for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docverify_core::constants::{NOT_VERIFIED_MESSAGE, REGISTERED_MESSAGE, REMOVED_MESSAGE};
use docverify_core::types::{DocumentKey, DocumentRecord};
use docverify_service::{DocumentSummary, Registration, VerifiedDocument};

/// Query string of `GET /api/verify` and `DELETE /api/verify`.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentQuery {
    /// Document type
    pub doc: Option<String>,
    /// Registration number
    pub reg: Option<String>,
}

impl DocumentQuery {
    /// Returns the key when both parameters are present and non-empty.
    pub fn key(&self) -> Option<DocumentKey> {
        match (self.doc.as_deref(), self.reg.as_deref()) {
            (Some(doc), Some(reg)) if !doc.is_empty() && !reg.is_empty() => {
                Some(DocumentKey::new(doc, reg))
            }
            _ => None,
        }
    }
}

/// Response for a successful verification.
#[derive(Debug, Serialize)]
pub struct VerifiedResponse {
    /// Always true
    pub verified: bool,
    /// The registered document
    pub document: VerifiedDocument,
}

impl From<VerifiedDocument> for VerifiedResponse {
    fn from(document: VerifiedDocument) -> Self {
        Self {
            verified: true,
            document,
        }
    }
}

/// Response when nothing is registered under the queried key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotVerifiedResponse {
    /// Always false
    pub verified: bool,
    /// Human-readable explanation
    pub message: String,
    /// Registration number as queried
    pub registration_number: String,
    /// Document type as queried
    pub document_type: String,
}

impl From<DocumentKey> for NotVerifiedResponse {
    fn from(key: DocumentKey) -> Self {
        Self {
            verified: false,
            message: NOT_VERIFIED_MESSAGE.into(),
            registration_number: key.registration_number,
            document_type: key.document_type,
        }
    }
}

/// Response for a registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Always true
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
    /// Shareable verification reference
    pub verification_url: String,
    /// The record as stored
    pub document: DocumentRecord,
}

impl From<Registration> for RegisterResponse {
    fn from(registration: Registration) -> Self {
        Self {
            success: true,
            message: REGISTERED_MESSAGE.into(),
            verification_url: registration.verification_url,
            document: registration.document,
        }
    }
}

/// Response for a removal.
#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    /// Always true
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
}

impl RemoveResponse {
    pub fn removed() -> Self {
        Self {
            success: true,
            message: REMOVED_MESSAGE.into(),
        }
    }
}

/// A listed file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub filename: String,
    pub url: String,
    /// Not tracked by the registry; always 0
    pub size: u64,
    #[serde(rename = "uploadedAt")]
    pub registered_at: DateTime<Utc>,
    pub registration_number: String,
    pub document_type: String,
}

impl From<DocumentSummary> for FileEntry {
    fn from(summary: DocumentSummary) -> Self {
        Self {
            filename: summary.filename,
            url: summary.url,
            size: 0,
            registered_at: summary.registered_at,
            registration_number: summary.registration_number,
            document_type: summary.document_type,
        }
    }
}

/// Response for listing.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Registered files in storage order
    pub files: Vec<FileEntry>,
}

/// Response for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Registered documents, absent when the registry cannot be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key() {
        let q = DocumentQuery {
            doc: Some("Transcript".into()),
            reg: Some("KU1".into()),
        };
        assert_eq!(q.key(), Some(DocumentKey::new("Transcript", "KU1")));

        let q = DocumentQuery {
            doc: Some("Transcript".into()),
            reg: Some(String::new()),
        };
        assert!(q.key().is_none());
        assert!(DocumentQuery::default().key().is_none());
    }

    #[test]
    fn test_not_verified_shape() {
        let body = NotVerifiedResponse::from(DocumentKey::new("Transcript", "KU1"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "verified": false,
                "message": "Document not found or not verified",
                "registrationNumber": "KU1",
                "documentType": "Transcript"
            })
        );
    }
}
