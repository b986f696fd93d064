//! Outcomes of service operations.
//!
//! A missing document is a normal outcome here, not an error.

use chrono::{DateTime, Utc};
use serde::Serialize;

use docverify_core::types::{DocumentKey, DocumentRecord, Metadata, Upsert};

/// Result of a successful registration.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
    /// The record as stored
    pub document: DocumentRecord,
    /// Shareable verification reference
    pub verification_url: String,
    /// Whether a previous registration was replaced
    pub outcome: Upsert,
}

impl Registration {
    /// Returns true if this registration replaced an earlier one.
    pub fn replaced(&self) -> bool {
        matches!(self.outcome, Upsert::Replaced(_))
    }
}

/// A verified document, as shown to a third party.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedDocument {
    /// Registration number
    pub registration_number: String,
    /// Document category
    pub document_type: String,
    /// Storage filename
    pub filename: String,
    /// When the registration was made
    pub registered_at: DateTime<Utc>,
    /// Resolved location of the file
    pub url: String,
    /// Student name, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    /// Issuing institution, if recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Additional attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl VerifiedDocument {
    /// Builds the viewable form of `record`.
    pub fn from_record(record: &DocumentRecord, uploads_prefix: &str) -> Self {
        Self {
            registration_number: record.registration_number.clone(),
            document_type: record.document_type.clone(),
            filename: record.filename.clone(),
            registered_at: record.registered_at,
            url: record.view_url(uploads_prefix),
            student_name: record.student_name.clone(),
            institution: record.institution.clone(),
            metadata: record.metadata.clone(),
        }
    }
}

/// Result of a verification query.
#[derive(Clone, Debug, PartialEq)]
pub enum Verification {
    /// Exactly one record matched.
    Verified(VerifiedDocument),
    /// Nothing is registered under the queried key, echoed back.
    NotFound(DocumentKey),
}

impl Verification {
    /// Returns true if a record matched.
    pub fn is_verified(&self) -> bool {
        matches!(self, Verification::Verified(_))
    }

    /// Returns the matched document, if any.
    pub fn document(&self) -> Option<&VerifiedDocument> {
        match self {
            Verification::Verified(doc) => Some(doc),
            Verification::NotFound(_) => None,
        }
    }
}

/// Result of a removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The registration was deleted.
    Removed,
    /// Nothing was registered under the key; the registry is unchanged.
    NotFound,
}

/// One entry of the registry listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Registration number
    pub registration_number: String,
    /// Document category
    pub document_type: String,
    /// Storage filename
    pub filename: String,
    /// Resolved location of the file
    pub url: String,
    /// When the registration was made
    pub registered_at: DateTime<Utc>,
}

impl DocumentSummary {
    /// Builds the summary of `record`.
    pub fn from_record(record: &DocumentRecord, uploads_prefix: &str) -> Self {
        Self {
            registration_number: record.registration_number.clone(),
            document_type: record.document_type.clone(),
            filename: record.filename.clone(),
            url: record.view_url(uploads_prefix),
            registered_at: record.registered_at,
        }
    }

    /// Returns the composite key of the summarized record.
    pub fn key(&self) -> DocumentKey {
        DocumentKey::new(&self.document_type, &self.registration_number)
    }
}
