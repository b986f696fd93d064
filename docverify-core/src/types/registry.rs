//! The registry aggregate.

use serde::{Deserialize, Serialize};

use crate::types::{DocumentKey, DocumentRecord};

/// Outcome of an upsert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    /// No record existed for the key; the new one was appended.
    Inserted,
    /// An existing record was replaced at the given position.
    Replaced(usize),
}

/// The persisted collection of all document records.
///
/// Serialized as `{ "documents": [...] }`. Order is preserved across a
/// load/save cycle but carries no meaning. Lookups are linear scans.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    /// Registered documents, in storage order
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
    /// Unknown top-level fields, preserved verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Registry {
    /// Creates a registry holding `documents`.
    pub fn from_documents(documents: Vec<DocumentRecord>) -> Self {
        Self {
            documents,
            extra: serde_json::Map::new(),
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no documents are registered.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the position of the record registered under `key`.
    pub fn position(&self, key: &DocumentKey) -> Option<usize> {
        self.documents.iter().position(|d| d.matches(key))
    }

    /// Returns the record registered under `key`.
    pub fn find(&self, key: &DocumentKey) -> Option<&DocumentRecord> {
        self.documents.iter().find(|d| d.matches(key))
    }

    /// Inserts `record`, replacing any record with the same key in place.
    pub fn upsert(&mut self, record: DocumentRecord) -> Upsert {
        match self.position(&record.key()) {
            Some(index) => {
                self.documents[index] = record;
                Upsert::Replaced(index)
            }
            None => {
                self.documents.push(record);
                Upsert::Inserted
            }
        }
    }

    /// Removes every record registered under `key`.
    ///
    /// Returns the number of records removed; zero means nothing changed.
    pub fn remove(&mut self, key: &DocumentKey) -> usize {
        let before = self.documents.len();
        self.documents.retain(|d| !d.matches(key));
        before - self.documents.len()
    }
}
