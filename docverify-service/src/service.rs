//! The verification service.
//!
//! Every operation re-reads the whole registry from the store; mutations write
//! it back in full. Nothing is cached between calls, so the service can be
//! shared freely and the store stays the single owner of the data.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use docverify_core::error::Result;
use docverify_core::traits::RegistryStore;
use docverify_core::types::DocumentKey;

use crate::config::ServiceConfig;
use crate::outcome::{DocumentSummary, Registration, Removal, Verification, VerifiedDocument};
use crate::reference::verification_reference;
use crate::request::RegisterRequest;

/// Registers, verifies, removes, and lists documents.
#[derive(Clone)]
pub struct VerificationService {
    store: Arc<dyn RegistryStore>,
    config: ServiceConfig,
}

impl VerificationService {
    /// Creates a service over `store` with the default link settings.
    pub fn new(store: Arc<dyn RegistryStore>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    /// Creates a service over `store` with custom link settings.
    pub fn with_config(store: Arc<dyn RegistryStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Returns the service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Builds the verification reference for `key`.
    pub fn verification_url(&self, key: &DocumentKey) -> String {
        verification_reference(&self.config.verification_base_path, key)
    }

    /// Registers a document, replacing any registration under the same key.
    ///
    /// The stored record is built only from `request`; nothing carries over
    /// from a replaced record. Performs one load and one save.
    #[instrument(skip(self, request), fields(doc = %request.document_type, reg = %request.registration_number))]
    pub async fn register(&self, request: RegisterRequest) -> Result<Registration> {
        request.validate()?;

        let mut registry = self.store.load().await?;

        let key = request.key();
        let record = request.into_record(Utc::now());
        let outcome = registry.upsert(record.clone());

        self.store.save(&registry).await?;

        info!(?outcome, total = registry.len(), "Document registered");

        Ok(Registration {
            verification_url: self.verification_url(&key),
            document: record,
            outcome,
        })
    }

    /// Looks up the document registered under `(document_type, registration_number)`.
    #[instrument(skip(self))]
    pub async fn verify(
        &self,
        document_type: &str,
        registration_number: &str,
    ) -> Result<Verification> {
        let key = DocumentKey::new(document_type, registration_number);
        key.validate()?;

        let registry = self.store.load().await?;

        let verification = match registry.find(&key) {
            Some(record) => Verification::Verified(VerifiedDocument::from_record(
                record,
                &self.config.uploads_prefix,
            )),
            None => Verification::NotFound(key),
        };

        debug!(verified = verification.is_verified(), "Verification lookup");
        Ok(verification)
    }

    /// Deletes the registration under `(document_type, registration_number)`.
    ///
    /// When nothing matches the registry is not written.
    #[instrument(skip(self))]
    pub async fn remove(&self, document_type: &str, registration_number: &str) -> Result<Removal> {
        let key = DocumentKey::new(document_type, registration_number);
        key.validate()?;

        let mut registry = self.store.load().await?;

        if registry.remove(&key) == 0 {
            warn!(%key, "Nothing registered to remove");
            return Ok(Removal::NotFound);
        }

        self.store.save(&registry).await?;

        info!(%key, total = registry.len(), "Document removed");
        Ok(Removal::Removed)
    }

    /// Lists every registered document in storage order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<DocumentSummary>> {
        let registry = self.store.load().await?;

        let summaries: Vec<DocumentSummary> = registry
            .documents
            .iter()
            .map(|record| DocumentSummary::from_record(record, &self.config.uploads_prefix))
            .collect();

        debug!(count = summaries.len(), "Listed documents");
        Ok(summaries)
    }

    /// Returns the number of registered documents.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.store.load().await?.len())
    }
}
