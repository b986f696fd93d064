//! Link settings used by the verification service.

use serde::{Deserialize, Serialize};

use docverify_core::constants::{DEFAULT_UPLOADS_PREFIX, DEFAULT_VERIFICATION_BASE_PATH};

/// Service configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path (or absolute URL) of the public verification page
    pub verification_base_path: String,
    /// Prefix for view URLs of records without a storage URL
    pub uploads_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            verification_base_path: DEFAULT_VERIFICATION_BASE_PATH.into(),
            uploads_prefix: DEFAULT_UPLOADS_PREFIX.into(),
        }
    }
}

impl ServiceConfig {
    /// Overrides the verification page path.
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.verification_base_path = path.into();
        self
    }

    /// Overrides the uploads prefix.
    pub fn with_uploads_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.uploads_prefix = prefix.into();
        self
    }
}
