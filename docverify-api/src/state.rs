//! App state: verification service, config, write serialization.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use docverify_core::constants::{
    DEFAULT_MAX_BODY_BYTES, DEFAULT_REGISTRY_PATH, DEFAULT_UPLOADS_PREFIX,
    DEFAULT_VERIFICATION_BASE_PATH,
};
use docverify_core::traits::RegistryStore;
use docverify_registry::FileStore;
use docverify_service::{ServiceConfig, VerificationService};

/// API server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Location of the registry JSON file
    pub registry_path: PathBuf,
    /// Base of generated verification references
    pub verification_base_path: String,
    /// Prefix for view URLs of records without a storage URL
    pub uploads_prefix: String,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            registry_path: DEFAULT_REGISTRY_PATH.into(),
            verification_base_path: DEFAULT_VERIFICATION_BASE_PATH.into(),
            uploads_prefix: DEFAULT_UPLOADS_PREFIX.into(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment variables (and `.env`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            registry_path: std::env::var("REGISTRY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| DEFAULT_REGISTRY_PATH.into()),
            verification_base_path: std::env::var("VERIFICATION_BASE_PATH")
                .unwrap_or_else(|_| DEFAULT_VERIFICATION_BASE_PATH.into()),
            uploads_prefix: std::env::var("UPLOADS_PREFIX")
                .unwrap_or_else(|_| DEFAULT_UPLOADS_PREFIX.into()),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        }
    }

    fn service_config(&self) -> ServiceConfig {
        ServiceConfig::default()
            .with_base_path(&self.verification_base_path)
            .with_uploads_prefix(&self.uploads_prefix)
    }
}

/// Shared application state.
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Registry operations
    pub service: VerificationService,
    /// Held across each read-modify-write so this process never interleaves two
    pub write_lock: Mutex<()>,
}

impl AppState {
    /// Creates state backed by the registry file named in `config`.
    pub fn new(config: ApiConfig) -> Self {
        let store = Arc::new(FileStore::new(&config.registry_path));
        Self::with_store(config, store)
    }

    /// Creates state backed by an arbitrary store.
    pub fn with_store(config: ApiConfig, store: Arc<dyn RegistryStore>) -> Self {
        let service = VerificationService::with_config(store, config.service_config());
        Self {
            config,
            service,
            write_lock: Mutex::new(()),
        }
    }
}
