//! # DocVerify Registry
//!
//! Storage backends for the document registry.
//!
//! Both backends persist the whole registry as one JSON document:
//!
//! - **Memory**: In-process storage for tests and ephemeral deployments
//! - **File**: A JSON file on local disk, replaced atomically on every save
//!
//! ## Example
//!
//! ```rust,ignore
//! use docverify_registry::{FileStore, RegistryStore};
//!
//! let store = FileStore::new("lib/document-registry.json");
//!
//! // Missing file → empty registry
//! let mut registry = store.load().await?;
//! registry.upsert(record);
//! store.save(&registry).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// Re-export the trait from core
pub use docverify_core::traits::RegistryStore;
