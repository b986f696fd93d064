//! # DocVerify Service
//!
//! Registration and verification of documents against the registry.
//!
//! This crate provides:
//!
//! - **Registration**: Idempotent upsert keyed on `(document type, registration number)`
//! - **Verification**: Exact-match lookup returning a viewable record or a not-found outcome
//! - **Removal**: Deleting a registration
//! - **Listing**: Every registered document with its resolved view URL
//! - **References**: The shareable `?doc=&reg=` verification link
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docverify_registry::FileStore;
//! use docverify_service::{RegisterRequest, Verification, VerificationService};
//!
//! let service = VerificationService::new(Arc::new(FileStore::new("lib/document-registry.json")));
//!
//! // Institution registers a transcript
//! let registration = service
//!     .register(RegisterRequest::new("Transcript", "KU0040642023", "1700000000000_t.pdf"))
//!     .await?;
//! println!("Share: {}", registration.verification_url);
//!
//! // Third party verifies it
//! match service.verify("Transcript", "KU0040642023").await? {
//!     Verification::Verified(doc) => println!("Open {}", doc.url),
//!     Verification::NotFound(key) => println!("{} is not registered", key),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod outcome;
pub mod reference;
pub mod request;
pub mod service;

pub use config::ServiceConfig;
pub use outcome::{DocumentSummary, Registration, Removal, Verification, VerifiedDocument};
pub use reference::{encode_component, verification_reference};
pub use request::RegisterRequest;
pub use service::VerificationService;
