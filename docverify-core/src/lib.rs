//! # DocVerify Core
//!
//! Core types, errors, and traits for the DocVerify document registry.
//!
//! This crate provides the foundational building blocks used by all other DocVerify crates:
//!
//! - **Types**: Document records, the registry aggregate, typed metadata values
//! - **Errors**: The error taxonomy shared by stores, the service, and the API
//! - **Constants**: Default paths and file names
//! - **Traits**: The storage port that registry backends implement
//!
//! ## Example
//!
//! ```rust
//! use docverify_core::{DocumentKey, Registry};
//!
//! let registry = Registry::default();
//! let key = DocumentKey::new("Transcript", "KU0040642023");
//! assert!(registry.find(&key).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{DocVerifyError, Result};
pub use traits::*;
pub use types::*;
