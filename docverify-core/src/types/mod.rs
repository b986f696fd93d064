//! Domain types for DocVerify.
//!
//! - [`DocumentRecord`]: One registered document
//! - [`DocumentKey`]: The composite `(document type, registration number)` key
//! - [`Registry`]: The persisted collection of records
//! - [`MetadataValue`]: Typed values for the open metadata bag
//! - [`UploadedFile`]: What the upload collaborator hands over

mod metadata;
mod record;
mod registry;
mod upload;

pub use metadata::*;
pub use record::*;
pub use registry::*;
pub use upload::*;
