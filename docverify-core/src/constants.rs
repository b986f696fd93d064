//! Default paths and names for DocVerify.
//!
//! Every value here can be overridden through configuration; these are the
//! values used when nothing else is provided.

// ═══════════════════════════════════════════════════════════════════════════════
// LINKS
// ═══════════════════════════════════════════════════════════════════════════════

/// Base path of the public verification page.
///
/// Verification references are built as `<base>?doc=<type>&reg=<number>`.
pub const DEFAULT_VERIFICATION_BASE_PATH: &str = "/API/doc_verification";

/// Prefix used to derive a view URL when a record has no storage URL.
pub const DEFAULT_UPLOADS_PREFIX: &str = "/uploads/";

/// Query parameter carrying the document type.
pub const QUERY_PARAM_DOCUMENT_TYPE: &str = "doc";

/// Query parameter carrying the registration number.
pub const QUERY_PARAM_REGISTRATION_NUMBER: &str = "reg";

// ═══════════════════════════════════════════════════════════════════════════════
// STORAGE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default location of the registry file, relative to the working directory.
pub const DEFAULT_REGISTRY_PATH: &str = "lib/document-registry.json";

/// Suffix appended to the registry file name for the scratch file written
/// before an atomic rename.
pub const TEMP_FILE_EXTENSION: &str = "tmp";

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP
// ═══════════════════════════════════════════════════════════════════════════════

/// Default cap on request bodies (25 MiB).
///
/// Registrations may carry the file inline as a base64 `data:` URL, which is
/// about a third larger than the PDF itself.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

// ═══════════════════════════════════════════════════════════════════════════════
// MESSAGES
// ═══════════════════════════════════════════════════════════════════════════════

/// Message returned to a verifier when no record matches.
pub const NOT_VERIFIED_MESSAGE: &str = "Document not found or not verified";

/// Message returned after a successful registration.
pub const REGISTERED_MESSAGE: &str = "Document registered successfully";

/// Message returned after a successful removal.
pub const REMOVED_MESSAGE: &str = "Document removed from registry";

/// Message returned when a removal matched nothing.
pub const REMOVE_NOT_FOUND_MESSAGE: &str = "Document not found";
