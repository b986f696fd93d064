//! Verification reference construction.
//!
//! A reference is `<base>?doc=<document type>&reg=<registration number>` with
//! both values percent-encoded as URI components.

use url::form_urlencoded::byte_serialize;

use docverify_core::constants::{QUERY_PARAM_DOCUMENT_TYPE, QUERY_PARAM_REGISTRATION_NUMBER};
use docverify_core::types::DocumentKey;

/// Percent-encodes `value` as a URI component.
///
/// Alphanumerics and `-_.!~*'()` pass through; everything else, including
/// space, is written as `%XX` over its UTF-8 bytes.
pub fn encode_component(value: &str) -> String {
    // The form serializer yields each escaped byte as its own chunk, so the
    // chunks that differ from URI-component rules can be swapped one by one.
    byte_serialize(value.as_bytes())
        .map(|chunk| match chunk {
            "+" => "%20",
            "%21" => "!",
            "%27" => "'",
            "%28" => "(",
            "%29" => ")",
            "%7E" => "~",
            other => other,
        })
        .collect()
}

/// Builds the shareable verification reference for `key`.
pub fn verification_reference(base_path: &str, key: &DocumentKey) -> String {
    format!(
        "{}?{}={}&{}={}",
        base_path,
        QUERY_PARAM_DOCUMENT_TYPE,
        encode_component(&key.document_type),
        QUERY_PARAM_REGISTRATION_NUMBER,
        encode_component(&key.registration_number),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/API/doc_verification";

    #[test]
    fn test_plain_reference() {
        let key = DocumentKey::new("Transcript", "KU0040642023");
        assert_eq!(
            verification_reference(BASE, &key),
            "/API/doc_verification?doc=Transcript&reg=KU0040642023"
        );
    }

    #[test]
    fn test_space_and_ampersand_are_encoded() {
        let key = DocumentKey::new("Degree Certificate", "KU 004&2023");
        assert_eq!(
            verification_reference(BASE, &key),
            "/API/doc_verification?doc=Degree%20Certificate&reg=KU%20004%262023"
        );
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("ABC-1"), "ABC-1");
        assert_eq!(encode_component("a+b"), "a%2Bb");
        assert_eq!(encode_component("a=b?c#d"), "a%3Db%3Fc%23d");
        assert_eq!(encode_component("KU/004"), "KU%2F004");
        assert_eq!(encode_component("Ö"), "%C3%96");
        assert_eq!(encode_component("it's (A)~!*"), "it's%20(A)~!*");
        assert_eq!(encode_component("%21"), "%2521");
    }

    #[test]
    fn test_absolute_base() {
        let key = DocumentKey::new("Diploma", "D-7");
        assert_eq!(
            verification_reference("https://verify.example.ac.ke/API/doc_verification", &key),
            "https://verify.example.ac.ke/API/doc_verification?doc=Diploma&reg=D-7"
        );
    }
}
