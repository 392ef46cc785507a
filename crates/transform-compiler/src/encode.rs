//! Text escaping for `l_text:` segments.

use std::borrow::Cow;

/// Percent-encode overlay text.
///
/// Only `A-Z a-z 0-9 - _ . ~` pass through, so space, `(` and `)` come out
/// as `%20`, `%28` and `%29` and never reach the remote parser as grammar.
/// Existing `%` sequences in the input are escaped once, never twice.
pub fn encode_text(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Inverse of [`encode_text`]. Returns `None` if the bytes are not UTF-8.
pub fn decode_text(encoded: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(encoded).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reserved_characters() {
        assert_eq!(encode_text("SALE 50%"), "SALE%2050%25");
        assert_eq!(encode_text("(new)"), "%28new%29");
        assert_eq!(encode_text("a,b/c"), "a%2Cb%2Fc");
    }

    #[test]
    fn test_thai_text() {
        let encoded = encode_text("ลด 50%");
        assert!(encoded.starts_with("%E0%B8%A5"));
        assert_eq!(decode_text(&encoded).unwrap(), "ลด 50%");
    }

    #[test]
    fn test_percent_escaped_once() {
        assert_eq!(encode_text("%20"), "%2520");
        assert_eq!(decode_text("%2520").unwrap(), "%20");
    }

    #[test]
    fn test_grammar_characters_escaped() {
        let encoded = encode_text("a (b)");
        assert_eq!(encoded, "a%20%28b%29");
        assert_eq!(decode_text(&encoded).unwrap(), "a (b)");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(encode_text("Hello-World_1.0~"), "Hello-World_1.0~");
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(text in "\\PC*") {
            let encoded = encode_text(&text);
            prop_assert!(!encoded.contains([' ', '(', ')', '/', ',']));
            let decoded = decode_text(&encoded);
            prop_assert_eq!(decoded.as_deref(), Some(text.as_str()));
        }
    }
}
