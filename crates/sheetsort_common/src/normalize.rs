//! Unicode normalization for scraped post text.
//!
//! LinkedIn posts are full of stylized glyphs (mathematical bold, script,
//! fullwidth forms) that confuse the classifier prompt. NFKD compatibility
//! decomposition collapses them to their plain equivalents.

use unicode_normalization::UnicodeNormalization;

/// Normalize free-form input text with NFKD.
///
/// Plain ASCII passes through unchanged; the empty string stays empty.
pub fn normalize(text: &str) -> String {
    text.nfkd().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_ascii_identity() {
        let text = "Check out this new RAG framework: https://example.com";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_mathematical_bold_collapses() {
        // 𝗕𝗼𝗹𝗱 (mathematical sans-serif bold) should become plain "Bold"
        assert_eq!(normalize("\u{1D5D5}\u{1D5FC}\u{1D5F9}\u{1D5F1}"), "Bold");
    }

    #[test]
    fn test_fullwidth_collapses() {
        assert_eq!(normalize("ＡＩ"), "AI");
    }
}
