//! Regex patterns and keyword groups used across the engine

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `{{name}}` marker as found by the placeholder extractor
    pub static ref PLACEHOLDER_PATTERN: Regex = Regex::new(r"\{\{([^}]+)\}\}").unwrap();

    /// `{{name}}` marker as replaced by substitution; a stray `{` before the
    /// marker is left in the text
    pub static ref SUBSTITUTION_PATTERN: Regex = Regex::new(r"\{\{([^{}]+)\}\}").unwrap();

    /// Article header: "Art. 3 - PREZZO", "ARTICOLO 3 - Prezzo"
    pub static ref ARTICLE_HEADER_PATTERN: Regex =
        Regex::new(r"(?i)(?:Art\.|Articolo)\s*(\d+)\s*-\s*(.+)").unwrap();

    /// Any article reference, with or without a title: "art 4", "Articolo 12"
    pub static ref ARTICLE_REFERENCE_PATTERN: Regex =
        Regex::new(r"(?i)\b(?:Art\.?|Articolo)\s*(\d+)").unwrap();

    /// Longest numeric prefix accepted by a lenient float parse
    pub static ref NUMERIC_PREFIX_PATTERN: Regex =
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap();
}

/// Person or company names
pub const NAME_KEYWORDS: &[&str] = &["nome"];

/// Dates
pub const DATE_KEYWORDS: &[&str] = &["data", "date"];

/// Amounts of money
pub const MONETARY_KEYWORDS: &[&str] = &["importo", "prezzo", "costo"];

/// Counts and other plain numbers
pub const QUANTITY_KEYWORDS: &[&str] = &["numero", "quantità"];

/// Postal addresses
pub const ADDRESS_KEYWORDS: &[&str] = &["indirizzo"];

pub const EMAIL_KEYWORDS: &[&str] = &["email"];

pub const PHONE_KEYWORDS: &[&str] = &["telefono", "cellulare"];

/// Italian VAT number
pub const VAT_KEYWORDS: &[&str] = &["p.iva", "partita iva"];

/// Italian fiscal code
pub const FISCAL_CODE_KEYWORDS: &[&str] = &["codice fiscale", "cf"];

/// Free-form descriptions that need a multi-line input
pub const DESCRIPTION_KEYWORDS: &[&str] = &["descrizione", "note", "dettagli"];

/// Whether the normalized text contains any keyword of the group
pub fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_pattern_is_case_insensitive() {
        for line in ["Art. 1 - OGGETTO", "ART. 1 - OGGETTO", "articolo 1 - oggetto", "Art.1-OGGETTO"] {
            let caps = ARTICLE_HEADER_PATTERN.captures(line).unwrap();
            assert_eq!(&caps[1], "1");
            assert!(caps[2].eq_ignore_ascii_case("oggetto"));
        }
    }

    #[test]
    fn test_header_pattern_requires_dash() {
        assert!(ARTICLE_HEADER_PATTERN.captures("Art. 1 OGGETTO").is_none());
        assert!(ARTICLE_HEADER_PATTERN.captures("Art 1 - OGGETTO").is_none());
    }

    #[test]
    fn test_reference_pattern_skips_word_suffixes() {
        assert!(ARTICLE_REFERENCE_PATTERN.captures("smart 5").is_none());
        assert!(ARTICLE_REFERENCE_PATTERN.captures("vedi art 5").is_some());
    }

    #[test]
    fn test_matches_any() {
        assert!(matches_any("data di nascita", DATE_KEYWORDS));
        assert!(!matches_any("luogo", DATE_KEYWORDS));
    }
}
