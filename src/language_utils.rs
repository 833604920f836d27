use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Word and translation languages are stored as plain codes; this module
/// checks them and turns them into display names for listings.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const BIBLIOGRAPHIC_CODES: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn terminology_code(bibliographic: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES
        .iter()
        .find(|(b, _)| *b == bibliographic)
        .map(|(_, t)| *t)
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if terminology_code(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    let part2t = match validate_language_code(&normalized_code)? {
        LanguageCodeType::Part1 => Language::from_639_1(&normalized_code).map(|l| l.to_639_3().to_string()),
        LanguageCodeType::Part2T => Some(normalized_code.clone()),
        LanguageCodeType::Part2B => terminology_code(&normalized_code).map(String::from),
    };

    part2t.ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Display label for a stored language code: `de (German)`, or the bare
/// code when it is not an ISO 639 code
pub fn language_label(code: &str) -> String {
    match get_language_name(code) {
        Ok(name) => format!("{} ({})", code, name),
        Err(_) => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validateLanguageCode_shouldDetectCodeType() {
        assert_eq!(validate_language_code("de").unwrap(), LanguageCodeType::Part1);
        assert_eq!(validate_language_code("DEU").unwrap(), LanguageCodeType::Part2T);
        assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
        assert!(validate_language_code("xx").is_err());
        assert!(validate_language_code("").is_err());
    }

    #[test]
    fn test_normalizeToPart2t_shouldMapAllForms() {
        assert_eq!(normalize_to_part2t("de").unwrap(), "deu");
        assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
        assert_eq!(normalize_to_part2t(" rus ").unwrap(), "rus");
    }

    #[test]
    fn test_languageLabel_shouldFallBackToCode() {
        assert_eq!(language_label("en"), "en (English)");
        assert_eq!(language_label("klingon"), "klingon");
    }
}
