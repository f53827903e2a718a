use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Translation files and export requests may spell the same language as an
/// ISO 639-1 code ("fr"), a 639-2/T code ("fra"), or a legacy 639-2/B code
/// ("fre"). Everything funnels through `normalize_to_part2t` before being
/// compared.
/// ISO 639-2/B codes whose 639-2/T spelling differs
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("alb", "sqi"), // Albanian
    ("arm", "hye"), // Armenian
    ("baq", "eus"), // Basque
    ("bur", "mya"), // Burmese
    ("chi", "zho"), // Chinese
    ("cze", "ces"), // Czech
    ("dut", "nld"), // Dutch
    ("fre", "fra"), // French
    ("geo", "kat"), // Georgian
    ("ger", "deu"), // German
    ("gre", "ell"), // Greek
    ("ice", "isl"), // Icelandic
    ("mac", "mkd"), // Macedonian
    ("may", "msa"), // Malay
    ("per", "fas"), // Persian
    ("rum", "ron"), // Romanian
    ("slo", "slk"), // Slovak
    ("wel", "cym"), // Welsh
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(part2b, _)| *part2b == code)
        .map(|(_, part2t)| *part2t)
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized = code.trim().to_lowercase();

    let part2t = match normalized.len() {
        2 => Language::from_639_1(&normalized).map(|lang| lang.to_639_3().to_string()),
        3 => {
            if Language::from_639_3(&normalized).is_some() {
                Some(normalized.clone())
            } else {
                part2b_to_part2t(&normalized).map(str::to_string)
            }
        }
        _ => None,
    };

    part2t.ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Validate that a code is a recognized ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<()> {
    normalize_to_part2t(code).map(|_| ())
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
