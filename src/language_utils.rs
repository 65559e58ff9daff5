use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for target language handling
///
/// This module holds the catalog of target languages the service accepts and
/// functions for validating and naming language tags such as `es` or `pt-BR`.
/// A selectable target language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    /// Display name
    pub label: &'static str,
    /// Tag sent to the service
    pub code: &'static str,
}

const fn lang(label: &'static str, code: &'static str) -> LanguageOption {
    LanguageOption { label, code }
}

/// Target languages offered by the service, in display order
pub const SUPPORTED_LANGUAGES: &[LanguageOption] = &[
    lang("Bulgarian", "bg"),
    lang("Czech", "cs"),
    lang("Danish", "da"),
    lang("Dutch", "nl"),
    lang("English (American)", "en-US"),
    lang("English (British)", "en-GB"),
    lang("Estonian", "et"),
    lang("Finnish", "fi"),
    lang("French", "fr"),
    lang("German", "de"),
    lang("Greek", "el"),
    lang("Hungarian", "hu"),
    lang("Indonesian", "id"),
    lang("Italian", "it"),
    lang("Japanese", "ja"),
    lang("Korean", "ko"),
    lang("Latvian", "lv"),
    lang("Lithuanian", "lt"),
    lang("Polish", "pl"),
    lang("Portuguese (European)", "pt-PT"),
    lang("Portuguese (Brazilian)", "pt-BR"),
    lang("Romanian", "ro"),
    lang("Russian", "ru"),
    lang("Slovak", "sk"),
    lang("Slovenian", "sl"),
    lang("Spanish", "es"),
    lang("Swedish", "sv"),
    lang("Turkish", "tr"),
    lang("Ukrainian", "uk"),
    lang("Chinese (Simplified)", "zh"),
    lang("Hindi", "hi"),
];

/// Find a catalog entry by tag, ignoring case and surrounding whitespace
pub fn find_language(code: &str) -> Option<&'static LanguageOption> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|option| option.code.eq_ignore_ascii_case(code))
}

/// Whether the service accepts this tag
pub fn is_supported(code: &str) -> bool {
    find_language(code).is_some()
}

/// The language part of a tag: `pt` for `pt-BR`
pub fn primary_subtag(code: &str) -> &str {
    let code = code.trim();
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Validate that a tag starts with a known ISO 639-1 code and has at most a
/// two-letter region after it
pub fn validate_language_code(code: &str) -> Result<()> {
    let trimmed = code.trim();
    let subtag = primary_subtag(trimmed);
    if Language::from_639_1(&subtag.to_lowercase()).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    let region = &trimmed[subtag.len()..];
    if !region.is_empty() {
        let region = &region[1..];
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow!("Invalid region in language code: {}", code));
        }
    }

    Ok(())
}

/// Get the display name of a tag.
///
/// Catalog labels win; other valid tags fall back to the ISO name of their
/// language part.
pub fn get_language_name(code: &str) -> Result<String> {
    if let Some(option) = find_language(code) {
        return Ok(option.label.to_string());
    }

    validate_language_code(code)?;
    let primary = primary_subtag(code).to_lowercase();
    let lang = Language::from_639_1(&primary)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
