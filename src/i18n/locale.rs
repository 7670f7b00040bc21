//! Locale matching against URL paths.
//!
//! # Responsibilities
//! - Detect whether any path segment names a configured locale
//! - Find the first such locale (left to right, then configuration order)
//! - Map locale codes to URL segments and back
//!
//! # Design Decisions
//! - Paths are split on `/` and compared segment by segment; no regex
//! - Bare locales compare case and separator insensitively (`en_US` == `en-us`)
//! - Mapped locale paths compare exactly
//! - O(segments × locales), fine for typical locale counts

use crate::config::schema::Locale;

fn fold(c: char) -> char {
    if c == '_' {
        '-'
    } else {
        c.to_ascii_lowercase()
    }
}

/// Fold a locale code into its comparable form: `_` becomes `-`, ASCII lowercased.
pub fn normalize_locale(code: &str) -> String {
    code.chars().map(fold).collect()
}

/// Compare two codes as if both were passed through [`normalize_locale`],
/// without allocating.
fn eq_normalized(a: &str, b: &str) -> bool {
    a.chars().map(fold).eq(b.chars().map(fold))
}

fn segment_matches(segment: &str, locale: &Locale) -> bool {
    match locale {
        Locale::Code(code) => eq_normalized(segment, code),
        Locale::Mapped { path, .. } => segment == path,
    }
}

/// Returns true if any segment of `path` names a configured locale.
pub fn path_has_locale(path: &str, locales: &[Locale]) -> bool {
    find_locale_segment(path, locales).is_some()
}

/// Returns the identifying string (bare code or mapped path) of the first locale
/// found in `path`.
pub fn find_locale_in_path<'a>(path: &str, locales: &'a [Locale]) -> Option<&'a str> {
    find_locale_segment(path, locales).map(|(_, locale)| locale.path())
}

/// Like [`find_locale_in_path`], but also returns the index of the matching segment
/// in `path.split('/')`.
pub(crate) fn find_locale_segment<'a>(
    path: &str,
    locales: &'a [Locale],
) -> Option<(usize, &'a Locale)> {
    path.split('/').enumerate().find_map(|(index, segment)| {
        if segment.is_empty() {
            return None;
        }
        locales
            .iter()
            .find(|locale| segment_matches(segment, locale))
            .map(|locale| (index, locale))
    })
}

/// Resolve a locale code to the URL segment that serves it.
///
/// Returns `None` if no configured locale answers to `code`.
pub fn resolve_fallback_path<'a>(code: &str, locales: &'a [Locale]) -> Option<&'a str> {
    locales.iter().find_map(|locale| match locale {
        Locale::Code(c) if c == code => Some(c.as_str()),
        Locale::Mapped { path, codes } if codes.iter().any(|c| c == code) => Some(path.as_str()),
        _ => None,
    })
}

/// Resolve a URL segment to the first code of the locale it identifies.
pub fn get_locale_by_path<'a>(segment: &str, locales: &'a [Locale]) -> Option<&'a str> {
    locales
        .iter()
        .find(|locale| locale.path() == segment)
        .and_then(|locale| locale.codes().first())
        .map(String::as_str)
}

/// Every code of every configured locale, in configuration order.
pub fn to_codes(locales: &[Locale]) -> Vec<&str> {
    locales
        .iter()
        .flat_map(|locale| locale.codes().iter().map(String::as_str))
        .collect()
}

/// The URL segment of every configured locale, in configuration order.
pub fn to_paths(locales: &[Locale]) -> Vec<&str> {
    locales.iter().map(Locale::path).collect()
}
