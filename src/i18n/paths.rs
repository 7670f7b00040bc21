//! Path helpers: segment edits, base-path joins and trailing slash policy.

use crate::config::schema::{BuildFormat, I18nConfig, RoutingStrategy, TrailingSlash};

/// Whether generated URLs should end with `/`.
pub fn should_append_forward_slash(trailing_slash: TrailingSlash, format: BuildFormat) -> bool {
    match trailing_slash {
        TrailingSlash::Always => true,
        TrailingSlash::Never => false,
        TrailingSlash::Ignore => match format {
            BuildFormat::Directory => true,
            BuildFormat::File => false,
        },
    }
}

pub fn append_forward_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Join `base` and `segment` with exactly one `/` between them.
pub fn join_paths(base: &str, segment: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        segment.trim_start_matches('/')
    )
}

/// True if `path` is exactly `base` or `base` followed by a single `/`.
///
/// A trailing slash on `base` is insignificant.
pub fn is_root(path: &str, base: &str) -> bool {
    path.strip_prefix(base.trim_end_matches('/'))
        .is_some_and(|rest| rest.is_empty() || rest == "/")
}

/// Index (within `path.split('/')`) of the first segment equal to `segment`.
///
/// Only segments preceded by a `/` count, so the match always spans
/// `/<segment>` followed by `/` or the end of the path.
pub fn segment_index(path: &str, segment: &str) -> Option<usize> {
    path.split('/')
        .enumerate()
        .skip(1)
        .find(|(_, s)| *s == segment)
        .map(|(index, _)| index)
}

/// Drop the segment at `index`. An emptied path becomes `/`.
pub fn remove_segment(path: &str, index: usize) -> String {
    let rebuilt = path
        .split('/')
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| s)
        .collect::<Vec<_>>()
        .join("/");

    if rebuilt.is_empty() {
        "/".to_string()
    } else {
        rebuilt
    }
}

/// Replace the segment at `index` with `replacement`.
pub fn replace_segment(path: &str, index: usize, replacement: &str) -> String {
    path.split('/')
        .enumerate()
        .map(|(i, s)| if i == index { replacement } else { s })
        .collect::<Vec<_>>()
        .join("/")
}

/// URL of `path` in the locale whose code is `locale`.
///
/// The default locale carries no prefix under
/// [`RoutingStrategy::PrefixOtherLocales`]. Codes that resolve to no configured
/// locale are used verbatim as the prefix.
pub fn locale_relative_url(locale: &str, path: &str, config: &I18nConfig) -> String {
    let prefix = super::locale::resolve_fallback_path(locale, &config.locales).unwrap_or(locale);
    let path = path.trim_matches('/');

    let localized = if config.routing == RoutingStrategy::PrefixOtherLocales
        && locale == config.default_locale
    {
        join_paths(&config.base, path)
    } else if path.is_empty() {
        join_paths(&config.base, prefix)
    } else {
        join_paths(&join_paths(&config.base, prefix), path)
    };

    if should_append_forward_slash(config.trailing_slash, config.build_format) {
        append_forward_slash(&localized)
    } else if localized.len() > 1 {
        localized.trim_end_matches('/').to_string()
    } else {
        localized
    }
}
