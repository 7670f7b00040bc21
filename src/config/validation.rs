//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default and fallback locales are configured)
//! - Validate the base path shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - A fallback target that resolves to no configured locale is a warning, not an
//!   error; the router skips such fallbacks at request time. Warnings are collected
//!   so they can be logged once the subscriber is installed

use thiserror::Error;

use crate::config::schema::{I18nConfig, Locale, ServerConfig};
use crate::i18n::locale::resolve_fallback_path;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one locale must be configured")]
    NoLocales,
    #[error("default locale '{0}' is not one of the configured locales")]
    UnknownDefaultLocale(String),
    #[error("locale with path '{0}' must have a non-empty path and at least one code")]
    EmptyLocale(String),
    #[error("base path '{0}' must be empty or start with '/'")]
    InvalidBase(String),
    #[error("fallback source '{0}' is not one of the configured locales")]
    UnknownFallbackSource(String),
    #[error("locale '{0}' falls back to itself")]
    SelfFallback(String),
}

/// A configuration problem that does not prevent startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationWarning {
    #[error("fallback target '{target}' for '{source_locale}' is not a configured locale; it will be ignored")]
    UnresolvableFallback {
        source_locale: String,
        target: String,
    },
}

/// Validate a full server configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let errors = validate_i18n(&config.i18n);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collect every problem in the i18n section.
pub fn validate_i18n(i18n: &I18nConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if i18n.locales.is_empty() {
        errors.push(ValidationError::NoLocales);
    }

    for locale in &i18n.locales {
        if let Locale::Mapped { path, codes } = locale {
            if path.is_empty() || codes.is_empty() {
                errors.push(ValidationError::EmptyLocale(path.clone()));
            }
        }
    }

    if !has_code(&i18n.locales, &i18n.default_locale) {
        errors.push(ValidationError::UnknownDefaultLocale(
            i18n.default_locale.clone(),
        ));
    }

    if !i18n.base.is_empty() && !i18n.base.starts_with('/') {
        errors.push(ValidationError::InvalidBase(i18n.base.clone()));
    }

    for (source, target) in &i18n.fallback {
        if source == target {
            errors.push(ValidationError::SelfFallback(source.clone()));
            continue;
        }
        if !has_code(&i18n.locales, source) && !has_path(&i18n.locales, source) {
            errors.push(ValidationError::UnknownFallbackSource(source.clone()));
        }
    }

    errors
}

/// Collect non-fatal problems in the i18n section.
pub fn validation_warnings(i18n: &I18nConfig) -> Vec<ValidationWarning> {
    i18n.fallback
        .iter()
        .filter(|(source, target)| {
            source != target && resolve_fallback_path(target, &i18n.locales).is_none()
        })
        .map(|(source, target)| ValidationWarning::UnresolvableFallback {
            source_locale: source.clone(),
            target: target.clone(),
        })
        .collect()
}

/// Log every warning for `config`. Call after the tracing subscriber is installed.
pub fn log_warnings(config: &ServerConfig) -> usize {
    let warnings = validation_warnings(&config.i18n);
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }
    warnings.len()
}

fn has_path(locales: &[Locale], path: &str) -> bool {
    locales.iter().any(|locale| locale.path() == path)
}

fn has_code(locales: &[Locale], code: &str) -> bool {
    locales
        .iter()
        .any(|locale| locale.codes().iter().any(|c| c == code))
}
