//! Locale validity predicate.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Reports whether a locale code is acceptable for deployment.
pub trait LocaleValidator: Send + Sync {
    fn is_valid(&self, locale: &str) -> bool;
}

impl<F> LocaleValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, locale: &str) -> bool {
        self(locale)
    }
}

/// language[_Script]_REGION, e.g. `en_US`, `zh_Hans_CN`.
static LOCALE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(_[A-Z][a-z]{3})?_[A-Z]{2}$").unwrap());

/// Accepts well-formed locale codes, optionally restricted to a known list.
#[derive(Debug, Clone, Default)]
pub struct LocaleCodeValidator {
    known: Vec<String>,
}

impl LocaleCodeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts accepted codes to `known`. An empty list accepts any
    /// well-formed code.
    pub fn with_known(mut self, known: Vec<String>) -> Self {
        self.known = known;
        self
    }
}

impl LocaleValidator for LocaleCodeValidator {
    fn is_valid(&self, locale: &str) -> bool {
        if !LOCALE_PATTERN.is_match(locale) {
            return false;
        }
        self.known.is_empty() || self.known.iter().any(|k| k == locale)
    }
}
