//! Display-string resolution for multilingual values.
//!
//! Order: requested language, then the primary language, then the first
//! non-empty entry in insertion order, then `""`.

use crate::i18n::parse::RawMultiLang;
use crate::i18n::{Language, MultiLangValue, TranslationMetrics};
use serde_json::Value;

/// Where a resolved string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom<'a> {
    Requested,
    Primary,
    /// First other non-empty language, by code
    Other(&'a str),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub text: &'a str,
    pub source: ResolvedFrom<'a>,
}

/// Resolver bound to a primary language, recording every outcome in the
/// global [`TranslationMetrics`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    primary: Language,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            primary: Language::primary(),
        }
    }

    pub fn with_primary(primary: Language) -> Self {
        Self { primary }
    }

    pub fn primary(&self) -> Language {
        self.primary
    }

    /// Resolve a record and report which language served the text.
    pub fn resolution<'a>(&self, value: &'a MultiLangValue, lang: &str) -> Resolution<'a> {
        let metrics = TranslationMetrics::global();

        let requested = value.get(lang);
        if !requested.is_empty() {
            metrics.record_requested_hit();
            return Resolution {
                text: requested,
                source: ResolvedFrom::Requested,
            };
        }

        let primary = value.get(self.primary);
        if !primary.is_empty() {
            metrics.record_primary_fallback();
            return Resolution {
                text: primary,
                source: ResolvedFrom::Primary,
            };
        }

        // Requested and primary are both empty here, so no need to skip them.
        if let Some((code, text)) = value.iter().find(|(_, text)| !text.is_empty()) {
            metrics.record_other_fallback();
            return Resolution {
                text,
                source: ResolvedFrom::Other(code),
            };
        }

        metrics.record_empty_result();
        Resolution {
            text: "",
            source: ResolvedFrom::Empty,
        }
    }

    pub fn resolve<'a>(&self, value: &'a MultiLangValue, lang: impl AsRef<str>) -> &'a str {
        self.resolution(value, lang.as_ref()).text
    }

    /// Resolve a field that may still be plain text. Plain text is returned
    /// unchanged; absence yields `""`.
    pub fn translate(&self, raw: Option<&RawMultiLang>, lang: impl AsRef<str>) -> String {
        match raw {
            Some(RawMultiLang::Plain(text)) => {
                TranslationMetrics::global().record_plain_passthrough();
                text.clone()
            }
            Some(RawMultiLang::Localized(value)) => self.resolve(value, lang).to_string(),
            None => {
                TranslationMetrics::global().record_empty_result();
                String::new()
            }
        }
    }

    /// Resolve any raw JSON value: encoded string, object, legacy string,
    /// `null` or scalar.
    pub fn td(&self, raw: &Value, lang: impl AsRef<str>) -> String {
        self.translate(RawMultiLang::from_json(raw).as_ref(), lang)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a record with the registry's primary language as first fallback.
pub fn resolve(value: &MultiLangValue, lang: impl AsRef<str>) -> &str {
    Resolver::new().resolve(value, lang)
}

/// See [`Resolver::translate`].
pub fn translate(raw: Option<&RawMultiLang>, lang: impl AsRef<str>) -> String {
    Resolver::new().translate(raw, lang)
}

/// See [`Resolver::td`].
pub fn td(raw: &Value, lang: impl AsRef<str>) -> String {
    Resolver::new().td(raw, lang)
}
