//! Language type: validated handle onto a registry entry.

use crate::i18n::registry::Direction;
use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};
use anyhow::{bail, Result};
use std::fmt;

/// A validated content language.
///
/// Only codes present and enabled in the [`LanguageRegistry`] can be turned
/// into a `Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const FRENCH: Language = Language { code: "fr" };
    pub const ARABIC: Language = Language { code: "ar" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const TAMAZIGHT_LATIN: Language = Language { code: "tz-ltn" };
    pub const TAMAZIGHT_TIFINAGH: Language = Language { code: "tz-tfng" };

    /// Create a Language from a language code string.
    ///
    /// Surrounding whitespace is ignored and the lookup is case-insensitive,
    /// so `" FR "` yields [`Language::FRENCH`].
    ///
    /// # Errors
    /// Fails if the code is unknown or the language is disabled.
    pub fn from_code(code: &str) -> Result<Language> {
        let normalized = code.trim().to_ascii_lowercase();
        let registry = LanguageRegistry::get();

        match registry.get_by_code(&normalized) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// Parse a comma-separated list such as `"fr,ar,en"`.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn parse_list(codes: &str) -> Result<Vec<Language>> {
        let mut languages = Vec::new();
        for code in codes.split(',').filter(|c| !c.trim().is_empty()) {
            let language = Language::from_code(code)?;
            if !languages.contains(&language) {
                languages.push(language);
            }
        }
        if languages.is_empty() {
            bail!("Language list '{}' is empty", codes);
        }
        Ok(languages)
    }

    /// The primary language: the default key of every multilingual record and
    /// the first fallback of the resolver.
    pub fn primary() -> Language {
        Language {
            code: LanguageRegistry::get().primary().code,
        }
    }

    /// The languages a multilingual editor shows when not configured otherwise.
    pub fn editor_defaults() -> Vec<Language> {
        vec![Language::FRENCH, Language::ARABIC, Language::ENGLISH]
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn direction(&self) -> Direction {
        self.config().direction
    }

    pub fn is_primary(&self) -> bool {
        self.config().is_primary
    }

    /// UI messages in this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        &self.config().strings
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::primary()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.code
    }
}
