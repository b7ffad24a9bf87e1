//! Language registry: Single source of truth for all content languages.
//!
//! Every translatable field on the platform is keyed by one of the codes
//! registered here. The registry is built once on first access and is
//! immutable afterwards.

use super::strings::{LanguageStrings, ARABIC_STRINGS, ENGLISH_STRINGS, FRENCH_STRINGS};
use std::sync::OnceLock;

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code as used in multilingual records (e.g., "fr", "tz-ltn")
    pub code: &'static str,

    /// French name of the language, as shown in back-office labels
    pub name: &'static str,

    /// Native name of the language (e.g., "Français", "العربية")
    pub native_name: &'static str,

    pub direction: Direction,

    /// Whether this is the primary language (exactly one should be true).
    /// Resolution falls back to it before any other language.
    pub is_primary: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    /// Localized UI messages
    pub strings: LanguageStrings,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the primary language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not contain exactly one primary language.
    /// The table is static, so this indicates a programming error.
    pub fn primary(&self) -> &LanguageConfig {
        let primary_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_primary)
            .collect();

        match primary_langs.len() {
            0 => panic!("No primary language found in registry"),
            1 => primary_langs[0],
            _ => panic!("Multiple primary languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Languages observed across the platform's forms.
///
/// The Tamazight scripts only appear in a few forms; their UI messages use
/// the French table.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "fr",
            name: "Français",
            native_name: "Français",
            direction: Direction::Ltr,
            is_primary: true,
            enabled: true,
            strings: FRENCH_STRINGS,
        },
        LanguageConfig {
            code: "ar",
            name: "Arabe",
            native_name: "العربية",
            direction: Direction::Rtl,
            is_primary: false,
            enabled: true,
            strings: ARABIC_STRINGS,
        },
        LanguageConfig {
            code: "en",
            name: "Anglais",
            native_name: "English",
            direction: Direction::Ltr,
            is_primary: false,
            enabled: true,
            strings: ENGLISH_STRINGS,
        },
        LanguageConfig {
            code: "tz-ltn",
            name: "Tamazight (latin)",
            native_name: "Tamaziɣt",
            direction: Direction::Ltr,
            is_primary: false,
            enabled: true,
            strings: FRENCH_STRINGS,
        },
        LanguageConfig {
            code: "tz-tfng",
            name: "Tamazight (tifinagh)",
            native_name: "ⵜⴰⵎⴰⵣⵉⵖⵜ",
            direction: Direction::Ltr,
            is_primary: false,
            enabled: true,
            strings: FRENCH_STRINGS,
        },
    ]
}
