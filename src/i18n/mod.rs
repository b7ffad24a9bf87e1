//! Internationalization (i18n) module for multilingual content.
//!
//! Every user-editable text on the platform (names, descriptions, addresses)
//! is a [`MultiLangValue`]: a record keyed by language code. This module
//! holds the model and everything that touches it.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for content languages and their metadata
//! - `language`: Validated `Language` handle
//! - `value`: The multilingual record and its wire form
//! - `parse`: Tolerant normalization of every stored shape
//! - `resolve`: Display-string resolution with fallback (`translate` / `td`)
//! - `editor`: Controlled editor model (`MultiLangInput`)
//! - `validator`: Per-form required-language rules
//! - `strings`: Localized UI messages
//! - `metrics`: Fallback and data-quality counters
//!
//! # Example
//!
//! ```rust
//! use patrimoine_client::i18n::{td, Language};
//! use serde_json::json;
//!
//! let stored = json!("{\"fr\":\"Tapis berbère\",\"ar\":\"\",\"en\":\"\"}");
//! assert_eq!(td(&stored, Language::ARABIC), "Tapis berbère");
//! assert_eq!(td(&json!("Musée National"), "en"), "Musée National");
//! ```

pub mod editor;
mod language;
mod metrics;
pub mod parse;
pub mod registry;
pub mod resolve;
pub mod strings;
pub mod validator;
mod value;

pub use editor::{FieldView, InputKind, MultiLangInput};
pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use parse::{parse_str, parse_value, Degradation, Parsed, RawMultiLang};
pub use registry::{Direction, LanguageConfig, LanguageRegistry};
pub use resolve::{resolve, td, translate, Resolution, ResolvedFrom, Resolver};
pub use strings::LanguageStrings;
pub use validator::{FieldRule, FormValidator, RequiredRule, ValidationReport};
pub use value::{as_json_string, MultiLangValue};
