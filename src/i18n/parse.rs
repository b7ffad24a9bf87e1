//! Normalization of every wire shape of a translatable field.
//!
//! Legacy records hold a plain string, newer ones a JSON object keyed by
//! language, and some endpoints send that object JSON-encoded inside a
//! string. Everything is collapsed here into a [`MultiLangValue`].
//!
//! Parsing never fails. Inputs that do not fit the object shape degrade to
//! single-language treatment; the degradation is reported in [`Parsed`],
//! logged and counted in [`TranslationMetrics`].

use crate::i18n::{Language, MultiLangValue, TranslationMetrics};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Why a parse fell back to single-language treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// The string was not valid JSON.
    NotJson,
    /// Valid JSON, but not an object.
    NotAnObject,
    /// An object with this many nested array/object members, which were dropped.
    DroppedEntries(usize),
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::NotJson => write!(f, "not valid JSON"),
            Degradation::NotAnObject => write!(f, "JSON value is not an object"),
            Degradation::DroppedEntries(n) => write!(f, "{} non-text member(s) dropped", n),
        }
    }
}

/// Result of normalizing a translatable field.
///
/// The primary language is always defined in the sense of
/// [`MultiLangValue::get`], which reads an absent key as `""`. The key itself
/// is only stored when the input carried it (or for plain text), so an
/// encoded record parses back to exactly the record that was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub value: MultiLangValue,
    pub degraded: Option<Degradation>,
}

impl Parsed {
    fn clean(value: MultiLangValue) -> Self {
        Self {
            value,
            degraded: None,
        }
    }

    fn degraded(value: MultiLangValue, reason: Degradation, input: &str) -> Self {
        debug!("Multilingual value degraded ({}): {:?}", reason, truncate(input, 80));
        TranslationMetrics::global().record_degraded_parse();
        Self {
            value,
            degraded: Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

/// Parse a string that is either a JSON-encoded record or a legacy
/// single-language value.
pub fn parse_str(raw: &str) -> Parsed {
    if raw.is_empty() {
        return Parsed::clean(MultiLangValue::primary_only(""));
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(members)) => from_object(&members, raw),
        Ok(_) => Parsed::degraded(
            MultiLangValue::primary_only(raw),
            Degradation::NotAnObject,
            raw,
        ),
        Err(_) => Parsed::degraded(MultiLangValue::primary_only(raw), Degradation::NotJson, raw),
    }
}

/// Parse an already-decoded JSON value.
pub fn parse_value(raw: &Value) -> Parsed {
    match raw {
        Value::String(text) => parse_str(text),
        Value::Object(members) => from_object(members, ""),
        Value::Null => Parsed::clean(MultiLangValue::new()),
        Value::Bool(_) | Value::Number(_) => {
            Parsed::clean(MultiLangValue::primary_only(raw.to_string()))
        }
        Value::Array(_) => Parsed::degraded(
            MultiLangValue::new(),
            Degradation::NotAnObject,
            &raw.to_string(),
        ),
    }
}

fn from_object(members: &Map<String, Value>, input: &str) -> Parsed {
    let mut value = MultiLangValue::new();
    let mut dropped = 0;

    for (code, member) in members {
        match member {
            Value::String(text) => value.set(code, text.as_str()),
            Value::Null => value.set(code, ""),
            Value::Bool(_) | Value::Number(_) => value.set(code, member.to_string()),
            Value::Array(_) | Value::Object(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        Parsed::degraded(value, Degradation::DroppedEntries(dropped), input)
    } else {
        Parsed::clean(value)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// A translatable field before normalization: either a value that is
/// already display text, or a multilingual record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMultiLang {
    Plain(String),
    Localized(MultiLangValue),
}

impl RawMultiLang {
    /// Classify a string: JSON objects are records, anything else is plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim_start().starts_with('{') {
            if let Ok(Value::Object(members)) = serde_json::from_str::<Value>(&text) {
                return RawMultiLang::Localized(from_object(&members, &text).value);
            }
        }
        RawMultiLang::Plain(text)
    }

    /// Classify a JSON value. `null` has no text at all and yields `None`.
    pub fn from_json(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::String(text) => Some(Self::from_text(text.as_str())),
            Value::Object(_) | Value::Array(_) => {
                Some(RawMultiLang::Localized(parse_value(raw).value))
            }
            Value::Bool(_) | Value::Number(_) => Some(RawMultiLang::Plain(raw.to_string())),
        }
    }

    /// Collapse into the canonical record. Plain text lands under the
    /// primary language.
    pub fn into_value(self) -> MultiLangValue {
        match self {
            RawMultiLang::Plain(text) => {
                let mut value = MultiLangValue::new();
                value.set(Language::primary(), text);
                value
            }
            RawMultiLang::Localized(value) => value,
        }
    }
}

impl From<MultiLangValue> for RawMultiLang {
    fn from(value: MultiLangValue) -> Self {
        RawMultiLang::Localized(value)
    }
}

impl From<&str> for RawMultiLang {
    fn from(text: &str) -> Self {
        RawMultiLang::from_text(text)
    }
}

impl From<String> for RawMultiLang {
    fn from(text: String) -> Self {
        RawMultiLang::from_text(text)
    }
}

impl<'de> Deserialize<'de> for RawMultiLang {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(RawMultiLang::from_json(&raw)
            .unwrap_or_else(|| RawMultiLang::Localized(MultiLangValue::new())))
    }
}
