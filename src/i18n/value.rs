//! The multilingual value: one piece of human-authored text in several languages.

use crate::i18n::parse::parse_value;
use crate::i18n::Language;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// An ordered mapping from language code to text.
///
/// Lookups never distinguish a missing language from an empty one: both read
/// as `""`. Insertion order is kept, since the resolver's last fallback picks
/// the first non-empty entry in that order.
///
/// Deserialization is tolerant and accepts the JSON-encoded string form, a
/// JSON object, a legacy plain string or `null`; see [`crate::i18n::parse`].
/// Serialization always produces a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLangValue {
    entries: Vec<(String, String)>,
}

impl MultiLangValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record with every given language present and empty, as a creation
    /// form holds it before the first keystroke.
    pub fn empty_for(languages: &[Language]) -> Self {
        Self {
            entries: languages
                .iter()
                .map(|lang| (lang.code().to_string(), String::new()))
                .collect(),
        }
    }

    /// A record holding `text` under the primary language only.
    pub fn primary_only(text: impl Into<String>) -> Self {
        let mut value = Self::new();
        value.set(Language::primary(), text);
        value
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut value = Self::new();
        for (code, text) in pairs {
            let code: String = code.into();
            value.set(code, text);
        }
        value
    }

    /// Text for `code`, or `""` when the language is absent.
    pub fn get(&self, code: impl AsRef<str>) -> &str {
        let code = code.as_ref();
        self.entries
            .iter()
            .find(|(key, _)| key == code)
            .map(|(_, text)| text.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        self.entries.iter().any(|(key, _)| key == code)
    }

    /// Set the text of one language, keeping its position if already present.
    pub fn set(&mut self, code: impl AsRef<str>, text: impl Into<String>) {
        let code = code.as_ref();
        let text = text.into();
        match self.entries.iter_mut().find(|(key, _)| key == code) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((code.to_string(), text)),
        }
    }

    /// Copy of this record with one language overridden. `self` is untouched.
    #[must_use]
    pub fn with(&self, code: impl AsRef<str>, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set(code, text);
        next
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, text)| (code.as_str(), text.as_str()))
    }

    /// Codes whose text is non-empty.
    pub fn filled_languages(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, text)| !text.is_empty())
            .map(|(code, _)| code)
            .collect()
    }

    /// True when no language holds any text.
    pub fn is_blank(&self) -> bool {
        self.entries.iter().all(|(_, text)| text.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wire form: the record as a JSON object string, e.g.
    /// `{"fr":"Tapis berbère","ar":"","en":""}`.
    pub fn to_json(&self) -> String {
        serde_json::Value::Object(self.to_json_map()).to_string()
    }

    /// The record as a JSON object map, in insertion order.
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(code, text)| (code.clone(), serde_json::Value::String(text.clone())))
            .collect()
    }
}

impl Serialize for MultiLangValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (code, text) in &self.entries {
            map.serialize_entry(code, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MultiLangValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(parse_value(&raw).value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MultiLangValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Serde adapter for payload fields that travel as a JSON-encoded string:
/// `#[serde(with = "patrimoine_client::i18n::as_json_string")]`.
pub mod as_json_string {
    use super::MultiLangValue;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &MultiLangValue, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_json())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MultiLangValue, D::Error> {
        MultiLangValue::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MultiLangValue {
        MultiLangValue::from_pairs([("fr", "Casbah d'Alger"), ("ar", "قصبة الجزائر"), ("en", "")])
    }

    #[test]
    fn test_get_absent_reads_empty() {
        let value = sample();
        assert_eq!(value.get("tz-ltn"), "");
        assert_eq!(value.get("en"), "");
        assert!(!value.contains("tz-ltn"));
        assert!(value.contains("en"));
    }

    #[test]
    fn test_get_by_language() {
        assert_eq!(sample().get(Language::ARABIC), "قصبة الجزائر");
    }

    #[test]
    fn test_empty_for_has_every_key() {
        let value = MultiLangValue::empty_for(&Language::editor_defaults());
        let codes: Vec<_> = value.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["fr", "ar", "en"]);
        assert!(value.is_blank());
    }

    #[test]
    fn test_primary_only() {
        let value = MultiLangValue::primary_only("Musée National");
        assert_eq!(value.get("fr"), "Musée National");
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn test_set_keeps_position() {
        let mut value = sample();
        value.set("fr", "Casbah");
        let codes: Vec<_> = value.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["fr", "ar", "en"]);
        assert_eq!(value.get("fr"), "Casbah");
    }

    #[test]
    fn test_set_appends_new_language() {
        let mut value = sample();
        value.set(Language::TAMAZIGHT_LATIN, "Lqesba");
        assert_eq!(value.iter().last(), Some(("tz-ltn", "Lqesba")));
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let original = sample();
        let updated = original.with("en", "Casbah of Algiers");

        assert_eq!(original.get("en"), "");
        assert_eq!(updated.get("en"), "Casbah of Algiers");
        assert_eq!(updated.get("fr"), original.get("fr"));
    }

    #[test]
    fn test_filled_languages() {
        assert_eq!(sample().filled_languages(), vec!["fr", "ar"]);
    }

    #[test]
    fn test_is_blank() {
        assert!(MultiLangValue::new().is_blank());
        assert!(!sample().is_blank());
    }

    #[test]
    fn test_to_json_preserves_order() {
        let value = MultiLangValue::from_pairs([("fr", "Tapis berbère"), ("ar", ""), ("en", "")]);
        assert_eq!(
            value.to_json(),
            r#"{"fr":"Tapis berbère","ar":"","en":""}"#
        );
    }

    #[test]
    fn test_deserialize_from_object() {
        let value: MultiLangValue =
            serde_json::from_value(json!({"ar": "زربية", "fr": "Tapis"})).unwrap();
        let codes: Vec<_> = value.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["ar", "fr"]);
    }

    #[test]
    fn test_deserialize_from_encoded_string() {
        let value: MultiLangValue =
            serde_json::from_value(json!("{\"fr\":\"Tapis\",\"en\":\"Rug\"}")).unwrap();
        assert_eq!(value.get("en"), "Rug");
    }

    #[test]
    fn test_deserialize_from_legacy_string() {
        let value: MultiLangValue = serde_json::from_value(json!("Musée National")).unwrap();
        assert_eq!(value.get("fr"), "Musée National");
    }

    #[test]
    fn test_deserialize_from_null() {
        let value: MultiLangValue = serde_json::from_value(json!(null)).unwrap();
        assert!(value.is_empty());
    }

    #[derive(Serialize, Deserialize)]
    struct Payload {
        #[serde(with = "as_json_string")]
        nom: MultiLangValue,
    }

    #[test]
    fn test_as_json_string_serializes_encoded_field() {
        let payload = Payload {
            nom: MultiLangValue::from_pairs([("fr", "Tapis"), ("ar", ""), ("en", "Rug")]),
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body, json!({"nom": "{\"fr\":\"Tapis\",\"ar\":\"\",\"en\":\"Rug\"}"}));
    }

    #[test]
    fn test_as_json_string_reads_both_shapes() {
        let encoded: Payload = serde_json::from_value(json!({"nom": "{\"fr\":\"A\"}"})).unwrap();
        let object: Payload = serde_json::from_value(json!({"nom": {"fr": "A"}})).unwrap();
        assert_eq!(encoded.nom, object.nom);
    }
}
