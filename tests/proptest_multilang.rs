//! Property tests for parsing and resolving multilingual values.

use proptest::prelude::*;
use serde_json::Value;

use patrimoine_client::i18n::{
    parse_str, resolve, td, Language, MultiLangInput, MultiLangValue,
};

fn language_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("fr".to_string()),
        Just("ar".to_string()),
        Just("en".to_string()),
        Just("tz-ltn".to_string()),
        Just("tz-tfng".to_string()),
        "[a-z]{2}",
    ]
}

fn multilang_value() -> impl Strategy<Value = MultiLangValue> {
    prop::collection::vec((language_code(), ".{0,20}"), 0..6).prop_map(MultiLangValue::from_pairs)
}

fn editor_language() -> impl Strategy<Value = Language> {
    prop::sample::select(Language::editor_defaults())
}

proptest! {
    #[test]
    fn non_object_text_lands_under_primary(raw in ".*") {
        prop_assume!(serde_json::from_str::<serde_json::Map<String, Value>>(&raw).is_err());

        let parsed = parse_str(&raw);
        prop_assert_eq!(parsed.value.get("fr"), raw.as_str());
        prop_assert_eq!(parsed.value.len(), 1);
    }

    #[test]
    fn encoded_records_parse_back_unchanged(value in multilang_value()) {
        let parsed = parse_str(&value.to_json());
        prop_assert!(!parsed.is_degraded());
        prop_assert_eq!(parsed.value, value);
    }

    #[test]
    fn resolve_prefers_requested_language(value in multilang_value(), lang in language_code()) {
        let requested = value.get(&lang);
        let resolved = resolve(&value, &lang);

        if !requested.is_empty() {
            prop_assert_eq!(resolved, requested);
        } else if !value.get("fr").is_empty() {
            prop_assert_eq!(resolved, value.get("fr"));
        } else {
            let first = value.iter().map(|(_, text)| text).find(|text| !text.is_empty());
            prop_assert_eq!(resolved, first.unwrap_or(""));
        }
    }

    #[test]
    fn resolve_never_invents_text(value in multilang_value(), lang in language_code()) {
        let resolved = resolve(&value, &lang);
        prop_assert!(resolved.is_empty() || value.iter().any(|(_, text)| text == resolved));
    }

    #[test]
    fn td_accepts_any_string(raw in ".*", lang in language_code()) {
        let text = td(&Value::String(raw.clone()), &lang);
        if serde_json::from_str::<serde_json::Map<String, Value>>(&raw).is_err() {
            prop_assert_eq!(text, raw);
        }
    }

    #[test]
    fn editor_input_leaves_current_record_untouched(
        value in multilang_value(),
        lang in editor_language(),
        text in ".{0,20}",
    ) {
        let editor = MultiLangInput::default();
        let before = value.clone();
        let next = editor.apply_input(&value, lang, &text);

        prop_assert_eq!(&value, &before);
        prop_assert_eq!(next.get(lang), text.as_str());
        for (code, original) in before.iter().filter(|(code, _)| *code != lang.code()) {
            prop_assert_eq!(next.get(code), original);
        }
    }
}
