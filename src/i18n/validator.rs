//! Form-level validation of multilingual fields.
//!
//! Forms disagree on what "required" means: some need the primary language,
//! others accept French or Arabic. The policy is therefore configured per
//! field with a [`RequiredRule`] rather than fixed here.

use crate::i18n::{Language, LanguageStrings, MultiLangValue};
use std::collections::HashMap;

/// Validation report containing errors and warnings about a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Localized messages that block submission
    pub errors: Vec<String>,

    /// Localized messages about incomplete translations
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// The form-level error string shown above the submit button.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// What "required" means for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequiredRule {
    Optional,
    /// The primary language must be non-empty.
    Primary,
    /// At least one of these languages must be non-empty.
    AnyOf(Vec<Language>),
    /// Every one of these languages must be non-empty.
    All(Vec<Language>),
}

/// Validation rule for one multilingual field of a form.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: String,
    /// Human label used in messages
    pub label: String,
    pub required: RequiredRule,
    /// Per-language maximum length, in characters
    pub max_chars: Option<usize>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: RequiredRule::Optional,
            max_chars: None,
        }
    }

    pub fn required(mut self, rule: RequiredRule) -> Self {
        self.required = rule;
        self
    }

    pub fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }
}

/// Validator for the multilingual fields of one form.
#[derive(Debug, Clone)]
pub struct FormValidator {
    rules: Vec<FieldRule>,
    ui_language: Language,
    expected: Vec<Language>,
}

impl FormValidator {
    /// Messages are produced in `ui_language`. Translation warnings cover
    /// the default editor languages.
    pub fn new(ui_language: Language) -> Self {
        Self {
            rules: Vec::new(),
            ui_language,
            expected: Language::editor_defaults(),
        }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Languages whose absence in a partly filled field raises a warning.
    pub fn expect_languages(mut self, languages: Vec<Language>) -> Self {
        self.expected = languages;
        self
    }

    /// Validate the form's fields, given as `(name, value)` pairs.
    ///
    /// A field missing from `fields` is validated as a blank record.
    pub fn validate<'a, I>(&self, fields: I) -> ValidationReport
    where
        I: IntoIterator<Item = (&'a str, &'a MultiLangValue)>,
    {
        let values: HashMap<&str, &MultiLangValue> = fields.into_iter().collect();
        let blank = MultiLangValue::new();
        let mut report = ValidationReport::new();

        for rule in &self.rules {
            let value = values.get(rule.name.as_str()).copied().unwrap_or(&blank);
            self.check_field(rule, value, &mut report);
        }

        report
    }

    fn check_field(&self, rule: &FieldRule, value: &MultiLangValue, report: &mut ValidationReport) {
        let strings = self.ui_language.strings();

        match &rule.required {
            RequiredRule::Optional => {}
            RequiredRule::Primary => {
                let primary = Language::primary();
                if value.get(primary).trim().is_empty() {
                    report.errors.push(required_message(strings, &rule.label, primary));
                }
            }
            RequiredRule::AnyOf(languages) => {
                if languages.iter().all(|lang| value.get(lang).trim().is_empty()) {
                    let names = languages
                        .iter()
                        .map(|lang| lang.native_name())
                        .collect::<Vec<_>>()
                        .join(" / ");
                    report.errors.push(LanguageStrings::fill(
                        strings.required_any_of,
                        &[("field", rule.label.as_str()), ("languages", names.as_str())],
                    ));
                }
            }
            RequiredRule::All(languages) => {
                for &lang in languages {
                    if value.get(lang).trim().is_empty() {
                        report.errors.push(required_message(strings, &rule.label, lang));
                    }
                }
            }
        }

        if let Some(max) = rule.max_chars {
            for (code, text) in value.iter() {
                if text.chars().count() > max {
                    let language = Language::from_code(code)
                        .map(|lang| lang.native_name())
                        .unwrap_or(code);
                    let max_text = max.to_string();
                    report.errors.push(LanguageStrings::fill(
                        strings.too_long,
                        &[
                            ("field", rule.label.as_str()),
                            ("language", language),
                            ("max", max_text.as_str()),
                        ],
                    ));
                }
            }
        }

        if !value.is_blank() {
            for &lang in &self.expected {
                if value.get(lang).is_empty() {
                    report.warnings.push(LanguageStrings::fill(
                        strings.missing_translation,
                        &[("field", rule.label.as_str()), ("language", lang.native_name())],
                    ));
                }
            }
        }
    }
}

fn required_message(strings: &LanguageStrings, label: &str, language: Language) -> String {
    LanguageStrings::fill(
        strings.required_field,
        &[("field", label), ("language", language.native_name())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> MultiLangValue {
        MultiLangValue::from_pairs(pairs.iter().copied())
    }

    fn french_or_arabic() -> RequiredRule {
        RequiredRule::AnyOf(vec![Language::FRENCH, Language::ARABIC])
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_validation_report_new() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert_eq!(report.first_error(), None);
    }

    #[test]
    fn test_validation_report_with_warning() {
        let mut report = ValidationReport::new();
        report.warnings.push("Test warning".to_string());
        assert!(!report.is_clean());
        assert!(!report.has_errors());
        assert!(report.has_warnings());
    }

    // ==================== Required Rules ====================

    #[test]
    fn test_primary_rule_rejects_empty_french() {
        let validator = FormValidator::new(Language::FRENCH)
            .field(FieldRule::new("nom", "Nom").required(RequiredRule::Primary));
        let value = record(&[("fr", ""), ("ar", "زربية"), ("en", "")]);

        let report = validator.validate([("nom", &value)]);
        assert!(report.has_errors());
        assert_eq!(
            report.first_error(),
            Some("Le champ « Nom » est obligatoire en Français.")
        );
    }

    #[test]
    fn test_primary_rule_ignores_whitespace_only() {
        let validator = FormValidator::new(Language::ENGLISH)
            .field(FieldRule::new("nom", "Name").required(RequiredRule::Primary));
        let value = record(&[("fr", "   ")]);
        assert!(validator.validate([("nom", &value)]).has_errors());
    }

    #[test]
    fn test_any_of_accepts_arabic_only() {
        let validator = FormValidator::new(Language::FRENCH)
            .field(FieldRule::new("nom", "Nom").required(french_or_arabic()));
        let value = record(&[("fr", ""), ("ar", "زربية"), ("en", "")]);

        let report = validator.validate([("nom", &value)]);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_any_of_rejects_english_only() {
        let validator = FormValidator::new(Language::ENGLISH)
            .field(FieldRule::new("nom", "Name").required(french_or_arabic()));
        let value = record(&[("fr", ""), ("ar", ""), ("en", "Rug")]);

        let report = validator.validate([("nom", &value)]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Français / العربية"));
    }

    #[test]
    fn test_all_rule_reports_each_missing_language() {
        let validator = FormValidator::new(Language::FRENCH).field(
            FieldRule::new("description", "Description")
                .required(RequiredRule::All(Language::editor_defaults())),
        );
        let value = record(&[("fr", "Texte"), ("ar", ""), ("en", "")]);

        let report = validator.validate([("description", &value)]);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_missing_field_is_blank() {
        let validator = FormValidator::new(Language::FRENCH)
            .field(FieldRule::new("nom", "Nom").required(RequiredRule::Primary));
        let report = validator.validate(std::iter::empty());
        assert!(report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_optional_blank_field_is_clean() {
        let validator =
            FormValidator::new(Language::FRENCH).field(FieldRule::new("adresse", "Adresse"));
        let value = MultiLangValue::empty_for(&Language::editor_defaults());
        assert!(validator.validate([("adresse", &value)]).is_clean());
    }

    // ==================== Length ====================

    #[test]
    fn test_max_chars_counts_characters() {
        let validator =
            FormValidator::new(Language::ENGLISH).field(FieldRule::new("nom", "Name").max_chars(4));
        let ok = record(&[("fr", "abcd"), ("ar", "زربية"), ("en", "abcd")]);
        let report = validator.validate([("nom", &ok)]);
        // "زربية" is five characters
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("4"));
        assert!(report.errors[0].contains("العربية"));
    }

    // ==================== Warnings ====================

    #[test]
    fn test_partial_field_warns_for_missing_translations() {
        let validator = FormValidator::new(Language::ENGLISH)
            .field(FieldRule::new("nom", "Name").required(RequiredRule::Primary));
        let value = record(&[("fr", "Tapis"), ("ar", ""), ("en", "")]);

        let report = validator.validate([("nom", &value)]);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("العربية"));
        assert!(report.warnings[1].contains("English"));
    }

    #[test]
    fn test_expect_languages_narrows_warnings() {
        let validator = FormValidator::new(Language::FRENCH)
            .expect_languages(vec![Language::FRENCH, Language::ARABIC])
            .field(FieldRule::new("nom", "Nom"));
        let value = record(&[("fr", "Tapis"), ("ar", "زربية")]);
        assert!(validator.validate([("nom", &value)]).is_clean());
    }

    #[test]
    fn test_messages_follow_ui_language() {
        let validator = FormValidator::new(Language::ARABIC)
            .field(FieldRule::new("nom", "الاسم").required(RequiredRule::Primary));
        let value = MultiLangValue::new();
        let report = validator.validate([("nom", &value)]);
        assert!(report.errors[0].contains("إلزامي"));
    }
}
