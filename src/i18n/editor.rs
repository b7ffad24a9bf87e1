//! Controlled editor model for a multilingual field.
//!
//! `MultiLangInput` owns no text. The host form holds the current
//! [`MultiLangValue`]; every keystroke produces a whole new record which is
//! handed back through the change callback. Validation and persistence are
//! the host form's job.

use crate::i18n::registry::Direction;
use crate::i18n::{Language, MultiLangValue};
use anyhow::{bail, Result};
use std::collections::HashMap;

const DEFAULT_ROWS: u16 = 4;

/// Kind of control rendered for each language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TextArea { rows: u16 },
}

/// Everything needed to render one language's control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub language: Language,
    pub label: &'static str,
    pub text: String,
    pub placeholder: Option<String>,
    pub kind: InputKind,
    pub direction: Direction,
    pub active: bool,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct MultiLangInput {
    languages: Vec<Language>,
    kind: InputKind,
    placeholders: HashMap<Language, String>,
    required: bool,
    active: Language,
}

impl MultiLangInput {
    /// Editor over the given languages, first one active.
    ///
    /// An empty list falls back to [`Language::editor_defaults`].
    pub fn new(languages: Vec<Language>) -> Self {
        let languages = if languages.is_empty() {
            Language::editor_defaults()
        } else {
            languages
        };
        let active = languages[0];
        Self {
            languages,
            kind: InputKind::Text,
            placeholders: HashMap::new(),
            required: false,
            active,
        }
    }

    /// Switch every control to a multi-line text area.
    pub fn multiline(mut self, rows: u16) -> Self {
        let rows = if rows == 0 { DEFAULT_ROWS } else { rows };
        self.kind = InputKind::TextArea { rows };
        self
    }

    pub fn placeholder(mut self, language: Language, text: impl Into<String>) -> Self {
        self.placeholders.insert(language, text.into());
        self
    }

    /// Mark the field as required. Only surfaced in [`FieldView`]; the host
    /// form enforces it.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn active(&self) -> Language {
        self.active
    }

    /// Make `language` the visible tab.
    pub fn select_tab(&mut self, language: Language) -> Result<()> {
        if !self.languages.contains(&language) {
            bail!("Language '{}' is not part of this editor", language);
        }
        self.active = language;
        Ok(())
    }

    /// A blank record with a key for every editor language, for a creation form.
    pub fn initial_value(&self) -> MultiLangValue {
        MultiLangValue::empty_for(&self.languages)
    }

    /// One view per editor language, in tab order.
    pub fn fields(&self, value: &MultiLangValue) -> Vec<FieldView> {
        self.languages
            .iter()
            .map(|&language| FieldView {
                language,
                label: language.native_name(),
                text: value.get(language).to_string(),
                placeholder: self.placeholders.get(&language).cloned(),
                kind: self.kind,
                direction: language.direction(),
                active: language == self.active,
                required: self.required,
            })
            .collect()
    }

    /// New record with `language` set to `text`; `current` is not modified.
    pub fn apply_input(
        &self,
        current: &MultiLangValue,
        language: Language,
        text: &str,
    ) -> MultiLangValue {
        current.with(language, text)
    }

    /// Handle a keystroke: build the updated record and pass it to `on_change`.
    pub fn on_input<F>(&self, current: &MultiLangValue, language: Language, text: &str, mut on_change: F)
    where
        F: FnMut(MultiLangValue),
    {
        on_change(self.apply_input(current, language, text));
    }
}

impl Default for MultiLangInput {
    fn default() -> Self {
        Self::new(Language::editor_defaults())
    }
}
