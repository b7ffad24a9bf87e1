//! Page shells: fetch, hold loading/error/data state, and shape lists and
//! detail views for display.

use crate::i18n::{Language, LanguageStrings, MultiLangValue, Resolver};
use crate::models::Entity;
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::future::Future;
use tracing::debug;

/// Linear state of a page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one request issued by a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Holds a page's [`LoadState`].
///
/// Only the most recently issued ticket may settle the state, so a slow
/// response to an older request never overwrites a newer one.
#[derive(Debug)]
pub struct PageShell<T> {
    state: LoadState<T>,
    generation: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl<T> PageShell<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            generation: 0,
            loaded_at: None,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Start a request. Any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Settle a request. Returns `false` when the ticket is stale and the
    /// result was dropped.
    pub fn finish<E: Display>(&mut self, ticket: LoadTicket, result: Result<T, E>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "Dropping stale response (ticket {}, current {})",
                ticket.0, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(data) => {
                self.loaded_at = Some(Utc::now());
                LoadState::Loaded(data)
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
        true
    }

    /// `begin`, await `fetch`, then `finish`.
    pub async fn load<F, E>(&mut self, fetch: F) -> bool
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.finish(ticket, result)
    }
}

impl<T> Default for PageShell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> PageShell<Vec<I>> {
    /// Message to show instead of the list, if any.
    pub fn status_message(&self, lang: Language) -> Option<String> {
        let strings = lang.strings();
        match &self.state {
            LoadState::Idle => None,
            LoadState::Loading => Some(strings.loading.to_string()),
            LoadState::Failed(error) => Some(LanguageStrings::fill(
                strings.load_failed,
                &[("error", error.as_str())],
            )),
            LoadState::Loaded(items) if items.is_empty() => Some(strings.empty_list.to_string()),
            LoadState::Loaded(_) => None,
        }
    }
}

/// One row of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: i64,
    pub title: String,
    pub excerpt: String,
}

/// Rows for `entities` in `lang`, descriptions cut to `excerpt_chars`.
pub fn list_items(entities: &[Entity], lang: Language, excerpt_chars: usize) -> Vec<ListItem> {
    let resolver = Resolver::new();
    entities
        .iter()
        .map(|entity| ListItem {
            id: entity.id,
            title: resolver.resolve(&entity.nom, lang).to_string(),
            excerpt: excerpt(resolver.resolve(&entity.description, lang), excerpt_chars),
        })
        .collect()
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
        None => text.to_string(),
    }
}

/// Entities whose name contains `query` in any language, ignoring case.
/// A blank query matches everything.
pub fn search<'a>(entities: &'a [Entity], query: &str) -> Vec<&'a Entity> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entities.iter().collect();
    }
    entities
        .iter()
        .filter(|entity| matches_query(&entity.nom, &query))
        .collect()
}

fn matches_query(value: &MultiLangValue, lowercase_query: &str) -> bool {
    value
        .iter()
        .any(|(_, text)| text.to_lowercase().contains(lowercase_query))
}

/// Detail page content for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub description: String,
    /// Resolved translatable extras, in the order requested
    pub fields: Vec<(String, String)>,
}

impl DetailView {
    /// Resolve the entity in `lang`. `extra_fields` names other translatable
    /// fields to show (e.g. `adresse`); blank ones are skipped.
    pub fn build(entity: &Entity, lang: Language, extra_fields: &[&str]) -> Self {
        let resolver = Resolver::new();
        let fields = extra_fields
            .iter()
            .filter_map(|&key| {
                let text = resolver.resolve(&entity.text(key), lang).to_string();
                (!text.is_empty()).then(|| (key.to_string(), text))
            })
            .collect();

        Self {
            title: resolver.resolve(&entity.nom, lang).to_string(),
            description: resolver.resolve(&entity.description, lang).to_string(),
            fields,
        }
    }
}
