//! Application shell: owns the configuration, the API client and the shared
//! reference data, and hands them to pages.

use crate::api::{ApiClient, ApiError};
use crate::cache::ReferenceCache;
use crate::config::Config;
use crate::i18n::MultiLangInput;
use crate::models::{Entity, EntityKind, Wilaya};
use crate::page::PageShell;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

const WILAYAS_KEY: &str = "wilayas";

pub struct App {
    config: Config,
    api: ApiClient,
    reference: ReferenceCache<Vec<Wilaya>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config).context("Failed to build API client")?;
        Ok(Self::with_client(config, api))
    }

    /// Shell around an already configured client.
    pub fn with_client(config: Config, api: ApiClient) -> Self {
        Self {
            config,
            api,
            reference: ReferenceCache::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The wilaya list, fetched at most once per shell. Pages asking at the
    /// same time share one request.
    pub async fn wilayas(&self) -> Result<Arc<Vec<Wilaya>>, ApiError> {
        self.reference
            .get_or_load(WILAYAS_KEY, || self.api.wilayas())
            .await
    }

    /// Forget the cached wilayas; the next call refetches them.
    pub async fn refresh_wilayas(&self) {
        self.reference.invalidate(WILAYAS_KEY).await;
    }

    /// How many times the wilaya list was actually fetched.
    pub fn wilaya_fetches(&self) -> usize {
        self.reference.load_count()
    }

    /// Fetch several collections concurrently, in the order given.
    pub async fn list_many(&self, kinds: &[EntityKind]) -> Vec<(EntityKind, Result<Vec<Entity>, ApiError>)> {
        info!("Fetching {} collections", kinds.len());
        let results = join_all(kinds.iter().map(|&kind| self.api.list(kind))).await;
        kinds.iter().copied().zip(results).collect()
    }

    /// Load a collection into `page`. Returns `false` if a newer load on the
    /// same page superseded this one.
    pub async fn load_list(&self, page: &mut PageShell<Vec<Entity>>, kind: EntityKind) -> bool {
        page.load(self.api.list(kind)).await
    }

    /// A multilingual editor over the configured editing languages.
    pub fn editor(&self) -> MultiLangInput {
        MultiLangInput::new(self.config.editor_languages.clone())
    }
}
