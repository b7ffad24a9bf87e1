use crate::i18n::Language;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Backend
    pub api_base_url: String,
    pub api_token: Option<String>,

    // Languages
    pub default_language: Language,
    pub editor_languages: Vec<Language>,

    // HTTP
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("API_BASE_URL").context("API_BASE_URL not set")?;
        let api_base_url = api_base_url.trim_end_matches('/').to_string();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            bail!("API_BASE_URL must start with http:// or https://, got '{}'", api_base_url);
        }

        let default_language = match std::env::var("DEFAULT_LANGUAGE") {
            Ok(code) => Language::from_code(&code).context("Invalid DEFAULT_LANGUAGE")?,
            Err(_) => Language::primary(),
        };

        let editor_languages = match std::env::var("EDITOR_LANGUAGES") {
            Ok(codes) => Language::parse_list(&codes).context("Invalid EDITOR_LANGUAGES")?,
            Err(_) => Language::editor_defaults(),
        };

        Ok(Self {
            api_base_url,
            api_token: std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            default_language,
            editor_languages,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15),
            max_attempts: std::env::var("MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
        })
    }

    /// Config pointing at `api_base_url` with every other setting at its default.
    pub fn for_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            default_language: Language::primary(),
            editor_languages: Language::editor_defaults(),
            request_timeout_secs: 15,
            max_attempts: 3,
        }
    }
}
