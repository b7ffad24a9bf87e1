use anyhow::{bail, Result};
use patrimoine_client::app::App;
use patrimoine_client::config::Config;
use patrimoine_client::i18n::{resolve, Language, TranslationMetrics};
use patrimoine_client::models::EntityKind;
use patrimoine_client::page::{list_items, PageShell};
use tracing::info;

const USAGE: &str = "Usage: patrimoine-client <oeuvres|evenements|patrimoines|artisanats|services|wilayas> [lang]";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patrimoine_client=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(target) = args.next() else {
        bail!(USAGE);
    };

    let config = Config::from_env()?;
    let lang = match args.next() {
        Some(code) => Language::from_code(&code)?,
        None => config.default_language,
    };
    let app = App::new(config)?;

    info!("Listing {} in {}", target, lang.name());

    if target.trim().eq_ignore_ascii_case("wilayas") {
        for wilaya in app.wilayas().await?.iter() {
            let code = wilaya.code.map(|c| format!("{:02}", c)).unwrap_or_default();
            println!("{:>3} {}", code, resolve(&wilaya.nom, lang));
        }
        return Ok(());
    }

    let kind: EntityKind = target.parse()?;
    let mut page = PageShell::new();
    app.load_list(&mut page, kind).await;

    if let Some(message) = page.status_message(lang) {
        println!("{}", message);
    }
    if page.state().error().is_some() {
        bail!("Could not load {}", kind);
    }
    if let Some(entities) = page.state().data() {
        for item in list_items(entities, lang, 80) {
            println!("#{} {}", item.id, item.title);
            if !item.excerpt.is_empty() {
                println!("    {}", item.excerpt);
            }
        }
    }

    let report = TranslationMetrics::global().report();
    info!(
        "Resolved {} values ({} fallbacks, {} degraded)",
        report.total_resolutions,
        report.primary_fallbacks + report.other_fallbacks,
        report.degraded_parses
    );

    Ok(())
}
