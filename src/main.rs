use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flutter_i18n_gen::config::Settings;
use flutter_i18n_gen::error::TranslateError;
use flutter_i18n_gen::i18n::{Direction, GenerationReport, ResourceStore};
use flutter_i18n_gen::interaction::{key_validator, locale_validator, Console, UserInteraction};
use flutter_i18n_gen::storage::FileSystem;
use flutter_i18n_gen::translation::GoogleTranslator;
use flutter_i18n_gen::workspace::{InsertOutcome, Workspace};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "flutter-i18n-gen",
    version,
    about = "Generate Flutter i18n.dart from JSON resources"
)]
struct Cli {
    /// Workspace root holding i18nconfig.json
    #[arg(long, short = 'w', global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create i18nconfig.json, the default resource and i18n.dart
    Init {
        /// Default locale, e.g. en-US
        locale: Option<String>,
    },
    /// Add a locale
    Add {
        locale: Option<String>,

        /// Force a text direction (rtl or ltr)
        #[arg(long)]
        direction: Option<Direction>,
    },
    /// Remove a non-default locale and its resource
    Remove { locale: Option<String> },
    /// Regenerate i18n.dart
    Update,
    /// Add a key to the default locale's resource
    Insert {
        key: Option<String>,
        value: Option<String>,
    },
    /// Machine-translate keys missing from other locales
    Translate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flutter_i18n_gen=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::from_env()?;
    if let Some(workspace) = cli.workspace {
        settings.workspace = workspace;
    }

    let workspace = Workspace::new(ResourceStore::new(FileSystem, &settings.workspace));
    let mut console = Console::stdio();

    match cli.command {
        Command::Init { locale } => {
            let locale =
                locale.or_else(|| ask_locale(&mut console, &workspace, "Default locale"));
            let Some(locale) = locale else {
                return cancelled(&mut console);
            };
            let report = workspace
                .init(&locale)
                .with_context(|| format!("Failed to initialize workspace with '{}'", locale))?;
            summarize(&report);
        }
        Command::Add { locale, direction } => {
            let locale = locale.or_else(|| ask_locale(&mut console, &workspace, "Locale to add"));
            let Some(locale) = locale else {
                return cancelled(&mut console);
            };
            let report = workspace
                .add_locale(&locale, direction)
                .with_context(|| format!("Failed to add locale '{}'", locale))?;
            summarize(&report);
        }
        Command::Remove { locale } => {
            let locale = match locale {
                Some(locale) => Some(locale),
                None => {
                    let config = workspace.load_config().context("Failed to load configuration")?;
                    let removable: Vec<String> = config
                        .locales
                        .iter()
                        .filter(|l| **l != config.default_locale)
                        .cloned()
                        .collect();
                    console.pick_one("Locale to remove", &removable)
                }
            };
            let Some(locale) = locale else {
                return cancelled(&mut console);
            };
            let report = workspace
                .remove_locale(&locale)
                .with_context(|| format!("Failed to remove locale '{}'", locale))?;
            summarize(&report);
        }
        Command::Update => {
            let report = workspace.update().context("Failed to generate i18n.dart")?;
            summarize(&report);
        }
        Command::Insert { key, value } => {
            let Some(key) = key.or_else(|| console.prompt("Key", "title", &key_validator)) else {
                return cancelled(&mut console);
            };
            let Some(value) = value.or_else(|| console.prompt("Value", "Hello {name}", &|_| None))
            else {
                return cancelled(&mut console);
            };
            match workspace
                .insert_key(&key, &value)
                .with_context(|| format!("Failed to insert key '{}'", key))?
            {
                InsertOutcome::AlreadyExists => {
                    console.show_info(&format!("Key {} already exists.", key));
                }
                InsertOutcome::Inserted { call_suffix } => {
                    let call = format!(
                        "I18n.of(context).{}{}",
                        key,
                        call_suffix.unwrap_or_default()
                    );
                    console.show_info(&call);
                }
            }
        }
        Command::Translate => {
            let config = workspace.load_config().context("Failed to load configuration")?;
            let api_key = settings
                .api_key_for(&config)
                .ok_or(TranslateError::MissingApiKey)?;
            let source_language = workspace.metadata().language_code(&config.default_locale);
            let translator = GoogleTranslator::new(
                reqwest::Client::new(),
                settings.translate_api_url.clone(),
                api_key,
                source_language,
            );

            let report = workspace
                .auto_translate(&translator)
                .await
                .context("Automatic translation failed")?;
            for locale in &report.translated {
                info!(locale = %locale.locale, keys = locale.keys.len(), "Translated");
            }
            info!(keys = report.key_count(), "Automatic translation finished");
            summarize(&report.generation);
        }
    }

    Ok(())
}

fn ask_locale(
    console: &mut impl UserInteraction,
    workspace: &Workspace<FileSystem>,
    text: &str,
) -> Option<String> {
    let validate = locale_validator(workspace.metadata());
    console.prompt(text, "en-US", &validate)
}

fn cancelled(console: &mut impl UserInteraction) -> Result<()> {
    console.show_info("Cancelled.");
    Ok(())
}

fn summarize(report: &GenerationReport) {
    for skipped in &report.skipped {
        warn!(locale = %skipped.locale, reason = %skipped.reason, "Locale skipped");
    }
    info!(
        path = %report.output_path.display(),
        accessors = report.accessor_count,
        locales = report.locale_count,
        "i18n.dart updated"
    );
}
