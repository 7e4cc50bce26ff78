use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use kisan::app::{App, AppEvent, Route};
use kisan::auth::{AuthClient, SessionStore};
use kisan::config::Config;
use kisan::feed::FeedLoader;
use kisan::i18n::Language;
use kisan::storage::{Database, StorageError};
use kisan::theme::ThemeVariant;
use kisan::ui;

/// Get the config directory path (~/.config/kisan/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("kisan"))
}

#[derive(Parser, Debug)]
#[command(name = "kisan", about = "Terminal client for the Kisan post feed")]
struct Args {
    /// Reset the local database (delete and recreate)
    #[arg(long)]
    reset_db: bool,

    /// Override the persisted language for this run (en, hi, pa, ta)
    #[arg(long, value_name = "CODE")]
    language: Option<String>,

    /// Theme variant (dark, light)
    #[arg(long, default_value = "dark")]
    theme: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access: the database holds a session credential.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(&config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(&config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }

    let config = Config::load(&config_dir.join("config.toml"))?;

    let db_path = config_dir.join("kisan.db");
    if args.reset_db && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete database")?;
        println!("Database reset.");
    }

    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(StorageError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of kisan appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    let session = SessionStore::new(db);

    // CLI override wins over the persisted choice for this run only; the
    // config file's `language` key is the fallback for fresh installs.
    let language = match args.language.as_deref() {
        Some(code) => Language::from_code(code)
            .ok_or_else(|| anyhow::anyhow!("Unknown language code: {}", code))?,
        None => {
            session
                .language_or(Language::from_code(&config.language).unwrap_or_default())
                .await
        }
    };
    language.activate();

    let theme = ThemeVariant::from_str_name(&args.theme)
        .ok_or_else(|| anyhow::anyhow!("Unknown theme: {}", args.theme))?;

    // Presence of a stored credential decides the start screen; the identity
    // service is not consulted.
    let start_route = if session.current().await.is_some() {
        tracing::info!("Restored session; starting at the post list");
        Route::Listing
    } else {
        Route::Login
    };

    let api_key = config.resolved_api_key().unwrap_or_else(|| {
        tracing::warn!("No identity API key configured; sign-in and sign-up will fail");
        String::new()
    });

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("kisan/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let feed_loader = FeedLoader::new(
        client.clone(),
        config.api_base_url.clone(),
        config.thumbnail_base_url.clone(),
        config.page_size,
    );
    let auth = AuthClient::new(
        client,
        config.auth_base_url.clone(),
        SecretString::from(api_key),
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(
        start_route,
        language,
        theme,
        feed_loader,
        auth,
        session,
        event_tx,
    );

    ui::run(&mut app, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
