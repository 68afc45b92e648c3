use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mindful_application::{AppProviders, RemoteServices};
use mindful_core::config::ClientConfig;
use mindful_infrastructure::{
    ApiClient, ConfigService, FileTokenStore, HttpAuthService, HttpMeditationService,
    HttpSubscriptionService, MindfulPaths, TokenStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mindful")]
#[command(about = "Mindful - guided meditation client", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show the current subscription
    Status,
    /// List purchasable offerings
    Offerings,
    /// Purchase a package from the current offerings
    Purchase { package_id: String },
    /// Restore previous purchases
    Restore,
    /// Cancel the active subscription
    Cancel {
        #[arg(long)]
        reason: Option<String>,
    },
    /// List the meditation library
    Meditations,
    /// Play a meditation until it finishes (Ctrl-C stops early)
    Play { meditation_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new_default().context("Failed to locate config directory")?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    init_tracing(&config.logging.level);

    let providers = build_providers(&config)?;
    providers.bootstrap().await;

    let result = commands::run(cli.command, &providers).await;
    providers.shutdown();
    result
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn build_providers(config: &ClientConfig) -> Result<AppProviders> {
    let token_path = match &config.storage.token_path {
        Some(path) => path.clone(),
        None => MindfulPaths::default().token_file()?,
    };
    tracing::debug!("[mindful] Token file: {:?}", token_path);

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(token_path));
    let api = ApiClient::new(&config.api, tokens).context("Failed to create API client")?;

    let services = RemoteServices {
        auth: Arc::new(HttpAuthService::new(api.clone())),
        subscriptions: Arc::new(HttpSubscriptionService::new(api.clone())),
        meditations: Arc::new(HttpMeditationService::new(api)),
    };
    Ok(AppProviders::new(config.ui.theme, services))
}
