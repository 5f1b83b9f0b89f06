use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod domain;
mod application;
mod infrastructure;
#[cfg(test)]
mod testing;

use application::commands::default_registry;
use application::messaging::CommandDispatcher;
use application::services::BotService;
use infrastructure::adapters::ConsoleConnector;
use infrastructure::config::Config;
use infrastructure::storage::SettingsManager;

#[derive(Parser)]
#[command(name = "kevo-bot")]
#[command(about = "Prefix command bot for WhatsApp", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(&cli.config);
        }
        Commands::Version => {
            println!("kevo-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

fn run_bot(config_path: &str) {
    let config = load_config(config_path);

    tracing::info!("🚀 Initializing {}...", config.bot.name);

    let settings = Arc::new(SettingsManager::load(&config.bot.settings_path));
    let registry = default_registry();
    tracing::info!("Registered {} commands, prefix '{}'", registry.len(), settings.prefix());

    let dispatcher = CommandDispatcher::new(registry, settings.clone());

    let Some(chat_jid) = config.console_chat() else {
        tracing::error!("No adapter enabled, nothing to run");
        return;
    };
    let connector = ConsoleConnector::new(chat_jid);
    let bot = BotService::new(connector, dispatcher, settings);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return;
        }
    };

    rt.block_on(async {
        if let Err(e) = bot.run().await {
            tracing::error!("Bot stopped: {}", e);
        }
    });
}

/// Filter from `RUST_LOG` directives, `info` when unset or invalid
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_config(config_path: &str) {
    if std::path::Path::new(config_path).exists() {
        println!("Config already exists at {}", config_path);
        return;
    }

    match Config::default().to_yaml() {
        Ok(yaml) => match std::fs::write(config_path, yaml) {
            Ok(()) => println!("Wrote default config to {}", config_path),
            Err(e) => eprintln!("Failed to write config: {}", e),
        },
        Err(e) => eprintln!("{}", e),
    }
}
