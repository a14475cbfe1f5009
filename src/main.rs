mod gateway;

use clap::{Parser, Subcommand};
use polyglot_channels::discord::DiscordChannel;
use polyglot_core::{
    config::{self, shellexpand, Config, PolyglotConfig},
    traits::{Channel, Translator},
};
use polyglot_providers::libretranslate::LibreTranslateProvider;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser)]
#[command(
    name = "polyglot",
    version,
    about = "Polyglot — react with a flag, get a translation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the chat platform and start translating reactions.
    Start,
    /// Check configuration and translator availability.
    Status,
    /// Translate a piece of text once and print the reply.
    Translate {
        /// Target language: a code (e.g. "es") or a configured flag.
        #[arg(short, long)]
        to: String,
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_logging(&cfg.polyglot)?;

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let translator = build_translator(&cfg);
            if !translator.is_available().await {
                warn!(
                    "translator '{}' is not reachable at {}; reactions will fail until it is",
                    translator.name(),
                    cfg.translator.base_url
                );
            }

            // Build channels.
            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

            if let Some(ref dc) = cfg.channel.discord {
                if dc.enabled {
                    channels.insert("discord".to_string(), Arc::new(DiscordChannel::new(dc.clone())));
                }
            }

            if channels.is_empty() {
                anyhow::bail!("No channels enabled. Enable at least one channel in config.toml.");
            }

            println!("{} — Starting bot...", cfg.polyglot.name);
            let gw = Arc::new(gateway::Gateway::new(
                translator,
                channels,
                cfg.language_map(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            println!("{} — Status Check\n", cfg.polyglot.name);
            println!("Config: {}", cli.config);
            println!("Translator: {}", cfg.translator.base_url);
            println!(
                "API key: {}",
                if cfg.translator.api_key().is_some() {
                    "set"
                } else {
                    "none"
                }
            );
            println!();

            let translator = build_translator(&cfg);
            let available = translator.is_available().await;
            println!(
                "  {}: {}",
                translator.name(),
                if available { "available" } else { "unreachable" }
            );

            if let Some(ref dc) = cfg.channel.discord {
                println!(
                    "  discord: {}",
                    if dc.enabled && !dc.token.is_empty() {
                        "configured"
                    } else if dc.enabled {
                        "enabled but missing token"
                    } else {
                        "disabled"
                    }
                );
            } else {
                println!("  discord: not configured");
            }
            println!();

            println!("Flags:");
            for (emoji, code) in cfg.language_map().iter() {
                println!("  {emoji}  {code}");
            }

            if let Err(e) = cfg.validate() {
                println!("\n{e}");
            }
        }
        Commands::Translate { to, text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: polyglot translate --to <code> <text>");
            }

            let text = text.join(" ");
            let languages = cfg.language_map();
            let code = languages
                .resolve_target(&to)
                .map(str::to_string)
                .unwrap_or_else(|| to.trim().to_lowercase());

            if gateway::exceeds_limit(&text) {
                anyhow::bail!("{}", gateway::TOO_LONG_MESSAGE);
            }

            let translator = build_translator(&cfg);
            match gateway::relay(translator.as_ref(), &text, &code).await {
                Ok(translated) => println!("{}", gateway::format_translation(&code, &translated)),
                Err(e) => anyhow::bail!("{} ({e})", gateway::FAILED_MESSAGE),
            }
        }
    }

    Ok(())
}

/// Build the configured translator.
fn build_translator(cfg: &Config) -> Arc<dyn Translator> {
    Arc::new(LibreTranslateProvider::from_config(
        cfg.translator.base_url.clone(),
        cfg.translator.api_key().map(str::to_string),
    ))
}

/// Install the tracing subscriber. `RUST_LOG` wins over `log_level`.
///
/// The returned guard must live until exit so buffered file logs flush.
fn init_logging(cfg: &PolyglotConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log_level));

    if cfg.log_file.trim().is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(None);
    }

    let path = PathBuf::from(shellexpand(cfg.log_file.trim()));
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid log_file: {}", cfg.log_file))?;
    std::fs::create_dir_all(dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
