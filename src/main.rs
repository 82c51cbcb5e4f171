//! # Trickle: low-bandwidth knowledge assistant
//!
//! Usage:
//!   trickle serve                        # Start the HTTP gateway (default 127.0.0.1:8000)
//!   trickle serve --port 8080            # Custom port
//!   trickle ask "reset my password"      # Answer one query and print the JSON response
//!   trickle stats                        # Knowledge base size and settings
//!   trickle init                         # Write default config and a sample knowledge file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trickle_assistant::Assistant;
use trickle_core::TrickleConfig;

#[derive(Parser)]
#[command(
    name = "trickle",
    version,
    about = "📡 Trickle: answers that fit through a straw"
)]
struct Cli {
    /// Config file (defaults to $TRICKLE_CONFIG or ~/.trickle/config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Bind address (overrides gateway.host)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides gateway.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Answer a single query
    Ask {
        query: String,
        /// Skip the web fallback for this query
        #[arg(long)]
        no_web: bool,
    },
    /// Show knowledge base statistics
    Stats,
    /// Write a default config and a sample knowledge file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

const SAMPLE_KNOWLEDGE: &str = "\
KEYWORDS: password, reset, login
CONTENT: Go to Settings > Security > Reset password. A reset link is sent by SMS.
---
KEYWORDS: wifi, router, internet
CONTENT: Restart the router, wait two minutes, then reconnect.
---
KEYWORDS: trickle, help
CONTENT: Ask short questions. Answers come from the local knowledge file first.
";

fn expand_path(p: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(p).to_string())
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(TrickleConfig::default_path)
}

fn load_config(cli: &Cli) -> Result<TrickleConfig> {
    let config = match &cli.config {
        Some(path) => TrickleConfig::load_from(&expand_path(path)),
        None => TrickleConfig::load(),
    }?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "trickle=debug,trickle_gateway=debug,trickle_assistant=debug,trickle_knowledge=debug,trickle_providers=debug,tower_http=debug"
    } else {
        "trickle=info,trickle_gateway=info,trickle_assistant=info,trickle_knowledge=info,trickle_providers=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    match &cli.command {
        Command::Serve { host, port } => {
            let mut config = load_config(&cli)?;
            if let Some(host) = host {
                config.gateway.host = host.clone();
            }
            if let Some(port) = port {
                config.gateway.port = *port;
            }
            trickle_gateway::start(&config).await?;
        }
        Command::Ask { query, no_web } => {
            let mut config = load_config(&cli)?;
            if *no_web {
                config.assistant.enable_web_fallback = false;
            }
            let assistant = Assistant::from_config(&config)?;
            let response = assistant.answer(query).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Stats => {
            let config = load_config(&cli)?;
            let assistant = Assistant::from_config(&config)?;
            println!("{}", serde_json::to_string_pretty(&assistant.stats())?);
        }
        Command::Init { force } => {
            init(&config_path(&cli), *force)?;
        }
    }

    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    println!("📡 Trickle Setup\n");

    let config = if path.exists() && !force {
        println!("⚠️  Config already exists: {} (use --force to overwrite)", path.display());
        TrickleConfig::load_from(path)?
    } else {
        let config = TrickleConfig::default();
        config.save_to(path)?;
        println!("✅ Config written: {}", path.display());
        config
    };

    let knowledge = config.knowledge.resolved_path();
    if knowledge.exists() {
        println!("⚠️  Knowledge file already exists: {}", knowledge.display());
    } else {
        if let Some(parent) = knowledge.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&knowledge, SAMPLE_KNOWLEDGE)
            .with_context(|| format!("Failed to write {}", knowledge.display()))?;
        println!("✅ Sample knowledge written: {}", knowledge.display());
    }

    println!("\nRun `trickle serve` and open http://{}:{}", config.gateway.host, config.gateway.port);
    Ok(())
}
