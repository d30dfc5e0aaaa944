mod session;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tickerlens_core::Config;
use tickerlens_gateway::{AppState, GatewayServer};
use tickerlens_market::StockService;
use tickerlens_nlp::TextAnalyzer;
use tokio::sync::watch;

#[derive(Parser)]
#[command(name = "tickerlens", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway (default).
    Serve,
    /// Analyze a text file, or stdin when no file is given.
    Analyze {
        file: Option<PathBuf>,
        /// Skip the welcome banner and username prompt.
        #[arg(long)]
        no_prompt: bool,
        #[arg(long)]
        pretty: bool,
    },
    /// Build the stock report for a ticker.
    Stock {
        ticker: String,
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config);
    let config = Config::load(&config_path)?;
    init_subscriber(&config.log_level);
    config.validate()?;
    tracing::debug!("loaded config from {}", config_path.display());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Analyze {
            file,
            no_prompt,
            pretty,
        } => analyze(&config, file.as_deref(), no_prompt, pretty),
        Command::Stock { ticker, pretty } => stock(&config, &ticker, pretty).await,
    }
}

fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(path) = std::env::var("TICKERLENS_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

/// `RUST_LOG` wins over the configured level. Logs go to stderr so command
/// output on stdout stays machine-readable.
fn init_subscriber(default_level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn build_analyzer(config: &Config) -> anyhow::Result<TextAnalyzer> {
    TextAnalyzer::from_config(&config.nlp).context("failed to build text analyzer")
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config)?;
    let stocks = StockService::new(&config.market, analyzer.clone());
    let fallback = config.load_fallback()?;
    if fallback.is_some() {
        tracing::info!("fallback stock data loaded");
    }
    let state = AppState::new(analyzer, stocks).with_fallback(fallback);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let server = &config.server;
    GatewayServer::new(&server.host, server.port, state, shutdown_rx)
        .with_auth(server.auth_token.clone())
        .with_rate_limit(server.rate_limit)
        .with_max_body_size(server.max_body_size)
        .with_cors(server.cors)
        .serve()
        .await?;
    Ok(())
}

fn analyze(
    config: &Config,
    file: Option<&Path>,
    no_prompt: bool,
    pretty: bool,
) -> anyhow::Result<()> {
    if !no_prompt {
        session::welcome();
        let name = session::prompt_username()?;
        session::greet(&name);
    }

    let text = read_input(file)?;
    let analyzer = build_analyzer(config)?;
    let result = analyzer.analyze(&text);
    tracing::info!(
        sentences = result.sentences,
        words = result.words,
        "analysis complete"
    );
    print_json(&result, pretty)
}

async fn stock(config: &Config, ticker: &str, pretty: bool) -> anyhow::Result<()> {
    let ticker = ticker.trim().to_uppercase();
    anyhow::ensure!(!ticker.is_empty(), "no ticker provided");

    let analyzer = build_analyzer(config)?;
    let report = StockService::new(&config.market, analyzer)
        .report(&ticker)
        .await
        .with_context(|| format!("failed to build stock report for {ticker}"))?;
    print_json(&report, pretty)
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
