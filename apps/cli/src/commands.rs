//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use offergen_core::Pipeline;
use offergen_registry::RegistryClient;
use offergen_shared::{AppConfig, ProcurementRecord, init_config, load_config};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// offergen — extract normalized procurement records from goszakupki.by.
#[derive(Parser)]
#[command(
    name = "offergen",
    version,
    about = "Extract normalized procurement-notice records from goszakupki.by.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch a notice page and print its extracted record.
    Extract {
        /// Notice URL (tender, marketing research, or price request).
        url: String,
    },

    /// Extract from a saved HTML file instead of the network.
    Parse {
        /// Path to the saved notice page.
        file: PathBuf,

        /// Original page URL; drives template detection.
        #[arg(long)]
        url: Option<String>,
    },

    /// Look up an organization in the taxpayer registry by УНП.
    Lookup {
        /// Unified taxpayer number (9 digits, separators allowed).
        unp: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "offergen=info",
        1 => "offergen=debug",
        _ => "offergen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Extract { url } => cmd_extract(&url).await,
        Command::Parse { file, url } => cmd_parse(&file, url.as_deref()).await,
        Command::Lookup { unp } => cmd_lookup(&unp).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_extract(url: &str) -> Result<()> {
    let config = load_config()?;
    let parsed_url = Url::parse(url).map_err(|e| eyre!("invalid URL '{url}': {e}"))?;

    info!(url, "extracting notice");

    let pipeline = Pipeline::new(&config)?;
    let record = pipeline.process_url(&parsed_url).await?;

    print_record(&record, &config)
}

async fn cmd_parse(file: &Path, url: Option<&str>) -> Result<()> {
    let config = load_config()?;

    // Template detection keys off the URL path; a saved file without one
    // gets the legacy fallback.
    let source_url = url.unwrap_or("https://goszakupki.by/");
    let parsed_url = Url::parse(source_url).map_err(|e| eyre!("invalid URL '{source_url}': {e}"))?;

    let html = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read {}: {e}", file.display()))?;

    info!(file = %file.display(), url = %parsed_url, "extracting from saved page");

    let pipeline = Pipeline::new(&config)?;
    let record = pipeline.process_html(&html, &parsed_url).await?;

    print_record(&record, &config)
}

async fn cmd_lookup(unp: &str) -> Result<()> {
    let config = load_config()?;
    let client = RegistryClient::new(&config.registry)?;

    match client.lookup(unp).await {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        None => {
            println!("No registry record for УНП '{unp}'.");
        }
    }
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config file created: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Record rendering
// ---------------------------------------------------------------------------

fn print_record(record: &ProcurementRecord, config: &AppConfig) -> Result<()> {
    if config.output.format == "json" {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!();
    println!("  Organization:  {}", record.organization_name);
    println!("  УНП:           {}", record.tax_id);
    println!("  Address:       {}", record.address);
    println!("  Delivery:      {}", record.delivery_place);
    println!("  Payment:       {}", record.payment_terms);
    println!("  Deadline:      {}", record.proposal_end_date);
    for (i, lot) in record.lots.iter().enumerate() {
        println!("  Lot {}:         {}", i + 1, lot.description);
        println!("                 {} {}", lot.quantity, lot.unit);
    }
    if let Some(reg) = &record.registry {
        println!("  Registry:      {} ({})", reg.short_name, reg.status_name);
    }
    println!();

    Ok(())
}
