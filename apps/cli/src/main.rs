//! offergen CLI — procurement-notice extraction for goszakupki.by.
//!
//! Turns a notice URL into a normalized record: DOM extraction, taxpayer
//! registry enrichment, lot quantity normalization.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
