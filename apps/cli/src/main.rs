//! Curry CLI: delivery dashboard reports over the orders dataset.
//!
//! Cleans the orders CSV and prints the company, couriers, and restaurants
//! views as text tables or JSON.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
