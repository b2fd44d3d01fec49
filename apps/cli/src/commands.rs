//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::Section;
use color_eyre::eyre::{Report, Result, eyre};
use curry_core::pipeline::{self, PreparedView, ProgressReporter, View};
use curry_core::report::{CompanyReport, CouriersReport, RestaurantsReport};
use curry_shared::{
    AppConfig, DashboardError, ViewConfig, init_config, load_config, parse_cutoff,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::render;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Curry: delivery dashboard reports for the Curry Company orders dataset.
#[derive(Parser)]
#[command(
    name = "curry",
    version,
    about = "Clean the delivery orders dataset and print the dashboard views.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
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

/// Flags shared by every view.
#[derive(Args, Debug, Clone)]
pub(crate) struct ViewArgs {
    /// Orders CSV (defaults to the configured dataset path).
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Keep orders strictly before this date (YYYY-MM-DD).
    #[arg(long)]
    pub cutoff: Option<String>,

    /// Allowed traffic densities, comma-separated.
    #[arg(long, value_delimiter = ',')]
    pub traffic: Option<Vec<String>>,

    /// Print JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Clean the dataset and summarize what was kept.
    Clean {
        /// Orders CSV (defaults to the configured dataset path).
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Print the cleaned records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Company view: orders over time, traffic mix, city locations.
    Company {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Couriers view: ages, vehicle conditions, ratings, speed rankings.
    Couriers {
        #[command(flatten)]
        view: ViewArgs,

        /// Allowed weather conditions, comma-separated.
        #[arg(long, value_delimiter = ',')]
        weather: Option<Vec<String>>,
    },

    /// Restaurants view: distances and delivery times.
    Restaurants {
        #[command(flatten)]
        view: ViewArgs,

        /// Allowed weather conditions, comma-separated.
        #[arg(long, value_delimiter = ',')]
        weather: Option<Vec<String>>,
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

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "curry=info",
        1 => "curry=debug",
        _ => "curry=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Clean { dataset, json } => cmd_clean(dataset, json),
        Command::Company { view } => cmd_company(&view),
        Command::Couriers { view, weather } => cmd_couriers(&view, weather),
        Command::Restaurants { view, weather } => cmd_restaurants(&view, weather),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

/// Merge config file values with CLI overrides.
fn resolve_view_config(
    config: &AppConfig,
    args: &ViewArgs,
    weather: Option<Vec<String>>,
) -> Result<ViewConfig> {
    let mut view = ViewConfig::try_from(config)?;

    if let Some(path) = &args.dataset {
        view.dataset_path = path.clone();
    }
    if let Some(cutoff) = &args.cutoff {
        view.cutoff = Some(parse_cutoff(cutoff)?);
    }
    if let Some(traffic) = &args.traffic {
        view.traffic = Some(traffic.iter().map(|t| t.trim().to_string()).collect());
    }
    if let Some(weather) = weather {
        view.weather = Some(weather.iter().map(|w| w.trim().to_string()).collect());
    }

    Ok(view)
}

/// Resolve config, then read, clean, and filter the dataset for `view`.
fn prepare(
    view: View,
    args: &ViewArgs,
    weather: Option<Vec<String>>,
) -> Result<(ViewConfig, PreparedView)> {
    let config = load_config()?;
    let view_config = resolve_view_config(&config, args, weather)?;

    if !view_config.dataset_path.exists() {
        return Err(eyre!(
            "dataset not found at '{}'; pass --dataset or set [dataset] path in the config",
            view_config.dataset_path.display()
        ));
    }

    info!(
        view = view.name(),
        dataset = %view_config.dataset_path.display(),
        cutoff = ?view_config.cutoff,
        "preparing view"
    );

    let reporter = CliProgress::new();
    let prepared =
        pipeline::prepare_view(view, &view_config, &reporter).map_err(pipeline_failed)?;
    Ok((view_config, prepared))
}

/// Points a cleaning failure at the CSV line holding the bad record.
fn row_hint(err: &DashboardError) -> Option<String> {
    err.row()
        .map(|row| format!("record {row} is on line {} of the CSV (line 1 is the header)", row + 1))
}

fn pipeline_failed(err: DashboardError) -> Report {
    let hint = row_hint(&err);
    let report = Report::new(err);
    match hint {
        Some(hint) => report.with_suggestion(move || hint),
        None => report,
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, _view: &PreparedView) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // An error mid-pipeline never reaches `done`.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_clean(dataset: Option<PathBuf>, json: bool) -> Result<()> {
    let config = load_config()?;
    let path = dataset.unwrap_or_else(|| PathBuf::from(&config.dataset.path));

    if !path.exists() {
        return Err(eyre!("dataset not found at '{}'", path.display()));
    }

    let reporter = CliProgress::new();
    let prepared = pipeline::load_cleaned(&path, &reporter).map_err(pipeline_failed)?;

    if json {
        return print_json(&prepared.rows);
    }

    println!();
    println!("  Dataset cleaned");
    println!("  Path:    {}", path.display());
    println!("  Read:    {}", prepared.raw_count);
    println!("  Kept:    {}", prepared.cleaned_count);
    println!("  Dropped: {}", prepared.raw_count - prepared.cleaned_count);
    if let (Some(first), Some(last)) = (
        prepared.rows.iter().map(|r| r.order_date).min(),
        prepared.rows.iter().map(|r| r.order_date).max(),
    ) {
        println!("  Dates:   {first} .. {last}");
    }
    println!("  Time:    {:.1}s", prepared.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_company(args: &ViewArgs) -> Result<()> {
    let (config, prepared) = prepare(View::Company, args, None)?;
    let report = CompanyReport::build(&prepared.rows);

    if args.json {
        return print_json(&report);
    }
    render::view_header("Company", &config, &prepared);
    render::company(&report);
    Ok(())
}

fn cmd_couriers(args: &ViewArgs, weather: Option<Vec<String>>) -> Result<()> {
    let (config, prepared) = prepare(View::Couriers, args, weather)?;
    let report = CouriersReport::build(&prepared.rows, &config.cities, config.top_couriers);

    if args.json {
        return print_json(&report);
    }
    render::view_header("Couriers", &config, &prepared);
    render::couriers(&report);
    Ok(())
}

fn cmd_restaurants(args: &ViewArgs, weather: Option<Vec<String>>) -> Result<()> {
    let (config, prepared) = prepare(View::Restaurants, args, weather)?;
    let report = RestaurantsReport::build(&prepared.rows);

    if args.json {
        return print_json(&report);
    }
    render::view_header("Restaurants", &config, &prepared);
    render::restaurants(&report);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
