//! `voltaic`: simulate a fast charge and judge whether it is safe.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Battery charging stability simulator with a rule-based BMS check.
#[derive(Parser)]
#[command(name = "voltaic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Simulate a lithium-ion fast charge and assess its safety", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a charge, assess it, and print the dashboard
    Run(commands::run::RunArgs),
    /// Validate a deck file without simulating
    Check(commands::check::CheckArgs),
    /// Assess a JSON time series produced elsewhere
    Assess(commands::assess::AssessArgs),
    /// Print the active safety thresholds
    Thresholds(commands::thresholds::ThresholdsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    // Logs go to stderr so `--json` output stays parseable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Check(args) => commands::check::execute(&args),
        Commands::Assess(args) => commands::assess::execute(&args),
        Commands::Thresholds(args) => commands::thresholds::execute(&args),
    }
}
