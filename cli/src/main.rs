//! fraglog - Quake 3 server log parser.
//!
//! Reads one log, splits it into matches, writes the per-match records and the
//! cross-match rankings to the output directory, and prints a short summary.
//!
//! Set `FRAGLOG_LOG_PATH` to append diagnostics to a file instead of stderr.

use std::path::{Path, PathBuf};

use clap::Parser;
use fraglog_core::context::{AppConfig, AppConfigExt};
use fraglog_core::reader::{read_lines, resolve_input_path};
use fraglog_core::{analyze, build_report, parse_log_into_matches};
use fraglog_core::storage::export_all;
use fraglog_types::ParsePolicy;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "fraglog", version)]
#[command(about = "Parse a Quake 3 server log into per-match statistics", long_about = None)]
struct Cli {
    /// Log name inside the data directory (`.txt` and `.log` are tried too)
    #[arg(short, long)]
    file: Option<String>,

    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Directory searched for the log
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Load settings from this TOML file instead of the per-user config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip malformed event lines instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Do not write `games.parquet`
    #[arg(long)]
    no_parquet: bool,

    /// Do not write `games.json`
    #[arg(long)]
    no_json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Print the config file location (`--config` or the per-user file) and exit
    #[arg(long)]
    config_path: bool,

    /// Save the effective configuration to the config file location and exit
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Command-line flags take precedence over loaded values.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(file) = &self.file {
            config.default_input = file.clone();
        }
        if let Some(out) = &self.out {
            config.output_dir = out.display().to_string();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.display().to_string();
        }
        if self.lenient {
            config.parse_policy = ParsePolicy::Lenient;
        }
        if self.no_parquet {
            config.formats.parquet = false;
        }
        if self.no_json {
            config.formats.json = false;
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    // Append to FRAGLOG_LOG_PATH when set and writable
    if let Ok(path) = std::env::var("FRAGLOG_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path).map_err(|e| describe(&e))?,
        None => AppConfig::load(),
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}

/// `--config` when given, otherwise the per-user config file.
fn config_file(cli: &Cli) -> Result<PathBuf, String> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => AppConfig::config_path().map_err(|e| describe(&e)),
    }
}

fn save_config(cli: &Cli, config: &AppConfig) -> Result<PathBuf, String> {
    let path = config_file(cli)?;
    config.save_to(&path).map_err(|e| describe(&e))?;
    Ok(path)
}

fn print_config(config: &AppConfig) -> Result<(), String> {
    let text = toml::to_string_pretty(config).map_err(|e| format!("could not render config: {e}"))?;
    print!("{text}");
    Ok(())
}

/// `error: cause: cause...`
fn describe(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn run(config: &AppConfig) -> Result<(), String> {
    let input = resolve_input_path(Path::new(&config.data_dir), &config.default_input)
        .map_err(|e| describe(&e))?;
    tracing::info!(path = %input.display(), policy = ?config.parse_policy, "Parsing log");

    let lines = read_lines(&input).map_err(|e| describe(&e))?;
    let outcome =
        parse_log_into_matches(&lines, config.parse_policy).map_err(|e| describe(&e))?;

    let report = build_report(&outcome.matches);
    let analysis = analyze(&report, &config.rankings);
    let written = export_all(&report, &analysis, &config.formats, Path::new(&config.output_dir))
        .map_err(|e| describe(&e))?;

    println!("Games processed: {}", report.games.len());
    if outcome.skipped_lines > 0 {
        println!("Malformed lines skipped: {}", outcome.skipped_lines);
    }
    if let Some(first) = report.games.first() {
        println!(
            "First game: #{} on {} ({} kills)",
            first.game, first.map, first.total_kills
        );
    }
    if let Some(leader) = analysis.top_killer() {
        println!("Top killer: {} ({} kills)", leader.label, leader.count);
    }
    println!("Files written:");
    for path in &written {
        println!("  {}", path.display());
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    let result = if cli.print_config {
        print_config(&config)
    } else if cli.config_path {
        config_file(&cli).map(|path| println!("{}", path.display()))
    } else if cli.save_config {
        save_config(&cli, &config).map(|path| println!("Saved config to {}", path.display()))
    } else {
        run(&config)
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}
