//! Cabrillo checker CLI - parse a contest log and report problems.

use anyhow::{Context, Result, bail};
use cabrillo::{
    Config, Log, ParsedLog, parse_log_with,
    timestamp::TIMESTAMP_FORMAT,
};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Cabrillo checker - parse and validate a Cabrillo contest log
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the log file
    path: PathBuf,

    /// Tokens per exchange in QSO lines (overrides config)
    #[arg(short, long)]
    exchange_fields: Option<usize>,

    /// Check category values against the configured rules
    #[arg(long)]
    validate: bool,

    /// Treat unknown tags as errors
    #[arg(long)]
    strict: bool,

    /// Print the parsed log as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(n) = args.exchange_fields {
        config.exchange_fields = n;
    }
    config.validate_categories |= args.validate;
    config.strict |= args.strict;
    config.validate()?;

    debug!("Exchange fields: {}", config.exchange_fields);

    let input = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read log file: {}", args.path.display()))?;

    let parsed = match parse_log_with(&input, &config.parse_options()) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}: {}", args.path.display(), e);
            bail!("{} is not a valid Cabrillo log", args.path.display());
        }
    };

    check(&parsed, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        println!("{}", summary(&parsed.log));
    }

    Ok(())
}

/// Report diagnostics and run the optional post-parse checks.
fn check(parsed: &ParsedLog, config: &Config) -> Result<()> {
    for diagnostic in &parsed.diagnostics {
        warn!("{}", diagnostic);
    }
    if config.strict && !parsed.diagnostics.is_empty() {
        bail!("{} unknown tag(s) in strict mode", parsed.diagnostics.len());
    }

    if config.validate_categories {
        for rule in &config.category_rules {
            debug!("Category rule {}", rule);
        }
        parsed.log.validate_categories(&config.category_rules)?;
        info!("Categories valid");
    }

    Ok(())
}

/// Render a short human-readable overview of a log.
fn summary(log: &Log) -> String {
    let mut lines = vec![
        format!("Callsign:      {}", log.callsign),
        format!("Contest:       {}", log.contest),
        format!("Version:       {}", log.version),
        format!("Claimed score: {}", log.claimed_score),
    ];

    for category in &log.categories {
        lines.push(format!("  CATEGORY-{}: {}", category.name, category.value));
    }

    if !log.operators.is_empty() {
        lines.push(format!("Operators:     {}", log.operators.join(" ")));
    }

    lines.push(format!("QSOs:          {}", log.qsos.len()));
    lines.push(format!("X-QSOs:        {}", log.x_qsos.len()));

    if let (Some(first), Some(last)) = (log.qsos.first(), log.qsos.last()) {
        lines.push(format!(
            "First/last:    {} / {}",
            first.timestamp.format(TIMESTAMP_FORMAT),
            last.timestamp.format(TIMESTAMP_FORMAT)
        ));
    }

    let off_minutes: i64 = log.off_times.iter().map(|ot| ot.duration_minutes()).sum();
    if !log.off_times.is_empty() {
        lines.push(format!(
            "Off times:     {} ({} minutes)",
            log.off_times.len(),
            off_minutes
        ));
    }

    lines.join("\n")
}
