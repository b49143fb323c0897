//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::provider_factory::build_provider_bundle;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::config_validation::validate_scanner_config;
use crate::domain::error::ScanError;
use crate::domain::pillar::format_shares;
use crate::domain::scan_result::{ScanResult, ScanResultView};
use crate::domain::scanner::{CancelToken, ScannerModule};
use crate::domain::scanner_config::ScannerConfig;
use crate::logging;

#[derive(Parser, Debug)]
#[command(name = "pillarscan", about = "Pillar-based momentum stock scanner")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan the configured universe
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        json: bool,
        /// Only print symbols that passed every enabled pillar
        #[arg(long)]
        passed_only: bool,
        /// Worker threads; overrides [scan] workers
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Evaluate a single symbol
    Check {
        #[arg(short, long)]
        config: PathBuf,
        symbol: String,
        #[arg(long)]
        json: bool,
    },
    /// Warm the historical volume cache and report coverage
    Warm {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a scanner configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    logging::init(cli.verbose, cli.log_json);

    let result = match cli.command {
        Command::Scan {
            config,
            json,
            passed_only,
            workers,
        } => run_scan(&config, json, passed_only, workers),
        Command::Check {
            config,
            symbol,
            json,
        } => run_check(&config, &symbol, json),
        Command::Warm { config } => run_warm(&config),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ScanError> {
    FileConfigAdapter::from_file(path).map_err(|e| ScanError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Load, validate and wire up a scanner from a config file.
pub fn build_scanner(path: &PathBuf) -> Result<ScannerModule, ScanError> {
    let adapter = load_config(path)?;
    validate_scanner_config(&adapter)?;
    let config = ScannerConfig::from_config(&adapter);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let providers = build_provider_bundle(&adapter, Arc::clone(&clock))?;
    Ok(ScannerModule::with_clock(config, providers, clock))
}

fn run_scan(
    config_path: &PathBuf,
    json: bool,
    passed_only: bool,
    workers: Option<usize>,
) -> Result<(), ScanError> {
    let scanner = build_scanner(config_path)?;
    let report = scanner.warm_cache();
    tracing::info!(
        warmed = report.warmed,
        empty = report.empty.len(),
        failed = report.failed.len(),
        "historical cache warmed"
    );

    let workers = workers.unwrap_or(scanner.config().workers).max(1);
    let results = if workers > 1 {
        scanner.scan_concurrent(workers, &CancelToken::new())
    } else {
        scanner.scan()
    };

    let shown: Vec<&ScanResult> = results
        .iter()
        .map(|r| &**r)
        .filter(|r| !passed_only || r.passed_all())
        .collect();

    if json {
        let views: Vec<ScanResultView<'_>> = shown.iter().map(|r| ScanResultView::from(*r)).collect();
        print_json(&views)?;
    } else {
        for result in &shown {
            println!("{}", format_result(result));
        }
        let passed = results.iter().filter(|r| r.passed_all()).count();
        println!("{} scanned, {} passed all pillars", results.len(), passed);
    }
    Ok(())
}

fn run_check(config_path: &PathBuf, symbol: &str, json: bool) -> Result<(), ScanError> {
    let scanner = build_scanner(config_path)?;
    let result = scanner
        .scan_single(symbol)
        .ok_or_else(|| ScanError::NoData {
            symbol: symbol.trim().to_uppercase(),
        })?;

    if json {
        print_json(&ScanResultView::from(&*result))?;
    } else {
        println!("{}", format_result(&result));
    }
    Ok(())
}

fn run_warm(config_path: &PathBuf) -> Result<(), ScanError> {
    let scanner = build_scanner(config_path)?;
    let report = scanner.warm_cache();
    println!(
        "warmed {} symbols ({} without history, {} failed)",
        report.warmed,
        report.empty.len(),
        report.failed.len()
    );
    for symbol in &report.failed {
        println!("  failed: {symbol}");
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), ScanError> {
    let adapter = load_config(config_path)?;
    validate_scanner_config(&adapter)?;
    let config = ScannerConfig::from_config(&adapter);
    println!("Config is valid.");
    println!("  Pillars: {}", config.enabled_pillars().join(", "));
    println!("  Price:   ${:.2} - ${:.2}", config.price.min, config.price.max);
    println!("  Cache:   {}s TTL", config.ttl_seconds);
    println!("  Workers: {}", config.workers);
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), ScanError> {
    let out = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{out}");
    Ok(())
}

/// One scan result as a human-readable block.
pub fn format_result(result: &ScanResult) -> String {
    let status = if result.passed_all() { "PASS" } else { "FAIL" };
    let float = result
        .float_shares
        .map(format_shares)
        .unwrap_or_else(|| "n/a".to_string());
    let mut out = format!(
        "{:<6} {}  ${:.2}  {:+.1}%  RVol {:.1}x  Float {}",
        result.symbol, status, result.price, result.pct_change, result.relative_volume, float
    );
    if let Some(catalyst) = &result.catalyst {
        out.push_str(&format!("\n  catalyst: {catalyst}"));
    }
    if !result.passed_pillars.is_empty() {
        out.push_str(&format!("\n  passed: {}", result.passed_pillars.join(", ")));
    }
    for name in &result.failed_pillars {
        if let Some(detail) = result.detail(name) {
            out.push_str(&format!("\n  failed {}: {}", name, detail.reason));
        }
    }
    out
}
