//! minder daemon entrypoint.
//!
//! Parses the CLI, loads configuration, reconciles today's ledger entry,
//! then runs the three watch loops until interrupted.

use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use minder_core::{format_duration, load_config, DayKey, DayLedger, ResidencyTally, WatchConfig};
use minder_daemon::platform::{DesktopWindowAutomation, DesktopWindowSystem, SystemProcessTable};
use minder_daemon::watcher::{Timing, Watcher};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "minder-daemon",
    version,
    about = "Watches the target application, relaunching it when neglected and recording daily attendance"
)]
struct Cli {
    /// Seconds without focus before the target is relaunched (overrides the
    /// configured default)
    #[arg(value_name = "TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Alternate configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = parse_cli();
    init_logging();

    info!("minder daemon starting");

    let mut config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "ignoring unusable config file, using defaults");
            WatchConfig::default()
        }
    };
    if let Some(timeout_secs) = cli.timeout_secs {
        config.default_timeout_secs = timeout_secs;
    }
    info!(
        target_title = %config.window_title,
        process = %config.process_name,
        timeout_secs = config.default_timeout_secs,
        retry_secs = config.retry_timeout_secs,
        "watching for neglect"
    );

    let ledger_path = match config.ledger_file() {
        Ok(path) => path,
        Err(err) => {
            error!(error = %err, "cannot resolve the attendance ledger path");
            std::process::exit(1);
        }
    };
    let ledger = match DayLedger::load(&ledger_path) {
        Ok(ledger) => ledger,
        Err(err) => {
            error!(error = %err, "cannot load the attendance ledger");
            std::process::exit(1);
        }
    };

    let today = DayKey::today();
    let seed_secs = match ledger.seconds_for(&today) {
        Ok(seed_secs) => seed_secs,
        Err(err) => {
            error!(error = %err, date = %today, "stored attendance for today is unreadable");
            std::process::exit(1);
        }
    };
    match seed_secs {
        Some(secs) => info!(
            date = %today,
            recorded = %format_duration(secs),
            "resuming today's attendance"
        ),
        None => info!(date = %today, "no attendance recorded for today yet"),
    }
    let tally = ResidencyTally::new(today, seed_secs.unwrap_or(0));

    let watcher = Watcher::spawn(
        &config,
        ledger,
        tally,
        DesktopWindowSystem,
        DesktopWindowSystem,
        DesktopWindowAutomation,
        SystemProcessTable,
        Timing::default(),
    );

    let running = Arc::new(AtomicBool::new(true));
    let interrupt_flag = Arc::clone(&running);
    if let Err(err) = ctrlc::set_handler(move || interrupt_flag.store(false, Ordering::SeqCst)) {
        error!(error = %err, "cannot install the interrupt handler");
        watcher.shutdown();
        std::process::exit(1);
    }

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(200));
    }

    info!("interrupt received");
    watcher.shutdown();
    info!("minder daemon stopped");
}

/// Parses the CLI, mapping argument problems onto the exit codes callers
/// script against: 1 for a timeout that is not an integer, 2 for misuse
/// such as extra positional arguments.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                ErrorKind::ValueValidation | ErrorKind::InvalidValue => 1,
                _ => 2,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    }
}

fn init_logging() {
    let debug_enabled = env::var("MINDER_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
