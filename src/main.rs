//! ticketwatch - Ticket Pool Monitoring Dashboard
//!
//! A terminal-based dashboard for monitoring and controlling a remote
//! ticket pool simulation.
//!
//! ## Usage
//!
//! ```bash
//! # Start the TUI dashboard against the default server
//! ticketwatch
//!
//! # Against a specific server
//! ticketwatch --server-url http://pool.example.com:8080
//!
//! # With verbose logging
//! ticketwatch -v
//!
//! # Show version
//! ticketwatch --version
//! ```

use std::io::Write;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use ticketwatch_core::{ClientConfig, LogGuard, init_logging};
use ticketwatch_tui::App;
use tracing::{error, info};

/// Ticket Pool Monitoring Dashboard
///
/// A terminal-based interface for watching the ticket pool level,
/// tailing the simulation log, and starting or stopping vendor and
/// customer threads on the remote producer/consumer simulation.
#[derive(Parser, Debug)]
#[command(name = "ticketwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the ticket pool server (overrides the config file)
    #[arg(long)]
    server_url: Option<String>,

    /// Status poll interval in milliseconds
    #[arg(long)]
    status_interval_ms: Option<u64>,

    /// Log poll interval in milliseconds
    #[arg(long)]
    log_interval_ms: Option<u64>,

    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for log files (defaults to ~/.ticketwatch/logs/)
    #[arg(long)]
    log_dir: Option<std::path::PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    // Install panic hook to ensure terminal cleanup
    install_panic_hook();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(1);
        }
    };

    info!(server_url = %config.base_url(), "Starting ticketwatch dashboard");

    // Run the TUI application
    match run_app(&config) {
        Ok(()) => {
            info!("ticketwatch dashboard exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("ticketwatch dashboard error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic message.
///
/// This ensures that even if the application panics while in raw mode with the
/// alternate screen enabled, the terminal will be properly restored so the user
/// can see the panic message and continue using their terminal.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = restore_terminal();

        // Call the original panic hook to print the panic message
        original_hook(panic_info);
    }));
}

/// Restore terminal to its normal state.
fn restore_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();

    // Disable raw mode first
    let _ = crossterm::terminal::disable_raw_mode();

    // Leave alternate screen
    crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;

    // Show cursor
    crossterm::execute!(stdout, crossterm::cursor::Show)?;

    // Flush to ensure all escape sequences are written
    stdout.flush()?;

    Ok(())
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> ticketwatch_core::Result<LogGuard> {
    // verbose flag increases log level
    let debug = cli.verbose > 0;
    init_logging(cli.log_dir.clone(), debug)
}

/// Load the config file and apply CLI overrides.
fn load_config(cli: &Cli) -> ticketwatch_core::Result<ClientConfig> {
    let mut config = ClientConfig::load()?;
    if let Some(url) = &cli.server_url {
        config.server_url = url.clone();
    }
    if let Some(interval) = cli.status_interval_ms {
        config.status_interval_ms = interval;
    }
    if let Some(interval) = cli.log_interval_ms {
        config.log_interval_ms = interval;
    }
    config.validate()?;
    Ok(config)
}

/// Run the TUI application inside a tokio runtime.
///
/// The app's frame loop is synchronous; the runtime hosts the pollers and
/// the dispatcher's request tasks.
fn run_app(config: &ClientConfig) -> ticketwatch_tui::AppResult<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let _enter = runtime.enter();

    let mut app = App::new(config)?;
    app.run()
}
