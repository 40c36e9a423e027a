//! clockdeck - a clock, lap stopwatch and countdown timer for the terminal.
//!
//! `clockdeck daemon` owns the stopwatch and timer; every other command
//! except `clock` and `completions` talks to it over a Unix socket.

use anyhow::Result;
use chrono::Local;
use clap::{CommandFactory, Parser};
use tokio::time::Duration;

use clockdeck::cli::{watch, Cli, Commands, Display, IpcClient};
use clockdeck::config::AppConfig;
use clockdeck::daemon;
use clockdeck::IpcRequest;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins; otherwise `warn`, or `info` with `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Clock => {
            Display::show_clock(&Local::now().naive_local());
            return Ok(());
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            return Ok(());
        }
        _ => {}
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(socket) = cli.socket {
        config = config.with_socket_path(socket);
    }

    if let Commands::Daemon = command {
        return daemon::run(config).await;
    }

    let client = IpcClient::new(config.resolved_socket_path()?);

    match &command {
        Commands::Watch { interval_ms } => {
            let refresh = Duration::from_millis(interval_ms.unwrap_or(config.refresh_ms));
            watch::watch(&client, refresh).await?;
        }
        Commands::Status => {
            let response = client.status().await?;
            Display::show_status(&response, &Local::now().naive_local());
        }
        Commands::Notifications => {
            let response = client.send(&IpcRequest::Notifications).await?;
            Display::show_notifications(&response);
        }
        other => {
            if let Some(request) = other.to_request() {
                let response = client.send(&request).await?;
                Display::show_result(&response);
            }
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
