#![forbid(unsafe_code)]

//! `stateful-calc`: crash-resumable command interpreter binary.
//!
//! Runs an interactive session on stdin/stdout, checkpointing every step to
//! the configured state file. Logs go to stderr.

use std::io;

use clap::Parser;
use tracing::{debug, info, info_span};
use tracing_subscriber::{fmt, EnvFilter};

use stateful_calc::channel::StdioChannel;
use stateful_calc::cli::{self, Cli, CliCommand, LogFormat};
use stateful_calc::orchestrator::Interpreter;
use stateful_calc::{AppError, Result};

fn main() -> Result<()> {
    let args = Cli::parse();
    let config = args.resolve_config()?;

    init_tracing(args.log_format, &config.log_filter)?;

    let run_id = uuid::Uuid::new_v4();
    let _span = info_span!("session", %run_id).entered();
    debug!(
        storage = ?config.storage,
        path = %config.state_path().display(),
        "configuration resolved"
    );

    let action = args.action();
    let slot = cli::open_slot(action, &config)?;
    match action {
        CliCommand::Run => {
            info!("stateful-calc session starting");
            let interpreter = Interpreter::from_config(&config);
            let stdin = io::stdin();
            let mut channel = StdioChannel::new(stdin.lock(), io::stdout());
            cli::run_session(&interpreter, &mut channel, slot.as_ref())
        }
        CliCommand::Status => cli::render_status(slot.as_ref(), &mut io::stdout().lock()),
        CliCommand::Reset => {
            cli::reset(slot.as_ref())?;
            info!(path = %config.state_path().display(), "saved state discarded");
            Ok(())
        }
    }
}

fn init_tracing(log_format: LogFormat, default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
