use clap::Parser;
use fin_sync::api::Mode;
use fin_sync::args::{Args, Command};
use fin_sync::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fin_home().path();

    // This allows for testing the program without hitting the Google APIs.
    // When FIN_SYNC_IN_TEST_MODE is set and non-zero in length, the mode will
    // be Mode::Test, otherwise it will be Mode::Google.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.sheet_url(), mode)
            .await?
            .print(),

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            commands::add(config, mode, add_args.clone()).await?.print()
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            commands::list(config, mode, list_args.clone())
                .await?
                .print()
        }

        Command::Analyze => {
            let config = Config::load(home).await?;
            commands::analyze(config, mode).await?.print()
        }

        Command::Import(import_args) => {
            let config = Config::load(home).await?;
            commands::import(config, mode, import_args.clone())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "fin_sync={},{}={}",
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
