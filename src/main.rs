use qachat::cli::{exit_code, parse_args, run_ask, version_line, CliCommand, USAGE};
use qachat::{CancelHandle, ChatClient, ClientConfig};

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the answer.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", version_line());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Ask(options)) => options,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;
    init_logging();

    let config = ClientConfig::from_env();
    tracing::debug!(?config, "Loaded configuration");
    let client = ChatClient::from_config(config)?;

    // Ctrl-C stops the stream; a second Ctrl-C exits immediately
    let cancel = CancelHandle::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            if cancel.is_cancelled() {
                std::process::exit(130);
            }
            cancel.cancel();
        })?;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(run_ask(&client, &options, &cancel, std::io::stdout()))?;

    let code = exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
