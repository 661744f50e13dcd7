//! bnwrap - Command-line demo for the big-number wrapper

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bnwrap_cli::{config, run, Cli};

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bnwrap=info,bnwrap_cli=info,bnwrap_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut cli = Cli::parse();
    if cli.config.is_none() {
        cli.config = config::path_from_env();
    }
    let mut stdout = std::io::stdout().lock();

    if run(cli, &mut stdout)? {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("Self-test reported failures");
        Ok(ExitCode::FAILURE)
    }
}
