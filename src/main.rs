//! desktop-automation - mouse and keyboard automation from the command line

use clap::Parser;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use desktop_automation::automation::Automation;
use desktop_automation::backend::create_backend;
use desktop_automation::cli::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    // Quiet by default so stdout only carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Validate before touching the input system
    let action = cli.command.validate()?;
    let automation = Automation::new(create_backend()?);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    cli::execute(&action, &automation, &cancel, &mut stdout).await
}
