use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use switchbot_power::{Command, Config, SwitchBot};

#[derive(Debug, Parser)]
#[command(
    name = "switchbot-power",
    version,
    about = "SwitchBot API client - power a device on, off, or reboot it"
)]
struct Cli {
    /// Command to execute
    #[arg(value_enum)]
    command: Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Quiet by default so the only stdout line is a rejection report
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,switchbot_power=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load credentials")?;
    tracing::debug!(?config, "loaded configuration");

    let client = SwitchBot::new(config);
    let mut stdout = std::io::stdout().lock();

    // Rejections are reported and swallowed; only transport errors propagate
    let outcomes = client
        .run(cli.command, client.device_id(), &mut stdout)
        .await
        .with_context(|| format!("{} request failed", cli.command))?;

    let rejected = outcomes.iter().filter(|o| !o.is_success()).count();
    tracing::debug!(command = %cli.command, sent = outcomes.len(), rejected, "done");

    stdout.flush()?;
    Ok(())
}
