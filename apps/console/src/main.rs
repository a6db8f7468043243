use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{ChannelFrame, QueueChannel, ScriptController};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    sync::mpsc::UnboundedReceiver,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod orchestration;
mod render;
mod wire;

use config::load_settings;
use input::{parse_line, ConsoleInput};
use orchestration::apply_input;

/// Line-oriented console for a remote scripting service. Reads commands and
/// inbound JSON messages from stdin, writes outbound frames to stdout.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "script_console.toml")]
    config: PathBuf,
    #[arg(long)]
    service_name: Option<String>,
    #[arg(long)]
    log_capacity: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(name) = args.service_name {
        settings.service_name = name;
    }
    if let Some(capacity) = args.log_capacity {
        settings.log_capacity = capacity;
    }
    info!(service = %settings.service_name, log_capacity = settings.log_capacity, "starting script console");

    let (channel, mut outbound) = QueueChannel::new();
    let mut controller = ScriptController::new(channel, settings.controller_settings());
    controller
        .start()
        .context("failed to register service subscriptions")?;

    let mut stdout = tokio::io::stdout();
    flush_outbound(&mut outbound, &settings.service_name, &mut stdout).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let input = match parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(err) => {
                warn!(error = %err, "ignoring input line");
                eprintln!("{err}");
                continue;
            }
        };
        if input == ConsoleInput::Quit {
            break;
        }

        let outcome = apply_input(&mut controller, input);
        flush_outbound(&mut outbound, &settings.service_name, &mut stdout).await?;

        if let Some(status) = &outcome.status {
            eprintln!("{status}");
        }
        if outcome.update.needs_refresh() {
            eprint!("{}", render::render(&controller, &settings.service_name));
        }
    }

    info!("stdin closed; script console exiting");
    Ok(())
}

async fn flush_outbound(
    outbound: &mut UnboundedReceiver<ChannelFrame>,
    service: &str,
    stdout: &mut Stdout,
) -> Result<()> {
    while let Ok(frame) = outbound.try_recv() {
        let mut line = wire::encode_frame(&frame, service).context("failed to encode frame")?;
        line.push('\n');
        stdout
            .write_all(line.as_bytes())
            .await
            .context("failed to write outbound frame")?;
    }
    stdout.flush().await.context("failed to flush stdout")?;
    Ok(())
}
