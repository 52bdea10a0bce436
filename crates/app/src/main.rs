//! HealthProd - terminal companion
//!
//! Reads one command per line from stdin until `quit` or end of input.

use std::io::Write;

use anyhow::Context;
use healthprod_app::utils::logging::init_tracing;
use healthprod_app::{execute, AppContext, Command, HostPorts};
use healthprod_infra::config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before logging so RUST_LOG and HEALTHPROD_LOG_JSON apply
    let dotenv = dotenvy::dotenv();
    init_tracing();
    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => warn!(error = %e, "Could not load .env file"),
    }

    let config = config::load_or_default();
    let ports = HostPorts::terminal(&config);
    let ctx = AppContext::new(config, ports).context("failed to initialise HealthProd")?;
    ctx.start().await.context("failed to start background tasks")?;

    info!("HealthProd started");
    println!("HealthProd ready. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                None
            }
        };
        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let quit = command == Command::Quit;

        match execute(&ctx, command).await {
            Ok(output) if !output.is_empty() => println!("{output}"),
            Ok(_) => {}
            Err(err) => println!("{err}"),
        }
        if quit {
            break;
        }
    }

    if let Err(err) = ctx.shutdown().await {
        error!(error = %err, "Shutdown did not complete cleanly");
    }
    info!("HealthProd stopped");
    Ok(())
}
