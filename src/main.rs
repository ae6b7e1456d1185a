//! Interactive shell over the process scheduler simulator.
//!
//! Reads one command per line from stdin. Configuration comes from `PROCSIM_*`
//! environment variables (a `.env` file is honoured); logs go to stderr and are
//! filtered with `RUST_LOG`.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use procsim::builders::SchedulerBuilder;
use procsim::config::SchedulerConfig;
use procsim::core::AppResult;
use procsim::runtime::cli::{
    render_history, render_process_table, render_response, HELP,
};
use procsim::runtime::{dispatch, parse_line, Command, Response, ShellInput};
use procsim::util::init_tracing;

#[tokio::main]
async fn main() -> AppResult<()> {
    init_tracing();

    let config = SchedulerConfig::from_env().context("loading configuration")?;
    let (mut scheduler, audit) = SchedulerBuilder::new(config)
        .build()
        .context("building scheduler")?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Welcome to the process scheduler simulator. Type 'help' for commands.\n")
        .await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(ShellInput::Quit)) => break,
            Ok(Some(ShellInput::Help)) => HELP.to_string(),
            Ok(Some(ShellInput::History)) => render_history(&audit.lock().events()),
            Ok(Some(ShellInput::Command(Command::ListReady))) => {
                match (
                    dispatch(&mut scheduler, Command::ListReady).await,
                    dispatch(&mut scheduler, Command::Stats).await,
                ) {
                    (Response::Ready { processes }, Response::Stats { stats }) => {
                        render_process_table(&processes, &stats)
                    }
                    (other, _) => render_response(&other),
                }
            }
            Ok(Some(ShellInput::Command(command))) => {
                render_response(&dispatch(&mut scheduler, command).await)
            }
            Err(e) => format!("error: {e}"),
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    stdout.write_all(b"Goodbye!\n").await?;
    stdout.flush().await?;
    Ok(())
}
