use std::io::Read;

use anyhow::{Context, Result};
use ssh2::Session;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Runs one command over a fresh exec channel and blocks until it finishes.
pub fn run_command(session: &Session, line: &str) -> Result<CommandOutput> {
    let mut channel = session
        .channel_session()
        .context("could not open an exec channel")?;
    channel
        .exec(line)
        .with_context(|| format!("could not execute `{line}`"))?;

    let mut stdout = String::new();
    channel
        .read_to_string(&mut stdout)
        .context("could not read remote stdout")?;

    let mut stderr = String::new();
    channel
        .stderr()
        .read_to_string(&mut stderr)
        .context("could not read remote stderr")?;

    channel.wait_close().context("could not close the channel")?;
    let exit_code = channel
        .exit_status()
        .context("could not read the exit status")?;

    Ok(CommandOutput {
        stdout,
        stderr,
        exit_code,
    })
}
