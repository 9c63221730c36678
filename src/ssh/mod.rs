use std::path::Path;

use anyhow::{Context, Result};
use ssh2::Session;
use tracing::{debug, info};

use crate::config::SyncConfig;
use crate::ssh::connect::{authenticate, try_connection};

mod connect;
pub mod exec;
pub mod transfer;

pub use exec::CommandOutput;

/// An authenticated session to the remote host. Dropping it disconnects,
/// so the session is released on every exit path, not only the linear
/// success path.
pub struct SshSession {
    session: Session,
}

impl SshSession {
    /// Connects and authenticates with the given password. Unknown host
    /// keys are accepted automatically and never persisted; callers that
    /// need host verification must not use this tool.
    pub fn open(config: &SyncConfig, password: &str) -> Result<Self> {
        let stream = try_connection(&config.host, config.port)?;
        debug!(
            "connected to {}",
            stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "[host]".to_string())
        );

        let mut session = Session::new().context("could not create a session")?;
        session.set_tcp_stream(stream);
        session
            .handshake()
            .with_context(|| format!("handshake with {} failed", config.host))?;

        authenticate(&session, &config.username, password)?;
        info!("connected to {} as {}", config.host, config.username);

        Ok(Self { session })
    }

    pub fn run_command(&self, line: &str) -> Result<CommandOutput> {
        exec::run_command(&self.session, line)
    }

    pub fn put_file(&self, local_source: &Path, remote_dest: &Path) -> Result<u64> {
        transfer::send_file(&self.session, local_source, remote_dest)
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        let _ = self.session.disconnect(None, "done", None);
    }
}
