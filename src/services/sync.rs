use std::path::Path;

use anyhow::{ensure, Context, Result};
use tracing::{error, info, warn};

use crate::{
    config::SyncConfig,
    fs::list_files,
    ssh::{CommandOutput, SshSession},
    util::indent_str,
};

/// The remote operations the pipeline needs. `SshSession` is the only
/// production implementation; tests substitute an in-memory fake.
pub trait RemoteTarget {
    fn run_command(&self, line: &str) -> Result<CommandOutput>;
    fn put_file(&self, local_source: &Path, remote_dest: &Path) -> Result<u64>;
}

impl RemoteTarget for SshSession {
    fn run_command(&self, line: &str) -> Result<CommandOutput> {
        SshSession::run_command(self, line)
    }

    fn put_file(&self, local_source: &Path, remote_dest: &Path) -> Result<u64> {
        SshSession::put_file(self, local_source, remote_dest)
    }
}

#[derive(Debug)]
pub struct UploadSummary {
    pub sent: usize,
    pub total: usize,
}

/// Per-stage outcomes of one run. Connecting is not represented here: a
/// connection failure aborts before either stage produces a result.
#[derive(Debug)]
pub struct SyncReport {
    pub cleanup: Result<CommandOutput>,
    pub upload: Result<UploadSummary>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.cleanup.is_ok() && self.upload.is_ok()
    }
}

/// Deletes everything under `remote_dir` with a forced recursive glob, no
/// confirmation and no existence check. Only a transport-level error fails
/// the stage; remote stderr and a non-zero exit are logged but tolerated.
pub fn clean_remote_dir(remote: &impl RemoteTarget, remote_dir: &Path) -> Result<CommandOutput> {
    ensure!(
        !remote_dir.as_os_str().is_empty(),
        "the remote directory path is empty"
    );

    let line = format!("rm -rf {}/*", remote_dir.display());
    let output = remote
        .run_command(&line)
        .with_context(|| format!("could not run `{line}`"))?;

    if !output.stdout.is_empty() {
        info!("remote output:\n{}", indent_str(&output.stdout, 2));
    }
    if !output.stderr.is_empty() {
        warn!("remote error output:\n{}", indent_str(&output.stderr, 2));
    }
    if output.exit_code != 0 {
        warn!("`{line}` exited with code {}", output.exit_code);
    }
    info!("cleared the contents of {}", remote_dir.display());

    Ok(output)
}

/// Uploads every regular file directly inside `local_dir` to the same name
/// under `remote_dir`. The first failed transfer aborts the rest of the
/// batch; files already sent stay on the remote.
pub fn upload_dir(
    remote: &impl RemoteTarget,
    local_dir: &Path,
    remote_dir: &Path,
) -> Result<UploadSummary> {
    let files = list_files(local_dir)?;
    let total = files.len();

    let mut sent = 0;
    for file in &files {
        let remote_dest = remote_dir.join(&file.name);
        remote
            .put_file(&file.local_path, &remote_dest)
            .with_context(|| {
                format!(
                    "upload aborted after {sent} of {total} files: could not send {}",
                    file.local_path.display()
                )
            })?;
        info!(
            "uploaded {} to {}",
            file.name.to_string_lossy(),
            remote_dest.display()
        );
        sent += 1;
    }

    Ok(UploadSummary { sent, total })
}

/// The whole pipeline: connect, clean, upload. A connection failure is
/// fatal; a cleanup failure is logged and upload still runs. The session
/// disconnects when this function returns, whatever happened.
pub fn run_sync(config: &SyncConfig, password: &str) -> Result<SyncReport> {
    let session = SshSession::open(config, password)?;

    Ok(sync_stages(&session, config))
}

fn sync_stages(remote: &impl RemoteTarget, config: &SyncConfig) -> SyncReport {
    let cleanup = clean_remote_dir(remote, &config.remote_dir);
    if let Err(err) = &cleanup {
        error!("cleanup failed: {err:#}");
    }

    let upload = upload_dir(remote, &config.local_dir, &config.remote_dir);
    match &upload {
        Ok(summary) => info!("uploaded {} of {} files", summary.sent, summary.total),
        Err(err) => error!("upload failed: {err:#}"),
    }

    SyncReport { cleanup, upload }
}
