use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use anyhow::{Context, Result};
use ssh2::Session;

/// Copies one local file to `remote_dest` over SCP, mode 0644. The remote
/// directory must already exist; SCP does not create it.
pub fn send_file(session: &Session, local_source: &Path, remote_dest: &Path) -> Result<u64> {
    let mut content = Vec::new();
    File::open(local_source)
        .with_context(|| format!("could not open {}", local_source.display()))?
        .read_to_end(&mut content)
        .with_context(|| format!("could not read {}", local_source.display()))?;

    let mut scp = session
        .scp_send(remote_dest, 0o644, content.len() as u64, None)
        .with_context(|| format!("could not start SCP to {}", remote_dest.display()))?;
    scp.write_all(&content)
        .with_context(|| format!("could not send {}", local_source.display()))?;
    scp.send_eof()?;
    scp.wait_eof()?;
    scp.close()?;
    scp.wait_close()?;

    Ok(content.len() as u64)
}
