use std::{
    net::{TcpStream, ToSocketAddrs},
    time::Duration,
};

use anyhow::{anyhow, ensure, Context, Result};
use ssh2::Session;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) fn try_connection(host: &str, port: u16) -> Result<TcpStream> {
    let addrs: Vec<_> = (host, port)
        .to_socket_addrs()
        .with_context(|| format!("could not resolve {host}:{port}"))?
        .collect();

    addrs
        .iter()
        .find_map(|addr| TcpStream::connect_timeout(addr, CONNECT_TIMEOUT).ok())
        .ok_or_else(|| anyhow!("could not connect to {host}:{port}"))
}

pub(super) fn authenticate(session: &Session, username: &str, password: &str) -> Result<()> {
    session
        .userauth_password(username, password)
        .with_context(|| format!("authentication failed for {username}"))?;
    ensure!(session.authenticated(), "the server rejected the credentials");

    Ok(())
}
