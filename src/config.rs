use std::{env, fs::File, io::BufReader, path::PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

pub const PASSWORD_ENV: &str = "DIRPUSH_PASSWORD";

pub fn read_config(path: Option<PathBuf>) -> Result<SyncConfig> {
    let path = path.unwrap_or_else(|| "./dirpush.yaml".into());
    let file = File::open(&path)
        .with_context(|| format!("could not open config file {}", path.display()))?;
    let reader = BufReader::new(file);

    let config: SyncConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("could not parse config file {}", path.display()))?;
    config.validate()?;

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct SyncConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub username: String,

    /// Only for scripted runs; prefer the environment or the prompt.
    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,

    pub remote_dir: PathBuf,
}

fn default_port() -> u16 {
    22
}

fn default_local_dir() -> PathBuf {
    ".".into()
}

impl SyncConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.host.is_empty(), "host must not be empty");
        ensure!(self.port != 0, "port must be in 1-65535");
        ensure!(!self.username.is_empty(), "username must not be empty");
        ensure!(
            !self.remote_dir.as_os_str().is_empty(),
            "remote_dir must not be empty"
        );
        ensure!(
            self.local_dir.is_dir(),
            "local_dir {} is not a directory",
            self.local_dir.display()
        );

        Ok(())
    }

    /// Lookup order: config file field, then `DIRPUSH_PASSWORD`, then a
    /// hidden interactive prompt.
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        if let Ok(password) = env::var(PASSWORD_ENV) {
            return Ok(password);
        }

        rpassword::prompt_password(format!("[{}@{}] Password: ", self.username, self.host))
            .context("could not read the password from the terminal")
    }
}
