mod config;
mod fs;
mod services;
mod ssh;
mod util;

use std::{env, path::PathBuf, process::ExitCode};

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::read_config;
use crate::services::sync::run_sync;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = match read_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::from(1);
        }
    };

    let password = match config.resolve_password() {
        Ok(password) => password,
        Err(err) => {
            error!("{err:#}");
            return ExitCode::from(1);
        }
    };

    info!(
        "syncing {} -> {}:{}",
        config.local_dir.display(),
        config.host,
        config.remote_dir.display()
    );

    // Exit code 1 means nothing ran against the remote; 2 means the connect
    // succeeded but a later stage failed, so the remote directory may be
    // partially populated.
    match run_sync(&config, &password) {
        Ok(report) if report.is_success() => {
            info!("done");
            ExitCode::SUCCESS
        }
        Ok(_) => ExitCode::from(2),
        Err(err) => {
            error!("connection failed: {err:#}");
            ExitCode::from(1)
        }
    }
}
