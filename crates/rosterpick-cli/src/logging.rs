// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log lines go. The picker owns the terminal while it runs, so an
/// interactive session logs to a file or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Off,
}

impl LogTarget {
    pub fn choose(log_path: Option<PathBuf>, interactive: bool) -> Self {
        match log_path {
            Some(path) => Self::File(path),
            None if interactive => Self::Off,
            None => Self::Stderr,
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).with_context(|| format!("invalid log level {level:?}"))
}

pub fn init_tracing(level: &str, target: &LogTarget) -> Result<()> {
    let builder = || -> Result<_> {
        Ok(tracing_subscriber::fmt()
            .with_env_filter(build_filter(level)?)
            .with_target(true)
            .compact())
    };

    match target {
        LogTarget::Off => Ok(()),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| {
                    format!(
                        "open log file {} -- fix [log].path or ROSTERPICK_LOG",
                        path.display()
                    )
                })?;
            builder()?
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        LogTarget::Stderr => builder()?
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
