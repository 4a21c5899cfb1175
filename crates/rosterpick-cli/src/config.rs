// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "rosterpick";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_HIDE_DELAY: &str = "200ms";
const DEFAULT_DROPDOWN_ROWS: u16 = 6;
const MAX_DROPDOWN_ROWS: u16 = 50;
const DEFAULT_PLACEHOLDER: &str = "Add new user...";
const DEFAULT_TITLE: &str = "Select Recipient";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub roster: RosterSection,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            roster: RosterSection::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterSection {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub hide_delay: Option<String>,
    pub dropdown_rows: Option<i64>,
    pub placeholder: Option<String>,
    pub title: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            hide_delay: Some(DEFAULT_HIDE_DELAY.to_owned()),
            dropdown_rows: Some(i64::from(DEFAULT_DROPDOWN_ROWS)),
            placeholder: Some(DEFAULT_PLACEHOLDER.to_owned()),
            title: Some(DEFAULT_TITLE.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub path: Option<String>,
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ROSTERPICK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set ROSTERPICK_CONFIG_PATH to the config file"
            )
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and put values under [roster], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Run `rosterpick --print-example-config` for a template",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(roster_path) = &self.roster.path
            && roster_path.trim().is_empty()
        {
            bail!(
                "roster.path in {} is empty -- remove the key to use the built-in roster",
                path.display()
            );
        }

        if let Some(delay) = &self.ui.hide_delay {
            let parsed = parse_duration(delay)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "ui.hide_delay in {} must be positive, got {}",
                    path.display(),
                    delay
                );
            }
        }

        if let Some(rows) = self.ui.dropdown_rows
            && !(1..=i64::from(MAX_DROPDOWN_ROWS)).contains(&rows)
        {
            bail!(
                "ui.dropdown_rows in {} must be between 1 and {}, got {}",
                path.display(),
                MAX_DROPDOWN_ROWS,
                rows
            );
        }

        if let Some(level) = &self.log.level {
            tracing_subscriber::EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level {level:?} in {} is not a valid filter -- use a level like \"debug\" or a directive like \"rosterpick_app=debug\"",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    /// Roster file from config, falling back to `ROSTERPICK_ROSTER_PATH`.
    pub fn roster_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.roster.path {
            return Some(PathBuf::from(path));
        }
        env::var_os("ROSTERPICK_ROSTER_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    pub fn hide_delay(&self) -> Result<Duration> {
        parse_duration(self.ui.hide_delay.as_deref().unwrap_or(DEFAULT_HIDE_DELAY))
    }

    pub fn dropdown_rows(&self) -> u16 {
        self.ui
            .dropdown_rows
            .and_then(|rows| u16::try_from(rows).ok())
            .unwrap_or(DEFAULT_DROPDOWN_ROWS)
    }

    pub fn placeholder(&self) -> &str {
        self.ui.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    pub fn title(&self) -> &str {
        self.ui.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Log file from `ROSTERPICK_LOG`, then config. `None` keeps the
    /// interactive session silent.
    pub fn log_path(&self) -> Option<PathBuf> {
        if let Some(path) = env::var_os("ROSTERPICK_LOG").filter(|value| !value.is_empty()) {
            return Some(PathBuf::from(path));
        }
        self.log.path.as_ref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# rosterpick config\n# Place this file at: {}\n\nversion = 1\n\n[roster]\n# Optional. Default is the built-in eight-person roster.\n# TOML files hold [[users]] tables; .json files hold an array of users.\n# path = \"/absolute/path/to/roster.toml\"\n\n[ui]\nhide_delay = \"{}\"\ndropdown_rows = {}\nplaceholder = \"{}\"\ntitle = \"{}\"\n\n[log]\n# Optional. Without a path nothing is logged while the picker is open.\n# path = \"/tmp/rosterpick.log\"\nlevel = \"{}\"\n",
            path.display(),
            DEFAULT_HIDE_DELAY,
            DEFAULT_DROPDOWN_ROWS,
            DEFAULT_PLACEHOLDER,
            DEFAULT_TITLE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 200ms or 1s)")
}
