// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use rosterpick_app::{Roster, User, default_users};
use rosterpick_testkit::PeopleFaker;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_DEMO_SIZE: usize = 40;
const DEMO_SEED: u64 = 2026;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    Builtin,
    File(PathBuf),
    Demo(usize),
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    users: Vec<User>,
}

/// Loads the roster from the configured source and validates it before the
/// picker ever sees it.
pub struct SeedRuntime {
    source: RosterSource,
}

impl SeedRuntime {
    pub fn new(source: RosterSource) -> Self {
        Self { source }
    }

    pub fn users(&self) -> Result<Vec<User>> {
        let users = match &self.source {
            RosterSource::Builtin => default_users(),
            RosterSource::File(path) => read_roster_file(path)?,
            RosterSource::Demo(count) => PeopleFaker::new(DEMO_SEED).roster(*count),
        };
        Roster::new(users.clone()).with_context(|| match &self.source {
            RosterSource::File(path) => format!("invalid roster in {}", path.display()),
            RosterSource::Builtin => "invalid built-in roster".to_owned(),
            RosterSource::Demo(count) => format!("invalid demo roster of {count}"),
        })?;
        Ok(users)
    }
}

impl rosterpick_tui::PickerRuntime for SeedRuntime {
    fn load_users(&mut self) -> Result<Vec<User>> {
        let users = self.users()?;
        info!(source = ?self.source, users = users.len(), "roster loaded");
        Ok(users)
    }

    fn selection_confirmed(&mut self, users: &[User]) -> Result<()> {
        for user in users {
            debug!(user_id = %user.id, name = %user.name, "confirmed");
        }
        Ok(())
    }
}

fn read_roster_file(path: &Path) -> Result<Vec<User>> {
    let raw = fs::read_to_string(path).with_context(|| {
        format!(
            "read roster file {} -- set [roster].path or ROSTERPICK_ROSTER_PATH to an existing file",
            path.display()
        )
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let users = if is_json {
        serde_json::from_str::<Vec<User>>(&raw)
            .with_context(|| format!("parse JSON roster {}", path.display()))?
    } else {
        toml::from_str::<RosterFile>(&raw)
            .with_context(|| format!("parse TOML roster {}", path.display()))?
            .users
    };

    if users.is_empty() {
        bail!(
            "roster file {} has no users -- add at least one [[users]] entry and retry",
            path.display()
        );
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::{RosterSource, SeedRuntime};
    use anyhow::Result;
    use rosterpick_testkit::temp_file;
    use rosterpick_tui::PickerRuntime;

    #[test]
    fn builtin_source_loads_seed_roster() -> Result<()> {
        let mut runtime = SeedRuntime::new(RosterSource::Builtin);
        let users = runtime.load_users()?;
        assert_eq!(users.len(), 8);
        assert_eq!(users[0].name, "Soham Newman");
        Ok(())
    }

    #[test]
    fn demo_source_is_deterministic() -> Result<()> {
        let first = SeedRuntime::new(RosterSource::Demo(25)).users()?;
        let second = SeedRuntime::new(RosterSource::Demo(25)).users()?;
        assert_eq!(first.len(), 25);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn toml_roster_file_loads_users_tables() -> Result<()> {
        let (_dir, path) = temp_file(
            "team.toml",
            "[[users]]\nid = 10\nname = \"Ada Park\"\nemail = \"ada@example.com\"\n\n[[users]]\nid = 11\nname = \"Omar Reyes\"\nemail = \"omar@example.com\"\navatar_url = \"https://example.com/o.jpg\"\n",
        )?;
        let users = SeedRuntime::new(RosterSource::File(path)).users()?;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id.get(), 10);
        assert!(!users[0].has_avatar());
        assert!(users[1].has_avatar());
        Ok(())
    }

    #[test]
    fn json_roster_file_loads_array() -> Result<()> {
        let (_dir, path) = temp_file(
            "team.json",
            r#"[{"id": 1, "name": "Ada Park", "email": "ada@example.com"}]"#,
        )?;
        let users = SeedRuntime::new(RosterSource::File(path)).users()?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].mailbox(), "Ada Park <ada@example.com>");
        Ok(())
    }

    #[test]
    fn duplicate_ids_in_roster_file_are_rejected() -> Result<()> {
        let (_dir, path) = temp_file(
            "dupes.json",
            r#"[{"id": 4, "name": "Ada Park", "email": ""}, {"id": 4, "name": "Omar Reyes", "email": ""}]"#,
        )?;
        let error = SeedRuntime::new(RosterSource::File(path))
            .users()
            .expect_err("duplicate ids should fail");
        let message = format!("{error:#}");
        assert!(message.contains("invalid roster in"), "{message}");
        assert!(message.contains("duplicate user id 4"), "{message}");
        Ok(())
    }

    #[test]
    fn empty_roster_file_is_rejected() -> Result<()> {
        let (_dir, path) = temp_file("empty.toml", "")?;
        let error = SeedRuntime::new(RosterSource::File(path))
            .users()
            .expect_err("empty roster should fail");
        assert!(error.to_string().contains("has no users"));
        Ok(())
    }

    #[test]
    fn missing_roster_file_names_the_fix() {
        let runtime = SeedRuntime::new(RosterSource::File("/nonexistent/roster.toml".into()));
        let error = runtime.users().expect_err("missing file should fail");
        assert!(error.to_string().contains("ROSTERPICK_ROSTER_PATH"));
    }

    #[test]
    fn malformed_toml_roster_reports_parse_error() -> Result<()> {
        let (_dir, path) = temp_file("bad.toml", "[[users]]\nid = \"one\"\n")?;
        let error = SeedRuntime::new(RosterSource::File(path))
            .users()
            .expect_err("malformed roster should fail");
        assert!(error.to_string().contains("parse TOML roster"));
        Ok(())
    }
}
