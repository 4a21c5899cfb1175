// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use rosterpick_app::{PickerCommand, PickerState, User, UserId, default_users};
use std::path::PathBuf;

const FIRST_NAMES: [&str; 24] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan", "Denise", "Soham", "Tracy",
    "Letitia", "Ken", "Calvin", "Bradley", "Brad",
];
const LAST_NAMES: [&str; 22] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks", "Newman",
    "Hall", "Alvarez", "Wells",
];
const DOMAINS: [&str; 4] = ["example.com", "abc.com", "example.org", "corp.example"];
const PORTRAIT_KINDS: [&str; 2] = ["men", "women"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Generates reproducible people for rosters larger than the built-in seed.
#[derive(Debug, Clone)]
pub struct PeopleFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl PeopleFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn person(&mut self, id: i64) -> User {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&DOMAINS);
        let email = format!(
            "{}.{}@{}",
            first.to_lowercase(),
            last.to_lowercase(),
            domain
        );
        let user = User::new(id, format!("{first} {last}"), email);

        // Roughly a third of generated people have no portrait.
        if self.rng.int_n(3) == 0 {
            return user;
        }
        let kind = if self.rng.bool() {
            PORTRAIT_KINDS[0]
        } else {
            PORTRAIT_KINDS[1]
        };
        let portrait = self.rng.int_n(100);
        user.with_avatar(format!(
            "https://randomuser.me/api/portraits/{kind}/{portrait}.jpg"
        ))
    }

    /// `count` people with ids `1..=count`.
    pub fn roster(&mut self, count: usize) -> Vec<User> {
        (1..=count as i64).map(|id| self.person(id)).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// The eight-person roster the picker ships with.
pub fn sample_users() -> Vec<User> {
    default_users()
}

/// A picker over the built-in roster with `ids` already selected, in order.
pub fn state_with_selected(ids: &[i64]) -> Result<PickerState> {
    let mut state = PickerState::from_users(sample_users())?;
    for id in ids {
        let events = state.dispatch(PickerCommand::Select(UserId::new(*id)));
        anyhow::ensure!(!events.is_empty(), "user {id} is not in the sample roster");
    }
    Ok(state)
}

/// Writes `contents` to a fresh temp dir and returns the dir guard and path.
pub fn temp_file(name: &str, contents: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join(name);
    std::fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::{PeopleFaker, sample_users, state_with_selected, temp_file};
    use anyhow::Result;
    use rosterpick_app::Roster;
    use std::collections::BTreeSet;

    #[test]
    fn new_deterministic_seed() {
        let mut left = PeopleFaker::new(42);
        let mut right = PeopleFaker::new(42);
        assert_eq!(left.roster(10), right.roster(10));
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(PeopleFaker::new(0).seed(), 1);
    }

    #[test]
    fn person_has_name_and_matching_email() {
        let mut faker = PeopleFaker::new(7);
        let person = faker.person(3);
        assert_eq!(person.id.get(), 3);
        let first = person
            .name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        assert!(person.email.starts_with(&first));
        assert!(person.email.contains('@'));
    }

    #[test]
    fn generated_roster_has_unique_ids() -> Result<()> {
        let users = PeopleFaker::new(9).roster(200);
        let ids = users.iter().map(|user| user.id).collect::<BTreeSet<_>>();
        assert_eq!(ids.len(), 200);
        assert_eq!(Roster::new(users)?.len(), 200);
        Ok(())
    }

    #[test]
    fn some_generated_people_lack_avatars() {
        let users = PeopleFaker::new(11).roster(60);
        assert!(users.iter().any(|user| user.has_avatar()));
        assert!(users.iter().any(|user| !user.has_avatar()));
    }

    #[test]
    fn state_with_selected_keeps_order() -> Result<()> {
        let state = state_with_selected(&[5, 2])?;
        let ids = state
            .selected()
            .iter()
            .map(|user| user.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(state.available().len(), sample_users().len() - 2);
        Ok(())
    }

    #[test]
    fn state_with_selected_rejects_unknown_ids() {
        let error = state_with_selected(&[99]).expect_err("unknown id should fail");
        assert!(error.to_string().contains("user 99"));
    }

    #[test]
    fn temp_file_writes_contents() -> Result<()> {
        let (_dir, path) = temp_file("roster.toml", "[[users]]\n")?;
        assert_eq!(std::fs::read_to_string(path)?, "[[users]]\n");
        Ok(())
    }
}
