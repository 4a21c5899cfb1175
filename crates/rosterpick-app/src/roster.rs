// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::{User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Available,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RosterEntry {
    user: User,
    status: EntryStatus,
    // Position within the entry's current partition; bumped on every move so
    // the moved user lands at the end of its new sequence.
    stamp: u64,
}

/// Every known user, keyed by id, each tagged with the partition it belongs
/// to. `available()` and `selected()` are views over the one table, so a user
/// can never sit in both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    entries: BTreeMap<UserId, RosterEntry>,
    next_stamp: u64,
}

impl Roster {
    pub fn new(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let mut roster = Self::default();
        for user in users {
            if user.name.trim().is_empty() {
                bail!(
                    "user {} has a blank name -- give every roster entry a name and retry",
                    user.id
                );
            }
            if roster.contains(user.id) {
                bail!(
                    "duplicate user id {} -- every roster entry needs a unique id",
                    user.id
                );
            }
            let stamp = roster.bump_stamp();
            roster.entries.insert(
                user.id,
                RosterEntry {
                    user,
                    status: EntryStatus::Available,
                    stamp,
                },
            );
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.entries.get(&id).map(|entry| &entry.user)
    }

    pub fn status(&self, id: UserId) -> Option<EntryStatus> {
        self.entries.get(&id).map(|entry| entry.status)
    }

    pub fn available(&self) -> Vec<&User> {
        self.partition(EntryStatus::Available)
    }

    pub fn selected(&self) -> Vec<&User> {
        self.partition(EntryStatus::Selected)
    }

    pub fn selected_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.status == EntryStatus::Selected)
            .count()
    }

    pub fn last_selected(&self) -> Option<&User> {
        self.entries
            .values()
            .filter(|entry| entry.status == EntryStatus::Selected)
            .max_by_key(|entry| entry.stamp)
            .map(|entry| &entry.user)
    }

    /// Moves an available user to the end of the selection. Returns false and
    /// leaves the roster untouched when `id` is unknown or already selected.
    pub fn select(&mut self, id: UserId) -> bool {
        self.transition(id, EntryStatus::Available, EntryStatus::Selected)
    }

    /// Moves a selected user to the end of the available sequence. Returns
    /// false and leaves the roster untouched when `id` is not selected.
    pub fn remove(&mut self, id: UserId) -> bool {
        self.transition(id, EntryStatus::Selected, EntryStatus::Available)
    }

    fn transition(&mut self, id: UserId, from: EntryStatus, to: EntryStatus) -> bool {
        let stamp = self.next_stamp;
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if entry.status != from {
            return false;
        }
        entry.status = to;
        entry.stamp = stamp;
        self.next_stamp += 1;
        true
    }

    fn partition(&self, status: EntryStatus) -> Vec<&User> {
        let mut entries = self
            .entries
            .values()
            .filter(|entry| entry.status == status)
            .collect::<Vec<_>>();
        entries.sort_by_key(|entry| entry.stamp);
        entries.into_iter().map(|entry| &entry.user).collect()
    }

    fn bump_stamp(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }
}
