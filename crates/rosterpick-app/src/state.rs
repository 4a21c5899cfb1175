// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, warn};

use crate::{Roster, User, UserId, filter_candidates};

/// Keys the search input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKey {
    Backspace,
    ArrowUp,
    ArrowDown,
    Enter,
    Char(char),
}

/// Where focus went when the search input lost it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurTarget {
    /// Another element of the picker (a dropdown row or chip) took focus.
    InsideWidget,
    /// Focus left the picker entirely.
    Outside,
}

/// Identifies one scheduled dropdown hide. Only the most recent ticket can
/// take effect; a newer blur or any focus supersedes older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HideTicket(u64);

impl HideTicket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCommand {
    Key(PickerKey),
    SetSearch(String),
    Select(UserId),
    Remove(UserId),
    Hover(usize),
    Focus,
    Blur(BlurTarget),
    HideElapsed(HideTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    SearchChanged(String),
    FocusMoved(Option<usize>),
    Selected(UserId),
    Removed(UserId),
    Highlighted(UserId),
    HighlightCleared,
    DropdownShown,
    HideScheduled(HideTicket),
    DropdownHidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipView<'a> {
    pub user: &'a User,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView<'a> {
    pub index: usize,
    pub user: &'a User,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView<'a> {
    Hidden,
    Candidates(Vec<RowView<'a>>),
    NotFound,
}

/// Selection, search, and navigation state of one picker session.
///
/// All mutation goes through [`PickerState::dispatch`], which applies one
/// command and every reset it implies before returning, so no caller can
/// observe a half-updated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    roster: Roster,
    search: String,
    focused_index: Option<usize>,
    highlighted: Option<UserId>,
    input_focused: bool,
    dropdown_active: bool,
    last_ticket: u64,
    pending_hide: Option<HideTicket>,
}

impl PickerState {
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            search: String::new(),
            focused_index: None,
            highlighted: None,
            input_focused: false,
            dropdown_active: false,
            last_ticket: 0,
            pending_hide: None,
        }
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Result<Self> {
        Ok(Self::new(Roster::new(users)?))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn highlighted(&self) -> Option<UserId> {
        self.highlighted
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn dropdown_active(&self) -> bool {
        self.dropdown_active
    }

    pub fn pending_hide(&self) -> Option<HideTicket> {
        self.pending_hide
    }

    pub fn available(&self) -> Vec<&User> {
        self.roster.available()
    }

    pub fn selected(&self) -> Vec<&User> {
        self.roster.selected()
    }

    pub fn selected_users(&self) -> Vec<User> {
        self.roster.selected().into_iter().cloned().collect()
    }

    /// Available users matching the current search, recomputed on each call.
    pub fn candidates(&self) -> Vec<&User> {
        filter_candidates(self.roster.available(), &self.search)
    }

    pub fn chips(&self) -> Vec<ChipView<'_>> {
        self.roster
            .selected()
            .into_iter()
            .map(|user| ChipView {
                user,
                highlighted: self.highlighted == Some(user.id),
            })
            .collect()
    }

    pub fn dropdown(&self) -> DropdownView<'_> {
        if !self.dropdown_active {
            return DropdownView::Hidden;
        }
        let candidates = self.candidates();
        if candidates.is_empty() {
            if self.search.trim().is_empty() {
                return DropdownView::Hidden;
            }
            return DropdownView::NotFound;
        }
        DropdownView::Candidates(
            candidates
                .into_iter()
                .enumerate()
                .map(|(index, user)| RowView {
                    index,
                    user,
                    focused: self.focused_index == Some(index),
                })
                .collect(),
        )
    }

    pub fn dispatch(&mut self, command: PickerCommand) -> Vec<PickerEvent> {
        debug!(?command, "picker dispatch");
        let events = match command {
            PickerCommand::Key(key) => self.handle_key(key),
            PickerCommand::SetSearch(text) => self.set_search(text),
            PickerCommand::Select(id) => self.select_user(id),
            PickerCommand::Remove(id) => self.remove_user(id),
            PickerCommand::Hover(index) => {
                if index < self.candidates().len() {
                    self.set_focus(Some(index))
                } else {
                    Vec::new()
                }
            }
            PickerCommand::Focus => self.focus_input(),
            PickerCommand::Blur(target) => self.blur_input(target),
            PickerCommand::HideElapsed(ticket) => self.hide_elapsed(ticket),
        };
        if !events.is_empty() {
            debug!(?events, "picker events");
        }
        events
    }

    fn handle_key(&mut self, key: PickerKey) -> Vec<PickerEvent> {
        match key {
            PickerKey::Backspace => self.backspace(),
            PickerKey::ArrowDown => {
                let len = self.candidates().len();
                if len == 0 {
                    return Vec::new();
                }
                let next = match self.focused_index {
                    None => 0,
                    Some(index) => (index + 1).min(len - 1),
                };
                self.set_focus(Some(next))
            }
            PickerKey::ArrowUp => {
                if self.candidates().is_empty() {
                    return Vec::new();
                }
                let next = self.focused_index.map_or(0, |index| index.saturating_sub(1));
                self.set_focus(Some(next))
            }
            PickerKey::Enter => {
                let target = {
                    let candidates = self.candidates();
                    candidates
                        .get(self.focused_index.unwrap_or(0))
                        .map(|user| user.id)
                };
                match target {
                    Some(id) => self.select_user(id),
                    None => Vec::new(),
                }
            }
            PickerKey::Char(ch) => {
                let mut next = self.search.clone();
                next.push(ch);
                self.set_search(next)
            }
        }
    }

    fn backspace(&mut self) -> Vec<PickerEvent> {
        if !self.search.is_empty() {
            let mut next = self.search.clone();
            next.pop();
            return self.set_search(next);
        }

        if let Some(id) = self.highlighted {
            let mut events = self.remove_user(id);
            events.extend(self.clear_highlight());
            return events;
        }

        match self.roster.last_selected().map(|user| user.id) {
            Some(id) => {
                self.highlighted = Some(id);
                vec![PickerEvent::Highlighted(id)]
            }
            None => Vec::new(),
        }
    }

    fn select_user(&mut self, id: UserId) -> Vec<PickerEvent> {
        if !self.roster.select(id) {
            warn!(
                user_id = %id,
                status = ?self.roster.status(id),
                "ignoring selection of a user that is not available"
            );
            return Vec::new();
        }

        let mut events = vec![PickerEvent::Selected(id)];
        events.extend(self.clear_highlight());
        events.extend(self.set_search(String::new()));
        events.extend(self.set_focus(None));
        events
    }

    fn remove_user(&mut self, id: UserId) -> Vec<PickerEvent> {
        if !self.roster.remove(id) {
            return Vec::new();
        }

        let mut events = vec![PickerEvent::Removed(id)];
        events.extend(self.clear_highlight());
        events.extend(self.set_focus(None));
        events
    }

    fn set_search(&mut self, text: String) -> Vec<PickerEvent> {
        if text == self.search {
            return Vec::new();
        }
        self.search = text;
        let mut events = vec![PickerEvent::SearchChanged(self.search.clone())];
        events.extend(self.set_focus(None));
        events
    }

    fn set_focus(&mut self, index: Option<usize>) -> Vec<PickerEvent> {
        if self.focused_index == index {
            return Vec::new();
        }
        self.focused_index = index;
        vec![PickerEvent::FocusMoved(index)]
    }

    fn clear_highlight(&mut self) -> Option<PickerEvent> {
        self.highlighted
            .take()
            .map(|_| PickerEvent::HighlightCleared)
    }

    fn focus_input(&mut self) -> Vec<PickerEvent> {
        self.input_focused = true;
        self.pending_hide = None;
        if self.dropdown_active {
            return Vec::new();
        }
        self.dropdown_active = true;
        vec![PickerEvent::DropdownShown]
    }

    // An inside blur leaves the dropdown up, so a later outside blur must
    // still schedule the hide.
    fn blur_input(&mut self, target: BlurTarget) -> Vec<PickerEvent> {
        if !self.input_focused && !self.dropdown_active {
            return Vec::new();
        }
        self.input_focused = false;
        match target {
            BlurTarget::InsideWidget => Vec::new(),
            BlurTarget::Outside => {
                if !self.dropdown_active || self.pending_hide.is_some() {
                    return Vec::new();
                }
                self.last_ticket += 1;
                let ticket = HideTicket(self.last_ticket);
                self.pending_hide = Some(ticket);
                vec![PickerEvent::HideScheduled(ticket)]
            }
        }
    }

    fn hide_elapsed(&mut self, ticket: HideTicket) -> Vec<PickerEvent> {
        if self.pending_hide != Some(ticket) || self.input_focused {
            return Vec::new();
        }
        self.pending_hide = None;
        if !self.dropdown_active {
            return Vec::new();
        }
        self.dropdown_active = false;
        vec![PickerEvent::DropdownHidden]
    }
}
