// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{Frame, Terminal};
use rosterpick_app::{
    BlurTarget, ChipView, DropdownView, HideTicket, PickerCommand, PickerEvent, PickerKey,
    PickerState, RowView, User, UserId,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const STATUS_TTL: Duration = Duration::from_secs(4);
const REMOVE_GLYPH: char = '×';
const NOT_FOUND_TEXT: &str = "User not found!!!";
const INPUT_PROMPT: &str = "› ";
const DONE_LABEL: &str = "[ Done ]";
const PICKER_TITLE: &str = "to";

/// Supplies the people the picker offers.
pub trait PickerRuntime {
    fn load_users(&mut self) -> Result<Vec<User>>;
    fn selection_confirmed(&mut self, _users: &[User]) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    pub title: String,
    pub placeholder: String,
    pub hide_delay: Duration,
    pub dropdown_rows: u16,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            title: "Select Recipient".to_owned(),
            placeholder: "Add new user...".to_owned(),
            hide_delay: Duration::from_millis(200),
            dropdown_rows: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Confirmed(Vec<User>),
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    HideElapsed(HideTicket),
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScreenFocus {
    #[default]
    Input,
    DoneButton,
    Nothing,
}

/// First dropdown row on screen. Moves only as far as needed to bring a row
/// into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropdownViewport {
    offset: usize,
}

impl DropdownViewport {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn ensure_visible(&mut self, index: usize, height: usize) {
        if height == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + height {
            self.offset = index + 1 - height;
        }
    }

    fn clamp(&mut self, len: usize, height: usize) {
        self.offset = self.offset.min(len.saturating_sub(height));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChipSlot {
    id: UserId,
    label: String,
    highlighted: bool,
    row: usize,
    start: usize,
    width: usize,
}

impl ChipSlot {
    // Label is padded by one cell each side; the glyph sits before the right pad.
    fn remove_col(&self) -> usize {
        self.start + self.width.saturating_sub(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSlot {
    y: u16,
    index: usize,
    id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ScreenLayout {
    title: Rect,
    picker: Rect,
    chips: Rect,
    input: Rect,
    dropdown: Rect,
    done: Rect,
    status: Rect,
    chip_slots: Vec<ChipSlot>,
    rows: Vec<RowSlot>,
    dropdown_offset: usize,
    not_found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    focus: ScreenFocus,
    viewport: DropdownViewport,
    layout: ScreenLayout,
    status_line: Option<String>,
    status_token: u64,
    outcome: Option<PickerOutcome>,
}

struct TerminalSession;

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let session = Self;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture
        )
        .context("enter alternate screen")?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

pub fn run_picker<R: PickerRuntime>(
    runtime: &mut R,
    options: &PickerOptions,
) -> Result<PickerOutcome> {
    let users = runtime.load_users().context("load roster")?;
    let mut state = build_state(users)?;
    info!(users = state.roster().len(), "starting picker");

    let outcome = {
        let _session = TerminalSession::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("create terminal")?;
        event_loop(&mut terminal, &mut state, options)?
    };

    if let PickerOutcome::Confirmed(users) = &outcome {
        info!(selected = users.len(), "selection confirmed");
        runtime.selection_confirmed(users)?;
    }
    Ok(outcome)
}

fn build_state(users: Vec<User>) -> Result<PickerState> {
    let state = PickerState::from_users(users).context("build roster")?;
    if state.roster().is_empty() {
        bail!("roster has no users -- point [roster].path at a file with at least one user");
    }
    Ok(state)
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut PickerState,
    options: &PickerOptions,
) -> Result<PickerOutcome> {
    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    focus_input(state, &mut view_data, &internal_tx, options);

    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx, options);
        draw(terminal, state, &mut view_data, options)?;

        if !event::poll(POLL_INTERVAL).context("poll event")? {
            continue;
        }
        let finished = match event::read().context("read event")? {
            Event::Key(key) => handle_key_event(state, &mut view_data, &internal_tx, options, key),
            Event::Mouse(mouse) => {
                handle_mouse_event(state, &mut view_data, &internal_tx, options, mouse)
            }
            _ => false,
        };
        if finished {
            break;
        }
    }

    Ok(view_data.outcome.take().unwrap_or(PickerOutcome::Aborted))
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &PickerState,
    view_data: &mut ViewData,
    options: &PickerOptions,
) -> Result<()> {
    terminal
        .draw(|frame| {
            let layout = compute_layout(frame.area(), state, options, view_data.viewport);
            render(frame, &layout, state, view_data, options);
            view_data.viewport = DropdownViewport {
                offset: layout.dropdown_offset,
            };
            view_data.layout = layout;
        })
        .context("draw frame")?;
    Ok(())
}

fn process_internal_events(
    state: &mut PickerState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
    options: &PickerOptions,
) {
    while let Ok(event) = rx.try_recv() {
        handle_internal_event(state, view_data, tx, options, event);
    }
}

fn handle_internal_event(
    state: &mut PickerState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    event: InternalEvent,
) {
    match event {
        InternalEvent::HideElapsed(ticket) => {
            apply_command(
                state,
                view_data,
                tx,
                options,
                PickerCommand::HideElapsed(ticket),
            );
        }
        InternalEvent::ClearStatus { token } if token == view_data.status_token => {
            view_data.status_line = None;
        }
        InternalEvent::ClearStatus { .. } => {}
    }
}

// A superseded ticket is ignored by the reducer, and once the loop exits the
// receiver is gone so the send fails quietly.
fn schedule_hide(internal_tx: &Sender<InternalEvent>, ticket: HideTicket, delay: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::HideElapsed(ticket));
    });
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn apply_command(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    command: PickerCommand,
) {
    for event in state.dispatch(command) {
        handle_picker_event(state, view_data, internal_tx, options, event);
    }
}

fn handle_picker_event(
    state: &PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    event: PickerEvent,
) {
    match event {
        PickerEvent::HideScheduled(ticket) => {
            debug!(ticket = ticket.get(), "dropdown hide scheduled");
            schedule_hide(internal_tx, ticket, options.hide_delay);
        }
        PickerEvent::FocusMoved(Some(index)) => {
            let height = visible_rows(view_data, options);
            view_data.viewport.ensure_visible(index, height);
        }
        PickerEvent::SearchChanged(_) => view_data.viewport.reset(),
        PickerEvent::Selected(id) => {
            view_data.viewport.reset();
            let message = format!("added {}", user_name(state, id));
            emit_status(view_data, internal_tx, message);
        }
        PickerEvent::Removed(id) => {
            view_data.viewport.reset();
            let message = format!("removed {}", user_name(state, id));
            emit_status(view_data, internal_tx, message);
        }
        PickerEvent::Highlighted(id) => {
            let message = format!("backspace again removes {}", user_name(state, id));
            emit_status(view_data, internal_tx, message);
        }
        PickerEvent::FocusMoved(None)
        | PickerEvent::HighlightCleared
        | PickerEvent::DropdownShown
        | PickerEvent::DropdownHidden => {}
    }
}

fn user_name(state: &PickerState, id: UserId) -> String {
    state
        .roster()
        .user(id)
        .map_or_else(|| format!("user {id}"), |user| user.name.clone())
}

fn visible_rows(view_data: &ViewData, options: &PickerOptions) -> usize {
    if view_data.layout.dropdown.height > 0 {
        usize::from(view_data.layout.dropdown.height)
    } else {
        usize::from(options.dropdown_rows)
    }
}

fn focus_input(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
) {
    view_data.focus = ScreenFocus::Input;
    apply_command(state, view_data, internal_tx, options, PickerCommand::Focus);
}

fn move_focus_away(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    target: ScreenFocus,
) {
    let was_input = view_data.focus == ScreenFocus::Input;
    view_data.focus = target;
    if was_input {
        apply_command(
            state,
            view_data,
            internal_tx,
            options,
            PickerCommand::Blur(BlurTarget::Outside),
        );
    }
}

fn confirm(state: &PickerState, view_data: &mut ViewData) {
    view_data.outcome = Some(PickerOutcome::Confirmed(state.selected_users()));
}

fn handle_key_event(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    key: KeyEvent,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => {
                view_data.outcome = Some(PickerOutcome::Aborted);
                return true;
            }
            KeyCode::Char('d') => {
                confirm(state, view_data);
                return true;
            }
            KeyCode::Char('u') if view_data.focus == ScreenFocus::Input => {
                apply_command(
                    state,
                    view_data,
                    internal_tx,
                    options,
                    PickerCommand::SetSearch(String::new()),
                );
            }
            _ => {}
        }
        return false;
    }

    match view_data.focus {
        ScreenFocus::Input => handle_input_key(state, view_data, internal_tx, options, key),
        ScreenFocus::DoneButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                confirm(state, view_data);
                true
            }
            KeyCode::Tab | KeyCode::BackTab => {
                focus_input(state, view_data, internal_tx, options);
                false
            }
            _ => false,
        },
        ScreenFocus::Nothing => {
            if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                focus_input(state, view_data, internal_tx, options);
            }
            false
        }
    }
}

fn handle_input_key(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    key: KeyEvent,
) -> bool {
    let picker_key = match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
            move_focus_away(
                state,
                view_data,
                internal_tx,
                options,
                ScreenFocus::DoneButton,
            );
            return false;
        }
        KeyCode::Backspace => PickerKey::Backspace,
        KeyCode::Up => PickerKey::ArrowUp,
        KeyCode::Down => PickerKey::ArrowDown,
        KeyCode::Enter => PickerKey::Enter,
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) => PickerKey::Char(ch),
        _ => return false,
    };
    apply_command(
        state,
        view_data,
        internal_tx,
        options,
        PickerCommand::Key(picker_key),
    );
    false
}

fn handle_mouse_event(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    mouse: MouseEvent,
) -> bool {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved => {
            if let Some(slot) = row_at(&view_data.layout, position) {
                apply_command(
                    state,
                    view_data,
                    internal_tx,
                    options,
                    PickerCommand::Hover(slot.index),
                );
            }
            false
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
            if view_data.layout.dropdown.contains(position) =>
        {
            let picker_key = if mouse.kind == MouseEventKind::ScrollDown {
                PickerKey::ArrowDown
            } else {
                PickerKey::ArrowUp
            };
            apply_command(
                state,
                view_data,
                internal_tx,
                options,
                PickerCommand::Key(picker_key),
            );
            false
        }
        MouseEventKind::Down(MouseButton::Left) => {
            handle_press(state, view_data, internal_tx, options, position)
        }
        _ => false,
    }
}

// Presses inside the picker never take focus from the input, so a row press
// lands before any blur could hide the dropdown.
fn handle_press(
    state: &mut PickerState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &PickerOptions,
    position: Position,
) -> bool {
    if let Some(slot) = row_at(&view_data.layout, position) {
        apply_command(
            state,
            view_data,
            internal_tx,
            options,
            PickerCommand::Select(slot.id),
        );
        return false;
    }

    if let Some(id) = chip_remove_at(&view_data.layout, position) {
        apply_command(state, view_data, internal_tx, options, PickerCommand::Remove(id));
        return false;
    }

    if view_data.layout.input.contains(position) {
        if view_data.focus != ScreenFocus::Input {
            focus_input(state, view_data, internal_tx, options);
        }
        return false;
    }

    if view_data.layout.done.contains(position) {
        confirm(state, view_data);
        return true;
    }

    if !view_data.layout.picker.contains(position) {
        move_focus_away(state, view_data, internal_tx, options, ScreenFocus::Nothing);
    }
    false
}

fn row_at(layout: &ScreenLayout, position: Position) -> Option<RowSlot> {
    if !layout.dropdown.contains(position) {
        return None;
    }
    layout.rows.iter().copied().find(|slot| slot.y == position.y)
}

fn chip_remove_at(layout: &ScreenLayout, position: Position) -> Option<UserId> {
    if !layout.chips.contains(position) {
        return None;
    }
    let row = usize::from(position.y - layout.chips.y);
    let col = usize::from(position.x - layout.chips.x);
    layout
        .chip_slots
        .iter()
        .find(|slot| slot.row == row && (slot.remove_col()..slot.start + slot.width).contains(&col))
        .map(|slot| slot.id)
}

fn chip_label(user: &User) -> String {
    if user.has_avatar() {
        format!("{} {} {REMOVE_GLYPH}", user.initials(), user.name)
    } else {
        format!("{} {REMOVE_GLYPH}", user.name)
    }
}

fn row_text(user: &User) -> String {
    if user.has_avatar() {
        format!("({}) {}  {}", user.initials(), user.name, user.email)
    } else {
        format!("{}  {}", user.name, user.email)
    }
}

fn layout_chips(chips: &[ChipView<'_>], width: u16) -> Vec<ChipSlot> {
    let width = usize::from(width);
    let mut slots = Vec::with_capacity(chips.len());
    let mut row = 0;
    let mut col = 0;
    for chip in chips {
        let label = chip_label(chip.user);
        let chip_width = label.width() + 2;
        if col > 0 && col + chip_width > width {
            row += 1;
            col = 0;
        }
        slots.push(ChipSlot {
            id: chip.user.id,
            label,
            highlighted: chip.highlighted,
            row,
            start: col,
            width: chip_width,
        });
        col += chip_width + 1;
    }
    slots
}

fn compute_layout(
    area: Rect,
    state: &PickerState,
    options: &PickerOptions,
    viewport: DropdownViewport,
) -> ScreenLayout {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
    let (title, picker, footer) = (sections[0], sections[1], sections[2]);

    let inner = picker_block(false).inner(picker);
    let chip_slots = layout_chips(&state.chips(), inner.width);
    let chip_rows = chip_slots.last().map_or(0, |slot| slot.row + 1);
    let chip_rows = u16::try_from(chip_rows)
        .unwrap_or(u16::MAX)
        .min(inner.height.saturating_sub(1));

    let chips = Rect {
        height: chip_rows,
        ..inner
    };
    let input = Rect {
        y: inner.y + chip_rows,
        height: inner.height.saturating_sub(chip_rows).min(1),
        ..inner
    };
    let dropdown_top = input.y + input.height;
    let space = inner.height.saturating_sub(chip_rows + input.height);

    let mut dropdown = Rect {
        y: dropdown_top,
        height: 0,
        ..inner
    };
    let mut rows = Vec::new();
    let mut dropdown_offset = 0;
    let mut not_found = false;
    match state.dropdown() {
        DropdownView::Hidden => {}
        DropdownView::NotFound => {
            dropdown.height = space.min(1);
            not_found = true;
        }
        DropdownView::Candidates(candidates) => {
            let height = usize::from(options.dropdown_rows.min(space)).min(candidates.len());
            let mut viewport = viewport;
            if let Some(index) = state.focused_index() {
                viewport.ensure_visible(index, height);
            }
            viewport.clamp(candidates.len(), height);
            dropdown_offset = viewport.offset();
            dropdown.height = u16::try_from(height).unwrap_or(u16::MAX);
            rows = candidates
                .iter()
                .skip(dropdown_offset)
                .take(height)
                .zip(dropdown_top..)
                .map(|(row, y)| RowSlot {
                    y,
                    index: row.index,
                    id: row.user.id,
                })
                .collect();
        }
    }

    let done_width = u16::try_from(DONE_LABEL.width())
        .unwrap_or(u16::MAX)
        .min(footer.width);
    let done = Rect {
        width: done_width,
        ..footer
    };
    let status = Rect {
        x: footer.x.saturating_add(done_width + 1),
        width: footer.width.saturating_sub(done_width + 1),
        ..footer
    };

    ScreenLayout {
        title,
        picker,
        chips,
        input,
        dropdown,
        done,
        status,
        chip_slots,
        rows,
        dropdown_offset,
        not_found,
    }
}

fn picker_block(active: bool) -> Block<'static> {
    let border_style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(PICKER_TITLE)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render(
    frame: &mut Frame<'_>,
    layout: &ScreenLayout,
    state: &PickerState,
    view_data: &ViewData,
    options: &PickerOptions,
) {
    let title = Paragraph::new(options.title.as_str()).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, layout.title);
    frame.render_widget(
        picker_block(view_data.focus == ScreenFocus::Input),
        layout.picker,
    );

    if layout.chips.height > 0 {
        frame.render_widget(Paragraph::new(chip_lines(&layout.chip_slots)), layout.chips);
    }

    frame.render_widget(Paragraph::new(input_line(state, options)), layout.input);
    if state.input_focused() && layout.input.height > 0 {
        let offset = u16::try_from(INPUT_PROMPT.width() + state.search().width())
            .unwrap_or(u16::MAX)
            .min(layout.input.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(layout.input.x + offset, layout.input.y));
    }

    if layout.not_found {
        let not_found = Paragraph::new(NOT_FOUND_TEXT).style(Style::default().fg(Color::Red));
        frame.render_widget(not_found, layout.dropdown);
    } else if let DropdownView::Candidates(candidates) = state.dropdown() {
        let lines = layout
            .rows
            .iter()
            .filter_map(|slot| candidates.get(slot.index))
            .map(|row| row_line(row, layout.dropdown.width))
            .collect::<Vec<_>>();
        frame.render_widget(Paragraph::new(lines), layout.dropdown);
    }

    let done_style = if view_data.focus == ScreenFocus::DoneButton {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    frame.render_widget(
        Paragraph::new(DONE_LABEL).style(done_style),
        layout.done,
    );
    frame.render_widget(
        Paragraph::new(status_text(state, view_data)).style(Style::default().fg(Color::Yellow)),
        layout.status,
    );
}

fn chip_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}

fn chip_lines(slots: &[ChipSlot]) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor = 0;
    for slot in slots {
        while lines.len() <= slot.row {
            lines.push(Line::default());
            cursor = 0;
        }
        let Some(line) = lines.last_mut() else {
            continue;
        };
        if slot.start > cursor {
            line.spans.push(Span::raw(" ".repeat(slot.start - cursor)));
        }
        line.spans.push(Span::styled(
            format!(" {} ", slot.label),
            chip_style(slot.highlighted),
        ));
        cursor = slot.start + slot.width;
    }
    lines
}

fn input_line(state: &PickerState, options: &PickerOptions) -> Line<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let prompt = Span::styled(INPUT_PROMPT, muted);
    if state.search().is_empty() {
        Line::from(vec![prompt, Span::styled(options.placeholder.clone(), muted)])
    } else {
        Line::from(vec![prompt, Span::raw(state.search().to_owned())])
    }
}

fn row_line(row: &RowView<'_>, width: u16) -> Line<'static> {
    let width = usize::from(width);
    let text = truncate_label(&row_text(row.user), width.saturating_sub(1));
    if row.focused {
        let padded = format!("{text:<width$}");
        Line::from(Span::styled(
            padded,
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ))
    } else {
        Line::from(text)
    }
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

fn status_text(state: &PickerState, view_data: &ViewData) -> String {
    let hint = match view_data.focus {
        ScreenFocus::Input => {
            "↑/↓ move | enter add | ⌫ remove | tab done | ctrl+d confirm | ctrl+q quit"
        }
        ScreenFocus::DoneButton => "enter confirm | tab back | ctrl+q quit",
        ScreenFocus::Nothing => "tab focus | ctrl+d confirm | ctrl+q quit",
    };
    let count = format!("{} selected", state.roster().selected_count());
    match &view_data.status_line {
        Some(status) => format!("{count} | {status} | {hint}"),
        None => format!("{count} | {hint}"),
    }
}
