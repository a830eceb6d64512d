// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use dugout_app::{
    ActionKind, COLUMNS, ColumnKind, ColumnSpec, EditPayload, EditState, Effect, Notice,
    NoticeLevel, Player, PlayerId, RefreshReport, SaveOutcome, SortDirection, StatField,
    StatsPage, StatsQuery, SummaryState, TableViewModel, ViewCommand,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{debug, warn};

const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];
const FIRST_DATA_COLUMN: usize = 2;
const COLUMN_SPACING: u16 = 1;
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const LOADING_TEXT: &str = "loading…";
const ERROR_BANNER: &str = "Error loading data";
const REFRESH_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Remote operations the event loop needs, one per effect kind.
pub trait StatsRuntime {
    fn fetch_page(&mut self, query: &StatsQuery) -> Result<StatsPage>;
    fn refresh_data(&mut self) -> Result<RefreshReport>;
    fn save_player(&mut self, player_id: PlayerId, payload: &EditPayload) -> Result<SaveOutcome>;
    fn summarize(&mut self, prompt: &str) -> Result<String>;

    /// Runs one remote effect and reports its completion on `tx`.
    ///
    /// The default runs the call inline. Runtimes that talk to the network
    /// override this to run on a worker thread.
    fn spawn_effect(&mut self, effect: Effect, tx: Sender<InternalEvent>) -> Result<()> {
        let Some(command) = execute_effect(self, effect) else {
            return Ok(());
        };
        tx.send(InternalEvent::Completed(command))
            .map_err(|_| anyhow!("completion channel closed"))
    }
}

/// Performs a remote effect and converts its result into the completion
/// command the view-model expects. Notices are not remote and yield `None`.
pub fn execute_effect<R: StatsRuntime + ?Sized>(
    runtime: &mut R,
    effect: Effect,
) -> Option<ViewCommand> {
    let command = match effect {
        Effect::Fetch(request) => ViewCommand::FetchCompleted {
            seq: request.seq,
            result: runtime.fetch_page(&request.query).map_err(flatten_error),
        },
        Effect::Refresh => {
            ViewCommand::RefreshCompleted(runtime.refresh_data().map_err(flatten_error))
        }
        Effect::RequestSummary(request) => ViewCommand::SummaryCompleted {
            seq: request.seq,
            result: runtime.summarize(&request.prompt).map_err(flatten_error),
        },
        Effect::SaveEdit(request) => ViewCommand::SaveCompleted {
            seq: request.seq,
            result: runtime
                .save_player(request.player_id, &request.payload)
                .map_err(flatten_error),
        },
        Effect::Notify(_) => return None,
    };
    Some(command)
}

/// Completion reporting that `effect` never ran, so the view-model can leave
/// its in-flight state. Notices have no completion and yield `None`.
pub fn failed_completion(effect: &Effect, message: &str) -> Option<ViewCommand> {
    let command = match effect {
        Effect::Fetch(request) => ViewCommand::FetchCompleted {
            seq: request.seq,
            result: Err(message.to_owned()),
        },
        Effect::Refresh => ViewCommand::RefreshCompleted(Err(message.to_owned())),
        Effect::RequestSummary(request) => ViewCommand::SummaryCompleted {
            seq: request.seq,
            result: Err(message.to_owned()),
        },
        Effect::SaveEdit(request) => ViewCommand::SaveCompleted {
            seq: request.seq,
            result: Err(message.to_owned()),
        },
        Effect::Notify(_) => return None,
    };
    Some(command)
}

fn flatten_error(error: anyhow::Error) -> String {
    format!("{error:#}")
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    Completed(ViewCommand),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    selected_row: usize,
    selected_col: usize,
    edit_field: usize,
    help_visible: bool,
    status: Option<Notice>,
    status_token: u64,
}

impl ViewData {
    fn new() -> Self {
        Self {
            selected_row: 0,
            selected_col: FIRST_DATA_COLUMN,
            edit_field: 0,
            help_visible: false,
            status: None,
            status_token: 0,
        }
    }
}

pub fn run_app<R: StatsRuntime>(view: &mut TableViewModel, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new();
    let (internal_tx, internal_rx) = mpsc::channel();
    apply_command(view, runtime, &mut view_data, &internal_tx, ViewCommand::Load);

    let mut result = Ok(());
    loop {
        process_internal_events(view, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, view, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(view, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events<R: StatsRuntime>(
    view: &mut TableViewModel,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status = None;
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Completed(command) => {
                apply_command(view, runtime, view_data, tx, command);
            }
        }
    }
}

fn apply_command<R: StatsRuntime>(
    view: &mut TableViewModel,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    command: ViewCommand,
) {
    let effects = view.dispatch(command);
    clamp_selection(view, view_data);
    for effect in effects {
        match effect {
            Effect::Notify(notice) => emit_status(view_data, tx, notice),
            effect => {
                debug!(?effect, "starting remote call");
                let pending = effect.clone();
                if let Err(error) = runtime.spawn_effect(effect, tx.clone()) {
                    let message = flatten_error(error);
                    warn!(error = %message, "could not start remote call");
                    if let Some(command) = failed_completion(&pending, &message) {
                        apply_command(view, runtime, view_data, tx, command);
                    }
                    emit_status(
                        view_data,
                        tx,
                        Notice::error(format!("request could not start: {message}")),
                    );
                }
            }
        }
    }
}

fn clamp_selection(view: &TableViewModel, view_data: &mut ViewData) {
    let last = view.rows().len().saturating_sub(1);
    view_data.selected_row = view_data.selected_row.min(last);
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>, notice: Notice) {
    view_data.status = Some(notice);
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: StatsRuntime>(
    view: &mut TableViewModel,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        return true;
    }

    if view.edit().is_open() {
        handle_edit_key(view, runtime, view_data, internal_tx, key);
        return false;
    }

    if !matches!(view.summary(), SummaryState::Hidden) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::CloseSummary);
        }
        return false;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('j') | KeyCode::Down => {
            let last = view.rows().len().saturating_sub(1);
            view_data.selected_row = (view_data.selected_row + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            view_data.selected_row = view_data.selected_row.saturating_sub(1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            view_data.selected_col = (view_data.selected_col + 1).min(COLUMNS.len() - 1);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            view_data.selected_col = view_data.selected_col.saturating_sub(1);
        }
        KeyCode::Char('s') => match COLUMNS[view_data.selected_col].field() {
            Some(field) => {
                let command = ViewCommand::ToggleSort(field);
                apply_command(view, runtime, view_data, internal_tx, command);
            }
            None => emit_status(
                view_data,
                internal_tx,
                Notice::error("action columns are not sortable"),
            ),
        },
        KeyCode::Char('S') => {
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::ClearSorting);
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::NextPage);
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::PrevPage);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let size = cycle_page_size(view.table().pagination.page_size, true);
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::SetPageSize(size));
        }
        KeyCode::Char('-') => {
            let size = cycle_page_size(view.table().pagination.page_size, false);
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::SetPageSize(size));
        }
        KeyCode::Char('r') => {
            if view.is_refreshing() {
                emit_status(view_data, internal_tx, Notice::error("refresh already running"));
            } else {
                apply_command(view, runtime, view_data, internal_tx, ViewCommand::RequestRefresh);
            }
        }
        KeyCode::Char('a') => {
            run_row_action(view, runtime, view_data, internal_tx, ActionKind::AiSummary);
        }
        KeyCode::Char('e') => {
            run_row_action(view, runtime, view_data, internal_tx, ActionKind::EditPlayer);
        }
        KeyCode::Enter => {
            if let ColumnKind::Action(action) = COLUMNS[view_data.selected_col].kind {
                run_row_action(view, runtime, view_data, internal_tx, action);
            }
        }
        _ => {}
    }
    false
}

fn run_row_action<R: StatsRuntime>(
    view: &mut TableViewModel,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    action: ActionKind,
) {
    let Some(player_id) = view.rows().get(view_data.selected_row).map(|player| player.id) else {
        emit_status(view_data, internal_tx, Notice::error("no player selected"));
        return;
    };
    let command = match action {
        ActionKind::AiSummary => ViewCommand::OpenSummary(player_id),
        ActionKind::EditPlayer => {
            view_data.edit_field = 0;
            ViewCommand::BeginEdit(player_id)
        }
    };
    apply_command(view, runtime, view_data, internal_tx, command);
}

fn handle_edit_key<R: StatsRuntime>(
    view: &mut TableViewModel,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let field_count = StatField::ALL.len();
    let field = StatField::ALL[view_data.edit_field.min(field_count - 1)];
    match key.code {
        KeyCode::Esc => {
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::CancelEdit);
        }
        KeyCode::Enter => {
            apply_command(view, runtime, view_data, internal_tx, ViewCommand::SubmitEdit);
        }
        KeyCode::Down | KeyCode::Tab => {
            view_data.edit_field = (view_data.edit_field + 1) % field_count;
        }
        KeyCode::Up | KeyCode::BackTab => {
            view_data.edit_field = (view_data.edit_field + field_count - 1) % field_count;
        }
        KeyCode::Backspace => {
            edit_field_text(view, runtime, view_data, internal_tx, field, |value| {
                value.pop();
            });
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            edit_field_text(view, runtime, view_data, internal_tx, field, |value| {
                value.push(ch);
            });
        }
        _ => {}
    }
}

fn edit_field_text<R: StatsRuntime>(
    view: &mut TableViewModel,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    field: StatField,
    change: impl FnOnce(&mut String),
) {
    // Typing is ignored while a save is in flight.
    let EditState::Editing { draft, .. } = view.edit() else {
        return;
    };
    let mut value = draft.value(field).to_owned();
    change(&mut value);
    apply_command(
        view,
        runtime,
        view_data,
        internal_tx,
        ViewCommand::EditField { field, value },
    );
}

fn cycle_page_size(current: u32, forward: bool) -> u32 {
    if forward {
        PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|size| *size > current)
            .unwrap_or(PAGE_SIZE_OPTIONS[0])
    } else {
        PAGE_SIZE_OPTIONS
            .iter()
            .rev()
            .copied()
            .find(|size| *size < current)
            .unwrap_or(PAGE_SIZE_OPTIONS[PAGE_SIZE_OPTIONS.len() - 1])
    }
}

fn render(frame: &mut ratatui::Frame<'_>, view: &TableViewModel, view_data: &ViewData) {
    let banner_height = if view.has_error() { 1 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(view))
        .block(Block::default().title("dugout").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    if view.has_error() {
        let banner = Paragraph::new(ERROR_BANNER).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(banner, layout[1]);
    }

    render_table(frame, layout[2], view, view_data);

    let status_style = match view_data.status.as_ref().map(|notice| notice.level) {
        Some(NoticeLevel::Success) => Style::default().fg(Color::Green),
        Some(NoticeLevel::Error) => Style::default().fg(Color::Red),
        None => Style::default().fg(Color::Yellow),
    };
    let status = Paragraph::new(status_text(view, view_data))
        .style(status_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if let Some(draft) = view.edit().draft() {
        let area = centered_rect(60, 90, frame.area());
        frame.render_widget(Clear, area);
        let form = Paragraph::new(edit_overlay_text(view.edit(), view_data.edit_field)).block(
            Block::default()
                .title(format!("edit {}", draft.original_name()))
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(form, area);
    }

    if let Some((title, body)) = summary_overlay(view.summary()) {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let summary = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(summary, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn header_text(view: &TableViewModel) -> String {
    let pagination = view.table().pagination;
    let ordering = StatsQuery::from_table_state(view.table())
        .ordering
        .unwrap_or_else(|| "none".to_owned());
    let mut text = format!(
        "page {}/{} | {} players | {} per page | sort {}",
        pagination.page_index.saturating_add(1),
        view.page_count(),
        view.row_count(),
        pagination.page_size,
        ordering
    );
    if view.is_refreshing() {
        text.push_str(" | refreshing data…");
    } else if let Some(stamp) = view
        .last_refresh()
        .and_then(|report| report.completed_at.format(REFRESH_STAMP).ok())
    {
        text.push_str(&format!(" | refreshed {stamp} UTC"));
    }
    text
}

fn table_title(view: &TableViewModel) -> String {
    if view.is_refetching() {
        "players (updating…)".to_owned()
    } else {
        "players".to_owned()
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    view: &TableViewModel,
    view_data: &ViewData,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(table_title(view));

    if view.is_loading() {
        frame.render_widget(Paragraph::new(LOADING_TEXT).block(block), area);
        return;
    }
    if view.rows().is_empty() {
        frame.render_widget(Paragraph::new("no players").block(block), area);
        return;
    }

    let visible = visible_column_range(view_data.selected_col, area.width.saturating_sub(2));
    let columns = &COLUMNS[visible.clone()];
    let widths = columns
        .iter()
        .map(|column| Constraint::Length(column_width(column)))
        .collect::<Vec<_>>();

    let header = Row::new(columns.iter().map(|column| {
        Cell::from(header_label(view, column)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = view.rows().iter().enumerate().map(|(row_index, player)| {
        let selected_row = row_index == view_data.selected_row;
        let cells = visible
            .clone()
            .map(|column_index| {
                let column = &COLUMNS[column_index];
                let mut style = Style::default();
                if matches!(column.kind, ColumnKind::Action(_)) {
                    style = style.fg(Color::Cyan);
                }
                if selected_row {
                    style = style.bg(Color::DarkGray);
                }
                if selected_row && column_index == view_data.selected_col {
                    style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD);
                }
                Cell::from(cell_text(player, column)).style(style)
            })
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(block);
    frame.render_widget(table, area);
}

fn cell_text(player: &Player, column: &ColumnSpec) -> String {
    match column.kind {
        ColumnKind::Action(ActionKind::AiSummary) => "[ask]".to_owned(),
        ColumnKind::Action(ActionKind::EditPlayer) => "[edit]".to_owned(),
        ColumnKind::Data(field) => player.field_text(field),
    }
}

fn header_label(view: &TableViewModel, column: &ColumnSpec) -> String {
    let mut label = column.header.to_owned();
    let Some(field) = column.field() else {
        return label;
    };
    let Some((position, direction)) = view.table().sort_for(field) else {
        return label;
    };

    if view.table().sorts.len() == 1 {
        label.push_str(match direction {
            SortDirection::Asc => " ↑",
            SortDirection::Desc => " ↓",
        });
    } else {
        label.push_str(match direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        });
        label.push_str(&(position + 1).to_string());
    }
    label
}

fn column_width(column: &ColumnSpec) -> u16 {
    let base = match column.kind {
        ColumnKind::Action(_) => 6,
        ColumnKind::Data(StatField::PlayerName) => 20,
        ColumnKind::Data(_) => 5,
    };
    // Room for a multi-key sort marker after the header.
    let label = column.header.chars().count() + 3;
    u16::try_from(label.max(base)).unwrap_or(u16::MAX)
}

/// Columns that fit in `available` cells while keeping `selected` on screen.
fn visible_column_range(selected: usize, available: u16) -> Range<usize> {
    let widths = COLUMNS.iter().map(column_width).collect::<Vec<_>>();
    let selected = selected.min(widths.len() - 1);
    let span = |range: Range<usize>| -> u32 {
        widths[range]
            .iter()
            .map(|width| u32::from(*width) + u32::from(COLUMN_SPACING))
            .sum()
    };
    let available = u32::from(available);

    let mut start = 0;
    while start < selected && span(start..selected + 1) > available {
        start += 1;
    }
    let mut end = selected + 1;
    while end < widths.len() && span(start..end + 1) <= available {
        end += 1;
    }
    start..end
}

fn status_text(view: &TableViewModel, view_data: &ViewData) -> String {
    if let Some(notice) = &view_data.status {
        return notice.message.clone();
    }
    if view.edit().is_open() {
        return "up/down field | type to edit | backspace | enter save | esc cancel".to_owned();
    }
    if !matches!(view.summary(), SummaryState::Hidden) {
        return "esc close".to_owned();
    }
    "j/k/h/l move | s/S sort | n/p page | +/- size | a ask | e edit | enter action | r refresh | ? help | q quit"
        .to_owned()
}

fn edit_overlay_text(edit: &EditState, cursor: usize) -> String {
    let Some(draft) = edit.draft() else {
        return String::new();
    };

    let mut lines = StatField::ALL
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let marker = if index == cursor { ">" } else { " " };
            format!("{marker} {:<16} {}", field.label(), draft.value(*field))
        })
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push(match edit {
        EditState::Saving { .. } => "saving…".to_owned(),
        EditState::Editing {
            error: Some(error), ..
        } => format!("error: {error}"),
        _ => "enter save | esc cancel".to_owned(),
    });
    lines.join("\n")
}

fn summary_overlay(summary: &SummaryState) -> Option<(String, String)> {
    match summary {
        SummaryState::Hidden => None,
        SummaryState::Loading { player_name, .. } => {
            Some((format!("AI summary: {player_name}"), LOADING_TEXT.to_owned()))
        }
        SummaryState::Ready { player_name, text } | SummaryState::Failed { player_name, text } => {
            Some((format!("AI summary: {player_name}"), text.clone()))
        }
    }
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+q quit | ? help\n\
nav: j/k rows | h/l columns | n/p or pgdn/pgup page\n\
table: s sort column (asc, desc, off) | S clear sort | +/- page size | r refresh data\n\
row: a AI summary | e edit | enter runs the action under the cursor\n\
edit: up/down/tab field | type to change | backspace | enter save | esc cancel\n\
summary: esc close"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
