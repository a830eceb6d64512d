// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info, warn};

use crate::table::{DEFAULT_MAX_SORT_KEYS, DEFAULT_PAGE_SIZE};
use crate::{
    ColumnFilter, EditDraft, EditPayload, Player, PlayerId, RefreshReport, RequestSeq,
    SaveOutcome, SortDirection, SortSpec, StatField, StatsPage, StatsQuery, TableState,
    build_summary_prompt,
};

pub const SAVE_SUCCESS_MESSAGE: &str = "Player data saved.";
pub const SAVE_REJECTED_FALLBACK: &str = "Failed to save changes.";
pub const SAVE_TRANSPORT_ERROR: &str = "Error saving changes.";
pub const REFRESH_SUCCESS_MESSAGE: &str = "Data refreshed successfully!";
pub const REFRESH_ERROR_MESSAGE: &str = "Failed to refresh data.";
pub const SUMMARY_EMPTY_MESSAGE: &str = "No response from the summary service.";
pub const SUMMARY_ERROR_MESSAGE: &str = "Error fetching AI summary.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    pub page_size: u32,
    pub max_sort_keys: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_sort_keys: DEFAULT_MAX_SORT_KEYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    /// Nothing has loaded yet; the surface shows a full-page spinner.
    Initial,
    /// Rows are visible; the surface shows an inline progress marker.
    Refetching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Hidden,
    Loading {
        seq: RequestSeq,
        player_name: String,
    },
    Ready {
        player_name: String,
        text: String,
    },
    Failed {
        player_name: String,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Closed,
    Editing {
        draft: EditDraft,
        error: Option<String>,
    },
    Saving {
        draft: EditDraft,
        seq: RequestSeq,
    },
}

impl EditState {
    pub fn draft(&self) -> Option<&EditDraft> {
        match self {
            Self::Closed => None,
            Self::Editing { draft, .. } | Self::Saving { draft, .. } => Some(draft),
        }
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: RequestSeq,
    pub query: StatsQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    pub seq: RequestSeq,
    pub player_id: PlayerId,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub seq: RequestSeq,
    pub player_id: PlayerId,
    pub payload: EditPayload,
}

/// Work the runtime must perform on behalf of the view-model.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(FetchRequest),
    Refresh,
    RequestSummary(SummaryRequest),
    SaveEdit(SaveRequest),
    Notify(Notice),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    Load,
    SetSorting(Vec<SortSpec>),
    ToggleSort(StatField),
    ClearSorting,
    SetPage(u32),
    NextPage,
    PrevPage,
    SetPageSize(u32),
    SetColumnFilters(Vec<ColumnFilter>),
    SetGlobalFilter(String),
    RequestRefresh,
    OpenSummary(PlayerId),
    CloseSummary,
    BeginEdit(PlayerId),
    EditField { field: StatField, value: String },
    SubmitEdit,
    CancelEdit,
    FetchCompleted {
        seq: RequestSeq,
        result: Result<StatsPage, String>,
    },
    RefreshCompleted(Result<RefreshReport, String>),
    SummaryCompleted {
        seq: RequestSeq,
        result: Result<String, String>,
    },
    SaveCompleted {
        seq: RequestSeq,
        result: Result<SaveOutcome, String>,
    },
}

/// Owns table state and reconciles remote responses with it.
///
/// Performs no I/O. Every command returns the effects the runtime must run,
/// and every effect's completion comes back in as another command.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel {
    config: ViewConfig,
    table: TableState,
    rows: Vec<Player>,
    row_count: u64,
    loaded: bool,
    phase: LoadPhase,
    error: bool,
    last_seq: RequestSeq,
    latest_fetch: Option<RequestSeq>,
    refresh_in_flight: bool,
    last_refresh: Option<RefreshReport>,
    summary: SummaryState,
    edit: EditState,
}

impl TableViewModel {
    pub fn new(config: ViewConfig) -> Self {
        let mut table = TableState::default();
        if config.page_size > 0 {
            table.pagination.page_size = config.page_size;
        }
        Self {
            config,
            table,
            rows: Vec::new(),
            row_count: 0,
            loaded: false,
            phase: LoadPhase::Idle,
            error: false,
            last_seq: RequestSeq::ZERO,
            latest_fetch: None,
            refresh_in_flight: false,
            last_refresh: None,
            summary: SummaryState::Hidden,
            edit: EditState::Closed,
        }
    }

    pub const fn config(&self) -> ViewConfig {
        self.config
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn rows(&self) -> &[Player] {
        &self.rows
    }

    pub const fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn page_count(&self) -> u32 {
        self.table.pagination.page_count(self.row_count)
    }

    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Initial)
    }

    pub const fn is_refetching(&self) -> bool {
        matches!(self.phase, LoadPhase::Refetching)
    }

    pub const fn has_error(&self) -> bool {
        self.error
    }

    pub const fn is_refreshing(&self) -> bool {
        self.refresh_in_flight
    }

    pub fn last_refresh(&self) -> Option<&RefreshReport> {
        self.last_refresh.as_ref()
    }

    pub fn summary(&self) -> &SummaryState {
        &self.summary
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    pub const fn latest_fetch_seq(&self) -> Option<RequestSeq> {
        self.latest_fetch
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.rows.iter().find(|player| player.id == id)
    }

    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<Effect> {
        match command {
            ViewCommand::Load => vec![self.schedule_fetch()],
            ViewCommand::SetSorting(sorts) => {
                let sorts = self.cap_sorts(sorts);
                self.update_table(|table| table.sorts = sorts)
            }
            ViewCommand::ToggleSort(field) => {
                let sorts = self.toggled_sorts(field);
                self.update_table(|table| table.sorts = sorts)
            }
            ViewCommand::ClearSorting => self.update_table(|table| table.sorts.clear()),
            ViewCommand::SetPage(index) => {
                if index >= self.page_count() {
                    return Vec::new();
                }
                self.update_table(|table| table.pagination.page_index = index)
            }
            ViewCommand::NextPage => {
                let next = self.table.pagination.page_index.saturating_add(1);
                if next >= self.page_count() {
                    return Vec::new();
                }
                self.update_table(|table| table.pagination.page_index = next)
            }
            ViewCommand::PrevPage => {
                let Some(prev) = self.table.pagination.page_index.checked_sub(1) else {
                    return Vec::new();
                };
                self.update_table(|table| table.pagination.page_index = prev)
            }
            ViewCommand::SetPageSize(size) => {
                if size == 0 {
                    return Vec::new();
                }
                self.update_table(|table| {
                    if table.pagination.page_size != size {
                        table.pagination.page_size = size;
                        table.pagination.page_index = 0;
                    }
                })
            }
            ViewCommand::SetColumnFilters(filters) => {
                self.update_table(|table| table.column_filters = filters)
            }
            ViewCommand::SetGlobalFilter(filter) => {
                self.update_table(|table| table.global_filter = filter)
            }
            ViewCommand::RequestRefresh => {
                if self.refresh_in_flight {
                    return Vec::new();
                }
                self.refresh_in_flight = true;
                vec![Effect::Refresh]
            }
            ViewCommand::OpenSummary(player_id) => self.open_summary(player_id),
            ViewCommand::CloseSummary => {
                self.summary = SummaryState::Hidden;
                Vec::new()
            }
            ViewCommand::BeginEdit(player_id) => {
                let Some(player) = self.player(player_id) else {
                    warn!(player_id = player_id.get(), "edit requested for player not on page");
                    return Vec::new();
                };
                self.edit = EditState::Editing {
                    draft: EditDraft::from_player(player),
                    error: None,
                };
                Vec::new()
            }
            ViewCommand::EditField { field, value } => {
                if let EditState::Editing { draft, .. } = &mut self.edit {
                    draft.set_value(field, value);
                }
                Vec::new()
            }
            ViewCommand::SubmitEdit => self.submit_edit(),
            ViewCommand::CancelEdit => {
                self.edit = EditState::Closed;
                Vec::new()
            }
            ViewCommand::FetchCompleted { seq, result } => self.apply_fetch(seq, result),
            ViewCommand::RefreshCompleted(result) => self.apply_refresh(result),
            ViewCommand::SummaryCompleted { seq, result } => {
                self.apply_summary(seq, result);
                Vec::new()
            }
            ViewCommand::SaveCompleted { seq, result } => self.apply_save(seq, result),
        }
    }

    fn issue_seq(&mut self) -> RequestSeq {
        self.last_seq = self.last_seq.next();
        self.last_seq
    }

    fn schedule_fetch(&mut self) -> Effect {
        self.phase = if self.loaded {
            LoadPhase::Refetching
        } else {
            LoadPhase::Initial
        };
        let seq = self.issue_seq();
        self.latest_fetch = Some(seq);
        let query = StatsQuery::from_table_state(&self.table);
        debug!(seq = seq.get(), ?query, "fetch scheduled");
        Effect::Fetch(FetchRequest { seq, query })
    }

    fn update_table(&mut self, change: impl FnOnce(&mut TableState)) -> Vec<Effect> {
        let mut next = self.table.clone();
        change(&mut next);
        if next == self.table {
            return Vec::new();
        }
        self.table = next;
        vec![self.schedule_fetch()]
    }

    fn cap_sorts(&self, mut sorts: Vec<SortSpec>) -> Vec<SortSpec> {
        let max = self.config.max_sort_keys.max(1);
        if sorts.len() > max {
            sorts.drain(..sorts.len() - max);
        }
        sorts
    }

    fn toggled_sorts(&self, field: StatField) -> Vec<SortSpec> {
        let mut sorts = self.table.sorts.clone();
        match self.table.sort_for(field) {
            None => sorts.push(SortSpec::asc(field)),
            Some((index, SortDirection::Asc)) => sorts[index].direction = SortDirection::Desc,
            Some((index, SortDirection::Desc)) => {
                sorts.remove(index);
            }
        }
        self.cap_sorts(sorts)
    }

    fn apply_fetch(&mut self, seq: RequestSeq, result: Result<StatsPage, String>) -> Vec<Effect> {
        if self.latest_fetch != Some(seq) {
            debug!(
                seq = seq.get(),
                latest = self.latest_fetch.map(RequestSeq::get),
                "dropping superseded fetch response"
            );
            return Vec::new();
        }

        match result {
            Ok(page) => {
                debug!(
                    seq = seq.get(),
                    rows = page.results.len(),
                    total = page.total,
                    "fetch applied"
                );
                self.rows = page.results;
                self.row_count = page.total;
                self.error = false;
                self.loaded = true;
            }
            Err(error) => {
                warn!(seq = seq.get(), %error, "player stats fetch failed");
                self.error = true;
            }
        }
        self.phase = LoadPhase::Idle;

        // The total can shrink under the current page after a refresh or save.
        let last_page = self.page_count().saturating_sub(1);
        if self.loaded && self.table.pagination.page_index > last_page {
            info!(
                page_index = self.table.pagination.page_index,
                last_page, "page out of range after fetch; moving to last page"
            );
            self.table.pagination.page_index = last_page;
            return vec![self.schedule_fetch()];
        }
        Vec::new()
    }

    fn apply_refresh(&mut self, result: Result<RefreshReport, String>) -> Vec<Effect> {
        self.refresh_in_flight = false;
        match result {
            Ok(report) => {
                let message = match report.players_saved {
                    Some(count) => format!("{REFRESH_SUCCESS_MESSAGE} ({count} players saved)"),
                    None => REFRESH_SUCCESS_MESSAGE.to_owned(),
                };
                info!(players_saved = report.players_saved, "remote data refreshed");
                self.last_refresh = Some(report);
                vec![self.schedule_fetch(), Effect::Notify(Notice::success(message))]
            }
            Err(error) => {
                warn!(%error, "data refresh failed");
                vec![Effect::Notify(Notice::error(REFRESH_ERROR_MESSAGE))]
            }
        }
    }

    fn open_summary(&mut self, player_id: PlayerId) -> Vec<Effect> {
        let Some(player) = self.player(player_id) else {
            warn!(player_id = player_id.get(), "summary requested for player not on page");
            return Vec::new();
        };
        let player_name = player.player_name.clone();
        let prompt = match build_summary_prompt(player) {
            Ok(prompt) => prompt,
            Err(error) => {
                warn!(%error, "could not build summary prompt");
                self.summary = SummaryState::Failed {
                    player_name,
                    text: SUMMARY_ERROR_MESSAGE.to_owned(),
                };
                return Vec::new();
            }
        };

        let seq = self.issue_seq();
        self.summary = SummaryState::Loading { seq, player_name };
        vec![Effect::RequestSummary(SummaryRequest {
            seq,
            player_id,
            prompt,
        })]
    }

    fn apply_summary(&mut self, seq: RequestSeq, result: Result<String, String>) {
        let player_name = match &self.summary {
            SummaryState::Loading {
                seq: pending,
                player_name,
            } if *pending == seq => player_name.clone(),
            _ => {
                debug!(seq = seq.get(), "dropping summary response for closed request");
                return;
            }
        };

        self.summary = match result {
            Ok(text) if text.trim().is_empty() => SummaryState::Ready {
                player_name,
                text: SUMMARY_EMPTY_MESSAGE.to_owned(),
            },
            Ok(text) => SummaryState::Ready { player_name, text },
            Err(error) => {
                warn!(%error, "summary request failed");
                SummaryState::Failed {
                    player_name,
                    text: SUMMARY_ERROR_MESSAGE.to_owned(),
                }
            }
        };
    }

    fn submit_edit(&mut self) -> Vec<Effect> {
        let draft = match std::mem::replace(&mut self.edit, EditState::Closed) {
            EditState::Editing { draft, .. } => draft,
            other => {
                self.edit = other;
                return Vec::new();
            }
        };

        let seq = self.issue_seq();
        let request = SaveRequest {
            seq,
            player_id: draft.player_id(),
            payload: draft.to_payload(),
        };
        self.edit = EditState::Saving { draft, seq };
        vec![Effect::SaveEdit(request)]
    }

    fn apply_save(&mut self, seq: RequestSeq, result: Result<SaveOutcome, String>) -> Vec<Effect> {
        let pending =
            matches!(&self.edit, EditState::Saving { seq: current, .. } if *current == seq);

        if !pending {
            if matches!(result, Ok(SaveOutcome::Saved)) {
                info!(seq = seq.get(), "save landed after the form closed; refetching");
                return vec![self.schedule_fetch()];
            }
            debug!(seq = seq.get(), "dropping save failure for closed form");
            return Vec::new();
        }

        let EditState::Saving { draft, .. } = std::mem::replace(&mut self.edit, EditState::Closed)
        else {
            return Vec::new();
        };

        match result {
            Ok(SaveOutcome::Saved) => {
                info!(player_id = draft.player_id().get(), "player saved");
                vec![
                    self.schedule_fetch(),
                    Effect::Notify(Notice::success(SAVE_SUCCESS_MESSAGE)),
                ]
            }
            Ok(SaveOutcome::Rejected(message)) => {
                let message = message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| SAVE_REJECTED_FALLBACK.to_owned());
                info!(player_id = draft.player_id().get(), %message, "server rejected edit");
                self.edit = EditState::Editing {
                    draft,
                    error: Some(message.clone()),
                };
                vec![Effect::Notify(Notice::error(message))]
            }
            Err(error) => {
                warn!(player_id = draft.player_id().get(), %error, "save request failed");
                self.edit = EditState::Editing {
                    draft,
                    error: Some(SAVE_TRANSPORT_ERROR.to_owned()),
                };
                vec![Effect::Notify(Notice::error(SAVE_TRANSPORT_ERROR))]
            }
        }
    }
}
