// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::PlayerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub player_name: String,
    pub position: String,
    pub games: i64,
    pub at_bat: i64,
    pub runs: i64,
    pub hits: i64,
    pub double_2b: i64,
    pub third_baseman: i64,
    pub home_run: i64,
    pub run_batted_in: i64,
    pub a_walk: i64,
    pub strikeouts: i64,
    pub stolen_base: i64,
    pub caught_stealing: i64,
    pub avg: f64,
    pub on_base_percentage: f64,
    pub slugging_percentage: f64,
    pub on_base_plus_slugging: f64,
}

impl Player {
    /// Raw text for one field, as an input box would show it.
    pub fn field_text(&self, field: StatField) -> String {
        match field {
            StatField::PlayerName => self.player_name.clone(),
            StatField::Position => self.position.clone(),
            StatField::Games => self.games.to_string(),
            StatField::AtBat => self.at_bat.to_string(),
            StatField::Runs => self.runs.to_string(),
            StatField::Hits => self.hits.to_string(),
            StatField::Doubles => self.double_2b.to_string(),
            StatField::Triples => self.third_baseman.to_string(),
            StatField::HomeRuns => self.home_run.to_string(),
            StatField::RunsBattedIn => self.run_batted_in.to_string(),
            StatField::Walks => self.a_walk.to_string(),
            StatField::Strikeouts => self.strikeouts.to_string(),
            StatField::StolenBases => self.stolen_base.to_string(),
            StatField::CaughtStealing => self.caught_stealing.to_string(),
            StatField::Average => self.avg.to_string(),
            StatField::OnBasePercentage => self.on_base_percentage.to_string(),
            StatField::SluggingPercentage => self.slugging_percentage.to_string(),
            StatField::OnBasePlusSlugging => self.on_base_plus_slugging.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatField {
    PlayerName,
    Position,
    Games,
    AtBat,
    Runs,
    Hits,
    Doubles,
    Triples,
    HomeRuns,
    RunsBattedIn,
    Walks,
    Strikeouts,
    StolenBases,
    CaughtStealing,
    Average,
    OnBasePercentage,
    SluggingPercentage,
    OnBasePlusSlugging,
}

impl StatField {
    pub const ALL: [Self; 18] = [
        Self::PlayerName,
        Self::Position,
        Self::Games,
        Self::AtBat,
        Self::Runs,
        Self::Hits,
        Self::Doubles,
        Self::Triples,
        Self::HomeRuns,
        Self::RunsBattedIn,
        Self::Walks,
        Self::Strikeouts,
        Self::StolenBases,
        Self::CaughtStealing,
        Self::Average,
        Self::OnBasePercentage,
        Self::SluggingPercentage,
        Self::OnBasePlusSlugging,
    ];

    /// Wire name, used both as the JSON key and as the ordering key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlayerName => "player_name",
            Self::Position => "position",
            Self::Games => "games",
            Self::AtBat => "at_bat",
            Self::Runs => "runs",
            Self::Hits => "hits",
            Self::Doubles => "double_2b",
            Self::Triples => "third_baseman",
            Self::HomeRuns => "home_run",
            Self::RunsBattedIn => "run_batted_in",
            Self::Walks => "a_walk",
            Self::Strikeouts => "strikeouts",
            Self::StolenBases => "stolen_base",
            Self::CaughtStealing => "caught_stealing",
            Self::Average => "avg",
            Self::OnBasePercentage => "on_base_percentage",
            Self::SluggingPercentage => "slugging_percentage",
            Self::OnBasePlusSlugging => "on_base_plus_slugging",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayerName => "Player Name",
            Self::Position => "Position",
            Self::Games => "Games",
            Self::AtBat => "At-bat",
            Self::Runs => "Runs",
            Self::Hits => "Hits",
            Self::Doubles => "Double (2B)",
            Self::Triples => "Third Baseman",
            Self::HomeRuns => "Home Run",
            Self::RunsBattedIn => "Run Batted In",
            Self::Walks => "Walks",
            Self::Strikeouts => "Strikeouts",
            Self::StolenBases => "Stolen Base",
            Self::CaughtStealing => "Caught Stealing",
            Self::Average => "AVG",
            Self::OnBasePercentage => "On-base %",
            Self::SluggingPercentage => "Slugging %",
            Self::OnBasePlusSlugging => "OPS",
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::PlayerName | Self::Position)
    }

    /// Counting stats; the rate columns and text columns are not integers.
    pub const fn is_integer(self) -> bool {
        self.is_numeric()
            && !matches!(
                self,
                Self::Average
                    | Self::OnBasePercentage
                    | Self::SluggingPercentage
                    | Self::OnBasePlusSlugging
            )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsPage {
    pub results: Vec<Player>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshReport {
    pub players_saved: Option<u64>,
    pub completed_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Server refused the edit; carries its `error` message when it sent one.
    Rejected(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    AiSummary,
    EditPlayer,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AiSummary => "ai-summary",
            Self::EditPlayer => "edit-player",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Action(ActionKind),
    Data(StatField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    const fn action(header: &'static str, action: ActionKind) -> Self {
        Self {
            header,
            kind: ColumnKind::Action(action),
        }
    }

    const fn data(field: StatField) -> Self {
        Self {
            header: field.label(),
            kind: ColumnKind::Data(field),
        }
    }

    pub const fn sortable(&self) -> bool {
        matches!(self.kind, ColumnKind::Data(_))
    }

    pub const fn field(&self) -> Option<StatField> {
        match self.kind {
            ColumnKind::Data(field) => Some(field),
            ColumnKind::Action(_) => None,
        }
    }
}

pub const COLUMNS: [ColumnSpec; 20] = [
    ColumnSpec::action("AI Summary", ActionKind::AiSummary),
    ColumnSpec::action("Edit", ActionKind::EditPlayer),
    ColumnSpec::data(StatField::PlayerName),
    ColumnSpec::data(StatField::Position),
    ColumnSpec::data(StatField::Games),
    ColumnSpec::data(StatField::AtBat),
    ColumnSpec::data(StatField::Runs),
    ColumnSpec::data(StatField::Hits),
    ColumnSpec::data(StatField::Doubles),
    ColumnSpec::data(StatField::Triples),
    ColumnSpec::data(StatField::HomeRuns),
    ColumnSpec::data(StatField::RunsBattedIn),
    ColumnSpec::data(StatField::Walks),
    ColumnSpec::data(StatField::Strikeouts),
    ColumnSpec::data(StatField::StolenBases),
    ColumnSpec::data(StatField::CaughtStealing),
    ColumnSpec::data(StatField::Average),
    ColumnSpec::data(StatField::OnBasePercentage),
    ColumnSpec::data(StatField::SluggingPercentage),
    ColumnSpec::data(StatField::OnBasePlusSlugging),
];

pub fn build_summary_prompt(player: &Player) -> Result<String> {
    let stats = serde_json::to_string(player).context("encode player stats for prompt")?;
    Ok(format!(
        "Tell me about {}. Stats: {}",
        player.player_name, stats
    ))
}
