// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

use crate::{Player, PlayerId, StatField};

/// In-progress copy of one player's editable fields.
///
/// Values are kept as typed text; nothing is checked until the server sees
/// the submitted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    player_id: PlayerId,
    player_name: String,
    values: BTreeMap<StatField, String>,
}

impl EditDraft {
    pub fn from_player(player: &Player) -> Self {
        let values = StatField::ALL
            .into_iter()
            .map(|field| (field, player.field_text(field)))
            .collect();
        Self {
            player_id: player.id,
            player_name: player.player_name.clone(),
            values,
        }
    }

    pub const fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Name the draft was opened with, independent of later edits.
    pub fn original_name(&self) -> &str {
        &self.player_name
    }

    pub fn value(&self, field: StatField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, field: StatField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn push_char(&mut self, field: StatField, ch: char) {
        self.values.entry(field).or_default().push(ch);
    }

    pub fn pop_char(&mut self, field: StatField) {
        if let Some(value) = self.values.get_mut(&field) {
            value.pop();
        }
    }

    pub fn to_payload(&self) -> EditPayload {
        let mut body = Map::new();
        body.insert("id".to_owned(), Value::from(self.player_id.get()));
        for field in StatField::ALL {
            body.insert(field.as_str().to_owned(), encode_field(field, self.value(field)));
        }
        EditPayload(body)
    }
}

fn encode_field(field: StatField, raw: &str) -> Value {
    if !field.is_numeric() {
        return Value::String(raw.to_owned());
    }

    let trimmed = raw.trim();
    if field.is_integer()
        && let Ok(integer) = trimmed.parse::<i64>()
    {
        return Value::from(integer);
    }
    if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(raw.to_owned())
}

/// JSON body posted to the edit endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EditPayload(Map<String, Value>);

impl EditPayload {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
