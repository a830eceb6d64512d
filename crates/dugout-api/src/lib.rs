// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use dugout_app::{EditPayload, PlayerId, RefreshReport, SaveOutcome, StatsPage, StatsQuery};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::debug;
use url::Url;

pub const STATS_PATH: &str = "get-player-stats";
pub const REFRESH_PATH: &str = "refresh-data";
pub const EDIT_PATH: &str = "edit-player";
pub const SUMMARY_PATH: &str = "query-openai";

/// Blocking client for the player stats service.
///
/// Cheap to clone; worker threads each take their own copy.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stats_url(&self, query: &StatsQuery) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/{STATS_PATH}", self.base_url),
            query.to_query_pairs(),
        )
        .context("build player stats URL")
    }

    pub fn player_stats(&self, query: &StatsQuery) -> Result<StatsPage> {
        let url = self.stats_url(query)?;
        debug!(%url, "fetching player stats");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        response.json().context("decode player stats")
    }

    /// Confirms the stats endpoint answers with a well-formed page.
    pub fn ping(&self) -> Result<()> {
        self.player_stats(&StatsQuery {
            ordering: None,
            page: 1,
            page_size: 1,
        })
        .map(|_| ())
    }

    pub fn refresh_data(&self) -> Result<RefreshReport> {
        debug!(base_url = %self.base_url, "requesting data refresh");
        let response = self
            .http
            .get(format!("{}/{REFRESH_PATH}", self.base_url))
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(clean_error_response(status, &body));
        }

        let players_saved = serde_json::from_str::<RefreshResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.players_saved);
        Ok(RefreshReport {
            players_saved,
            completed_at: OffsetDateTime::now_utc(),
        })
    }

    pub fn edit_player(&self, id: PlayerId, payload: &EditPayload) -> Result<SaveOutcome> {
        debug!(player_id = id.get(), "posting player edit");
        let response = self
            .http
            .post(format!("{}/{EDIT_PATH}/{}", self.base_url, id.get()))
            .json(payload)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(SaveOutcome::Saved);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.is_empty());
        debug!(status = status.as_u16(), ?message, "edit rejected");
        Ok(SaveOutcome::Rejected(message))
    }

    pub fn query_summary(&self, prompt: &str) -> Result<String> {
        debug!(chars = prompt.len(), "requesting player summary");
        let response = self
            .http
            .post(format!("{}/{SUMMARY_PATH}", self.base_url))
            .json(&SummaryRequest { prompt })
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: SummaryResponse = response.json().context("decode summary response")?;
        Ok(parsed.response.unwrap_or_default())
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- check [api].base_url or DUGOUT_API_URL ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error);
    }

    if !body.is_empty() && body.len() < 100 && !body.contains('{') && !body.contains('<') {
        return anyhow!("server error ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    players_saved: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}
