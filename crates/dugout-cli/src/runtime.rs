// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use dugout_api::Client;
use dugout_app::{
    EditPayload, Effect, PlayerId, RefreshReport, SaveOutcome, StatsPage, StatsQuery,
};
use dugout_tui::{InternalEvent, StatsRuntime, execute_effect};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{debug, warn};

/// Runtime backed by the HTTP client. Each remote effect runs on its own
/// worker thread so the event loop keeps drawing while requests are out.
#[derive(Debug, Clone)]
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl StatsRuntime for ApiRuntime {
    fn fetch_page(&mut self, query: &StatsQuery) -> Result<StatsPage> {
        self.client.player_stats(query)
    }

    fn refresh_data(&mut self) -> Result<RefreshReport> {
        self.client.refresh_data()
    }

    fn save_player(&mut self, player_id: PlayerId, payload: &EditPayload) -> Result<SaveOutcome> {
        self.client.edit_player(player_id, payload)
    }

    fn summarize(&mut self, prompt: &str) -> Result<String> {
        self.client.query_summary(prompt)
    }

    fn spawn_effect(&mut self, effect: Effect, tx: Sender<InternalEvent>) -> Result<()> {
        if matches!(effect, Effect::Notify(_)) {
            return Ok(());
        }

        let mut worker = self.clone();
        thread::Builder::new()
            .name("dugout-request".to_owned())
            .spawn(move || {
                let Some(command) = execute_effect(&mut worker, effect) else {
                    return;
                };
                if tx.send(InternalEvent::Completed(command)).is_err() {
                    debug!("event loop gone; dropping completion");
                }
            })
            .map(|_| ())
            .context("spawn request worker")
            .inspect_err(|error| warn!(%error, "request worker did not start"))
    }
}

#[cfg(test)]
mod tests {
    use super::ApiRuntime;
    use anyhow::{Result, anyhow};
    use dugout_api::Client;
    use dugout_app::{Effect, FetchRequest, Notice, RequestSeq, StatsQuery, ViewCommand};
    use dugout_testkit::{sample_players, stats_page_body};
    use dugout_tui::{InternalEvent, StatsRuntime};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tiny_http::{Response, Server};

    #[test]
    fn fetch_effect_completes_on_worker_thread() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}", server.server_addr());
        let body = stats_page_body(&sample_players(2), 2)?;
        let handle = thread::spawn(move || {
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), "/get-player-stats?page=1&page_size=10");
            request
                .respond(Response::from_string(body).with_status_code(200))
                .expect("response should succeed");
        });

        let mut runtime = ApiRuntime::new(Client::new(&addr, Duration::from_secs(1))?);
        let (tx, rx) = mpsc::channel();
        let seq = RequestSeq::ZERO.next();
        runtime.spawn_effect(
            Effect::Fetch(FetchRequest {
                seq,
                query: StatsQuery {
                    ordering: None,
                    page: 1,
                    page_size: 10,
                },
            }),
            tx,
        )?;

        match rx.recv_timeout(Duration::from_secs(5))? {
            InternalEvent::Completed(ViewCommand::FetchCompleted {
                seq: completed,
                result,
            }) => {
                assert_eq!(completed, seq);
                assert_eq!(result.map(|page| page.total), Ok(2));
            }
            other => panic!("expected fetch completion, got {other:?}"),
        }

        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn transport_failure_becomes_error_completion() -> Result<()> {
        let mut runtime = ApiRuntime::new(Client::new(
            "http://127.0.0.1:1",
            Duration::from_millis(50),
        )?);
        let (tx, rx) = mpsc::channel();
        runtime.spawn_effect(Effect::Refresh, tx)?;

        match rx.recv_timeout(Duration::from_secs(5))? {
            InternalEvent::Completed(ViewCommand::RefreshCompleted(Err(message))) => {
                assert!(message.contains("DUGOUT_API_URL"));
            }
            other => panic!("expected refresh failure, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn notices_are_not_sent_to_workers() -> Result<()> {
        let mut runtime = ApiRuntime::new(Client::new(
            "http://127.0.0.1:1",
            Duration::from_millis(50),
        )?);
        let (tx, rx) = mpsc::channel();
        runtime.spawn_effect(Effect::Notify(Notice::success("saved")), tx)?;
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        Ok(())
    }
}
