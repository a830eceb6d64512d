// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use dugout_api::Client;
use dugout_app::{EditDraft, PlayerId, SaveOutcome, StatField, StatsQuery};
use dugout_testkit::{sample_player, sample_players, stats_page_body};
use std::io::Read;
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Response, Server};

fn json_header() -> Header {
    Header::from_bytes("Content-Type", "application/json").expect("valid content type header")
}

fn mock_server() -> Result<(Server, String)> {
    let server =
        Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
    let addr = format!("http://{}", server.server_addr());
    Ok((server, addr))
}

#[test]
fn unreachable_server_error_names_config_remedy() -> Result<()> {
    let client = Client::new("http://127.0.0.1:1", Duration::from_millis(50))?;
    let error = client
        .player_stats(&StatsQuery {
            ordering: None,
            page: 1,
            page_size: 10,
        })
        .expect_err("fetch should fail for unreachable endpoint");
    let message = error.to_string();
    assert!(message.contains("cannot reach http://127.0.0.1:1"));
    assert!(message.contains("DUGOUT_API_URL"));
    Ok(())
}

#[test]
fn player_stats_sends_query_and_decodes_page() -> Result<()> {
    let (server, addr) = mock_server()?;
    let players = sample_players(3);
    let body = stats_page_body(&players, 57)?;

    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.method(), &Method::Get);
        assert_eq!(
            request.url(),
            "/get-player-stats?ordering=-hits%2Cruns&page=3&page_size=10"
        );
        let response = Response::from_string(body)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let page = client.player_stats(&StatsQuery {
        ordering: Some("-hits,runs".to_owned()),
        page: 3,
        page_size: 10,
    })?;
    assert_eq!(page.total, 57);
    assert_eq!(page.results, players);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn player_stats_rejects_malformed_body() -> Result<()> {
    let (server, addr) = mock_server()?;
    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string("<html>not json</html>").with_status_code(200);
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .player_stats(&StatsQuery {
            ordering: None,
            page: 1,
            page_size: 10,
        })
        .expect_err("malformed body should fail");
    assert!(format!("{error:#}").contains("decode player stats"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn player_stats_surfaces_server_status() -> Result<()> {
    let (server, addr) = mock_server()?;
    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        let response = Response::from_string(r#"{"error":"invalid page"}"#)
            .with_status_code(404)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let error = client
        .player_stats(&StatsQuery {
            ordering: None,
            page: 99,
            page_size: 10,
        })
        .expect_err("404 should fail");
    assert_eq!(error.to_string(), "server error (404): invalid page");

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn edit_player_posts_draft_and_maps_outcomes() -> Result<()> {
    let (server, addr) = mock_server()?;

    let handle = thread::spawn(move || {
        let mut accepted = server.recv().expect("first request expected");
        assert_eq!(accepted.method(), &Method::Post);
        assert_eq!(accepted.url(), "/edit-player/7");
        let mut body = String::new();
        accepted
            .as_reader()
            .read_to_string(&mut body)
            .expect("read request body");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(parsed["games"], serde_json::json!(151));
        assert_eq!(parsed["player_name"], serde_json::json!("Rowan Diaz"));
        accepted
            .respond(Response::empty(200))
            .expect("response should succeed");

        let rejected = server.recv().expect("second request expected");
        let response = Response::from_string(r#"{"error":"Games must be non-negative"}"#)
            .with_status_code(400)
            .with_header(json_header());
        rejected.respond(response).expect("response should succeed");

        let opaque = server.recv().expect("third request expected");
        opaque
            .respond(Response::from_string("bad gateway").with_status_code(502))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    let mut draft = EditDraft::from_player(&sample_player(7, "Rowan Diaz"));
    draft.set_value(StatField::Games, "151");

    assert_eq!(
        client.edit_player(PlayerId::new(7), &draft.to_payload())?,
        SaveOutcome::Saved
    );
    assert_eq!(
        client.edit_player(PlayerId::new(7), &draft.to_payload())?,
        SaveOutcome::Rejected(Some("Games must be non-negative".to_owned()))
    );
    assert_eq!(
        client.edit_player(PlayerId::new(7), &draft.to_payload())?,
        SaveOutcome::Rejected(None)
    );

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn query_summary_posts_prompt_and_reads_response() -> Result<()> {
    let (server, addr) = mock_server()?;
    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/query-openai");
        let mut body = String::new();
        request
            .as_reader()
            .read_to_string(&mut body)
            .expect("read request body");
        assert_eq!(body, r#"{"prompt":"Tell me about A."}"#);
        let response = Response::from_string(r#"{"response":"A is great."}"#)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");

        let request = server.recv().expect("second request expected");
        let response = Response::from_string(r#"{"error":"provider quota exceeded"}"#)
            .with_status_code(500)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    assert_eq!(client.query_summary("Tell me about A.")?, "A is great.");
    let error = client
        .query_summary("Tell me about B.")
        .expect_err("provider failure should surface");
    assert!(error.to_string().contains("provider quota exceeded"));

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn refresh_data_reads_optional_count() -> Result<()> {
    let (server, addr) = mock_server()?;
    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/refresh-data");
        let response = Response::from_string(r#"{"status":"success","players_saved":42}"#)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");

        let request = server.recv().expect("second request expected");
        request
            .respond(Response::empty(204))
            .expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    assert_eq!(client.refresh_data()?.players_saved, Some(42));
    assert_eq!(client.refresh_data()?.players_saved, None);

    handle.join().expect("server thread should join");
    Ok(())
}

#[test]
fn ping_requests_a_single_row() -> Result<()> {
    let (server, addr) = mock_server()?;
    let handle = thread::spawn(move || {
        let request = server.recv().expect("request expected");
        assert_eq!(request.url(), "/get-player-stats?page=1&page_size=1");
        let body = stats_page_body(&[], 0).expect("encode empty page");
        let response = Response::from_string(body)
            .with_status_code(200)
            .with_header(json_header());
        request.respond(response).expect("response should succeed");
    });

    let client = Client::new(&addr, Duration::from_secs(1))?;
    client.ping()?;

    handle.join().expect("server thread should join");
    Ok(())
}
