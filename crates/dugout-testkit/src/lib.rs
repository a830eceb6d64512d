// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use dugout_app::{Player, PlayerId};
use serde_json::json;

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const POSITIONS: [&str; 9] = ["C", "1B", "2B", "3B", "SS", "LF", "CF", "RF", "DH"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible batting lines.
#[derive(Debug, Clone)]
pub struct PlayerFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl PlayerFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn player(&mut self) -> Player {
        let id = self.next_id;
        self.next_id += 1;

        let name = format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES));
        let games = self.int_range(40, 162);
        let at_bat = self.int_range(games * 2, games * 4);
        let hits = self.int_range(at_bat / 6, at_bat / 3);
        let home_run = self.int_range(0, hits / 5);
        let third_baseman = self.int_range(0, (hits - home_run) / 20);
        let double_2b = self.int_range(0, (hits - home_run - third_baseman) / 4);
        let a_walk = self.int_range(at_bat / 20, at_bat / 7);
        let stolen_base = self.int_range(0, 40);

        let singles = hits - home_run - third_baseman - double_2b;
        let total_bases = singles + 2 * double_2b + 3 * third_baseman + 4 * home_run;
        let avg = rate(hits, at_bat);
        let on_base_percentage = rate(hits + a_walk, at_bat + a_walk);
        let slugging_percentage = rate(total_bases, at_bat);

        Player {
            id: PlayerId::new(id),
            player_name: name,
            position: self.pick(&POSITIONS).to_owned(),
            games,
            at_bat,
            runs: self.int_range(hits / 4, hits * 2 / 3),
            hits,
            double_2b,
            third_baseman,
            home_run,
            run_batted_in: self.int_range(home_run, home_run * 3 + hits / 3),
            a_walk,
            strikeouts: self.int_range(at_bat / 10, at_bat / 3),
            stolen_base,
            caught_stealing: self.int_range(0, stolen_base / 3),
            avg,
            on_base_percentage,
            slugging_percentage,
            on_base_plus_slugging: round3(on_base_percentage + slugging_percentage),
        }
    }

    pub fn players(&mut self, count: usize) -> Vec<Player> {
        (0..count).map(|_| self.player()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

fn rate(numerator: i64, denominator: i64) -> f64 {
    if denominator <= 0 {
        return 0.0;
    }
    round3(numerator as f64 / denominator as f64)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn sample_players(count: usize) -> Vec<Player> {
    PlayerFaker::new(7).players(count)
}

/// A fixed, hand-checkable player for assertions on exact values.
pub fn sample_player(id: i64, name: &str) -> Player {
    Player {
        id: PlayerId::new(id),
        player_name: name.to_owned(),
        position: "SS".to_owned(),
        games: 150,
        at_bat: 560,
        runs: 88,
        hits: 170,
        double_2b: 31,
        third_baseman: 4,
        home_run: 22,
        run_batted_in: 79,
        a_walk: 60,
        strikeouts: 120,
        stolen_base: 14,
        caught_stealing: 3,
        avg: 0.304,
        on_base_percentage: 0.371,
        slugging_percentage: 0.489,
        on_base_plus_slugging: 0.86,
    }
}

/// Body the stats endpoint returns for one page.
pub fn stats_page_body(players: &[Player], total: u64) -> Result<String> {
    let body = json!({ "results": players, "total": total });
    serde_json::to_string(&body).context("encode stats page fixture")
}
