use crate::models::{Game, GameStatus};
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, warn};

const NHL_API_BASE_URL: &str = "https://api-web.nhle.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Response from the NHL schedule endpoint. The schedule nests a week of
/// day buckets; only the first bucket corresponds to the requested date.
#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(rename = "gameWeek", default)]
    game_week: Vec<GameDay>,
}

#[derive(Debug, Deserialize)]
struct GameDay {
    #[serde(default)]
    games: Vec<ScheduleGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleGame {
    id: i64,
    away_team: ScheduleTeam,
    home_team: ScheduleTeam,
    #[serde(default)]
    game_state: Option<String>,
    #[serde(default)]
    period_descriptor: Option<PeriodDescriptor>,
    #[serde(rename = "startTimeUTC", default)]
    start_time_utc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScheduleTeam {
    #[serde(default)]
    abbrev: Option<String>,
    #[serde(default)]
    score: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodDescriptor {
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    period_type: Option<String>,
}

/// Subset of the gamecenter play-by-play payload carrying the live clock.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayByPlayResponse {
    #[serde(default)]
    period_descriptor: Option<PeriodDescriptor>,
    #[serde(default)]
    clock: Option<GameClock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameClock {
    #[serde(default)]
    time_remaining: Option<String>,
}

pub struct NhlApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl NhlApiClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: NHL_API_BASE_URL.to_string(),
        })
    }

    /// Fetch and normalize the games scheduled for a date (default: today).
    ///
    /// Fetch failures are soft: network errors, non-2xx responses, and
    /// malformed bodies all log and return an empty list, the same as a
    /// date with no scheduled games. Callers treat both identically.
    pub async fn fetch_games(&self, date: Option<&str>) -> Vec<Game> {
        let date = date.map(str::to_owned).unwrap_or_else(today);
        let url = format!("{}/schedule/{}", self.base_url, date);

        println!("📡 Fetching NHL games for {}...", date);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Error fetching NHL data: {e}");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            error!("NHL API returned error: {}", response.status());
            return Vec::new();
        }

        let schedule: ScheduleResponse = match response.json().await {
            Ok(schedule) => schedule,
            Err(e) => {
                error!("Failed to parse NHL schedule response: {e}");
                return Vec::new();
            }
        };

        let raw_games = schedule
            .game_week
            .into_iter()
            .next()
            .map(|day| day.games)
            .unwrap_or_default();

        if raw_games.is_empty() {
            println!("❌ No games found for {}", date);
            return Vec::new();
        }
        println!("✅ Found {} games\n", raw_games.len());

        let mut games = Vec::with_capacity(raw_games.len());
        for raw in raw_games {
            let Some(mut game) = normalize_game(raw, &date) else {
                warn!("Skipping malformed game record: missing team abbreviation");
                continue;
            };

            // The schedule payload has no clock; pull it from the
            // gamecenter feed for in-progress games.
            if game.status == GameStatus::Live {
                self.fill_live_details(&mut game).await;
            }

            let period_info = if game.status == GameStatus::Live && game.period > 0 {
                format!(" P{} {}", game.period, game.clock)
            } else {
                String::new()
            };
            println!(
                "{} {} @ {}: {}-{} ({}){}",
                game.status.emoji(),
                game.away_team,
                game.home_team,
                game.away_score,
                game.home_score,
                game.status.as_str(),
                period_info
            );

            games.push(game);
        }

        games
    }

    /// Best-effort refresh of period and clock from the gamecenter feed.
    async fn fill_live_details(&self, game: &mut Game) {
        let url = format!("{}/gamecenter/{}/play-by-play", self.base_url, game.game_id);

        let detail: PlayByPlayResponse = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => match response.json().await {
                Ok(detail) => detail,
                Err(e) => {
                    warn!("Error parsing live details for game {}: {e}", game.game_id);
                    return;
                }
            },
            Ok(response) => {
                warn!(
                    "Could not fetch live details for game {}: {}",
                    game.game_id,
                    response.status()
                );
                return;
            }
            Err(e) => {
                warn!("Error fetching live details for game {}: {e}", game.game_id);
                return;
            }
        };

        if let Some(descriptor) = detail.period_descriptor {
            if let Some(number) = descriptor.number {
                game.period = number;
            }
            if let Some(period_type) = descriptor.period_type {
                game.period_descriptor = period_type;
            }
        }
        if let Some(clock) = detail.clock {
            game.clock = clock.time_remaining.unwrap_or_default();
        }
    }
}

/// Normalize a raw schedule record. Returns None when a required team
/// abbreviation is missing; every optional field gets a zero/empty default.
fn normalize_game(raw: ScheduleGame, date: &str) -> Option<Game> {
    let away_team = raw.away_team.abbrev?;
    let home_team = raw.home_team.abbrev?;
    let away_score = raw.away_team.score.unwrap_or(0);
    let home_score = raw.home_team.score.unwrap_or(0);
    let game_state = raw.game_state.unwrap_or_else(|| "FUT".to_string());
    let status = GameStatus::from_game_state(&game_state);

    Some(Game {
        date: date.to_string(),
        game_id: raw.id,
        away_team,
        home_team,
        away_score,
        home_score,
        total_score: away_score + home_score,
        game_state,
        period: raw
            .period_descriptor
            .as_ref()
            .and_then(|p| p.number)
            .unwrap_or(0),
        period_descriptor: raw
            .period_descriptor
            .and_then(|p| p.period_type)
            .unwrap_or_default(),
        clock: String::new(),
        game_time: raw.start_time_utc.unwrap_or_default(),
        last_update: Utc::now(),
        status,
    })
}

/// Today's date in the caller's local timezone, YYYY-MM-DD.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_game(json: serde_json::Value) -> ScheduleGame {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_normalize_sums_total_score() {
        let raw = schedule_game(serde_json::json!({
            "id": 2026020123,
            "awayTeam": { "abbrev": "TOR", "score": 3 },
            "homeTeam": { "abbrev": "BOS", "score": 2 },
            "gameState": "LIVE",
            "periodDescriptor": { "number": 2, "periodType": "REG" },
            "startTimeUTC": "2026-01-16T00:00:00Z"
        }));

        let game = normalize_game(raw, "2026-01-15").unwrap();
        assert_eq!(game.total_score, 5);
        assert_eq!(game.away_score + game.home_score, game.total_score);
        assert_eq!(game.status, GameStatus::Live);
        assert_eq!(game.period, 2);
        assert_eq!(game.period_descriptor, "REG");
        assert_eq!(game.game_time, "2026-01-16T00:00:00Z");
    }

    #[test]
    fn test_normalize_defaults_missing_optionals() {
        let raw = schedule_game(serde_json::json!({
            "id": 2026020124,
            "awayTeam": { "abbrev": "NYR" },
            "homeTeam": { "abbrev": "MTL" }
        }));

        let game = normalize_game(raw, "2026-01-15").unwrap();
        assert_eq!(game.away_score, 0);
        assert_eq!(game.home_score, 0);
        assert_eq!(game.total_score, 0);
        assert_eq!(game.game_state, "FUT");
        assert_eq!(game.status, GameStatus::Scheduled);
        assert_eq!(game.period, 0);
        assert_eq!(game.period_descriptor, "");
        assert_eq!(game.clock, "");
        assert_eq!(game.game_time, "");
    }

    #[test]
    fn test_normalize_skips_missing_abbreviation() {
        let raw = schedule_game(serde_json::json!({
            "id": 2026020125,
            "awayTeam": { "score": 1 },
            "homeTeam": { "abbrev": "MTL", "score": 0 },
            "gameState": "LIVE"
        }));
        assert!(normalize_game(raw, "2026-01-15").is_none());
    }

    #[test]
    fn test_schedule_parse_empty_week() {
        let schedule: ScheduleResponse = serde_json::from_str(r#"{ "gameWeek": [] }"#).unwrap();
        assert!(schedule.game_week.is_empty());

        // Missing gameWeek entirely is also fine
        let schedule: ScheduleResponse = serde_json::from_str("{}").unwrap();
        assert!(schedule.game_week.is_empty());
    }

    #[test]
    fn test_schedule_parse_uses_first_bucket() {
        let schedule: ScheduleResponse = serde_json::from_value(serde_json::json!({
            "gameWeek": [
                { "games": [{
                    "id": 1,
                    "awayTeam": { "abbrev": "TOR" },
                    "homeTeam": { "abbrev": "BOS" }
                }] },
                { "games": [{
                    "id": 2,
                    "awayTeam": { "abbrev": "NYR" },
                    "homeTeam": { "abbrev": "MTL" }
                }] }
            ]
        }))
        .unwrap();

        let first = schedule
            .game_week
            .into_iter()
            .next()
            .map(|day| day.games)
            .unwrap_or_default();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, 1);
    }

    #[tokio::test]
    #[ignore]
    async fn test_fetch_games_live() {
        let client = NhlApiClient::new().unwrap();
        let games = client.fetch_games(None).await;
        println!("Fetched {} games", games.len());
    }
}
