use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized view of a single NHL game, rebuilt from scratch on every
/// fetch cycle. Field names serialize in camelCase to match the JSON
/// document that downstream consumers already poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub date: String,
    pub game_id: i64,
    pub away_team: String,
    pub home_team: String,
    pub away_score: u32,
    pub home_score: u32,
    pub total_score: u32,
    pub game_state: String,
    pub period: u32,
    pub period_descriptor: String,
    pub clock: String,
    pub game_time: String,
    pub last_update: DateTime<Utc>,
    pub status: GameStatus,
}

impl Game {
    /// Winner by higher score. Ties are not modeled for NHL moneylines;
    /// equal scores report HOME.
    pub fn winner(&self) -> BetSide {
        if self.away_score > self.home_score {
            BetSide::Away
        } else {
            BetSide::Home
        }
    }
}

/// Display status derived from the NHL API game-state vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Scheduled,
    Live,
    Final,
    Unknown,
}

impl GameStatus {
    /// Map an upstream game state onto a status. CRIT marks the final
    /// moments of a game and counts as final. Unrecognized states map to
    /// UNKNOWN rather than failing.
    pub fn from_game_state(state: &str) -> Self {
        match state {
            "OFF" | "FINAL" | "CRIT" => GameStatus::Final,
            "LIVE" => GameStatus::Live,
            "FUT" | "PRE" => GameStatus::Scheduled,
            _ => GameStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "SCHEDULED",
            GameStatus::Live => "LIVE",
            GameStatus::Final => "FINAL",
            GameStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GameStatus::Live => "🔴",
            GameStatus::Final => "✅",
            GameStatus::Scheduled => "📅",
            GameStatus::Unknown => "❓",
        }
    }
}

/// A wager read from the remote store. This system never creates bets;
/// it only settles them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bet {
    pub market: BetMarket,
    pub side: BetSide,
    pub line: Option<f64>,
    pub odds: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetMarket {
    #[serde(rename = "TOTAL")]
    Total,
    #[serde(rename = "MONEYLINE")]
    Moneyline,
    #[serde(rename = "PUCK_LINE", alias = "PUCKLINE")]
    PuckLine,
}

impl BetMarket {
    /// Parse a market tag as stored in bet documents. Both spellings of
    /// the puck line are in circulation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TOTAL" => Some(BetMarket::Total),
            "MONEYLINE" => Some(BetMarket::Moneyline),
            "PUCK_LINE" | "PUCKLINE" => Some(BetMarket::PuckLine),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BetMarket::Total => "TOTAL",
            BetMarket::Moneyline => "MONEYLINE",
            BetMarket::PuckLine => "PUCK_LINE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetSide {
    Over,
    Under,
    Home,
    Away,
}

impl BetSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OVER" => Some(BetSide::Over),
            "UNDER" => Some(BetSide::Under),
            "HOME" => Some(BetSide::Home),
            "AWAY" => Some(BetSide::Away),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BetSide::Over => "OVER",
            BetSide::Under => "UNDER",
            BetSide::Home => "HOME",
            BetSide::Away => "AWAY",
        }
    }
}

/// Terminal result of a settled wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetOutcome {
    Win,
    Loss,
    Push,
}

impl BetOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetOutcome::Win => "WIN",
            BetOutcome::Loss => "LOSS",
            BetOutcome::Push => "PUSH",
        }
    }
}
