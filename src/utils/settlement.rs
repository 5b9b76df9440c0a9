use crate::models::{Bet, BetMarket, BetOutcome, BetSide, Game};
use thiserror::Error;

/// Standard NHL puck line when the bet document carries no explicit line.
pub const DEFAULT_PUCK_LINE: f64 = 1.5;

#[derive(Debug, Error, PartialEq)]
pub enum SettlementError {
    #[error("cannot settle unsupported market {0}")]
    UnsupportedMarket(String),
    #[error("TOTAL bet has no line")]
    MissingLine,
}

/// Compute the outcome of a bet against a finalized game.
///
/// TOTAL compares the combined score to the line (OVER wins strictly
/// above, pushes on exact equality), MONEYLINE pays the side with the
/// strictly higher score, PUCK_LINE applies the spread to the bet side's
/// signed scoring margin. An unrecognized market is an explicit error,
/// never a silent null.
pub fn bet_outcome(game: &Game, bet: &Bet) -> Result<BetOutcome, SettlementError> {
    match bet.market {
        BetMarket::Total => {
            let line = bet.line.ok_or(SettlementError::MissingLine)?;
            let total = f64::from(game.total_score);
            match bet.side {
                BetSide::Over => Ok(line_outcome(total, line)),
                _ => Ok(line_outcome(line, total)),
            }
        }
        BetMarket::Moneyline => {
            if bet.side == game.winner() {
                Ok(BetOutcome::Win)
            } else {
                Ok(BetOutcome::Loss)
            }
        }
        BetMarket::PuckLine => {
            let spread = bet.line.unwrap_or(DEFAULT_PUCK_LINE);
            let margin = match bet.side {
                BetSide::Home => f64::from(game.home_score) - f64::from(game.away_score),
                _ => f64::from(game.away_score) - f64::from(game.home_score),
            };
            Ok(line_outcome(margin, spread))
        }
    }
}

/// WIN strictly above the line, LOSS strictly below, PUSH on equality.
fn line_outcome(value: f64, line: f64) -> BetOutcome {
    if value > line {
        BetOutcome::Win
    } else if value < line {
        BetOutcome::Loss
    } else {
        BetOutcome::Push
    }
}

/// Convert an outcome and American odds into profit in units.
/// A push returns the stake (0), a loss costs one unit, a win pays
/// 100/|odds| units on a favorite and odds/100 on an underdog.
pub fn profit(outcome: BetOutcome, odds: i32) -> f64 {
    match outcome {
        BetOutcome::Push => 0.0,
        BetOutcome::Loss => -1.0,
        BetOutcome::Win => {
            if odds < 0 {
                100.0 / f64::from(odds.abs())
            } else {
                f64::from(odds) / 100.0
            }
        }
    }
}
