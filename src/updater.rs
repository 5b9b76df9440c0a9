use crate::api::nhl_api::NhlApiClient;
use crate::models::{BetOutcome, Game, GameStatus};
use crate::store::firestore::{
    bool_value, double_value, int_value, string_value, timestamp_value, FirestoreClient,
    PendingBet,
};
use serde_json::Value;
use crate::utils::data::save_scores;
use crate::utils::settlement::{bet_outcome, profit};
use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{error, warn};

/// Provenance tag written into settled bet documents.
pub const SCORE_SOURCE: &str = "NHL_API_LIVE";
const BET_STATUS_COMPLETED: &str = "COMPLETED";

/// One-cycle driver: fetch scores, persist them locally, and push
/// settlement updates when a remote store is configured. The store is a
/// capability: `None` means local-only operation.
pub struct ScoreUpdater {
    api: NhlApiClient,
    output_file: PathBuf,
    store: Option<FirestoreClient>,
}

impl ScoreUpdater {
    pub fn new(output_file: PathBuf, store: Option<FirestoreClient>) -> Result<Self> {
        Ok(Self {
            api: NhlApiClient::new()?,
            output_file,
            store,
        })
    }

    /// Run a single update cycle. Returns whether the local persist
    /// succeeded; a fetch that yields zero games still writes an empty
    /// document and counts as success. Remote updates are best-effort
    /// and never affect the return value.
    pub async fn update(&self, date: Option<&str>) -> bool {
        let games = self.api.fetch_games(date).await;

        let persisted = match save_scores(&games, &self.output_file) {
            Ok(()) => {
                println!(
                    "✅ Saved {} games to {}",
                    games.len(),
                    self.output_file.display()
                );
                true
            }
            Err(e) => {
                error!("Error saving live scores: {e:#}");
                false
            }
        };

        if let Some(store) = &self.store {
            if let Err(e) = self.update_bets(store, &games).await {
                error!("Error updating bets: {e:#}");
            }
        }

        persisted
    }

    /// Push scores (and, for final games, settlement results) into every
    /// pending bet matching a started game. Per-game and per-bet
    /// failures are logged and skipped so the rest of the batch runs.
    async fn update_bets(&self, store: &FirestoreClient, games: &[Game]) -> Result<()> {
        println!("\n📊 Updating pending bets...");
        let mut settled = 0u32;

        for game in games {
            if !matches!(game.status, GameStatus::Live | GameStatus::Final) {
                continue;
            }

            let pending = match store
                .query_pending_bets(&game.away_team, &game.home_team)
                .await
            {
                Ok(pending) => pending,
                Err(e) => {
                    warn!(
                        "Could not query bets for {} @ {}: {e:#}",
                        game.away_team, game.home_team
                    );
                    continue;
                }
            };

            for bet_doc in pending {
                match self.apply_game_to_bet(store, game, &bet_doc).await {
                    Ok(true) => settled += 1,
                    Ok(false) => {}
                    Err(e) => warn!("Skipping bet {}: {e:#}", bet_doc.name),
                }
            }
        }

        println!("✅ Settled {settled} bets");
        Ok(())
    }

    /// Write one bet update. Live games get scores only; final games
    /// additionally get outcome, profit, and a COMPLETED status. Returns
    /// whether the bet was settled.
    async fn apply_game_to_bet(
        &self,
        store: &FirestoreClient,
        game: &Game,
        bet_doc: &PendingBet,
    ) -> Result<bool> {
        if game.status != GameStatus::Final {
            let updates = bet_updates(game, None);
            store
                .update_bet(&bet_doc.name, &bet_doc.update_time, &updates)
                .await?;
            return Ok(false);
        }

        let bet = bet_doc.bet()?;
        let outcome = bet_outcome(game, &bet)?;
        let units = profit(outcome, bet.odds);

        let updates = bet_updates(game, Some((outcome, units)));
        store
            .update_bet(&bet_doc.name, &bet_doc.update_time, &updates)
            .await?;

        println!(
            "   ✅ Settled {} @ {} → {}",
            game.away_team,
            game.home_team,
            outcome.as_str()
        );
        Ok(true)
    }
}

/// Build the field-path update plan for one bet document. Every write
/// carries the scores and provenance; only a settlement (a final game)
/// adds winner/outcome/profit and flips the status to COMPLETED. A game
/// still in progress must never have an outcome written.
fn bet_updates(game: &Game, settlement: Option<(BetOutcome, f64)>) -> Vec<(&'static str, Value)> {
    let mut updates = vec![
        ("result.awayScore", int_value(i64::from(game.away_score))),
        ("result.homeScore", int_value(i64::from(game.home_score))),
        ("result.totalScore", int_value(i64::from(game.total_score))),
        ("result.fetchedAt", timestamp_value(Utc::now())),
        ("result.source", string_value(SCORE_SOURCE)),
    ];

    if let Some((outcome, units)) = settlement {
        updates.extend([
            ("result.winner", string_value(game.winner().as_str())),
            ("result.outcome", string_value(outcome.as_str())),
            ("result.profit", double_value(units)),
            ("result.fetched", bool_value(true)),
            ("status", string_value(BET_STATUS_COMPLETED)),
        ]);
    }

    updates
}
