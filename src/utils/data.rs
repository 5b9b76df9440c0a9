use crate::models::Game;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level document written to the live scores file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveScoresFile {
    pub last_update: DateTime<Utc>,
    pub games: Vec<Game>,
    pub games_count: usize,
}

/// Save the game list to the output JSON file.
///
/// The document is written to a temp file next to the destination and
/// renamed over it, so consumers polling the file never observe a
/// partial write.
pub fn save_scores(games: &[Game], path: &Path) -> Result<()> {
    let data = LiveScoresFile {
        last_update: Utc::now(),
        games: games.to_vec(),
        games_count: games.len(),
    };
    let json = serde_json::to_string_pretty(&data).context("Failed to serialize live scores")?;

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        }
    }

    // Process-unique temp name, so two instances writing the same
    // output path cannot clobber each other's staged file
    let tmp = path.with_extension(format!("json.tmp.{}", std::process::id()));
    std::fs::write(&tmp, json)
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Load a previously written live scores file.
pub fn load_scores(path: &Path) -> Result<LiveScoresFile> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).context("Failed to deserialize live scores")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_game;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("live_scores_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_round_trip() {
        let games = vec![sample_game(2, 4), sample_game(1, 1)];
        let path = temp_path("round_trip");

        save_scores(&games, &path).unwrap();
        let loaded = load_scores(&path).unwrap();

        assert_eq!(loaded.games_count, 2);
        assert_eq!(loaded.games.len(), 2);
        assert_eq!(loaded.games[0].away_team, games[0].away_team);
        assert_eq!(loaded.games[0].home_team, games[0].home_team);
        assert_eq!(loaded.games[0].away_score, games[0].away_score);
        assert_eq!(loaded.games[0].home_score, games[0].home_score);
        assert_eq!(loaded.games[0].status, games[0].status);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_list_persists_zero_count() {
        let path = temp_path("empty");
        save_scores(&[], &path).unwrap();
        let loaded = load_scores(&path).unwrap();
        assert_eq!(loaded.games_count, 0);
        assert!(loaded.games.is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let path = temp_path("camel");
        save_scores(&[sample_game(0, 0)], &path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw.get("lastUpdate").is_some());
        assert_eq!(raw["gamesCount"], 1);
        let game = &raw["games"][0];
        assert!(game.get("awayTeam").is_some());
        assert!(game.get("totalScore").is_some());
        assert_eq!(game["status"], "FINAL");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = std::env::temp_dir().join(format!("live_scores_staging_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("live_scores.json");

        save_scores(&[sample_game(1, 2)], &path).unwrap();

        let names: Vec<String> = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["live_scores.json".to_string()]);
        // The staged name is unique to this process
        let tmp = path.with_extension(format!("json.tmp.{}", std::process::id()));
        assert!(!tmp.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_overwrite_replaces_previous_contents() {
        let path = temp_path("overwrite");
        save_scores(&[sample_game(1, 2), sample_game(3, 4)], &path).unwrap();
        save_scores(&[sample_game(5, 6)], &path).unwrap();

        let loaded = load_scores(&path).unwrap();
        assert_eq!(loaded.games_count, 1);
        assert_eq!(loaded.games[0].away_score, 5);

        std::fs::remove_file(&path).ok();
    }
}
