//! Win/loss counters.
//!
//! The record is a flat string-to-integer map so a presentation layer can
//! store it as JSON and add its own keys. Reading and writing the file is
//! the caller's job.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, PlayerId};
use crate::rules::GameResult;

pub const GAMES_PLAYED: &str = "games_played";
pub const PLAYER_WINS: &str = "player_wins";
pub const AI_WINS: &str = "ai_wins";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats {
    counters: FxHashMap<String, u64>,
}

impl Default for Stats {
    fn default() -> Self {
        let counters = [GAMES_PLAYED, PLAYER_WINS, AI_WINS]
            .into_iter()
            .map(|k| (k.to_string(), 0))
            .collect();
        Self { counters }
    }
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter's value; missing keys read as zero.
    #[must_use]
    pub fn get(&self, key: &str) -> u64 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    fn bump(&mut self, key: &str) {
        *self.counters.entry(key.to_string()).or_insert(0) += 1;
    }

    #[must_use]
    pub fn games_played(&self) -> u64 {
        self.get(GAMES_PLAYED)
    }

    #[must_use]
    pub fn player_wins(&self) -> u64 {
        self.get(PLAYER_WINS)
    }

    #[must_use]
    pub fn ai_wins(&self) -> u64 {
        self.get(AI_WINS)
    }

    /// Count one finished game.
    pub fn record(&mut self, result: &GameResult) {
        self.bump(GAMES_PLAYED);
        if result.is_winner(PlayerId::AUTOMATED) {
            self.bump(AI_WINS);
        } else {
            self.bump(PLAYER_WINS);
        }
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a stored record, starting over from zeros if it is unreadable.
    #[must_use]
    pub fn from_json_lenient(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|err| {
            tracing::warn!(%err, "unreadable stats record; starting from zero");
            Self::default()
        })
    }
}
