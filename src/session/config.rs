//! Session configuration.
//!
//! A session is configured by hand count, starting stacks, an optional
//! RNG seed, and one strategy table per seat. Configurations can be built
//! in code or loaded from JSON files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::action::{Action, History};
use crate::engine::card::Card;
use crate::engine::strategy::StrategyTable;

/// One strategy-table cell in a configuration file.
///
/// ```json
/// { "card": "King", "history": ["Pass", "Bet"], "pass": 0.0, "bet": 1.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyEntry {
    /// Card held at the decision point.
    pub card: Card,
    /// Actions taken before the decision point.
    pub history: Vec<Action>,
    /// Weight on Pass.
    pub pass: f64,
    /// Weight on Bet.
    pub bet: f64,
}

/// Complete configuration for a simulation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of hands to play.
    pub hands: u64,
    /// Starting chip stack for each seat. Stacks may go negative during a
    /// session; no bankruptcy rule applies.
    pub starting_chips: i64,
    /// Random seed for reproducibility. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Player-seat strategy entries; omitted means the card-strength
    /// default.
    #[serde(default)]
    pub player: Option<Vec<StrategyEntry>>,
    /// Opponent-seat strategy entries; omitted means the card-strength
    /// default.
    #[serde(default)]
    pub opponent: Option<Vec<StrategyEntry>>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hands: 1_000,
            starting_chips: 100,
            seed: None,
            player: None,
            opponent: None,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of hands.
    pub fn with_hands(mut self, hands: u64) -> Self {
        self.hands = hands;
        self
    }

    /// Builder method: set the starting stack per seat.
    pub fn with_starting_chips(mut self, chips: i64) -> Self {
        self.starting_chips = chips;
        self
    }

    /// Builder method: set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the player seat's strategy entries.
    pub fn with_player_entries(mut self, entries: Vec<StrategyEntry>) -> Self {
        self.player = Some(entries);
        self
    }

    /// Builder method: set the opponent seat's strategy entries.
    pub fn with_opponent_entries(mut self, entries: Vec<StrategyEntry>) -> Self {
        self.opponent = Some(entries);
        self
    }

    /// The player seat's strategy table.
    pub fn player_table(&self) -> StrategyTable {
        Self::table_from(&self.player)
    }

    /// The opponent seat's strategy table.
    pub fn opponent_table(&self) -> StrategyTable {
        Self::table_from(&self.opponent)
    }

    fn table_from(entries: &Option<Vec<StrategyEntry>>) -> StrategyTable {
        match entries {
            None => StrategyTable::card_strength(),
            Some(entries) => entries.iter().fold(StrategyTable::new(), |table, e| {
                table.with(e.card, History::from_actions(&e.history), e.pass, e.bet)
            }),
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| LoadError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the option values.
    ///
    /// Strategy-table completeness is checked separately by the session
    /// driver, which knows which seat each table serves.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.hands == 0 {
            return Err(LoadError::InvalidValue {
                field: "hands".to_string(),
                message: "must be a positive number of hands".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors that can occur when loading a session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Reading the file failed.
    Io(String),
    /// The JSON did not parse into a configuration.
    Parse(String),
    /// An option value is out of range.
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for LoadError {}
