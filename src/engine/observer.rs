//! Opponent observation model.
//!
//! Counts every action the opponent seat takes, keyed by the card it held,
//! the betting context it was facing, and the action chosen. The counts
//! are purely observational (neither strategy reads them) and are never
//! reset within a session.
//!
//! The opponent only ever decides in two contexts (after the player's
//! opening check, or facing the player's opening bet), so the whole model
//! fits in a fixed 3 × 2 × 2 table. No dynamic keys, explicit memory bound.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::action::{Action, History};
use crate::engine::card::Card;

/// The betting context the opponent faces when it acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// The player opened with a check.
    Check,
    /// The player opened with a bet.
    Bet,
}

impl Facing {
    /// All contexts, in recording order.
    pub const ALL: [Facing; 2] = [Facing::Check, Facing::Bet];

    /// Index of this context into the counting table (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Facing::Check => 0,
            Facing::Bet => 1,
        }
    }

    /// Derive the context from the history before the opponent acts.
    ///
    /// Only the two one-token prefixes are opponent decision points;
    /// anything else yields `None`.
    pub fn from_history(history: &History) -> Option<Facing> {
        match history.as_slice() {
            [Action::Pass] => Some(Facing::Check),
            [Action::Bet] => Some(Facing::Bet),
            _ => None,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Check => write!(f, "after check"),
            Facing::Bet => write!(f, "facing bet"),
        }
    }
}

/// Monotone counters of observed opponent actions.
///
/// Indexed `[card][facing][action]`; at most 12 cells ever exist.
#[derive(Debug, Clone, Default)]
pub struct ObservationModel {
    counts: [[[u64; 2]; 2]; 3],
}

impl ObservationModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one opponent action in the given context.
    pub fn record(&mut self, card: Card, facing: Facing, action: Action) {
        self.counts[card.index()][facing.index()][action.index()] += 1;
    }

    /// Read a single cell.
    pub fn count(&self, card: Card, facing: Facing, action: Action) -> u64 {
        self.counts[card.index()][facing.index()][action.index()]
    }

    /// Total observed actions while holding `card`.
    pub fn total_for_card(&self, card: Card) -> u64 {
        self.counts[card.index()]
            .iter()
            .flat_map(|per_facing| per_facing.iter())
            .sum()
    }

    /// Total observed actions across all cards.
    pub fn total(&self) -> u64 {
        Card::ALL.iter().map(|&c| self.total_for_card(c)).sum()
    }

    /// Produce a read-only view of all cells for reporting.
    pub fn snapshot(&self) -> ObservationSnapshot {
        let mut cells = Vec::with_capacity(12);
        for card in Card::ALL {
            for facing in Facing::ALL {
                for action in [Action::Pass, Action::Bet] {
                    cells.push(ObservationCell {
                        card,
                        facing,
                        action,
                        count: self.count(card, facing, action),
                    });
                }
            }
        }
        ObservationSnapshot { cells }
    }
}

/// One cell of the observation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationCell {
    /// Card the opponent held.
    pub card: Card,
    /// Context it was facing.
    pub facing: Facing,
    /// Action it took.
    pub action: Action,
    /// How many times this combination was observed.
    pub count: u64,
}

/// A read-only snapshot of the full observation table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSnapshot {
    /// All 12 cells, grouped by card then context then action.
    pub cells: Vec<ObservationCell>,
}

impl ObservationSnapshot {
    /// Cells for one card, in context/action order.
    pub fn for_card(&self, card: Card) -> impl Iterator<Item = &ObservationCell> {
        self.cells.iter().filter(move |cell| cell.card == card)
    }

    /// Total observations in the snapshot.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|cell| cell.count).sum()
    }
}
