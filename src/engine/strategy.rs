//! Fixed probabilistic strategy tables.
//!
//! A strategy table maps every reachable (card, history) decision point to
//! a pair of action weights over {Pass, Bet}. Tables are configured once
//! and never mutated during play; there is no learning here, only
//! sampling. Each seat carries its own independent table, so the two sides
//! can model distinct play styles.
//!
//! A table that omits a reachable decision point, or carries weights that
//! are not a valid distribution, is a configuration error: `decide` and
//! `validate` surface it instead of silently defaulting.

use rand::Rng;
use rustc_hash::FxHashMap;
use std::fmt;

use crate::engine::action::{Action, History, Seat};
use crate::engine::card::Card;

/// Action weights at a single decision point.
///
/// Weights need not sum to exactly 1; they are normalized at sample time.
/// They must be finite, non-negative, and sum to a positive total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// Weight on `Action::Pass`.
    pub pass: f64,
    /// Weight on `Action::Bet`.
    pub bet: f64,
}

impl Weights {
    fn is_valid(&self) -> bool {
        self.pass.is_finite()
            && self.bet.is_finite()
            && self.pass >= 0.0
            && self.bet >= 0.0
            && self.pass + self.bet > 0.0
    }
}

/// Errors raised by invalid strategy-table configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The table has no entry for a reachable (card, history) pair.
    MissingEntry {
        /// Card held at the decision point.
        card: Card,
        /// Rendered history at the decision point.
        history: String,
    },
    /// The entry's weights are not a valid distribution.
    InvalidWeights {
        /// Card held at the decision point.
        card: Card,
        /// Rendered history at the decision point.
        history: String,
        /// Configured weight on Pass.
        pass: f64,
        /// Configured weight on Bet.
        bet: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingEntry { card, history } => {
                write!(
                    f,
                    "strategy table has no entry for card {} at history '{}'",
                    card, history
                )
            }
            ConfigError::InvalidWeights {
                card,
                history,
                pass,
                bet,
            } => {
                write!(
                    f,
                    "strategy weights for card {} at history '{}' are invalid: pass={}, bet={}",
                    card, history, pass, bet
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A fixed mapping from (card, history) to action weights.
///
/// # Example
/// ```
/// use kuhn_sim::engine::{Card, History, StrategyTable};
///
/// // Always open-bet a King, always check everything else.
/// let table = StrategyTable::new()
///     .with(Card::King, History::new(), 0.0, 1.0)
///     .with(Card::Queen, History::new(), 1.0, 0.0)
///     .with(Card::Jack, History::new(), 1.0, 0.0);
/// assert_eq!(table.num_entries(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StrategyTable {
    cells: FxHashMap<(Card, History), Weights>,
}

impl StrategyTable {
    /// Create an empty table. Populate it with [`StrategyTable::with`].
    pub fn new() -> Self {
        Self {
            cells: FxHashMap::default(),
        }
    }

    /// The decision points a given seat can face.
    ///
    /// The player opens and responds to a bet after checking; the opponent
    /// responds to the player's opening check or bet.
    pub fn decision_points(seat: Seat) -> [History; 2] {
        match seat {
            Seat::Player => [
                History::new(),
                History::from_actions(&[Action::Pass, Action::Bet]),
            ],
            Seat::Opponent => [
                History::from_actions(&[Action::Pass]),
                History::from_actions(&[Action::Bet]),
            ],
        }
    }

    /// Builder method: set the weights for one (card, history) cell.
    pub fn with(mut self, card: Card, history: History, pass: f64, bet: f64) -> Self {
        self.cells.insert((card, history), Weights { pass, bet });
        self
    }

    /// Number of configured cells.
    pub fn num_entries(&self) -> usize {
        self.cells.len()
    }

    /// Check that every decision point reachable by `seat` has a valid
    /// entry for every card.
    pub fn validate(&self, seat: Seat) -> Result<(), ConfigError> {
        for history in Self::decision_points(seat) {
            for card in Card::ALL {
                self.lookup(card, &history)?;
            }
        }
        Ok(())
    }

    /// Sample an action for `card` at `history`.
    ///
    /// Fails with [`ConfigError`] if the cell is missing or its weights are
    /// not a valid distribution.
    pub fn decide<R: Rng>(
        &self,
        card: Card,
        history: &History,
        rng: &mut R,
    ) -> Result<Action, ConfigError> {
        let weights = self.lookup(card, history)?;
        let total = weights.pass + weights.bet;
        let roll = rng.gen::<f64>() * total;
        if roll < weights.pass {
            Ok(Action::Pass)
        } else {
            Ok(Action::Bet)
        }
    }

    fn lookup(&self, card: Card, history: &History) -> Result<Weights, ConfigError> {
        let weights = self
            .cells
            .get(&(card, history.clone()))
            .copied()
            .ok_or_else(|| ConfigError::MissingEntry {
                card,
                history: history.to_string(),
            })?;
        if !weights.is_valid() {
            return Err(ConfigError::InvalidWeights {
                card,
                history: history.to_string(),
                pass: weights.pass,
                bet: weights.bet,
            });
        }
        Ok(weights)
    }

    /// Every decision point either seat can face (the union of both seats'
    /// points). Presets fill all of these so one table works in any seat.
    fn all_decision_points() -> [History; 4] {
        use Action::{Bet, Pass};
        [
            History::new(),
            History::from_actions(&[Pass]),
            History::from_actions(&[Bet]),
            History::from_actions(&[Pass, Bet]),
        ]
    }

    /// Card-strength table: aggressive with the King, neutral with the
    /// Queen, defensive with the Jack, at every decision point.
    ///
    /// J → pass 0.9 / bet 0.1, Q → 0.5 / 0.5, K → 0.1 / 0.9.
    pub fn card_strength() -> Self {
        let mut table = Self::new();
        for history in Self::all_decision_points() {
            table = table
                .with(Card::Jack, history.clone(), 0.9, 0.1)
                .with(Card::Queen, history.clone(), 0.5, 0.5)
                .with(Card::King, history, 0.1, 0.9);
        }
        table
    }

    /// Deterministic scripted table: open-bet only the King, check the
    /// rest; facing a bet, call with King or Queen and fold the Jack.
    ///
    /// This is the machine seat used by the interactive binary.
    pub fn scripted() -> Self {
        use Action::{Bet, Pass};
        let mut table = Self::new();
        for history in [History::new(), History::from_actions(&[Pass])] {
            table = table
                .with(Card::Jack, history.clone(), 1.0, 0.0)
                .with(Card::Queen, history.clone(), 1.0, 0.0)
                .with(Card::King, history, 0.0, 1.0);
        }
        for history in [
            History::from_actions(&[Bet]),
            History::from_actions(&[Pass, Bet]),
        ] {
            table = table
                .with(Card::Jack, history.clone(), 1.0, 0.0)
                .with(Card::Queen, history.clone(), 0.0, 1.0)
                .with(Card::King, history, 0.0, 1.0);
        }
        table
    }

    /// Degenerate table that plays `action` with every card at every
    /// decision point. Useful for forcing specific lines in tests.
    pub fn always(action: Action) -> Self {
        let (pass, bet) = match action {
            Action::Pass => (1.0, 0.0),
            Action::Bet => (0.0, 1.0),
        };
        let mut table = Self::new();
        for history in Self::all_decision_points() {
            for card in Card::ALL {
                table = table.with(card, history.clone(), pass, bet);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn presets_cover_both_seats() {
        for table in [
            StrategyTable::card_strength(),
            StrategyTable::scripted(),
            StrategyTable::always(Action::Pass),
        ] {
            assert!(table.validate(Seat::Player).is_ok());
            assert!(table.validate(Seat::Opponent).is_ok());
            assert_eq!(table.num_entries(), 12);
        }
    }

    #[test]
    fn missing_entry_is_a_config_error() {
        let table = StrategyTable::new().with(Card::King, History::new(), 0.5, 0.5);
        let err = table.validate(Seat::Player).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEntry { .. }));

        let mut rng = StdRng::seed_from_u64(1);
        let err = table
            .decide(Card::Jack, &History::new(), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEntry {
                card: Card::Jack,
                history: String::new(),
            }
        );
    }

    #[test]
    fn invalid_weights_are_a_config_error() {
        let mut rng = StdRng::seed_from_u64(1);
        for (pass, bet) in [(0.0, 0.0), (-1.0, 2.0), (f64::NAN, 1.0), (f64::INFINITY, 0.0)] {
            let table = StrategyTable::new().with(Card::Queen, History::new(), pass, bet);
            let err = table
                .decide(Card::Queen, &History::new(), &mut rng)
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidWeights { .. }),
                "weights ({}, {}) should be rejected",
                pass,
                bet
            );
        }
    }

    #[test]
    fn degenerate_weights_sample_deterministically() {
        let mut rng = StdRng::seed_from_u64(3);
        let always_bet = StrategyTable::always(Action::Bet);
        let always_pass = StrategyTable::always(Action::Pass);
        for _ in 0..100 {
            assert_eq!(
                always_bet
                    .decide(Card::Jack, &History::new(), &mut rng)
                    .unwrap(),
                Action::Bet
            );
            assert_eq!(
                always_pass
                    .decide(Card::King, &History::new(), &mut rng)
                    .unwrap(),
                Action::Pass
            );
        }
    }

    #[test]
    fn unnormalized_weights_sample_proportionally() {
        // 3:1 pass-to-bet odds expressed with a total of 4, not 1.
        let table = StrategyTable::new().with(Card::Queen, History::new(), 3.0, 1.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut bets = 0u32;
        let trials = 20_000;
        for _ in 0..trials {
            if table.decide(Card::Queen, &History::new(), &mut rng).unwrap() == Action::Bet {
                bets += 1;
            }
        }
        let ratio = bets as f64 / trials as f64;
        assert!(
            (ratio - 0.25).abs() < 0.02,
            "bet ratio {} should be near 0.25",
            ratio
        );
    }

    #[test]
    fn scripted_table_matches_its_script() {
        let mut rng = StdRng::seed_from_u64(5);
        let table = StrategyTable::scripted();
        let open = History::new();
        let facing_bet = History::from_actions(&[Action::Bet]);

        assert_eq!(table.decide(Card::King, &open, &mut rng).unwrap(), Action::Bet);
        assert_eq!(table.decide(Card::Queen, &open, &mut rng).unwrap(), Action::Pass);
        assert_eq!(table.decide(Card::Jack, &open, &mut rng).unwrap(), Action::Pass);

        assert_eq!(
            table.decide(Card::King, &facing_bet, &mut rng).unwrap(),
            Action::Bet
        );
        assert_eq!(
            table.decide(Card::Queen, &facing_bet, &mut rng).unwrap(),
            Action::Bet
        );
        assert_eq!(
            table.decide(Card::Jack, &facing_bet, &mut rng).unwrap(),
            Action::Pass
        );
    }
}
