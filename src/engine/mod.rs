//! Core Kuhn Poker engine.
//!
//! This module contains everything needed to play one hand correctly:
//!
//! - [`card`]: the 3-rank deck and dealing
//! - [`action`]: typed actions, seats, histories, and the terminal grammar
//! - [`strategy`]: fixed probabilistic strategy tables, one per seat
//! - [`hand`]: the betting state machine and outcome resolution
//! - [`observer`]: opponent action counting for later inspection
//!
//! # Overview
//!
//! A hand is a short, strictly bounded state machine:
//!
//! 1. Both seats post a 1-chip ante (pot = 2).
//! 2. Seats alternate, each sampling an action from its strategy table.
//! 3. The hand ends the moment the history matches one of five terminal
//!    shapes: two showdowns and two folds, with the called showdown
//!    reachable through either opening. This is never more than three
//!    actions in.
//! 4. Showdowns award the pot to the strictly higher card; folds award it
//!    to the non-folding seat unconditionally.
//!
//! Strategy tables are constant lookup tables of action weights, not
//! learned policies; the observation model is write-only bookkeeping of
//! what the opponent seat did. Randomness is always threaded in as an
//! explicit `&mut impl Rng`, so a session seeded once replays exactly.
//!
//! # Example
//!
//! ```
//! use kuhn_sim::engine::{Deck, HandState, ObservationModel, StrategyTable};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut observer = ObservationModel::new();
//! let table = StrategyTable::card_strength();
//!
//! let (player_card, opponent_card) = Deck::deal(&mut rng);
//! let outcome = HandState::new(player_card, opponent_card)
//!     .play_out(&table, &table, &mut observer, &mut rng)
//!     .unwrap();
//!
//! assert_eq!(outcome.deltas[0] + outcome.deltas[1], 0);
//! ```

pub mod action;
pub mod card;
pub mod hand;
pub mod observer;
pub mod strategy;

// Re-export main types for convenient access
pub use action::{Action, History, Seat, Terminal};
pub use card::{Card, Deck};
pub use hand::{HandError, HandOutcome, HandState, StateError};
pub use observer::{Facing, ObservationCell, ObservationModel, ObservationSnapshot};
pub use strategy::{ConfigError, StrategyTable, Weights};
