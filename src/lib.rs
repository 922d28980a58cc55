//! # Kuhn Sim
//!
//! A session simulator for Kuhn Poker, the 3-card, 2-player
//! imperfect-information poker variant, playing a probabilistic player
//! seat against a probabilistic opponent seat over many hands.
//!
//! ## Features
//!
//! - **Typed Hand Engine**: a betting state machine over typed actions
//!   with structural terminal detection, no string matching
//! - **Fixed Strategy Tables**: constant per-(card, history) action
//!   weights per seat, validated for completeness up front
//! - **Opponent Tracking**: fixed-size counts of observed opponent
//!   actions by card and betting context
//! - **Seeded Sessions**: one RNG per session for exact replays
//! - **JSON In/Out**: configurations in, full session reports out
//!
//! ## Quick Start
//!
//! ```
//! use kuhn_sim::session::{Session, SessionConfig};
//!
//! // 1. Configure a session
//! let config = SessionConfig::new().with_hands(1_000).with_seed(42);
//!
//! // 2. Run it
//! let mut session = Session::new(config).unwrap();
//! let report = session.run().unwrap();
//!
//! // 3. Inspect the results
//! println!("{}", report.render());
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: cards, actions, strategy tables, and the hand state machine
//! - [`session`]: configuration, the multi-hand driver, and reporting
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Session Driver                           │
//! │  - chip ledgers           - win tallies                         │
//! │  - per-hand log           - seeded RNG                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │ one hand at a time
//!                               ▼
//!         ┌─────────────────────┬─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!    ┌─────────┐         ┌───────────┐         ┌─────────────┐
//!    │  Deck   │         │   Hand    │         │ Observation │
//!    │ (deal)  │ ──────▶ │  Machine  │ ──────▶ │    Model    │
//!    └─────────┘         └───────────┘         └─────────────┘
//!                              │
//!                              │ consults per turn
//!                              ▼
//!                       ┌─────────────┐
//!                       │  Strategy   │
//!                       │   Tables    │
//!                       └─────────────┘
//! ```

#![warn(missing_docs)]

/// Core engine module.
///
/// Cards, actions, the betting state machine, strategy tables, and the
/// opponent observation model.
pub mod engine;

/// Session module.
///
/// Configuration, the multi-hand driver, and report generation.
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use engine::{
    Action, Card, ConfigError, Deck, Facing, HandError, HandOutcome, HandState, History,
    ObservationModel, Seat, StateError, StrategyTable, Terminal,
};
pub use session::{HandRecord, Session, SessionConfig, SessionReport};
