//! Session layer: configuration, the hand loop, and reporting.
//!
//! A session plays a configured number of hands back to back, carrying
//! chip stacks (which may go negative; there is no bankruptcy rule),
//! win tallies, a per-hand log, and the opponent observation model.
//!
//! # Usage
//!
//! ```
//! use kuhn_sim::session::{Session, SessionConfig};
//!
//! let config = SessionConfig::new()
//!     .with_hands(500)
//!     .with_starting_chips(100)
//!     .with_seed(42);
//!
//! let mut session = Session::new(config).unwrap();
//! let report = session.run().unwrap();
//!
//! // The pot is always fully redistributed between the two seats.
//! assert_eq!(report.chips[0] + report.chips[1], 200);
//! println!("{}", report.render());
//! ```
//!
//! Configurations can also be loaded from JSON files with
//! [`SessionConfig::from_json_file`]; seats without configured strategy
//! entries fall back to the card-strength default table.

pub mod config;
pub mod driver;
pub mod report;

// Re-export main types for convenient access
pub use config::{LoadError, SessionConfig, StrategyEntry};
pub use driver::{HandRecord, Session};
pub use report::SessionReport;
