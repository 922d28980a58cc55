//! Session reporting and export.
//!
//! Collects the final ledgers, tallies, per-hand log, and the opponent
//! observation snapshot into one serializable report, with a plain-text
//! rendering for the console. The text format is illustrative, not a
//! compatibility surface.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::path::Path;

use crate::engine::action::{Action, Seat};
use crate::engine::card::Card;
use crate::engine::observer::{Facing, ObservationSnapshot};
use crate::session::driver::{HandRecord, Session};

/// Complete results of a finished (or partially played) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Hands played.
    pub hands: u64,
    /// Starting stack per seat.
    pub starting_chips: i64,
    /// Final chip stacks, indexed by [`Seat::index`].
    pub chips: [i64; 2],
    /// Hands won per seat, indexed by [`Seat::index`].
    pub wins: [u64; 2],
    /// Player seat's net chip swing over the session.
    pub net_swing: i64,
    /// Per-hand log records.
    pub log: Vec<HandRecord>,
    /// Snapshot of the opponent observation table.
    pub observations: ObservationSnapshot,
}

impl SessionReport {
    /// Build a report from the session's current state.
    pub fn from_session(session: &Session) -> Self {
        let chips = session.chips();
        Self {
            hands: session.hands_played(),
            starting_chips: session.config().starting_chips,
            chips,
            wins: session.wins(),
            net_swing: chips[Seat::Player.index()] - session.config().starting_chips,
            log: session.log().to_vec(),
            observations: session.observer().snapshot(),
        }
    }

    /// Render the plain-text summary.
    pub fn render(&self) -> String {
        let mut out = String::new();

        writeln!(out, "Session results").unwrap();
        writeln!(out, "  hands played: {}", self.hands).unwrap();
        for seat in [Seat::Player, Seat::Opponent] {
            let i = seat.index();
            let swing = self.chips[i] - self.starting_chips;
            writeln!(
                out,
                "  {:<8} {} wins, {} chips ({:+})",
                seat.to_string() + ":",
                self.wins[i],
                self.chips[i],
                swing,
            )
            .unwrap();
        }
        writeln!(out, "  net player swing: {:+}", self.net_swing).unwrap();

        writeln!(out).unwrap();
        writeln!(out, "Opponent action counts").unwrap();
        for card in Card::ALL {
            writeln!(out, "  card {}:", card).unwrap();
            for facing in Facing::ALL {
                let count_of = |action: Action| {
                    self.observations
                        .cells
                        .iter()
                        .find(|c| c.card == card && c.facing == facing && c.action == action)
                        .map(|c| c.count)
                        .unwrap_or(0)
                };
                writeln!(
                    out,
                    "    {:<12} pass {:>6}, bet {:>6}",
                    facing.to_string() + ":",
                    count_of(Action::Pass),
                    count_of(Action::Bet),
                )
                .unwrap();
            }
        }

        out
    }

    /// Write the report as pretty JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::config::SessionConfig;

    fn finished_session() -> Session {
        let config = SessionConfig::new()
            .with_hands(100)
            .with_starting_chips(100)
            .with_seed(5);
        let mut session = Session::new(config).unwrap();
        session.run().unwrap();
        session
    }

    #[test]
    fn report_mirrors_session_state() {
        let session = finished_session();
        let report = SessionReport::from_session(&session);

        assert_eq!(report.hands, 100);
        assert_eq!(report.chips, session.chips());
        assert_eq!(report.wins, session.wins());
        assert_eq!(report.net_swing, session.chips()[0] - 100);
        assert_eq!(report.log.len(), 100);
        assert_eq!(report.observations.total(), 100);
    }

    #[test]
    fn render_includes_summary_and_observation_lines() {
        let report = SessionReport::from_session(&finished_session());
        let text = report.render();

        assert!(text.contains("hands played: 100"));
        assert!(text.contains("Player:"));
        assert!(text.contains("Opponent:"));
        assert!(text.contains("Opponent action counts"));
        assert!(text.contains("card J:"));
        assert!(text.contains("facing bet"));
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = SessionReport::from_session(&finished_session());
        let json = serde_json::to_string(&report).unwrap();
        let parsed: SessionReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.hands, report.hands);
        assert_eq!(parsed.chips, report.chips);
        assert_eq!(parsed.log, report.log);
        assert_eq!(parsed.observations.total(), report.observations.total());
    }
}
