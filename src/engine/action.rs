//! Actions, seats, and the betting history.
//!
//! The betting vocabulary has two tokens whose meaning depends on context:
//!
//! - `Pass`: check when there is no live bet, fold when facing one.
//! - `Bet`: open-bet when there is no live bet, call when facing one.
//!
//! There is no raise in this variant, so a hand's history is at most three
//! tokens long. The history is kept as an explicit sequence of typed
//! actions and terminal detection is structural slice matching, so a
//! token can never be mistaken for part of a longer coincidental string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two fixed participant roles in a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The first seat to act each hand.
    Player,
    /// The second seat; its actions feed the observation model.
    Opponent,
}

impl Seat {
    /// The other seat.
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    /// Index of this seat into per-seat arrays (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Player => write!(f, "Player"),
            Seat::Opponent => write!(f, "Opponent"),
        }
    }
}

/// A betting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Check (no live bet) or fold (facing a bet).
    Pass,
    /// Open-bet (no live bet) or call (facing a bet); pays 1 chip.
    Bet,
}

impl Action {
    /// Index of this action into per-action arrays (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Action::Pass => 0,
            Action::Bet => 1,
        }
    }

    /// Compact one-letter token used in rendered histories.
    pub fn token(self) -> char {
        match self {
            Action::Pass => 'p',
            Action::Bet => 'b',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pass => write!(f, "Pass"),
            Action::Bet => write!(f, "Bet"),
        }
    }
}

/// The shape a hand terminates in.
///
/// These four shapes are mutually exclusive and exhaustive over every
/// reachable 2–3 token history; nothing else is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terminal {
    /// Both seats checked: `[Pass, Pass]`. Showdown for the 2-chip pot.
    CheckedShowdown,
    /// A bet was called: `[Bet, Bet]` or `[Pass, Bet, Bet]`. Showdown for
    /// the 4-chip pot.
    CalledShowdown,
    /// The player folded to the opponent's bet: `[Pass, Bet, Pass]`.
    PlayerFolded,
    /// The opponent folded to the player's bet: `[Bet, Pass]`.
    OpponentFolded,
}

impl Terminal {
    /// Whether this terminal resolves by comparing cards.
    pub fn is_showdown(self) -> bool {
        matches!(self, Terminal::CheckedShowdown | Terminal::CalledShowdown)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::CheckedShowdown => write!(f, "checked showdown"),
            Terminal::CalledShowdown => write!(f, "called showdown"),
            Terminal::PlayerFolded => write!(f, "player folded"),
            Terminal::OpponentFolded => write!(f, "opponent folded"),
        }
    }
}

/// The ordered sequence of actions taken so far in a hand.
///
/// Grows by one action per turn; a reachable history never exceeds three
/// tokens. Renders compactly with one letter per action (`"pbb"` = pass,
/// bet, call).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    actions: Vec<Action>,
}

impl History {
    /// An empty history (hand start).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from a token sequence. Used by tests and the
    /// strategy-table builders; the state machine itself only pushes.
    pub fn from_actions(actions: &[Action]) -> Self {
        Self {
            actions: actions.to_vec(),
        }
    }

    /// Append one action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Number of actions taken.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no action has been taken yet.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The actions as a slice, for structural matching.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Match this history against the terminal grammar.
    ///
    /// Returns `None` for the non-terminal prefixes (`[]`, `[p]`, `[b]`,
    /// `[p, b]`) and for any unreachable shape; unreachable shapes are
    /// rejected separately by the state machine.
    pub fn terminal(&self) -> Option<Terminal> {
        use Action::{Bet, Pass};
        match self.actions.as_slice() {
            [Pass, Pass] => Some(Terminal::CheckedShowdown),
            [Bet, Bet] => Some(Terminal::CalledShowdown),
            [Pass, Bet, Bet] => Some(Terminal::CalledShowdown),
            [Pass, Bet, Pass] => Some(Terminal::PlayerFolded),
            [Bet, Pass] => Some(Terminal::OpponentFolded),
            _ => None,
        }
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in &self.actions {
            write!(f, "{}", action.token())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Action::{Bet, Pass};

    #[test]
    fn terminal_grammar_matches_the_five_shapes() {
        let cases = [
            (&[Pass, Pass][..], Some(Terminal::CheckedShowdown)),
            (&[Bet, Bet][..], Some(Terminal::CalledShowdown)),
            (&[Pass, Bet, Bet][..], Some(Terminal::CalledShowdown)),
            (&[Pass, Bet, Pass][..], Some(Terminal::PlayerFolded)),
            (&[Bet, Pass][..], Some(Terminal::OpponentFolded)),
        ];
        for (actions, expected) in cases {
            assert_eq!(History::from_actions(actions).terminal(), expected);
        }
    }

    #[test]
    fn decision_prefixes_are_not_terminal() {
        for actions in [&[][..], &[Pass][..], &[Bet][..], &[Pass, Bet][..]] {
            assert_eq!(History::from_actions(actions).terminal(), None);
        }
    }

    #[test]
    fn bet_then_fold_is_not_misread_as_a_pass_line() {
        // The shape that trips broad substring matching: a fold after a bet
        // must resolve as the opponent folding, not as any showdown line.
        let history = History::from_actions(&[Bet, Pass]);
        assert_eq!(history.terminal(), Some(Terminal::OpponentFolded));
        assert!(!Terminal::OpponentFolded.is_showdown());
    }

    #[test]
    fn history_renders_compact_tokens() {
        let history = History::from_actions(&[Pass, Bet, Bet]);
        assert_eq!(history.to_string(), "pbb");
        assert_eq!(History::new().to_string(), "");
    }

    #[test]
    fn seats_alternate_via_other() {
        assert_eq!(Seat::Player.other(), Seat::Opponent);
        assert_eq!(Seat::Opponent.other(), Seat::Player);
    }
}
