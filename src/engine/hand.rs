//! The per-hand betting state machine.
//!
//! This is the core of the crate: it owns all per-hand mutable state
//! (cards, history, pot, per-seat contributions), advances one legal
//! action at a time, and resolves the terminal outcome.
//!
//! ## Hand flow
//!
//! ```text
//! antes (1 chip each, pot = 2)
//! Player (first to act)
//! ├── Pass
//! │   └── Opponent
//! │       ├── Pass → checked showdown (pot = 2)
//! │       └── Bet
//! │           └── Player
//! │               ├── Pass → Opponent wins by fold (pot = 3)
//! │               └── Bet  → called showdown (pot = 4)
//! └── Bet
//!     └── Opponent
//!         ├── Pass → Player wins by fold (pot = 3)
//!         └── Bet  → called showdown (pot = 4)
//! ```
//!
//! A hand terminates within three actions by construction. Reaching any
//! history outside this tree is an internal invariant violation and is
//! surfaced as a fatal [`StateError`], never silently resolved.

use rand::Rng;
use std::fmt;

use crate::engine::action::{Action, History, Seat, Terminal};
use crate::engine::card::Card;
use crate::engine::observer::{Facing, ObservationModel};
use crate::engine::strategy::{ConfigError, StrategyTable};

/// Mandatory contribution from each seat before betting begins.
const ANTE: u32 = 1;
/// Cost of a bet or call.
const BET: u32 = 1;
/// A reachable hand never takes more actions than this.
const MAX_TURNS: usize = 3;

/// Internal invariant violations of the state machine.
///
/// These are fatal: they indicate a defect, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// An action was applied to a hand that already terminated.
    HandComplete,
    /// The history reached a shape outside the betting tree.
    InvalidHistory(String),
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::HandComplete => write!(f, "action applied to a completed hand"),
            StateError::InvalidHistory(history) => {
                write!(f, "history '{}' is outside the betting tree", history)
            }
        }
    }
}

impl std::error::Error for StateError {}

/// Any error a full hand playout can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum HandError {
    /// A strategy table was missing an entry or carried invalid weights.
    Config(ConfigError),
    /// The state machine violated one of its invariants.
    State(StateError),
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandError::Config(e) => write!(f, "{}", e),
            HandError::State(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HandError {}

impl From<ConfigError> for HandError {
    fn from(e: ConfigError) -> Self {
        HandError::Config(e)
    }
}

impl From<StateError> for HandError {
    fn from(e: StateError) -> Self {
        HandError::State(e)
    }
}

/// The resolved result of a terminated hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandOutcome {
    /// Seat awarded the pot.
    pub winner: Seat,
    /// Shape the hand terminated in.
    pub terminal: Terminal,
    /// Final pot size in chips.
    pub pot: u32,
    /// The full action history.
    pub history: History,
    /// Net chip change per seat (antes and bets included), indexed by
    /// [`Seat::index`]. Always sums to zero.
    pub deltas: [i64; 2],
}

/// Per-hand mutable state, advanced one action at a time.
///
/// Constructing the hand collects the antes exactly once; thereafter
/// [`HandState::apply`] moves the machine and [`HandState::outcome`]
/// resolves it once a terminal shape is reached. [`HandState::play_out`]
/// drives a whole hand from the seats' strategy tables.
#[derive(Debug, Clone)]
pub struct HandState {
    player_card: Card,
    opponent_card: Card,
    history: History,
    pot: u32,
    contributions: [u32; 2],
}

impl HandState {
    /// Start a hand: both seats post the ante, pot opens at 2.
    pub fn new(player_card: Card, opponent_card: Card) -> Self {
        Self {
            player_card,
            opponent_card,
            history: History::new(),
            pot: 2 * ANTE,
            contributions: [ANTE, ANTE],
        }
    }

    /// The player seat's card.
    pub fn player_card(&self) -> Card {
        self.player_card
    }

    /// The opponent seat's card.
    pub fn opponent_card(&self) -> Card {
        self.opponent_card
    }

    /// The card held by `seat`.
    pub fn card_of(&self, seat: Seat) -> Card {
        match seat {
            Seat::Player => self.player_card,
            Seat::Opponent => self.opponent_card,
        }
    }

    /// Current pot size in chips.
    pub fn pot(&self) -> u32 {
        self.pot
    }

    /// The actions taken so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether the next action responds to a live bet (so Pass means fold
    /// and Bet means call).
    pub fn facing_bet(&self) -> bool {
        matches!(
            self.history.as_slice(),
            [Action::Bet] | [Action::Pass, Action::Bet]
        )
    }

    /// Whose turn it is.
    ///
    /// `Ok(None)` once the hand has terminated. Any history outside the
    /// betting tree fails with [`StateError::InvalidHistory`].
    pub fn turn(&self) -> Result<Option<Seat>, StateError> {
        if self.history.terminal().is_some() {
            return Ok(None);
        }
        match self.history.as_slice() {
            [] => Ok(Some(Seat::Player)),
            [_] => Ok(Some(Seat::Opponent)),
            [Action::Pass, Action::Bet] => Ok(Some(Seat::Player)),
            _ => Err(StateError::InvalidHistory(self.history.to_string())),
        }
    }

    /// Apply one action for the seat whose turn it is.
    ///
    /// A bet or call pays one chip into the pot immediately; a pass pays
    /// nothing. Returns the terminal shape if this action ended the hand.
    pub fn apply(&mut self, action: Action) -> Result<Option<Terminal>, StateError> {
        let seat = self.turn()?.ok_or(StateError::HandComplete)?;
        self.history.push(action);
        if action == Action::Bet {
            self.pot += BET;
            self.contributions[seat.index()] += BET;
        }
        Ok(self.history.terminal())
    }

    /// Resolve the hand, if it has terminated.
    ///
    /// At showdown the strictly higher card wins the full pot; at a fold
    /// the non-folding seat wins it unconditionally, whatever the cards.
    pub fn outcome(&self) -> Option<HandOutcome> {
        let terminal = self.history.terminal()?;
        let winner = match terminal {
            Terminal::CheckedShowdown | Terminal::CalledShowdown => {
                if self.player_card > self.opponent_card {
                    Seat::Player
                } else {
                    Seat::Opponent
                }
            }
            Terminal::OpponentFolded => Seat::Player,
            Terminal::PlayerFolded => Seat::Opponent,
        };

        let mut deltas = [0i64; 2];
        for seat in [Seat::Player, Seat::Opponent] {
            let paid = self.contributions[seat.index()] as i64;
            deltas[seat.index()] = if seat == winner {
                self.pot as i64 - paid
            } else {
                -paid
            };
        }

        Some(HandOutcome {
            winner,
            terminal,
            pot: self.pot,
            history: self.history.clone(),
            deltas,
        })
    }

    /// Play the hand to termination.
    ///
    /// Each turn consults the acting seat's strategy table; every opponent
    /// action is recorded into `observer` keyed by the opponent's card and
    /// the context *before* the action.
    pub fn play_out<R: Rng>(
        mut self,
        player_table: &StrategyTable,
        opponent_table: &StrategyTable,
        observer: &mut ObservationModel,
        rng: &mut R,
    ) -> Result<HandOutcome, HandError> {
        let mut turns = 0;
        while let Some(seat) = self.turn()? {
            assert!(turns < MAX_TURNS, "hand exceeded {} turns", MAX_TURNS);
            turns += 1;

            let card = self.card_of(seat);
            let table = match seat {
                Seat::Player => player_table,
                Seat::Opponent => opponent_table,
            };
            let action = table.decide(card, &self.history, rng)?;

            if seat == Seat::Opponent {
                let facing = Facing::from_history(&self.history)
                    .ok_or_else(|| StateError::InvalidHistory(self.history.to_string()))?;
                observer.record(card, facing, action);
            }

            self.apply(action)?;
        }

        self.outcome()
            .ok_or_else(|| HandError::State(StateError::InvalidHistory(self.history.to_string())))
    }

    #[cfg(test)]
    fn with_history(player_card: Card, opponent_card: Card, actions: &[Action]) -> Self {
        let mut hand = Self::new(player_card, opponent_card);
        for &action in actions {
            // Tests may build unreachable shapes on purpose; bypass apply.
            hand.history.push(action);
            if action == Action::Bet {
                hand.pot += BET;
            }
        }
        hand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use Action::{Bet, Pass};

    fn run_line(
        player_card: Card,
        opponent_card: Card,
        player_table: &StrategyTable,
        opponent_table: &StrategyTable,
    ) -> HandOutcome {
        let mut rng = StdRng::seed_from_u64(0);
        let mut observer = ObservationModel::new();
        HandState::new(player_card, opponent_card)
            .play_out(player_table, opponent_table, &mut observer, &mut rng)
            .unwrap()
    }

    #[test]
    fn antes_open_the_pot_at_two() {
        let hand = HandState::new(Card::King, Card::Jack);
        assert_eq!(hand.pot(), 2);
        assert!(hand.history().is_empty());
        assert_eq!(hand.turn().unwrap(), Some(Seat::Player));
        assert!(!hand.facing_bet());
    }

    #[test]
    fn checked_showdown_awards_pot_to_higher_card() {
        // J vs K through [Pass, Pass]: only the antes move.
        let outcome = run_line(
            Card::Jack,
            Card::King,
            &StrategyTable::always(Pass),
            &StrategyTable::always(Pass),
        );
        assert_eq!(outcome.terminal, Terminal::CheckedShowdown);
        assert_eq!(outcome.winner, Seat::Opponent);
        assert_eq!(outcome.pot, 2);
        assert_eq!(outcome.deltas, [-1, 1]);
        assert_eq!(outcome.history.to_string(), "pp");
    }

    #[test]
    fn check_bet_call_reaches_showdown_for_four_chips() {
        // K vs J through [Pass, Bet, Bet]; the call ends the hand directly
        // with no further turn.
        let player_table = StrategyTable::new()
            .with(Card::King, History::new(), 1.0, 0.0)
            .with(Card::King, History::from_actions(&[Pass, Bet]), 0.0, 1.0);
        let opponent_table = StrategyTable::always(Bet);

        let outcome = run_line(Card::King, Card::Jack, &player_table, &opponent_table);
        assert_eq!(outcome.terminal, Terminal::CalledShowdown);
        assert_eq!(outcome.winner, Seat::Player);
        assert_eq!(outcome.pot, 4);
        assert_eq!(outcome.deltas, [2, -2]);
        assert_eq!(outcome.history.to_string(), "pbb");
    }

    #[test]
    fn bet_call_showdown_pays_two_each_way() {
        let outcome = run_line(
            Card::Queen,
            Card::King,
            &StrategyTable::always(Bet),
            &StrategyTable::always(Bet),
        );
        assert_eq!(outcome.terminal, Terminal::CalledShowdown);
        assert_eq!(outcome.winner, Seat::Opponent);
        assert_eq!(outcome.pot, 4);
        assert_eq!(outcome.deltas, [-2, 2]);
    }

    #[test]
    fn opponent_fold_pays_the_bettor_regardless_of_cards() {
        // Player holds the worst card and still wins when the opponent
        // folds to the opening bet.
        let outcome = run_line(
            Card::Jack,
            Card::King,
            &StrategyTable::always(Bet),
            &StrategyTable::always(Pass),
        );
        assert_eq!(outcome.terminal, Terminal::OpponentFolded);
        assert_eq!(outcome.winner, Seat::Player);
        assert_eq!(outcome.pot, 3);
        assert_eq!(outcome.deltas, [1, -1]);
        assert_eq!(outcome.history.to_string(), "bp");
    }

    #[test]
    fn player_fold_after_check_raise_line_pays_the_bettor() {
        // The edge sequence: check, bet, fold. The folding player loses
        // only the ante even though the pot holds the opponent's bet.
        let outcome = run_line(
            Card::King,
            Card::Jack,
            &StrategyTable::always(Pass),
            &StrategyTable::always(Bet),
        );
        assert_eq!(outcome.terminal, Terminal::PlayerFolded);
        assert_eq!(outcome.winner, Seat::Opponent);
        assert_eq!(outcome.pot, 3);
        assert_eq!(outcome.deltas, [-1, 1]);
        assert_eq!(outcome.history.to_string(), "pbp");
    }

    #[test]
    fn every_line_is_zero_sum_and_within_the_grammar() {
        let mut rng = StdRng::seed_from_u64(17);
        let table = StrategyTable::card_strength();
        let mut observer = ObservationModel::new();

        for _ in 0..2_000 {
            let (player_card, opponent_card) = crate::engine::card::Deck::deal(&mut rng);
            let outcome = HandState::new(player_card, opponent_card)
                .play_out(&table, &table, &mut observer, &mut rng)
                .unwrap();

            assert_eq!(outcome.deltas[0] + outcome.deltas[1], 0);
            let len = outcome.history.len();
            assert!(len == 2 || len == 3, "history length {} out of range", len);
            assert_eq!(outcome.history.terminal(), Some(outcome.terminal));
            if outcome.terminal.is_showdown() {
                let higher = if player_card > opponent_card {
                    Seat::Player
                } else {
                    Seat::Opponent
                };
                assert_eq!(outcome.winner, higher);
            }
        }
    }

    #[test]
    fn opponent_actions_are_recorded_with_the_preceding_context() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut observer = ObservationModel::new();

        // Forced line [Bet, Pass]: opponent folds facing a bet.
        HandState::new(Card::Queen, Card::Jack)
            .play_out(
                &StrategyTable::always(Bet),
                &StrategyTable::always(Pass),
                &mut observer,
                &mut rng,
            )
            .unwrap();

        assert_eq!(observer.count(Card::Jack, Facing::Bet, Action::Pass), 1);
        assert_eq!(observer.total(), 1);
    }

    #[test]
    fn acting_on_a_completed_hand_is_an_error() {
        let mut hand = HandState::new(Card::King, Card::Queen);
        hand.apply(Bet).unwrap();
        let terminal = hand.apply(Bet).unwrap();
        assert_eq!(terminal, Some(Terminal::CalledShowdown));
        assert_eq!(hand.apply(Pass).unwrap_err(), StateError::HandComplete);
    }

    #[test]
    fn histories_outside_the_tree_are_fatal() {
        let hand = HandState::with_history(Card::King, Card::Jack, &[Bet, Bet, Bet]);
        assert!(matches!(
            hand.turn().unwrap_err(),
            StateError::InvalidHistory(_)
        ));

        let mut rng = StdRng::seed_from_u64(0);
        let mut observer = ObservationModel::new();
        let err = HandState::with_history(Card::King, Card::Jack, &[Pass, Pass, Pass])
            .play_out(
                &StrategyTable::card_strength(),
                &StrategyTable::card_strength(),
                &mut observer,
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, HandError::State(StateError::InvalidHistory(_))));
    }
}
