//! Interactive Kuhn Poker binary.
//!
//! Plays a human seat against the scripted machine table, one prompt per
//! turn with the restricted action vocabulary for the position. Hands
//! repeat with chips carried forward until the player quits.
//!
//! Usage:
//!   cargo run --bin play -- [OPTIONS]
//!
//! Options:
//!   --seat <1|2>         Take the first or second seat (default: 1)
//!   --chips <N>          Starting chips per seat (default: 10)
//!   --seed <N>           Random seed (optional)

use std::env;
use std::error::Error;
use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;

use kuhn_sim::engine::{Action, Deck, HandState, Seat, StrategyTable};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut human_seat = Seat::Player;
    let mut chips: i64 = 10;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seat" => {
                i += 1;
                if i < args.len() {
                    human_seat = match args[i].as_str() {
                        "1" => Seat::Player,
                        "2" => Seat::Opponent,
                        other => {
                            eprintln!("Invalid seat: {} (expected 1 or 2)", other);
                            return;
                        }
                    };
                }
            }
            "--chips" | "-c" => {
                i += 1;
                if i < args.len() {
                    chips = args[i].parse().unwrap_or(10);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    if let Err(e) = run(human_seat, chips, seed) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(human_seat: Seat, starting_chips: i64, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let machine_table = StrategyTable::scripted();
    let mut chips = [starting_chips, starting_chips];
    let stdin = io::stdin();

    println!("Welcome to Kuhn Poker!");
    println!("You are acting {}.", match human_seat {
        Seat::Player => "first",
        Seat::Opponent => "second",
    });

    loop {
        let (player_card, opponent_card) = Deck::deal(&mut rng);
        let mut hand = HandState::new(player_card, opponent_card);

        println!();
        println!("Your card: {}. The machine's card is hidden.", hand.card_of(human_seat));
        println!("--- Betting Round ---");

        while let Some(seat) = hand.turn()? {
            let action = if seat == human_seat {
                prompt_action(&stdin, &hand)?
            } else {
                let action =
                    machine_table.decide(hand.card_of(seat), hand.history(), &mut rng)?;
                println!("Machine {}.", describe(&hand, action));
                action
            };
            hand.apply(action)?;
        }

        let outcome = hand.outcome().ok_or("hand ended without an outcome")?;
        let winner_label = if outcome.winner == human_seat {
            "You win"
        } else {
            "Machine wins"
        };
        if outcome.terminal.is_showdown() {
            println!("--- Showdown ---");
            println!(
                "Your {} against the machine's {}.",
                hand.card_of(human_seat),
                hand.card_of(human_seat.other()),
            );
        }
        println!("{} the pot of {} chips.", winner_label, outcome.pot);

        let human = human_seat.index();
        let machine = human_seat.other().index();
        chips[human] += outcome.deltas[human];
        chips[machine] += outcome.deltas[machine];
        println!("--- Chip Counts ---");
        println!("You: {} chips, Machine: {} chips", chips[human], chips[machine]);

        if !prompt_yes_no(&stdin, "Play another hand? (y/n): ")? {
            break;
        }
    }

    println!("Thanks for playing!");
    Ok(())
}

/// Contextual verb for an action, matching the vocabulary of the position.
fn describe(hand: &HandState, action: Action) -> &'static str {
    match (hand.facing_bet(), action) {
        (false, Action::Pass) => "checks",
        (false, Action::Bet) => "bets",
        (true, Action::Pass) => "folds",
        (true, Action::Bet) => "calls",
    }
}

/// Prompt with the restricted vocabulary for the position, rejecting any
/// other input and asking again.
fn prompt_action(stdin: &io::Stdin, hand: &HandState) -> Result<Action, Box<dyn Error>> {
    let (vocabulary, pass_word, bet_word) = if hand.facing_bet() {
        ("call or fold", "fold", "call")
    } else {
        ("check or bet", "check", "bet")
    };

    loop {
        print!("Choose your action ({}): ", vocabulary);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err("input closed".into());
        }
        let word = line.trim().to_lowercase();
        if word == pass_word {
            return Ok(Action::Pass);
        }
        if word == bet_word {
            return Ok(Action::Bet);
        }
        println!("Invalid action. Please try again.");
    }
}

fn prompt_yes_no(stdin: &io::Stdin, question: &str) -> Result<bool, Box<dyn Error>> {
    loop {
        print!("{}", question);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

fn print_help() {
    println!("Interactive Kuhn Poker");
    println!();
    println!("USAGE:");
    println!("  play [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --seat <1|2>     Take the first or second seat (default: 1)");
    println!("  --chips, -c <N>  Starting chips per seat (default: 10)");
    println!("  --seed, -s <N>   Random seed");
    println!("  --help, -h       Show this help");
}
