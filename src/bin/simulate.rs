//! Batch simulation binary.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --hands <N>          Number of hands to play (default: 1000)
//!   --chips <N>          Starting chips per seat (default: 100)
//!   --seed <N>           Random seed (optional, for reproducible runs)
//!   --config <FILE>      Session configuration JSON file (optional)
//!   --output <FILE>      Write the full report as JSON (optional)
//!   --log                Print one line per hand
//!   --quiet              Suppress the banner and progress bar

use std::env;

use indicatif::ProgressBar;

use kuhn_sim::session::{Session, SessionConfig, SessionReport};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut hands: Option<u64> = None;
    let mut chips: Option<i64> = None;
    let mut seed: Option<u64> = None;
    let mut config_file: Option<String> = None;
    let mut output_file: Option<String> = None;
    let mut show_log = false;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--hands" | "-n" => {
                i += 1;
                if i < args.len() {
                    hands = args[i].parse().ok();
                }
            }
            "--chips" | "-c" => {
                i += 1;
                if i < args.len() {
                    chips = args[i].parse().ok();
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "--log" | "-l" => {
                show_log = true;
            }
            "--quiet" | "-q" => {
                quiet = true;
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

    // Load or create configuration; explicit flags override the file.
    let mut config = if let Some(path) = &config_file {
        match SessionConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                return;
            }
        }
    } else {
        SessionConfig::new()
    };
    if let Some(n) = hands {
        config.hands = n;
    }
    if let Some(c) = chips {
        config.starting_chips = c;
    }
    if let Some(s) = seed {
        config.seed = Some(s);
    }
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return;
    }

    let total_hands = config.hands;
    if !quiet {
        println!("=================================================");
        println!("  Kuhn Poker Session Simulator");
        println!("=================================================");
        println!();
        println!("Hands:          {}", total_hands);
        println!("Starting chips: {}", config.starting_chips);
        match config.seed {
            Some(s) => println!("Seed:           {}", s),
            None => println!("Seed:           (entropy)"),
        }
        println!();
    }

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid strategy table: {}", e);
            return;
        }
    };

    let bar = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total_hands)
    };
    for _ in 0..total_hands {
        if let Err(e) = session.play_hand() {
            bar.finish_and_clear();
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    let report = SessionReport::from_session(&session);

    if show_log {
        for record in &report.log {
            println!("{}", record);
        }
        println!();
    }

    println!("{}", report.render());

    if let Some(path) = &output_file {
        match report.save_to_file(path) {
            Ok(()) => println!("Report saved to {}", path),
            Err(e) => eprintln!("Error saving report: {}", e),
        }
    }
}

fn print_help() {
    println!("Kuhn Poker Session Simulator");
    println!();
    println!("USAGE:");
    println!("  simulate [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --hands, -n <N>     Number of hands to play (default: 1000)");
    println!("  --chips, -c <N>     Starting chips per seat (default: 100)");
    println!("  --seed, -s <N>      Random seed for reproducible runs");
    println!("  --config <FILE>     Session configuration JSON file");
    println!("  --output, -o <FILE> Write the full report as JSON");
    println!("  --log, -l           Print one line per hand");
    println!("  --quiet, -q         Suppress the banner and progress bar");
    println!("  --help, -h          Show this help");
}
