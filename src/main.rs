//! slidemerge -- a sliding-tile merge puzzle engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.
//!
//! Usage:
//!   slidemerge [--config FILE] [--seed N]

use std::env;
use std::io::{self, BufRead};
use std::process;

use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use slidemerge::config::GameConfig;
use slidemerge::engine::Engine;
use slidemerge::protocol::parser::{parse_command, Command};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");
}

/// Runs the protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config = GameConfig::default();
    let mut seed = 0u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("--config needs a file path");
                    process::exit(2);
                };
                config = match GameConfig::load(path) {
                    Ok(c) => c,
                    Err(e) => {
                        error!(path = %path, "{}", e);
                        process::exit(2);
                    }
                };
            }
            "--seed" => {
                i += 1;
                seed = match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(s) => s,
                    None => {
                        error!("--seed needs an unsigned integer");
                        process::exit(2);
                    }
                };
            }
            other => {
                error!(argument = other, "unknown argument");
                eprintln!("Usage: slidemerge [--config FILE] [--seed N]");
                process::exit(2);
            }
        }
        i += 1;
    }

    let mut engine = match Engine::new(config, seed) {
        Ok(e) => e,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            Command::IsReady => engine.handle_isready(&mut out),
            Command::NewGame => match engine.new_game() {
                Ok(()) => engine.handle_show(&mut out),
                Err(e) => {
                    warn!("newgame: {}", e);
                    engine.handle_error(&e, &mut out)
                }
            },
            Command::Move(direction) => engine.handle_move(direction, &mut out),
            Command::Position { board } => match engine.set_position(&board) {
                Ok(()) => engine.handle_show(&mut out),
                Err(e) => {
                    warn!("position: {}", e);
                    engine.handle_error(&e, &mut out)
                }
            },
            Command::SetOption { name, value } => match engine.set_option(name, value) {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!("setoption: {}", e);
                    engine.handle_error(&e, &mut out)
                }
            },
            Command::Show => engine.handle_show(&mut out),
            Command::State => engine.handle_state(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = written {
            error!("failed to write response: {}", e);
            break;
        }
    }
}
