//! Self-play CLI.
//!
//! Plays games with a random policy and outputs one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 100)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --max-moves N   Abandon a game after N moves (default: 100000)
//!   --config FILE   Game rules as JSON (default: 4x4, 2048)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use slidemerge::config::GameConfig;
use slidemerge::selfplay::{self, SelfPlayConfig};

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");
}

/// Parses the value following a flag or exits with usage.
fn flag_value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|s| s.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("invalid or missing value for {}", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut config_path: Option<String> = None;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = flag_value(&args, i, "--games");
            }
            "--threads" => {
                i += 1;
                config.threads = flag_value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = flag_value(&args, i, "--seed");
            }
            "--max-moves" => {
                i += 1;
                config.max_moves = flag_value(&args, i, "--max-moves");
            }
            "--config" => {
                i += 1;
                config_path = Some(flag_value(&args, i, "--config"));
            }
            "--output" => {
                i += 1;
                output_path = Some(flag_value(&args, i, "--output"));
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    init_tracing(config.quiet);

    if let Some(path) = &config_path {
        config.game = match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!(path = %path, "{}", e);
                process::exit(1);
            }
        };
    }

    info!(
        games = config.num_games,
        threads = config.threads,
        size = config.game.size,
        win_tile = config.game.win_tile,
        "starting self-play"
    );

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(g) => g,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    info!(
        games = games.len(),
        secs = elapsed.as_secs_f64(),
        "completed self-play"
    );
    if !config.quiet {
        selfplay::log_summary(&selfplay::summarize(&games));
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };
    if let Err(e) = written {
        error!("failed to write output: {}", e);
        process::exit(1);
    }
    if let Some(path) = output_path {
        info!(games = games.len(), path = %path, "wrote game records");
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 100)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --max-moves N    Abandon a game after N moves (default: 100000)");
    eprintln!("  --config FILE    Game rules as JSON (default: 4x4, 2048)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
