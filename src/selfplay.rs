//! Self-play game generation.
//!
//! Plays complete games with a random policy: each turn tries the four
//! directions in shuffled order and takes the first one that changes the
//! board. Used for soak testing the rules and for tile statistics.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::board::Direction;
use crate::config::{ConfigError, GameConfig};
use crate::game::{GameController, GameStatus, RandomTiles};
use crate::protocol::notation::encode_board;

/// Errors that stop a self-play run before any game is played.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Moves after which a game is abandoned.
    pub max_moves: usize,
    /// Rules for every game.
    pub game: GameConfig,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 100,
            threads: 4,
            seed: 0,
            max_moves: 100_000,
            game: GameConfig::default(),
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Moves that changed the board.
    pub moves: usize,
    /// Status when the game stopped; `inprogress` means it hit `max_moves`.
    pub status: GameStatus,
    pub max_tile: u32,
    pub tile_sum: u64,
    /// Final position in board notation.
    pub board: String,
}

/// Aggregate statistics over a batch of games.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub games: usize,
    pub won: usize,
    pub over: usize,
    pub unfinished: usize,
    pub avg_moves: f64,
    /// Number of games reaching each highest tile.
    pub max_tiles: BTreeMap<u32, usize>,
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one game to completion (or `max_moves`) with a random policy.
pub fn play_game<R: Rng>(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut R,
) -> Result<GameRecord, ConfigError> {
    let tiles = RandomTiles::new(SmallRng::seed_from_u64(rng.gen()), config.game.four_chance);
    let mut game = GameController::new(config.game.clone(), tiles)?;
    let mut order = Direction::ALL;
    let mut moves = 0;

    while !game.status().is_terminal() && moves < config.max_moves {
        order.shuffle(rng);
        let progressed = order.iter().any(|&d| game.apply_move(d).changed());
        if !progressed {
            break;
        }
        moves += 1;
    }

    let board = game.board();
    Ok(GameRecord {
        game_id,
        moves,
        status: game.status(),
        max_tile: board.max_tile(),
        tile_sum: board.tile_sum(),
        board: encode_board(board),
    })
}

/// Runs self-play and returns all game records ordered by game ID.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    config.game.validate()?;
    let mut games = if config.threads > 1 {
        run_self_play_parallel(config)?
    } else {
        run_self_play_sequential(config)?
    };
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    for i in 0..config.num_games {
        let start = Instant::now();
        let mut rng = game_rng(config.seed, i);
        let game = play_game(config, i, &mut rng)?;
        if !config.quiet {
            log_game(&game, i + 1, config.num_games, start);
        }
        games.push(game);
    }
    Ok(games)
}

/// Parallel self-play: plays games concurrently on a rayon pool.
fn run_self_play_parallel(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let games = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| -> Result<GameRecord, ConfigError> {
                let start = Instant::now();
                let mut rng = game_rng(config.seed, i);
                let game = play_game(config, i, &mut rng)?;
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(&game, n, config.num_games, start);
                }
                Ok(game)
            })
            .collect::<Result<Vec<_>, _>>()
    })?;
    Ok(games)
}

fn log_game(game: &GameRecord, n: usize, total: usize, start: Instant) {
    info!(
        game = n,
        total,
        status = game.status.name(),
        max_tile = game.max_tile,
        moves = game.moves,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "game finished"
    );
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregates a batch of game records.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Default::default()
    };
    let mut total_moves = 0usize;
    for game in games {
        match game.status {
            GameStatus::Won => summary.won += 1,
            GameStatus::Over => summary.over += 1,
            GameStatus::InProgress => summary.unfinished += 1,
        }
        total_moves += game.moves;
        *summary.max_tiles.entry(game.max_tile).or_insert(0) += 1;
    }
    summary.avg_moves = total_moves as f64 / games.len().max(1) as f64;
    summary
}

/// Logs a summary of self-play results.
pub fn log_summary(summary: &Summary) {
    info!(
        games = summary.games,
        won = summary.won,
        over = summary.over,
        unfinished = summary.unfinished,
        avg_moves = summary.avg_moves,
        "self-play summary"
    );
    for (tile, count) in &summary.max_tiles {
        let pct = 100.0 * *count as f64 / summary.games.max(1) as f64;
        info!(tile, count, "max tile reached by {:.1}% of games", pct);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::notation::parse_board;

    fn quick_config() -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 4,
            threads: 1,
            seed: 42,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn play_single_game_completes() {
        let config = quick_config();
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 0, &mut rng).unwrap();

        assert!(game.moves > 0);
        assert!(game.status.is_terminal());
        let board = parse_board(&game.board).unwrap();
        assert_eq!(board.max_tile(), game.max_tile);
        assert_eq!(board.tile_sum(), game.tile_sum);
        if game.status == GameStatus::Over {
            assert!(board.is_stuck());
        }
    }

    #[test]
    fn max_moves_caps_a_game() {
        let config = SelfPlayConfig {
            max_moves: 3,
            ..quick_config()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let game = play_game(&config, 0, &mut rng).unwrap();
        assert_eq!(game.moves, 3);
        assert_eq!(game.status, GameStatus::InProgress);
    }

    #[test]
    fn small_win_tile_is_reachable() {
        let config = SelfPlayConfig {
            game: GameConfig {
                win_tile: 16,
                ..Default::default()
            },
            ..quick_config()
        };
        let games = run_self_play(&config).unwrap();
        assert!(games.iter().all(|g| g.status == GameStatus::Won));
        assert!(games.iter().all(|g| g.max_tile == 16));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_self_play(&quick_config()).unwrap();
        let b = run_self_play(&quick_config()).unwrap();
        let boards_a: Vec<_> = a.iter().map(|g| g.board.clone()).collect();
        let boards_b: Vec<_> = b.iter().map(|g| g.board.clone()).collect();
        assert_eq!(boards_a, boards_b);
    }

    #[test]
    fn parallel_matches_sequential() {
        let sequential = run_self_play(&quick_config()).unwrap();
        let parallel = run_self_play(&SelfPlayConfig {
            threads: 2,
            ..quick_config()
        })
        .unwrap();
        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            assert_eq!(p.game_id, s.game_id);
            assert_eq!(p.board, s.board);
        }
    }

    #[test]
    fn invalid_game_config_is_rejected() {
        let config = SelfPlayConfig {
            game: GameConfig::with_size(1),
            ..quick_config()
        };
        assert!(matches!(
            run_self_play(&config),
            Err(SelfPlayError::Config(ConfigError::InvalidSize(1)))
        ));
    }

    #[test]
    fn summary_counts_outcomes() {
        let record = |status, max_tile, moves| GameRecord {
            game_id: 0,
            moves,
            status,
            max_tile,
            tile_sum: 0,
            board: String::new(),
        };
        let games = vec![
            record(GameStatus::Won, 2048, 900),
            record(GameStatus::Over, 256, 200),
            record(GameStatus::Over, 256, 100),
            record(GameStatus::InProgress, 64, 0),
        ];
        let summary = summarize(&games);
        assert_eq!(summary.games, 4);
        assert_eq!(summary.won, 1);
        assert_eq!(summary.over, 2);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.avg_moves, 300.0);
        assert_eq!(summary.max_tiles.get(&256), Some(&2));
    }

    #[test]
    fn jsonl_has_one_line_per_game() {
        let games = run_self_play(&SelfPlayConfig {
            num_games: 2,
            ..quick_config()
        })
        .unwrap();
        let mut out = Vec::new();
        write_jsonl(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["moves"].as_u64().is_some());
            assert!(value["board"].as_str().unwrap().contains('/'));
        }
    }
}
