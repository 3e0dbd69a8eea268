use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use slidemerge::board::{Board, Direction};
use slidemerge::config::GameConfig;
use slidemerge::game::{GameController, RandomTiles};
use slidemerge::protocol::notation::{encode_board, parse_board};
use slidemerge::selfplay::{play_game, run_self_play, SelfPlayConfig};

const MIDGAME: &str = "2,4,8,16/4,0,2,32/0,2,2,64/2,0,4,128";

fn bench_slide_all_directions(c: &mut Criterion) {
    let board = parse_board(MIDGAME).unwrap();
    c.bench_function("slide_4_directions", |b| {
        b.iter(|| {
            for dir in Direction::ALL {
                let mut scratch = board.clone();
                black_box(scratch.slide(black_box(dir), 2048));
            }
        })
    });
}

fn bench_slide_large_board(c: &mut Criterion) {
    let n = 16;
    let rows: Vec<Vec<u32>> = (0..n)
        .map(|r| (0..n).map(|col| if (r + col) % 3 == 0 { 0 } else { 2 << ((r * col) % 5) }).collect())
        .collect();
    let board = Board::from_rows(&rows).unwrap();
    c.bench_function("slide_left_16x16", |b| {
        b.iter(|| {
            let mut scratch = board.clone();
            scratch.slide(black_box(Direction::Left), 2048)
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = parse_board(MIDGAME).unwrap();
    c.bench_function("rotate_quarter_turn", |b| {
        b.iter(|| black_box(&board).rotated(black_box(1)))
    });
}

fn bench_is_stuck(c: &mut Criterion) {
    let board = parse_board("2,4,8,16/4,8,16,32/8,16,32,64/16,32,64,128").unwrap();
    c.bench_function("is_stuck_full_board", |b| {
        b.iter(|| black_box(&board).is_stuck())
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let board = parse_board(MIDGAME).unwrap();
    c.bench_function("apply_move_with_spawn", |b| {
        let tiles = RandomTiles::new(SmallRng::seed_from_u64(7), 0.1);
        let mut game = GameController::from_board(GameConfig::default(), board.clone(), tiles).unwrap();
        b.iter(|| {
            game.set_board(board.clone()).unwrap();
            game.apply_move(black_box(Direction::Left))
        })
    });
}

fn bench_notation(c: &mut Criterion) {
    let board = parse_board(MIDGAME).unwrap();
    c.bench_function("notation_encode_parse", |b| {
        b.iter(|| parse_board(&encode_board(black_box(&board))))
    });
}

fn bench_selfplay_game(c: &mut Criterion) {
    let config = SelfPlayConfig {
        quiet: true,
        ..Default::default()
    };
    let mut group = c.benchmark_group("selfplay");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("single_game_4x4", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| play_game(black_box(&config), 0, &mut rng))
    });
    group.bench_function("batch_32_games_4_threads", |b| {
        let batch = SelfPlayConfig {
            num_games: 32,
            threads: 4,
            seed: 42,
            ..config.clone()
        };
        b.iter(|| run_self_play(black_box(&batch)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_slide_all_directions,
    bench_slide_large_board,
    bench_rotate,
    bench_is_stuck,
    bench_apply_move,
    bench_notation,
    bench_selfplay_game,
);
criterion_main!(benches);
