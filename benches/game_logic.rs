use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridfall::core::{supply::ActionInput, GameSession, Grid, Piece, SevenBag};
use gridfall::types::{BoardConfig, Direction, GameAction, PieceKind};

struct Idle;

impl ActionInput for Idle {
    fn is_pressed(&self, _: GameAction) -> bool {
        false
    }
    fn is_just_pressed(&self, _: GameAction) -> bool {
        false
    }
}

fn bench_session_tick(c: &mut Criterion) {
    let mut session = GameSession::new(BoardConfig::default(), 12345);

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(16), &Idle);
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let config = BoardConfig::default();

    c.bench_function("try_move_down", |b| {
        b.iter(|| {
            let mut grid = Grid::new(&config);
            let mut piece = Piece::spawn(PieceKind::T, &config);
            piece.try_move(black_box(Direction::Down), &mut grid)
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let config = BoardConfig::default();
    let grid = Grid::new(&config);
    let mut piece = Piece::spawn(PieceKind::T, &config);

    c.bench_function("try_rotate_cw", |b| {
        b.iter(|| piece.try_rotate(black_box(true), true, &grid))
    });
}

fn bench_bag_draw(c: &mut Criterion) {
    let mut bag = SevenBag::new(12345);

    c.bench_function("bag_draw", |b| b.iter(|| black_box(bag.draw())));
}

criterion_group!(
    benches,
    bench_session_tick,
    bench_try_move,
    bench_try_rotate,
    bench_bag_draw
);
criterion_main!(benches);
