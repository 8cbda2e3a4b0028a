use criterion::{Criterion, criterion_group, criterion_main};
use snake_engine::{
    Direction, MemoryHighScoreStore, Phase, SessionRng, SnakeEngine, SnakeSettings,
};
use std::hint::black_box;

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake");

    group.bench_function("tick_1000_random_turns", |b| {
        b.iter(|| {
            let mut engine = SnakeEngine::new(
                SnakeSettings::default(),
                SessionRng::new(42),
                MemoryHighScoreStore::new(0),
            )
            .unwrap();
            let mut control = SessionRng::new(7);
            for _ in 0..1000 {
                match engine.phase() {
                    Phase::Ready => {
                        engine.start();
                    }
                    Phase::GameOver => engine.restart(),
                    _ => {}
                }
                engine.request_direction(DIRECTIONS[control.random_range(0..4)]);
                black_box(engine.tick());
            }
            black_box(engine.score())
        })
    });

    group.bench_function("snapshot", |b| {
        let mut engine = SnakeEngine::new(
            SnakeSettings::default(),
            SessionRng::new(42),
            MemoryHighScoreStore::new(0),
        )
        .unwrap();
        engine.start();
        b.iter(|| black_box(engine.snapshot()))
    });

    group.finish();
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
