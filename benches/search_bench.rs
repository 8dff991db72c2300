use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hopset::board::Board;
use hopset::game::{Player, PlayerKind};
use hopset::search::Searcher;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn bench_search(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut b = Board::random(20, &mut rng).unwrap();
    // punch a few holes so chains get longer than one jump
    for (x, y) in [(0, 0), (4, 7), (12, 3), (15, 15), (18, 9)] {
        b.set(x, y, None).unwrap();
    }
    let me = Player::new(1, PlayerKind::Computer, "me").unwrap();
    let opp = Player::new(2, PlayerKind::Computer, "opp").unwrap();
    c.bench_function("choose_start_20x20", |ben| {
        ben.iter(|| {
            let mut s = Searcher::default();
            let r = s.choose_start(black_box(&b), &me, &opp);
            black_box(r.map(|r| r.nodes))
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
