use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use maze_chase::grids::seeded_maze;
use maze_chase::pathing;
use maze_chase::units::GridDimension;

const SIDE: usize = 350;

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = seeded_maze(GridDimension(SIDE), 1);
        let start = 250 + 250 * SIDE;
        b.iter(|| pathing::Distances::for_grid(&g, start))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = seeded_maze(GridDimension(SIDE), 1);
        let distances = pathing::Distances::for_grid(&g, 250 + 250 * SIDE).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = seeded_maze(GridDimension(SIDE), 1);
        let distances = pathing::Distances::for_grid(&g, 250 + 250 * SIDE).unwrap();
        b.iter(|| pathing::shortest_path(&g, &distances, 0))
    });
}

fn bench_perfect_maze_check(c: &mut Criterion) {
    c.bench_function("is_perfect_maze", |b| {
        let g = seeded_maze(GridDimension(SIDE), 1);
        b.iter(|| pathing::is_perfect_maze(&g))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path,
    bench_perfect_maze_check
);
criterion_main!(benches);
