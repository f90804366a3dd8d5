use cell_refine::edges::EdgeFieldGenerator;
use cell_refine::image::ImageF32;
use cell_refine::refine::{to_vector, Objective};
use cell_refine::score::ScoringField;
use cell_refine::types::{Bounds, Point};
use cell_refine::voronoi::build_tessellation;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn jittered_grid(bounds: Bounds, cols: usize, rows: usize) -> Vec<Point> {
    let tw = bounds.width() as f32 / cols as f32;
    let th = bounds.height() as f32 / rows as f32;
    let mut out = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            let jx = ((c * 7 + r * 3) % 11) as f32 - 5.0;
            let jy = ((c * 5 + r * 9) % 13) as f32 - 6.0;
            out.push(Point::new((c as f32 + 0.5) * tw + jx, (r as f32 + 0.5) * th + jy));
        }
    }
    out
}

fn bench_tessellation(c: &mut Criterion) {
    let bounds = Bounds::new(640, 480).expect("valid bounds");
    let seeds = jittered_grid(bounds, 12, 9);

    c.bench_function("build_tessellation_108_seeds_640x480", |b| {
        b.iter(|| {
            let tess = build_tessellation(black_box(&seeds), bounds);
            black_box(tess.len());
        });
    });
}

fn bench_edge_field(c: &mut Criterion) {
    let bounds = Bounds::new(640, 480).expect("valid bounds");
    let tess = build_tessellation(&jittered_grid(bounds, 12, 9), bounds);
    let mut generator = EdgeFieldGenerator::new();

    c.bench_function("edge_field_w10_640x480", |b| {
        b.iter(|| {
            let edge = generator.generate(black_box(&tess), 10);
            black_box(edge.peak_distance());
        });
    });
}

fn bench_objective(c: &mut Criterion) {
    let bounds = Bounds::new(640, 480).expect("valid bounds");
    let seeds = jittered_grid(bounds, 12, 9);
    let field = ImageF32::from_fn(640, 480, |x, y| ((x * 3 + y * 7) % 251) as f32);
    let scoring = ScoringField::new(field).expect("valid field");
    let mut objective = Objective::new(&scoring, 10);
    let v = to_vector(&seeds);

    c.bench_function("objective_evaluate_108_seeds_640x480", |b| {
        b.iter(|| black_box(objective.evaluate(black_box(&v))));
    });
}

criterion_group!(benches, bench_tessellation, bench_edge_field, bench_objective);
criterion_main!(benches);
