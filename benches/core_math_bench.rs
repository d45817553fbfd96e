use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexSet;
use statboard::api::{DashboardConfig, DashboardEngine, ScatterProjection, recompute_views};
use statboard::core::{Dataset, LinearScale, Record, RecordId, StreamTable, Viewport, stack_stream};
use statboard::interaction::{BrushRect, SelectionEvent, SelectionState};
use statboard::render::NullRenderer;
use std::hint::black_box;

const CATEGORIES: [&str; 8] = [
    "Fire", "Water", "Grass", "Psychic", "Dragon", "Rock", "Ghost", "Steel",
];

fn synthetic_dataset(count: usize) -> Dataset {
    let records: Vec<Record> = (0..count)
        .map(|i| {
            let t = i as f64;
            let stat = |offset: f64| 20.0 + ((t * 7.3 + offset) % 160.0);
            Record::new(
                RecordId::for_row(i, &format!("Creature {i}")),
                format!("Creature {i}"),
                CATEGORIES[i % CATEGORIES.len()],
                (i % 7 + 1) as u32,
            )
            .with_stats([
                stat(0.0),
                stat(13.0),
                stat(29.0),
                stat(41.0),
                stat(53.0),
                stat(67.0),
            ])
            .notable(i % 97 == 0)
        })
        .collect();
    Dataset::new(records).expect("valid generated dataset")
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 250.0), (587.0, 0.0));

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.apply(black_box(123.4));
            let _ = scale.invert(px);
        })
    });
}

fn bench_brush_selection_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);
    let projection = ScatterProjection::project(&dataset, 900.0, 600.0, |_| 4.0);
    let rect = BrushRect::new(120.0, 80.0, 640.0, 420.0).expect("valid rect");
    let event = SelectionEvent::BrushEnd(Some(rect));

    c.bench_function("brush_selection_10k", |b| {
        b.iter(|| {
            let mut state = SelectionState::default();
            let _ = state
                .apply(black_box(&event), black_box(&projection.points))
                .expect("brush applies");
        })
    });
}

fn bench_recompute_views_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);
    let selection: IndexSet<RecordId> = dataset
        .records()
        .step_by(3)
        .map(|record| record.id.clone())
        .collect();

    c.bench_function("recompute_views_10k", |b| {
        b.iter(|| {
            let _ = recompute_views(black_box(&dataset), black_box(&selection), 10);
        })
    });
}

fn bench_stack_stream_10k(c: &mut Criterion) {
    let dataset = synthetic_dataset(10_000);
    let table = StreamTable::from_dataset(&dataset);

    c.bench_function("stack_stream_10k", |b| {
        b.iter(|| {
            let _ = stack_stream(black_box(&table));
        })
    });
}

fn bench_engine_frame_2k(c: &mut Criterion) {
    let dataset = synthetic_dataset(2_000);
    let config = DashboardConfig::new(Viewport::new(1600, 900));
    let mut engine =
        DashboardEngine::new(NullRenderer::default(), dataset, config).expect("engine init");
    engine
        .brush_between((700.0, 150.0), (1200.0, 600.0))
        .expect("brush");
    engine.advance_animations(1_000.0);

    c.bench_function("engine_frame_2k", |b| {
        b.iter(|| {
            let _ = engine
                .build_render_frame()
                .expect("frame should build");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_brush_selection_10k,
    bench_recompute_views_10k,
    bench_stack_stream_10k,
    bench_engine_frame_2k
);
criterion_main!(benches);
