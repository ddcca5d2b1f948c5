use std::hint::black_box;

use arbor::testing::harness::Harness;
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};

fn rows(n: usize) -> Value {
    let children: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "type": "Row",
                "key": format!("row{i}"),
                "children": [
                    {"type": "SizedBox", "width": 40, "height": 20},
                    {"type": "Expanded", "child": {"type": "Text", "text": "Lorem ipsum dolor sit amet, consectetur adipiscing elit."}},
                    {"type": "Container", "key": format!("badge{i}"), "width": 20, "height": 20, "color": "red"},
                ],
            })
        })
        .collect();
    json!({"type": "Column", "children": children})
}

fn benchmark_full_frame(c: &mut Criterion) {
    c.bench_function("full_frame_200_rows", |b| {
        let record = rows(200);
        b.iter(|| {
            let h = Harness::new(record.clone(), 800.0, 10_000.0).expect("Failed to build tree");
            black_box(h.size("row199").expect("missing row"));
        });
    });
}

fn benchmark_incremental_paint(c: &mut Criterion) {
    c.bench_function("incremental_paint_one_badge", |b| {
        let mut h = Harness::new(rows(200), 800.0, 10_000.0).expect("Failed to build tree");
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            let color = if flip { "blue" } else { "red" };
            h.update(
                "badge100",
                json!({"type": "Container", "key": "badge100", "width": 20, "height": 20, "color": color}),
            )
            .expect("Failed to update");
            black_box(h.frame().expect("Failed to paint"));
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_full_frame, benchmark_incremental_paint
}
criterion_main!(benches);
