use criterion::{black_box, criterion_group, criterion_main, Criterion};

use memoraid_core::scoring::evaluate;

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    group.bench_function("short_exact", |b| {
        b.iter(|| {
            evaluate(
                black_box("dog fast"),
                black_box("the dog ran fast"),
                black_box(15),
            )
        })
    });

    group.bench_function("no_overlap", |b| {
        b.iter(|| {
            evaluate(
                black_box("completely unrelated words here"),
                black_box("birthday party at the lake"),
                black_box(10),
            )
        })
    });

    let long_reference = "we spent the whole afternoon at the lake house grilling \
                          corn and swimming until the sun went down behind the hills"
        .repeat(4);
    let long_submission = "swimming at the lake house until sundown grilling corn \
                           with everyone there that warm afternoon"
        .repeat(4);

    group.bench_function("long_answers", |b| {
        b.iter(|| {
            evaluate(
                black_box(&long_submission),
                black_box(&long_reference),
                black_box(20),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
