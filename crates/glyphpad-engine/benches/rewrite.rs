use criterion::{Criterion, criterion_group, criterion_main};
use glyphpad_engine::RuleTable;

fn bench_rewrite_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");
    group.sample_size(10);

    let table = RuleTable::egyptological();
    let text = "h.tp dj nswt wsjr nb Ddw nTr x.nty jmntjw 12 ".repeat(128);

    group.bench_function("egyptological_table", |b| {
        b.iter(|| {
            let result = table.rewrite(std::hint::black_box(&text), std::hint::black_box(40));
            std::hint::black_box(result);
        });
    });

    group.bench_function("already_substituted", |b| {
        let (substituted, _) = table.rewrite(&text, 0);
        b.iter(|| {
            let result = table.rewrite(std::hint::black_box(&substituted), std::hint::black_box(40));
            std::hint::black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_rewrite_operations);
criterion_main!(benches);
