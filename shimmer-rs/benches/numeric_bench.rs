use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shimmer::{
    resolve_index, resolve_numeric, resolve_value, resolve_wide_integer, IndexBounds, ParseConfig,
    ParseFlags,
};

const INPUTS: [&str; 8] = ["42", "-17", "0xDEADBEEF", "9223372036854775807", "3.14159", "1e-9", "true", "garbage"];

fn bench_numeric(c: &mut Criterion) {
    let cfg = ParseConfig::default();
    let flags = ParseFlags::DEFAULT;

    let mut g = c.benchmark_group("numeric");

    g.bench_function("resolve_numeric_mixed", |b| {
        b.iter(|| {
            for text in INPUTS {
                let _ = resolve_numeric(black_box(text), flags, &cfg);
            }
        })
    });
    g.bench_function("resolve_wide_integer_decimal", |b| {
        b.iter(|| resolve_wide_integer(black_box("123456789012"), flags, &cfg))
    });
    g.bench_function("resolve_wide_integer_hex", |b| {
        b.iter(|| resolve_wide_integer(black_box("0x7FFFFFFFFFFFFFFF"), flags, &cfg))
    });
    g.bench_function("resolve_numeric_failure_verbose", |b| {
        b.iter(|| resolve_numeric(black_box("12x4"), flags | ParseFlags::VERBOSE, &cfg))
    });

    g.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let cfg = ParseConfig::default();
    let bounds = IndexBounds::for_count(100, true);

    let mut g = c.benchmark_group("resolve");

    g.bench_function("resolve_value_integer", |b| {
        b.iter(|| resolve_value(black_box("100000"), ParseFlags::DEFAULT, &cfg))
    });
    g.bench_function("resolve_value_guid", |b| {
        b.iter(|| resolve_value(black_box("67e55044-10b1-426f-9247-bb680e5fe0c8"), ParseFlags::DEFAULT, &cfg))
    });
    g.bench_function("resolve_index_end_minus", |b| {
        b.iter(|| resolve_index(black_box("end-1"), &bounds, ParseFlags::INDEX, &cfg))
    });

    g.finish();
}

criterion_group!(benches, bench_numeric, bench_resolve);
criterion_main!(benches);
