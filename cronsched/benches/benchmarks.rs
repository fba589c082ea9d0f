use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cronsched::Schedule;

fn fixed_now() -> jiff::Zoned {
    jiff::civil::Date::new(2026, 2, 6)
        .unwrap()
        .to_datetime(jiff::civil::Time::new(12, 0, 0, 0).unwrap())
        .to_zoned(jiff::tz::TimeZone::UTC)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Parse benchmarks
// ---------------------------------------------------------------------------

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("simple", |b| {
        b.iter(|| Schedule::parse(black_box("0 9 * * *")).unwrap());
    });

    group.bench_function("complex", |b| {
        b.iter(|| Schedule::parse(black_box("0,15,30-35,*/20 8-18 1-7,15,*/10 */3 1-5")).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Eval benchmarks (next_occurrence_from)
// ---------------------------------------------------------------------------

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");
    let now = fixed_now();

    let cases = [
        ("every_minute", "* * * * *"),
        ("daily", "0 9 * * *"),
        ("weekdays", "0 9 * * 1-5"),
        ("monthly", "0 0 1 * *"),
        ("yearly", "0 0 1 1 *"),
        ("leap_day", "0 0 29 2 *"),
        // Day-of-week filter forces many day retries
        ("friday_13th", "0 0 13 * 5"),
    ];

    for (name, expr) in cases {
        let schedule = Schedule::parse(expr).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| schedule.next_occurrence_from(black_box(&now)).unwrap());
        });
    }

    // Runaway guard: ten years of monthly retries before giving up
    let unreachable = Schedule::parse("0 0 31 2 *").unwrap();
    group.bench_function("unreachable", |b| {
        b.iter(|| unreachable.next_occurrence_from(black_box(&now)).is_err());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Iterator benchmark
// ---------------------------------------------------------------------------

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    let now = fixed_now();

    let schedule = Schedule::parse("*/5 9-17 * * 1-5").unwrap();
    group.bench_function("next_100", |b| {
        b.iter(|| schedule.next_n_from(black_box(&now), 100).unwrap());
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Display benchmark
// ---------------------------------------------------------------------------

fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("display");

    let schedule = Schedule::parse("0,15,30-35,*/20 8-18 1-7,15,*/10 */3 1-5").unwrap();

    group.bench_function("to_string", |b| {
        b.iter(|| black_box(&schedule).to_string());
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_eval, bench_iter, bench_display);
criterion_main!(benches);
