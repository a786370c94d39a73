use chrono::{DateTime, Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tickler_core::models::{Cadence, Recurrence, Reminder};
use tickler_core::recurrence::RecurrenceExpander;

fn create_test_reminder(cadence: Cadence, days_of_week: Vec<u8>) -> Reminder {
    Reminder {
        title: "Benchmark reminder".to_string(),
        scheduled_at: anchor(),
        timezone: "America/New_York".to_string(),
        recurrence: Some(Recurrence {
            cadence,
            interval: 1,
            days_of_week,
            anchor_date: None,
        }),
        ..Default::default()
    }
}

fn anchor() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn bench_cadence_expansion(c: &mut Criterion) {
    let expander = RecurrenceExpander::with_defaults();
    let window_start = anchor();
    let window_end = window_start + Duration::days(90);

    let cases = [
        ("daily", create_test_reminder(Cadence::Daily, vec![])),
        ("weekly", create_test_reminder(Cadence::Weekly, vec![1, 3, 5])),
        ("monthly", create_test_reminder(Cadence::Monthly, vec![])),
    ];

    let mut group = c.benchmark_group("cadence_expansion");
    for (name, reminder) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), reminder, |b, reminder| {
            b.iter(|| {
                expander.expand(
                    black_box(reminder),
                    black_box(Some(window_start)),
                    black_box(Some(window_end)),
                )
            })
        });
    }
    group.finish();
}

fn bench_capped_expansion(c: &mut Criterion) {
    let expander = RecurrenceExpander::with_defaults();
    let reminder = create_test_reminder(Cadence::Daily, vec![]);
    let window_start = anchor();
    let window_end = window_start + Duration::days(1000);

    c.bench_function("capped_daily_expansion_1000_days", |b| {
        b.iter(|| {
            expander.expand(
                black_box(&reminder),
                black_box(Some(window_start)),
                black_box(Some(window_end)),
            )
        })
    });
}

criterion_group!(benches, bench_cadence_expansion, bench_capped_expansion);
criterion_main!(benches);
