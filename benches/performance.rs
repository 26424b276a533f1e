use budget_periods::domain::Transaction;
use budget_periods::period::{aggregate, resolve, Granularity};
use budget_periods::storage::{load_transactions, save_transactions};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;

fn build_sample_transactions(count: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    (0..count)
        .map(|idx| {
            let at = start + Duration::hours((idx % (24 * 366)) as i64);
            let amount = Decimal::new(500 + (idx % 10_000) as i64, 2);
            let txn = if idx % 4 == 0 {
                Transaction::income(amount, "Salary", at)
            } else {
                Transaction::expense(amount, ["Food", "Rent", "Travel"][idx % 3], at)
            };
            txn.with_id(format!("t{idx}"))
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(50_000));
    let reference = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    for granularity in Granularity::ALL {
        let window = resolve(reference, granularity);
        c.bench_function(&format!("aggregate_50k_{}", granularity), |b| {
            b.iter(|| {
                let result = aggregate(black_box(&transactions), &window).expect("aggregate");
                black_box(result.balance);
            })
        });
    }
}

fn bench_storage_io(c: &mut Criterion) {
    let transactions = build_sample_transactions(10_000);
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("transactions.json");

    c.bench_function("transactions_save_10k", |b| {
        b.iter(|| save_transactions(&path, &transactions).expect("save transactions"))
    });

    save_transactions(&path, &transactions).expect("seed");

    c.bench_function("transactions_load_10k", |b| {
        b.iter(|| {
            let loaded = load_transactions(&path).expect("load transactions");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_storage_io);
criterion_main!(benches);
