//! Filter and pagination pipeline benchmarks
//!
//! The pipeline reruns on every filter, mark or data change, so it should
//! stay well under a frame for a few thousand events.
//!
//! Run with: `cargo bench -p eventboard-core`

#![allow(missing_docs)] // Benchmarks don't need extensive docs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eventboard_core::domain::{EventId, EventRecord, LocationId};
use eventboard_core::filter::{self, CategoryFilter, FilterCriteria, PriceCeiling, FREE_ADMISSION};
use eventboard_core::marks::MarkSet;
use eventboard_core::pagination::Pagination;

fn catalog(size: usize) -> (Vec<EventRecord>, MarkSet) {
    let events = (0..size)
        .map(|i| {
            let price = match i % 4 {
                0 => FREE_ADMISSION.to_string(),
                1 => format!("${}, ${}", i % 90 + 10, i % 30 + 5),
                2 => "Tickets at the door".to_string(),
                _ => format!("${}", i % 200),
            };
            EventRecord::new(EventId::new(i.to_string()), "Concert", LocationId::new("hall"))
                .with_price(price)
        })
        .collect::<Vec<_>>();
    let likes = events
        .iter()
        .step_by(3)
        .map(|event| event.id.clone())
        .collect();
    (events, likes)
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    for size in [100usize, 1_000, 5_000] {
        let (events, likes) = catalog(size);
        let bookings = MarkSet::new();
        let criteria = FilterCriteria {
            category: CategoryFilter::Liked,
            price_ceiling: PriceCeiling::new(40.0),
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &events, |b, events| {
            b.iter(|| filter::apply_indices(black_box(events), &likes, &bookings, &criteria));
        });
    }

    group.finish();
}

fn bench_filter_and_page(c: &mut Criterion) {
    let (events, likes) = catalog(1_000);
    let bookings = MarkSet::new();
    let criteria = FilterCriteria {
        category: CategoryFilter::All,
        price_ceiling: PriceCeiling::new(25.0),
    };
    let mut pagination = Pagination::default();
    pagination.set_page(3);

    c.bench_function("filter_then_page_1000", |b| {
        b.iter(|| {
            let visible = filter::apply(black_box(&events), &likes, &bookings, &criteria);
            pagination.slice(&visible).len()
        });
    });
}

criterion_group!(benches, bench_filter, bench_filter_and_page);
criterion_main!(benches);
