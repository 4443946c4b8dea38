use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rust_decimal::Decimal;
use storefront_core::{CategoryId, ProductId};
use storefront_products::{Product, ProductDraft, filter_products};

const NAMES: &[&str] = &[
    "iPhone 14",
    "iPhone 15",
    "Galaxy S23",
    "MacBook Air",
    "ThinkPad X1",
    "Pixel 8",
    "Surface Laptop",
];

fn catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            Product::from_draft(
                ProductId::new(i as i64 + 1).unwrap(),
                ProductDraft {
                    name: format!("{} #{}", NAMES[i % NAMES.len()], i),
                    category_id: CategoryId::new((i % 3) as i32).unwrap(),
                    price: Decimal::new(i as i64 * 100, 2),
                    image: String::new(),
                },
            )
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_products");

    for size in [100usize, 1_000, 10_000] {
        let products = catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("search", size), &products, |b, products| {
            b.iter(|| filter_products(black_box(products), Some("book"), None))
        });

        group.bench_with_input(BenchmarkId::new("category", size), &products, |b, products| {
            b.iter(|| filter_products(black_box(products), None, Some("2")))
        });

        group.bench_with_input(BenchmarkId::new("search_and_category", size), &products, |b, products| {
            b.iter(|| filter_products(black_box(products), Some("IPHONE"), Some("1")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
