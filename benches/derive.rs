use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use scent::models::{Catalog, CatalogView, Category, Price, Product, SortMode};

/// Reference catalog repeated until it holds `size` products
fn large_catalog(size: usize) -> Catalog {
    let reference = Catalog::reference();
    let products = reference
        .products()
        .iter()
        .cycle()
        .take(size)
        .enumerate()
        .map(|(i, p)| {
            Product::new(
                format!("{} {}", p.name, i),
                Price::from_cents(p.price.cents() + i as u64),
                p.category,
                &p.image,
            )
        })
        .collect();
    Catalog::new(products)
}

fn bench_derive(c: &mut Criterion) {
    let catalog = large_catalog(10_000);

    c.bench_function("derive_unfiltered", |b| {
        let mut view = CatalogView::new();
        b.iter(|| black_box(view.derive(&catalog)))
    });

    c.bench_function("derive_search_filter_sort", |b| {
        let mut view = CatalogView::new();
        view.set_search_query("mist");
        view.toggle_category(Category::Men);
        view.set_sort_mode(SortMode::PriceDesc);
        b.iter(|| black_box(view.derive(&catalog)))
    });
}

criterion_group!(benches, bench_derive);
criterion_main!(benches);
