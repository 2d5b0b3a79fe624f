use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    ItemReconciliation, Money, Order, OrderItem, OrderRepository, RepositoryInterface,
};
use row_store::{InMemoryRowStore, OrderItemRow};

fn make_items(count: usize, prefix: &str) -> Vec<OrderItem> {
    (1..=count)
        .map(|i| {
            OrderItem::new(
                format!("{prefix}-{i:03}"),
                format!("Product {i}"),
                Money::from_cents(100 * i as i64),
                format!("p{i}"),
                1,
            )
            .unwrap()
        })
        .collect()
}

fn make_rows(count: usize, prefix: &str) -> Vec<OrderItemRow> {
    (1..=count)
        .map(|i| OrderItemRow {
            id: format!("{prefix}-{i:03}"),
            order_id: "bench".to_string(),
            product_id: format!("p{i}"),
            name: format!("Product {i}"),
            price: 100 * i as i64,
            quantity: 1,
        })
        .collect()
}

fn bench_order_total(c: &mut Criterion) {
    let order = Order::new("bench", "c1", make_items(100, "SKU")).unwrap();

    c.bench_function("domain/order_total_100_items", |b| {
        b.iter(|| order.total());
    });
}

fn bench_reconciliation_plan(c: &mut Criterion) {
    // Half the stored ids survive, half are replaced
    let persisted = make_rows(100, "SKU");
    let mut desired = make_rows(50, "SKU");
    desired.extend(make_rows(50, "NEW"));

    c.bench_function("domain/plan_100_vs_100", |b| {
        b.iter(|| ItemReconciliation::plan(desired.clone(), &persisted));
    });
}

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let items = make_items(10, "SKU");

    c.bench_function("domain/create_order_10_items", |b| {
        b.iter(|| {
            rt.block_on(async {
                let repository = OrderRepository::new(InMemoryRowStore::new());
                let order = Order::new("bench", "c1", items.clone()).unwrap();
                repository.create(&order).await.unwrap();
            });
        });
    });
}

fn bench_update_cycle(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let first = make_items(20, "SKU");
    let mut second = make_items(10, "SKU");
    second.extend(make_items(10, "NEW"));

    c.bench_function("domain/create_update_find_20_items", |b| {
        b.iter(|| {
            rt.block_on(async {
                let repository = OrderRepository::new(InMemoryRowStore::new());
                let mut order = Order::new("bench", "c1", first.clone()).unwrap();
                repository.create(&order).await.unwrap();

                order.change_items(second.clone()).unwrap();
                repository.update(&order).await.unwrap();

                repository.find("bench").await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_order_total,
    bench_reconciliation_plan,
    bench_create_order,
    bench_update_cycle,
);
criterion_main!(benches);
