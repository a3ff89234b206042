use bridge_lobby::{
    deal::DealOrchestrator,
    game::{
        Deck,
        functional::{canonical_sort, high_card_points},
    },
    session::SessionSelection,
    storage::{KeyValueStore, MemoryStore},
    table::{RegistryConfig, TableRegistry},
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::StdRng};
use std::{hint::black_box, sync::Arc};

/// A 13-card hand taken from a seeded shuffle
fn sample_hand(seed: u64) -> Vec<bridge_lobby::Card> {
    let mut deck = Deck::new();
    deck.shuffle_with(&mut StdRng::seed_from_u64(seed));
    deck.deal(13).unwrap_or_default()
}

/// Benchmark a Fisher-Yates shuffle of a fresh deck
fn bench_shuffle(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("shuffle_deck", |b| {
        b.iter_batched(
            Deck::new,
            |mut deck| {
                deck.shuffle_with(&mut rng);
                deck
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark the canonical sort across hands of different sizes
fn bench_canonical_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonical_sort");
    let hand = sample_hand(7);

    for size in [1usize, 5, 13].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_cards", size)),
            size,
            |b, &n| {
                let cards = &hand[..n];
                b.iter(|| canonical_sort(black_box(cards)));
            },
        );
    }

    group.finish();
}

/// Benchmark high-card point counting
fn bench_points(c: &mut Criterion) {
    let hand = sample_hand(11);
    c.bench_function("high_card_points", |b| {
        b.iter(|| high_card_points(black_box(&hand)));
    });
}

/// Benchmark a full deal cycle including the deck color write
fn bench_full_deal(c: &mut Criterion) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let registry = TableRegistry::new(store.clone(), "bridge_tables", RegistryConfig::default());
    let dealer = DealOrchestrator::new(registry, store, "lastDeckColor");
    let selection = SessionSelection::default();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("full_deal", |b| {
        b.iter(|| dealer.deal_with_rng(&selection, &mut rng));
    });
}

criterion_group!(card_operations, bench_shuffle, bench_canonical_sort, bench_points);

criterion_group!(deal_cycle, bench_full_deal);

criterion_main!(card_operations, deal_cycle);
