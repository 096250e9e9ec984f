use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use vocabdr::engine::distractor::build_options;
use vocabdr::engine::session::{Session, UnitFilter};
use vocabdr::vocab::record::{TargetLanguage, VocabRecord};
use vocabdr::vocab::store::VocabularyStore;

fn make_store(count: usize) -> Arc<VocabularyStore> {
    let records = (0..count)
        .map(|i| {
            let record = VocabRecord::new(
                Some((i % 20) as u32 + 1),
                &format!("Wort{i}"),
                &format!("Das ist Wort {i}."),
            );
            // every fifth record lacks a translation to exercise the skip path
            if i % 5 == 0 {
                record
            } else {
                record.with_translation(TargetLanguage::Turkish, &format!("kelime{i}"))
            }
        })
        .collect();
    Arc::new(VocabularyStore::from_records(records).expect("non-empty store"))
}

fn bench_build_options(c: &mut Criterion) {
    let store = make_store(2000);
    let item = store.records()[1].clone();
    let mut rng = SmallRng::seed_from_u64(42);

    c.bench_function("build_options (2000 words, 4 options)", |b| {
        b.iter(|| {
            build_options(
                black_box(&store),
                black_box(&item),
                TargetLanguage::Turkish,
                4,
                &mut rng,
            )
        })
    });

    let tiny = make_store(3);
    let tiny_item = tiny.records()[1].clone();
    c.bench_function("build_options (3 words, padded)", |b| {
        b.iter(|| {
            build_options(
                black_box(&tiny),
                black_box(&tiny_item),
                TargetLanguage::Turkish,
                4,
                &mut rng,
            )
        })
    });
}

fn bench_session_start(c: &mut Criterion) {
    let store = make_store(5000);
    let mut rng = SmallRng::seed_from_u64(7);

    c.bench_function("Session::start all (5000 words)", |b| {
        b.iter(|| Session::start(Arc::clone(&store), black_box(UnitFilter::All), &mut rng))
    });

    c.bench_function("Session::start unit (5000 words)", |b| {
        b.iter(|| Session::start(Arc::clone(&store), black_box(UnitFilter::Unit(3)), &mut rng))
    });
}

criterion_group!(benches, bench_build_options, bench_session_start);
criterion_main!(benches);
