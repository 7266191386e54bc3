use criterion::{black_box, criterion_group, criterion_main, Criterion};
use index::{Catalog, EntryDraft};
use matcher::{build_match_and_score, CatalogQuery, MatchConfig, QueryProcessor, SearchEngine};

fn bench_build(c: &mut Criterion) {
    let processor = QueryProcessor::spanish();
    let config = MatchConfig::default();

    c.bench_function("process_query", |b| {
        b.iter(|| processor.process(black_box("Tornillos drywall punta broca 6x1")))
    });

    let processed = processor.process("Tornillos drywall punta broca 6x1");
    c.bench_function("build_match_and_score", |b| {
        b.iter(|| {
            build_match_and_score(
                black_box(&processed),
                black_box("Tornillos drywall punta broca 6x1"),
                &config,
            )
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let catalog = Catalog::in_memory();
    let names = ["Tornillo drywall", "Varilla corrugada", "Pegante cerámico", "Broca concreto"];
    for i in 0..1_000 {
        let name = names[i % names.len()];
        catalog
            .create(
                EntryDraft::new(format!("p-{i}"), format!("C{i:05}"), format!("{name} {i}"))
                    .with_featured(i % 7 == 0),
            )
            .expect("seed");
    }
    let engine = SearchEngine::for_catalog(&catalog, MatchConfig::default()).expect("engine");

    c.bench_function("search_by_name_1k", |b| {
        let query = CatalogQuery::by_name("tornillos");
        b.iter(|| engine.search(black_box(&query)).expect("search"))
    });
}

criterion_group!(benches, bench_build, bench_search);
criterion_main!(benches);
