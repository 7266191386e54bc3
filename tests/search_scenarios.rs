use std::io::Write;

use catalog_search::{
    CatalogEntry, CatalogQuery, CatalogSearch, EntryDraft, EntryEdit, GroupCombinator,
    ScoreWeights, SearchConfig, SearchError, Signal, WriteKind,
};
use tempfile::NamedTempFile;

fn seeded(config: &SearchConfig) -> Result<CatalogSearch, SearchError> {
    let search = CatalogSearch::new(config)?;
    search.create(
        EntryDraft::new("adh-1", "ADH-001", "ADHESIVO CEMENTOSO MAPEI KERABOND PLUS")
            .with_brand("Mapei")
            .with_description("Para porcelanato en pisos y muros")
            .with_available_stock(8),
    )?;
    search.create(
        EntryDraft::new("peg-1", "PEG-001", "Pegante gris")
            .with_description("Alternativa al kerabond")
            .with_featured(true),
    )?;
    search.create(EntryDraft::new("var-1", "VAR-012", "Varilla corrugada 1/2").with_brand("Acesco"))?;
    search.create(
        EntryDraft::new("tor-1", "TOR-100", "Tornillo drywall")
            .with_brand("Fixer")
            .with_user_keywords(["  punta broca ", ""]),
    )?;
    Ok(search)
}

fn permissive() -> SearchConfig {
    let mut config = SearchConfig::default();
    config.matcher.combinator = GroupCombinator::Any;
    config
}

#[test]
fn kerabond_query_prefers_the_name_hit() -> Result<(), SearchError> {
    let search = seeded(&SearchConfig::default())?;

    let hits = search.search(&CatalogQuery::by_name("kerabond"))?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.id, "adh-1");
    assert!(hits[0].score >= 20);

    // peg-1 is featured and mentions kerabond only in its description.
    let peg = search.catalog().get("peg-1")?.expect("stored");
    let built = search.build_match_and_score(&search.process_query("kerabond"), "kerabond");
    assert!(!built.predicate.evaluate(&peg));
    let (peg_score, signals) = built.score.evaluate(&peg);
    assert!(!signals.contains(&Signal::NameSubstring));
    assert!(hits[0].score > peg_score);

    let loose = seeded(&permissive())?;
    let hits = loose.search(&CatalogQuery::by_name("kerabond"))?;
    let ids: Vec<_> = hits.iter().map(|h| h.entry.id.as_str()).collect();
    assert_eq!(ids, vec!["adh-1", "peg-1"]);
    Ok(())
}

#[test]
fn empty_query_lists_featured_first_then_by_name() -> Result<(), SearchError> {
    let search = seeded(&SearchConfig::default())?;

    let hits = search.search(&CatalogQuery::filter("   "))?;
    let ids: Vec<_> = hits.iter().map(|h| h.entry.id.as_str()).collect();
    assert_eq!(ids, vec!["peg-1", "adh-1", "tor-1", "var-1"]);
    Ok(())
}

#[test]
fn varilla_query_scores_through_keyword_signal() -> Result<(), SearchError> {
    let mut config = SearchConfig::default();
    config.matcher.explain = true;
    let search = seeded(&config)?;

    let entry = search.catalog().get("var-1")?.expect("stored");
    assert!(entry.user_keywords.iter().any(|k| k == "barilla"));
    assert!(entry.search_keywords.contains("barilla"));

    let hits = search.search(&CatalogQuery::by_name("varilla"))?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.id, "var-1");
    assert!(hits[0].score > 0);
    assert!(hits[0].signals.contains(&Signal::Keyword));
    Ok(())
}

#[test]
fn name_variant_finds_misspelled_query_when_groups_are_alternatives() -> Result<(), SearchError> {
    let mut config = permissive();
    config.matcher.explain = true;
    let search = seeded(&config)?;

    let hits = search.search(&CatalogQuery::by_name("barilla"))?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.id, "var-1");
    assert!(hits[0].signals.contains(&Signal::Keyword));
    Ok(())
}

#[test]
fn plural_query_found_at_name_search() -> Result<(), SearchError> {
    let search = seeded(&SearchConfig::default())?;

    let hits = search.search(&CatalogQuery::by_name("Tornillos"))?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.id, "tor-1");

    assert!(search.search(&CatalogQuery::filter("Tornillos"))?.is_empty());
    Ok(())
}

#[test]
fn user_keywords_are_searchable_and_trimmed() -> Result<(), SearchError> {
    let search = seeded(&permissive())?;

    let entry = search.catalog().get("tor-1")?.expect("stored");
    assert_eq!(entry.user_keywords[0], "punta broca");
    assert!(entry.user_keywords.iter().all(|k| !k.is_empty()));

    let hits = search.search(&CatalogQuery::filter("broca"))?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.id, "tor-1");

    // Strict matching also needs the raw text in name, code or brand.
    let strict = seeded(&SearchConfig::default())?;
    assert!(strict.search(&CatalogQuery::filter("broca"))?.is_empty());
    Ok(())
}

#[test]
fn very_long_query_is_not_an_error() -> Result<(), SearchError> {
    let search = seeded(&SearchConfig::default())?;

    let text = "tornillo ".repeat(2_300);
    assert!(text.len() > 20_000);
    assert!(search.search(&CatalogQuery::filter(text.as_str()))?.is_empty());
    assert!(search.search(&CatalogQuery::by_name(text))?.is_empty());
    assert!(search
        .search(&CatalogQuery::filter("a".repeat(50_000)))?
        .is_empty());
    Ok(())
}

#[test]
fn featured_toggle_keeps_derived_fields() -> Result<(), SearchError> {
    let search = seeded(&SearchConfig::default())?;
    let before = search.catalog().get("adh-1")?.expect("stored");

    let after = search.update("adh-1", &EntryEdit::new().featured(true))?;
    assert!(after.featured);
    assert_eq!(after.index_fields(), before.index_fields());

    let renamed = search.update("adh-1", &EntryEdit::new().description("Pegante flexible"))?;
    assert!(renamed.exact_search_terms.contains("flexible"));
    assert!(!renamed.exact_search_terms.contains("porcelanato"));
    Ok(())
}

#[test]
fn facade_operations_compose() -> Result<(), SearchError> {
    let search = CatalogSearch::in_memory()?;

    let built = search
        .build_index_fields(
            "Cerámica blanca",
            "Piso brillante",
            "Corona",
            &[],
            WriteKind::Create,
        )
        .expect("create always indexes");
    assert!(built.fields.search_keywords.contains("ceramica"));
    assert!(built.expanded_user_keywords.iter().any(|k| k == "serámica"));
    assert!(built.fields.search_keywords.contains("seramica"));

    let processed = search.process_query("cerámica BLANCA");
    let built_query = search.build_match_and_score(&processed, "cerámica BLANCA");

    let mut entry = search.create(
        EntryDraft::new("cer-1", "CER-1", "Cerámica blanca")
            .with_description("Piso brillante"),
    )?;
    assert!(built_query.predicate.evaluate(&entry));
    let (score, _) = built_query.score.evaluate(&entry);
    assert!(score > 0);

    entry.featured = true;
    let (featured_score, _) = built_query.score.evaluate(&entry);
    assert_eq!(featured_score, score + 5);
    Ok(())
}

#[test]
fn each_signal_only_raises_the_score() -> Result<(), SearchError> {
    let search = CatalogSearch::in_memory()?;
    let base = search.create(EntryDraft::new("p-1", "P-1", "Producto"))?;
    let processed = search.process_query("broca");
    let built = search.build_match_and_score(&processed, "broca");
    let stem = processed.stemmed.iter().next().cloned().expect("one stem");
    let weights = ScoreWeights::default();

    let toggles: [(Signal, fn(&mut CatalogEntry, &str)); 8] = [
        (Signal::NameSubstring, |e, _| e.name = "Broca larga".into()),
        (Signal::CodeSubstring, |e, _| e.code = "BROCA-1".into()),
        (Signal::BrandSubstring, |e, _| e.brand = "Brocas SA".into()),
        (Signal::ExactTerm, |e, _| {
            e.exact_search_terms.insert("broca".into());
        }),
        (Signal::Keyword, |e, _| {
            e.search_keywords.insert("brocas".into());
        }),
        (Signal::Stem, |e, stem| {
            e.stemmed_keywords.insert(stem.to_string());
        }),
        (Signal::DescriptionSubstring, |e, _| {
            e.description = "Para broca".into()
        }),
        (Signal::Featured, |e, _| e.featured = true),
    ];

    let (base_score, base_signals) = built.score.evaluate(&base);
    assert_eq!(base_score, 0);
    assert!(base_signals.is_empty());

    let mut cumulative = base.clone();
    let mut previous = base_score;
    for (signal, toggle) in toggles {
        let mut single = base.clone();
        toggle(&mut single, &stem);
        let (score, fired) = built.score.evaluate(&single);
        assert_eq!(fired, vec![signal]);
        assert_eq!(score, base_score + weights.weight_of(signal));

        toggle(&mut cumulative, &stem);
        let (total, _) = built.score.evaluate(&cumulative);
        assert!(total >= previous, "{signal:?} lowered the score");
        previous = total;
    }
    assert_eq!(previous, 20 + 18 + 15 + 12 + 8 + 5 + 2 + 5);
    Ok(())
}

#[test]
fn configured_search_from_yaml_file() -> Result<(), Box<dyn std::error::Error>> {
    let yaml = r#"
version: "1.0"
name: "ferreteria"
lexicon:
  extra_stopwords: ["gris"]
matcher:
  max_results: 1
  weights:
    featured: 0
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;

    let config = SearchConfig::from_file(file.path())?;
    let search = seeded(&config)?;

    let peg = search.catalog().get("peg-1")?.expect("stored");
    assert!(!peg.search_keywords.contains("gris"));
    assert!(!peg.exact_search_terms.contains("gris"));
    assert!(peg.search_keywords.contains("pegante"));

    let hits = search.search(&CatalogQuery::filter(""))?;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].score, 0);
    assert_eq!(hits[0].entry.id, "adh-1");
    Ok(())
}
