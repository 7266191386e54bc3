use catalog_search::{
    normalize, singularize, CatalogQuery, CatalogSearch, ChangedFields, EntryDraft, Lexicon,
    WriteKind,
};

#[test]
fn reindexing_is_idempotent() {
    let search = CatalogSearch::in_memory().expect("facade");
    let keywords = vec!["pegante".to_string(), "gris".to_string()];

    let first = search
        .build_index_fields(
            "Pegante cerámico",
            "Uso interior",
            "Corona",
            &keywords,
            WriteKind::Update(ChangedFields::all()),
        )
        .expect("indexed");
    let second = search
        .build_index_fields(
            "Pegante cerámico",
            "Uso interior",
            "Corona",
            &keywords,
            WriteKind::Update(ChangedFields::all()),
        )
        .expect("indexed");
    assert_eq!(first, second);
    assert_eq!(first.expanded_user_keywords, keywords);
}

#[test]
fn normalized_output_is_clean() {
    let lexicon = Lexicon::spanish();
    for text in [
        "¡Oferta! Cerámica de 60x60, para el baño",
        "  ÁRBOL   y   Pingüino ",
        "3/4\" (PVC) - tubería",
        "",
    ] {
        for token in normalize(text, &lexicon) {
            assert!(!token.is_empty());
            assert!(!lexicon.is_stopword(&token));
            assert!(token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}

#[test]
fn singularize_is_idempotent_for_regular_plurals() {
    let lexicon = Lexicon::spanish();
    for word in ["tornillos", "motores", "paredes", "casas"] {
        let once = singularize(word, &lexicon);
        assert_eq!(singularize(&once, &lexicon), once, "{word}");
    }
}

#[test]
fn repeated_searches_return_identical_rankings() {
    let search = CatalogSearch::in_memory().expect("facade");
    for (i, name) in ["Broca concreto", "Broca madera", "Broca metal", "Brocha"]
        .iter()
        .enumerate()
    {
        search
            .create(EntryDraft::new(format!("b-{i}"), format!("B{i}"), *name))
            .expect("create");
    }

    let query = CatalogQuery::by_name("broca");
    let first = search.search(&query).expect("search");
    for _ in 0..5 {
        assert_eq!(search.search(&query).expect("search"), first);
    }
    let names: Vec<_> = first.iter().map(|h| h.entry.name.as_str()).collect();
    assert_eq!(names[..3], ["Broca concreto", "Broca madera", "Broca metal"]);
}
