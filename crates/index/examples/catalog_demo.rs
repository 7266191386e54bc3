use index::{Catalog, EntryDraft, EntryEdit, IndexError};

fn main() -> Result<(), IndexError> {
    let catalog = Catalog::in_memory();

    let entry = catalog.create(
        EntryDraft::new("p-1", "PRD-0001", "Varilla corrugada 3/8\"")
            .with_description("Acero de refuerzo para construcción")
            .with_brand("Acesco")
            .with_user_keywords(["hierro", "  "]),
    )?;
    println!("user keywords:   {:?}", entry.user_keywords);
    println!("search keywords: {:?}", entry.search_keywords);
    println!("stems:           {:?}", entry.stemmed_keywords);
    println!("exact terms:     {:?}", entry.exact_search_terms);

    let updated = catalog.update("p-1", &EntryEdit::new().featured(true))?;
    println!();
    println!(
        "featured-only update kept derived fields: {}",
        updated.index_fields() == entry.index_fields()
    );

    Ok(())
}
