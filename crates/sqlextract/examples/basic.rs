//! Print the statements built from a partially filled record.
//!
//! Run with: `cargo run -p sqlextract --example basic`

use sqlextract::prelude::*;

#[derive(Debug, Default, Record)]
struct Product {
    #[tag(query = "id")]
    pub id: Option<i64>,
    #[tag(query = "name")]
    pub name: Option<String>,
    #[tag(query = "price_cents")]
    pub price_cents: Option<i64>,
    #[tag(query = "internal_note")]
    pub internal_note: Option<String>,
    // Plain fields never make it into a statement.
    #[tag(query = "sku")]
    pub sku: String,
}

fn main() -> ExtractResult<()> {
    let product = Product {
        name: Some("Widget".into()),
        price_cents: Some(1999),
        internal_note: Some("do not publish".into()),
        sku: "W-1".into(),
        ..Default::default()
    };
    println!("{product:?}");

    let insert = QueryConfig::create("query", "products")
        .with_placeholder(Placeholder::Dollar)
        .with_returning("id")
        .with_skip("internal_note")
        .extract(&product)?;
    println!("{}", insert.sql());
    println!("  values: {:?}", insert.values());

    let update = query_and_values(
        &product,
        QueryKind::Update,
        Placeholder::QuestionMark,
        "query",
        "products",
        "",
        &["name", "internal_note"],
    )?;
    println!("{}", update.sql());
    println!("  values: {:?}", update.values());

    match query_and_values(
        &Product::default(),
        QueryKind::Update,
        Placeholder::QuestionMark,
        "query",
        "products",
        "",
        &[],
    ) {
        Err(ExtractError::BaseQuery { sql }) => println!("nothing to update: {sql:?}"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
