//! Catalog browsing commands.

use anyhow::{anyhow, Context as _, Result};
use qeirex_commerce::prelude::*;

use super::{CatalogArgs, CatalogCommand, ListArgs};
use crate::context::Context;
use crate::output::{format_rating, stock_badge};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    match args.command {
        CatalogCommand::List(list) => list_products(&list, &catalog, ctx),
        CatalogCommand::Categories => list_categories(&catalog, ctx),
    }
}

fn list_products(args: &ListArgs, catalog: &Catalog, ctx: &Context) -> Result<()> {
    let query = build_query(args)?;
    ctx.output.debug(&format!(
        "{} filter(s), sort {}",
        query.filters.len(),
        query.sort.as_str()
    ));

    let results = catalog.search(&query);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({} found, sorted by {})",
        results.total_count(),
        query.sort.display_name()
    ));

    if results.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }

    let widths = [8, 24, 10, 9, 14, 8];
    ctx.output.table_row(
        &["ID", "NAME", "CATEGORY", "PRICE", "RATING", "STOCK"],
        &widths,
    );
    for product in &results.products {
        let price = product.price.display();
        let rating = format_rating(product.rating);
        let stock = stock_badge(product.in_stock);
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                product.category.as_deref().unwrap_or("-"),
                &price,
                &rating,
                &stock,
            ],
            &widths,
        );
    }

    let page = &results.pagination;
    if page.total_pages > 1 {
        ctx.output.info(&format!("Page {} of {}", page.page, page.total_pages));
        if page.has_next() {
            ctx.output.debug(&format!("next: --page {}", page.page + 1));
        }
    }

    Ok(())
}

fn list_categories(catalog: &Catalog, ctx: &Context) -> Result<()> {
    let facets = catalog.search(&SearchQuery::new()).facets;

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header("Categories");
    for facet in &facets {
        ctx.output.kv(&facet.category, &facet.count.to_string());
    }
    Ok(())
}

/// Translate command-line filters into a search query.
fn build_query(args: &ListArgs) -> Result<SearchQuery> {
    let sort: SortOption = args.sort.parse().map_err(|e: String| anyhow!(e))?;
    let mut query = SearchQuery::new()
        .with_sort(sort)
        .with_pagination(args.page, args.per_page);

    if let Some(category) = &args.category {
        query = query.with_filter(Filter::category(category));
    }
    if let Some(tag) = &args.tag {
        query = query.with_filter(Filter::tag(tag));
    }
    if args.in_stock {
        query = query.with_filter(Filter::in_stock());
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let min = args.min_price.map(parse_price).transpose()?;
        let max = args.max_price.map(parse_price).transpose()?;
        query = query.with_filter(Filter::price_range(min, max));
    }
    if let Some(min) = args.min_rating {
        query = query.with_filter(Filter::min_rating(min));
    }
    if let Some(search) = &args.search {
        query = query.with_query(search);
    }

    Ok(query)
}

fn parse_price(dollars: f64) -> Result<Money> {
    Money::try_from_decimal(dollars).with_context(|| format!("Invalid price: {}", dollars))
}
