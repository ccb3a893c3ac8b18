use anyhow::Context;
use serde_json::Value;

use crate::{
    dal::{identifier_db::read_identifiers, listing_db::ListingSink},
    domain::url_template::UrlTemplate,
    services::{build_url_mapping, ListingScraper},
    startup::Application,
};

/// Runs one scrape: read identifiers, plan urls, fetch and extract, writing the
/// results after every page. `event` and `context` are accepted for the
/// invoking environment and otherwise unused.
pub async fn handler(_event: Value, _context: Value, app: &Application) -> anyhow::Result<()> {
    let settings = app.settings();

    let identifiers = read_identifiers(app.input_store(), &settings.input.object_key()).await?;

    let template = UrlTemplate::parse(&settings.scrape.url_template)
        .context("Invalid url template")?;
    let mapping = build_url_mapping(&identifiers, &template, settings.scrape.identifier_parsing)?;

    let scraper = ListingScraper::new(app.http_client().clone())?;
    let sink = ListingSink::new(app.output_store(), app.output_key());

    let listings = scraper.scrape_all(&mapping, &sink).await?;
    log::info!("Scraped {} listings into {}", listings.len(), sink.key());

    Ok(())
}
