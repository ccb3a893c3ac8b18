use anyhow::Context;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::{dal::listing_db::ListingSink, domain::listing::Listing};

use super::UrlMapping;

pub struct ListingSelectors {
    results: Selector,
    title: Selector,
    location: Selector,
    address: Selector,
    a_tag: Selector,
}

impl ListingSelectors {
    pub fn new() -> anyhow::Result<Self> {
        Ok(ListingSelectors {
            results: parse_selector("ol.search-results")?,
            title: parse_selector("a.search-result-title")?,
            location: parse_selector("h3.search-result-title")?,
            address: parse_selector("small.search-result-subtitle")?,
            a_tag: parse_selector("a")?,
        })
    }
}

fn parse_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("Invalid selector {}: {:?}", css, e))
}

pub struct ListingScraper {
    client: Client,
    selectors: ListingSelectors,
}

impl ListingScraper {
    pub fn new(client: Client) -> anyhow::Result<Self> {
        Ok(ListingScraper {
            client,
            selectors: ListingSelectors::new()?,
        })
    }

    /// Visits every url in mapping order. After each page the whole result set
    /// gathered so far is written to `sink`, so a failed request leaves the
    /// pages before it in storage.
    pub async fn scrape_all(
        &self,
        mapping: &UrlMapping,
        sink: &ListingSink,
    ) -> anyhow::Result<Vec<Listing>> {
        let mut listings: Vec<Listing> = vec![];

        for (identifier, url) in mapping.iter() {
            let page_source = self
                .fetch_page(url)
                .await
                .with_context(|| format!("Failed to fetch {} for identifier {:?}", url, identifier))?;

            let page_listings = self.extract_listings(&page_source);
            log::info!(
                "Found {} listings for {:?} at {}",
                page_listings.len(),
                identifier,
                url
            );
            listings.extend(page_listings);

            sink.write(&listings).await?;
        }

        Ok(listings)
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    pub fn extract_listings(&self, page_source: &str) -> Vec<Listing> {
        let html_document = Html::parse_document(page_source);
        let mut listings = vec![];

        for container in html_document.select(&self.selectors.results) {
            for fragment in container
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|e| e.value().name() == "li")
            {
                match extract_listing(fragment, &self.selectors) {
                    Some(listing) => listings.push(listing),
                    None => log::debug!("Skipping incomplete search result"),
                }
            }
        }

        listings
    }
}

/// `None` unless title, location, address and link are all present.
pub fn extract_listing(fragment: ElementRef, selectors: &ListingSelectors) -> Option<Listing> {
    let text_of = |selector: &Selector| -> Option<String> {
        fragment
            .select(selector)
            .next()
            .map(|tag| tag.text().collect())
    };

    Some(Listing {
        title: text_of(&selectors.title)?,
        location: text_of(&selectors.location)?,
        address: text_of(&selectors.address)?,
        link: fragment
            .select(&selectors.a_tag)
            .next()?
            .attr("href")?
            .to_string(),
    })
}
