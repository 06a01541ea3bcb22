use crate::domain::model::RawListing;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// Pulls deal candidates out of the raw deal-grid markup. Selectors are
/// compiled once; per-card parsing returns Option so a malformed card is
/// dropped instead of failing the run.
pub struct ListingExtractor {
    deal_anchor: Selector,
    image: Selector,
    deal_price: Selector,
    list_price: Selector,
    asin: Regex,
    origin: String,
    affiliate_tag: String,
    scan_limit: usize,
}

impl ListingExtractor {
    pub fn new(origin: String, affiliate_tag: String, scan_limit: usize) -> Self {
        Self {
            deal_anchor: Selector::parse(
                "div[data-testid='grid-deals-container'] a[href*='/dp/']",
            )
            .unwrap(),
            image: Selector::parse("img[src]").unwrap(),
            deal_price: Selector::parse("span.a-price:not(.a-text-price) .a-offscreen").unwrap(),
            list_price: Selector::parse("span.a-price.a-text-price .a-offscreen").unwrap(),
            asin: Regex::new(r"/dp/([A-Z0-9]{10})(?:[/?]|$)").unwrap(),
            origin,
            affiliate_tag,
            scan_limit,
        }
    }

    pub fn extract(&self, html: &str) -> Vec<RawListing> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();
        let mut seen_links = HashSet::new();

        for anchor in document.select(&self.deal_anchor) {
            if listings.len() >= self.scan_limit {
                break;
            }
            if let Some(listing) = self.parse_card(&anchor, &mut seen_links) {
                listings.push(listing);
            }
        }

        listings
    }

    fn parse_card(
        &self,
        anchor: &ElementRef,
        seen_links: &mut HashSet<String>,
    ) -> Option<RawListing> {
        let href = anchor.value().attr("href")?;
        if href.is_empty() || !seen_links.insert(href.to_string()) {
            return None;
        }

        let raw_title = collapse_text(anchor.text());
        let identifier = self
            .asin
            .captures(href)
            .map(|caps| caps[1].to_string());
        // Nothing stable to key on and nothing to say: not a listing.
        if identifier.is_none() && raw_title.is_empty() {
            return None;
        }

        let link = self.tagged_link(href);

        let image_url = anchor
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        let deal_price = anchor
            .select(&self.deal_price)
            .next()
            .map(|el| collapse_text(el.text()));
        let list_price = anchor
            .select(&self.list_price)
            .next()
            .map(|el| collapse_text(el.text()));

        Some(RawListing {
            identifier,
            raw_title,
            link,
            image_url,
            list_price,
            deal_price,
        })
    }

    /// Absolute link with the affiliate tag appended. The configured tag
    /// starts with '?'; when the href already carries a query it joins
    /// with '&' instead.
    fn tagged_link(&self, href: &str) -> String {
        let absolute = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.origin, href)
        };

        if absolute.contains('?') && self.affiliate_tag.starts_with('?') {
            format!("{}&{}", absolute, &self.affiliate_tag[1..])
        } else {
            format!("{}{}", absolute, self.affiliate_tag)
        }
    }
}

fn collapse_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(
            "https://www.amazon.com".to_string(),
            "?tag=test-20".to_string(),
            30,
        )
    }

    const PAGE: &str = r#"
        <html><body>
        <div data-testid="grid-deals-container">
            <a href="/dp/B08N5WRWNW">
                <img src="https://img.example/echo.jpg"/>
                <span class="a-price"><span class="a-offscreen">$29.99</span></span>
                <span class="a-price a-text-price"><span class="a-offscreen">$49.99</span></span>
                Echo Dot (5th Gen) 20% off $29.99
            </a>
            <a href="/dp/B08N5WRWNW">duplicate of the first</a>
            <a href="/dp/B0CADDEAL1?th=1">Plain deal without prices</a>
            <a href="/gp/outside/no-dp-here">ignored by the selector</a>
            <a href="/dp/short"></a>
        </div>
        <a href="/dp/B000000000">outside the grid, ignored</a>
        </body></html>
    "#;

    #[test]
    fn test_extracts_titles_links_and_prices() {
        let listings = extractor().extract(PAGE);
        assert_eq!(listings.len(), 2);

        let first = &listings[0];
        assert_eq!(first.identifier.as_deref(), Some("B08N5WRWNW"));
        assert!(first.raw_title.contains("Echo Dot (5th Gen)"));
        assert_eq!(
            first.link,
            "https://www.amazon.com/dp/B08N5WRWNW?tag=test-20"
        );
        assert_eq!(first.image_url.as_deref(), Some("https://img.example/echo.jpg"));
        assert_eq!(first.deal_price.as_deref(), Some("$29.99"));
        assert_eq!(first.list_price.as_deref(), Some("$49.99"));
    }

    #[test]
    fn test_duplicate_links_skipped_within_run() {
        let listings = extractor().extract(PAGE);
        let links: Vec<&str> = listings.iter().map(|l| l.link.as_str()).collect();
        let unique: HashSet<&&str> = links.iter().collect();
        assert_eq!(unique.len(), links.len());
    }

    #[test]
    fn test_existing_query_joins_with_ampersand() {
        let listings = extractor().extract(PAGE);
        let second = &listings[1];
        assert_eq!(
            second.link,
            "https://www.amazon.com/dp/B0CADDEAL1?th=1&tag=test-20"
        );
        assert_eq!(second.deal_price, None);
        assert_eq!(second.list_price, None);
    }

    #[test]
    fn test_card_without_identifier_or_title_discarded() {
        // "/dp/short" has no valid ASIN and no text.
        let listings = extractor().extract(PAGE);
        assert!(listings.iter().all(|l| !l.raw_title.is_empty() || l.identifier.is_some()));
        assert_eq!(listings.len(), 2);
    }

    #[test]
    fn test_scan_limit_caps_candidates() {
        let mut page = String::from(r#"<div data-testid="grid-deals-container">"#);
        for i in 0..20 {
            page.push_str(&format!(r#"<a href="/dp/B{:09}">Deal {}</a>"#, i, i));
        }
        page.push_str("</div>");

        let extractor = ListingExtractor::new(
            "https://www.amazon.com".to_string(),
            "?tag=test-20".to_string(),
            5,
        );
        assert_eq!(extractor.extract(&page).len(), 5);
    }

    #[test]
    fn test_empty_page_yields_nothing() {
        assert!(extractor().extract("<html><body></body></html>").is_empty());
    }
}
