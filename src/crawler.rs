use crate::browser::PageFetcher;
use crate::models::{CrawlSummary, ListingRecord, SearchQuery};
use crate::pacing::Pace;
use crate::sources::indeed::{build_search_url, ListingExtractor};
use log::{info, warn};

/// Fetch every requested results page in order and collect the listings
pub fn scrape_listings<F: PageFetcher, P: Pace>(
    fetcher: &mut F,
    extractor: &ListingExtractor,
    pacer: &P,
    search: &SearchQuery,
) -> Vec<ListingRecord> {
    scrape_with_summary(fetcher, extractor, pacer, search).0
}

/// Same as [`scrape_listings`] but also reports how many pages loaded
pub fn scrape_with_summary<F: PageFetcher, P: Pace>(
    fetcher: &mut F,
    extractor: &ListingExtractor,
    pacer: &P,
    search: &SearchQuery,
) -> (Vec<ListingRecord>, CrawlSummary) {
    let mut listings = Vec::new();
    let mut summary = CrawlSummary {
        pages_requested: search.pages,
        ..CrawlSummary::default()
    };

    for page in 0..search.pages {
        let url = build_search_url(extractor.origin(), &search.query, &search.location, page);
        info!("Scraping page {}...", page + 1);

        match fetcher.fetch(url.as_str()) {
            Some(html) => {
                listings.extend(extractor.parse(&html));
                summary.pages_loaded += 1;

                // No point waiting after the last page
                if page + 1 < search.pages {
                    pacer.pause();
                }
            }
            None => {
                warn!("Skipping page {} due to loading issues.", page + 1);
                summary.pages_skipped += 1;
            }
        }
    }

    summary.listings = listings.len();
    info!(
        "Crawl finished: {} listings from {}/{} pages ({} skipped)",
        summary.listings, summary.pages_loaded, summary.pages_requested, summary.pages_skipped
    );
    (listings, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::Pacer;
    use crate::sources::indeed::SelectorConfig;

    struct EmptyFetcher {
        urls: Vec<String>,
    }

    impl PageFetcher for EmptyFetcher {
        fn fetch(&mut self, url: &str) -> Option<String> {
            self.urls.push(url.to_string());
            Some("<html><body></body></html>".to_string())
        }
    }

    fn search(pages: u32) -> SearchQuery {
        SearchQuery {
            query: "rust".to_string(),
            location: "Pune".to_string(),
            pages,
        }
    }

    #[test]
    fn test_page_offsets() {
        let extractor = ListingExtractor::new(&SelectorConfig::default()).unwrap();
        let mut fetcher = EmptyFetcher { urls: vec![] };
        let (listings, summary) =
            scrape_with_summary(&mut fetcher, &extractor, &Pacer::disabled(), &search(3));

        assert!(listings.is_empty());
        assert_eq!(summary.pages_loaded, 3);
        let starts: Vec<&str> = fetcher
            .urls
            .iter()
            .map(|u| u.rsplit("start=").next().unwrap())
            .collect();
        assert_eq!(starts, vec!["0", "10", "20"]);
    }

    #[test]
    fn test_zero_pages_fetches_nothing() {
        let extractor = ListingExtractor::new(&SelectorConfig::default()).unwrap();
        let mut fetcher = EmptyFetcher { urls: vec![] };
        let listings = scrape_listings(&mut fetcher, &extractor, &Pacer::disabled(), &search(0));
        assert!(listings.is_empty());
        assert!(fetcher.urls.is_empty());
    }
}
