use chrono::NaiveDate;
use rust_job_scraper::helpers::DateNormalizer;
use rust_job_scraper::models::{CardOutcome, ListingRecord, NOT_AVAILABLE};
use rust_job_scraper::sources::indeed::{ListingExtractor, SelectorConfig, BASE_URL};

fn card(title: Option<&str>, company: &str, location: &str, date: &str, href: &str) -> String {
    let title_html = title
        .map(|t| format!(r#"<h2 class="jobTitle"><span title="{t}">{t}</span></h2>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="job_seen_beacon">
             {title_html}
             <a class="jcs-JobTitle" href="{href}">View</a>
             <span class="css-1h7lukg eu4oa1w0">{company}</span>
             <div class="company_location css-i375s1 e37uo190">{location}</div>
             <span class="heading6 error-text tapItem-gutter">{date}</span>
           </div>"#
    )
}

fn page(cards: &[String]) -> String {
    format!(
        "<html><body><div id=\"mosaic-provider-jobcards\">{}</div></body></html>",
        cards.join("\n")
    )
}

#[test]
fn test_no_cards_returns_empty() {
    let extractor = ListingExtractor::new(&SelectorConfig::default()).unwrap();
    let listings = extractor.parse("<html><body><p>No results</p></body></html>");
    assert!(listings.is_empty());
}

fn pinned_extractor(today: NaiveDate) -> ListingExtractor {
    ListingExtractor::with_origin(
        &SelectorConfig::default(),
        BASE_URL,
        DateNormalizer::default().with_today(today),
    )
    .unwrap()
}

#[test]
fn test_malformed_card_keeps_other_fields() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let extractor = pinned_extractor(today);
    let html = page(&[
        card(Some("Rust Engineer"), "Acme", "Pune", "Today", "/rc/clk?jk=1"),
        card(None, "Globex", "Mumbai", "3 days ago", "/rc/clk?jk=2"),
        card(Some("Backend Developer"), "Initech", "Remote", "12 Jan 2024", "/rc/clk?jk=3"),
    ]);

    let listings = extractor.parse(&html);
    assert_eq!(listings.len(), 3);

    let broken = &listings[1];
    assert_eq!(broken.title, NOT_AVAILABLE);
    assert_eq!(broken.company, "Globex");
    assert_eq!(broken.location, "Mumbai");
    assert_eq!(broken.url, "https://in.indeed.com/rc/clk?jk=2");

    assert_eq!(listings[0].title, "Rust Engineer");
    assert_eq!(listings[0].date_posted, Some(today));
    assert_eq!(listings[1].date_posted, NaiveDate::from_ymd_opt(2024, 3, 7));
    assert_eq!(
        listings[2].date_posted.map(|d| d.to_string()),
        Some("2024-01-12".to_string())
    );
}

#[test]
fn test_missing_link_and_date_use_sentinels() {
    let extractor = ListingExtractor::new(&SelectorConfig::default()).unwrap();
    let html = page(&[r#"<div class="job_seen_beacon">
            <h2 class="jobTitle">Data Analyst</h2>
            <span class="css-1h7lukg eu4oa1w0">Umbrella</span>
        </div>"#
        .to_string()]);

    let listings = extractor.parse(&html);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Data Analyst");
    assert_eq!(listings[0].location, NOT_AVAILABLE);
    assert_eq!(listings[0].url, NOT_AVAILABLE);
    assert!(listings[0].date_posted.is_none());
}

#[test]
fn test_fallback_selectors() {
    let extractor = ListingExtractor::new(&SelectorConfig::default()).unwrap();
    let html = page(&[r#"<div class="job_seen_beacon">
            <h2 class="jobTitle">SRE</h2>
            <span data-testid="company-name">Hooli</span>
            <div data-testid="text-location">Bengaluru, Karnataka</div>
        </div>"#
        .to_string()]);

    let listings = extractor.parse(&html);
    assert_eq!(listings[0].company, "Hooli");
    assert_eq!(listings[0].location, "Bengaluru, Karnataka");
}

#[test]
fn test_date_collection_can_be_disabled() {
    let config = SelectorConfig {
        date: vec![],
        ..SelectorConfig::default()
    };
    let extractor = ListingExtractor::new(&config).unwrap();
    let html = page(&[card(Some("QA"), "Acme", "Delhi", "Today", "/rc/clk?jk=9")]);

    let listings = extractor.parse(&html);
    assert_eq!(listings.len(), 1);
    assert!(listings[0].date_posted.is_none());
}

#[test]
fn test_custom_origin_and_markup() {
    let config = SelectorConfig {
        card: "li.result".to_string(),
        title: vec!["h3".to_string()],
        company: vec![".org".to_string()],
        location: vec![".where".to_string()],
        date: vec![".when".to_string()],
        link: vec!["a".to_string()],
    };
    let extractor = ListingExtractor::with_origin(
        &config,
        "https://www.indeed.com",
        DateNormalizer::default(),
    )
    .unwrap();
    let html = r#"<ul>
        <li class="result"><h3>Ops</h3><a href="/viewjob?jk=7">x</a>
            <span class="org">Wayne</span><span class="where">Gotham</span>
            <span class="when">Yesterday</span></li>
        <li class="result"></li>
    </ul>"#;

    let outcomes = extractor.parse_cards(html);
    assert_eq!(outcomes.len(), 2);
    match &outcomes[0] {
        CardOutcome::Parsed(record) => {
            assert_eq!(record.url, "https://www.indeed.com/viewjob?jk=7");
            assert_eq!(record.company, "Wayne");
            assert!(record.date_posted.is_some());
        }
        other => panic!("expected a parsed card, got {:?}", other),
    }
    assert_eq!(outcomes[1], CardOutcome::Parsed(ListingRecord::default()));
    assert_eq!(extractor.parse(html).len(), 2);
}

#[test]
fn test_card_with_changed_markup_is_kept() {
    let extractor = pinned_extractor(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    let html = page(&[
        card(Some("Rust Engineer"), "Acme", "Pune", "Today", "/rc/clk?jk=1"),
        r#"<div class="job_seen_beacon"><p>markup changed</p></div>"#.to_string(),
        card(Some("SRE"), "Initech", "Remote", "Fri Jan 12, 2024", "/rc/clk?jk=3"),
    ]);

    let listings = extractor.parse(&html);
    assert_eq!(listings.len(), 3);
    assert_eq!(listings[1], ListingRecord::default());
    assert_eq!(listings[2].title, "SRE");
    assert_eq!(listings[2].date_posted, NaiveDate::from_ymd_opt(2024, 1, 12));
}
