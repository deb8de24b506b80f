// tests/scraper_rss.rs
use newsbrief::ingest::scrapers::rss::RssScraper;
use newsbrief::{Scraper, ScrapeError};

const FEED: &str = include_str!("fixtures/sample_rss.xml");

#[tokio::test]
async fn valid_items_survive_and_broken_items_are_skipped() {
    let mut scraper = RssScraper::from_fixture("Daily Pulse", "https://pulse.example/rss/%s", FEED);

    let articles = scraper.collect(Some("Technology")).await.expect("feed ok");

    // 5 items in the fixture: one missing its link, one a duplicate URL and
    // one with an unparsable date are dropped; the feed itself succeeds.
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a.source == "Daily Pulse"));

    let chips = &articles[0];
    assert_eq!(chips.title, "Chip breakthrough announced"); // tags stripped
    assert_eq!(chips.url, "https://pulse.example/articles/chips");
    assert_eq!(chips.categories, vec!["Technology", "Semiconductors"]);

    let budget = &articles[1];
    assert_eq!(budget.categories, vec!["Technology", "Politics", "Economy"]);
    assert_eq!(budget.published_at.to_rfc3339(), "2026-01-02T11:00:00+00:00");
}

#[tokio::test]
async fn dedup_spans_the_whole_session_across_collects() {
    let mut scraper = RssScraper::from_fixture("Daily Pulse", "https://pulse.example/rss/%s", FEED);

    let first = scraper.collect(Some("Technology")).await.unwrap();
    assert_eq!(first.len(), 2);

    // Same session, same URLs: everything is a duplicate now.
    let second = scraper.collect(Some("Politics")).await.unwrap();
    assert!(second.is_empty());

    // A fresh scraper instance is a fresh session.
    let mut fresh = RssScraper::from_fixture("Daily Pulse", "https://pulse.example/rss/%s", FEED);
    assert_eq!(fresh.collect(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn malformed_xml_fails_the_whole_collect() {
    let mut scraper =
        RssScraper::from_fixture("Daily Pulse", "https://pulse.example/rss", "not xml at all");
    match scraper.collect(None).await {
        Err(ScrapeError::Parse { url, .. }) => assert_eq!(url, "https://pulse.example/rss"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn whole_feed_collect_has_no_requested_category() {
    let mut scraper = RssScraper::from_fixture("Daily Pulse", "https://pulse.example/rss", FEED);
    let articles = scraper.collect(None).await.unwrap();
    assert_eq!(articles[0].categories, vec!["Semiconductors"]);
}
