use super::fixtures::{Article, Site, config, listing_url, titles, two_year_site};
use crate::crawlers::admission::StopReason;
use crate::crawlers::archive::ArchiveCrawler;
use crate::crawlers::context::CrawlContext;
use crate::error::CrawlError;

#[tokio::test]
async fn test_two_years_in_visiting_order() {
    let (browser, articles) = two_year_site();
    let mut crawler = ArchiveCrawler::new(browser, config(), None, None).with_start_year(2024);

    let report = crawler.crawl().await;

    assert_eq!(
        titles(&report.documents),
        vec![
            "Year 2024 article 1",
            "Year 2024 article 2",
            "Year 2023 article 1",
            "Year 2023 article 2",
        ]
    );
    for (document, article) in report.documents.iter().zip(&articles) {
        assert_eq!(document.web_link, article.url);
        assert!(document.identifier.is_none());
    }
    // 2022 has no archive, which ends the crawl
    assert!(matches!(
        report.stop,
        StopReason::Fatal(CrawlError::Navigation { ref url, .. }) if url == &listing_url(2022, 1)
    ));
}

#[tokio::test]
async fn test_max_count_stops_before_third_article() {
    let (browser, articles) = two_year_site();
    let mut crawler = ArchiveCrawler::new(browser, config(), Some(2), None).with_start_year(2024);

    let report = crawler.crawl().await;

    assert_eq!(
        titles(&report.documents),
        vec!["Year 2024 article 1", "Year 2024 article 2"]
    );
    assert!(matches!(report.stop, StopReason::MaxCountReached(2)));

    let browser = crawler.into_browser();
    assert!(!browser.visits().contains(&articles[2].url));
    assert!(!browser.visits().contains(&listing_url(2023, 1)));
}

#[tokio::test]
async fn test_max_count_never_exceeded() {
    for max in 0..6 {
        let (browser, _) = two_year_site();
        let mut crawler =
            ArchiveCrawler::new(browser, config(), Some(max), None).with_start_year(2024);
        let documents = crawler.content().await;
        assert_eq!(documents.len(), max.min(4), "max count {}", max);
    }
}

#[tokio::test]
async fn test_zero_max_count_visits_no_article() {
    let (browser, articles) = two_year_site();
    let mut crawler = ArchiveCrawler::new(browser, config(), Some(0), None).with_start_year(2024);

    let report = crawler.crawl().await;

    assert!(report.documents.is_empty());
    assert!(matches!(report.stop, StopReason::MaxCountReached(0)));
    assert!(!crawler.into_browser().visits().contains(&articles[0].url));
}

#[tokio::test]
async fn test_last_document_halts_crawl() {
    let (browser, articles) = two_year_site();
    let last = articles[1].document();
    let mut crawler =
        ArchiveCrawler::new(browser, config(), None, Some(&last)).with_start_year(2024);

    let report = crawler.crawl().await;

    assert_eq!(titles(&report.documents), vec!["Year 2024 article 1"]);
    assert!(matches!(report.stop, StopReason::AlreadySeen));
}

#[tokio::test]
async fn test_last_document_in_older_year() {
    let (browser, articles) = two_year_site();
    let last = articles[3].document();
    let mut crawler =
        ArchiveCrawler::new(browser, config(), None, Some(&last)).with_start_year(2024);

    let documents = crawler.content().await;

    // Exactly the k-1 records before the duplicate at position k = 4
    assert_eq!(documents.len(), 3);
    assert_eq!(documents[2].title, "Year 2023 article 1");
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let (browser, articles) = two_year_site();
    let last = articles[2].document();

    let first = ArchiveCrawler::new(browser, config(), None, Some(&last))
        .with_start_year(2024)
        .content()
        .await;

    let (browser, _) = two_year_site();
    let second = ArchiveCrawler::new(browser, config(), None, Some(&last))
        .with_start_year(2024)
        .content()
        .await;

    let hashes = |docs: &[crate::results::Document]| docs.iter().map(|d| d.hash()).collect::<Vec<_>>();
    assert_eq!(hashes(&first), hashes(&second));
    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn test_broken_article_is_skipped() {
    let good = Article::new(2024, 1);
    let mut undated = Article::new(2024, 2);
    undated.datetime = "sometime in spring".to_string();
    let mut untitled = Article::new(2024, 3);
    untitled.title = "   ".to_string();
    let unreachable = Article::new(2024, 4);
    let last = Article::new(2024, 5);

    let mut browser = Site::new()
        .year(
            2024,
            &[vec![good.clone(), undated, untitled, last.clone()]],
        )
        .build();
    // An entry pointing to a page that never loads
    browser.insert_page(
        &listing_url(2024, 1),
        &super::fixtures::listing_html(
            &[
                good.url.clone(),
                Article::new(2024, 2).url,
                Article::new(2024, 3).url,
                unreachable.url.clone(),
                last.url.clone(),
            ],
            None,
        ),
    );

    let documents = ArchiveCrawler::new(browser, config(), None, None)
        .with_start_year(2024)
        .content()
        .await;

    assert_eq!(
        titles(&documents),
        vec!["Year 2024 article 1", "Year 2024 article 5"]
    );
}

#[tokio::test]
async fn test_missing_listing_container_returns_partial() {
    let newest = Article::new(2024, 1);
    let browser = Site::new()
        .year(2024, &[vec![newest]])
        .page(&listing_url(2023, 1), "<html><body><p>Not found</p></body></html>")
        .build();

    let report = ArchiveCrawler::new(browser, config(), None, None)
        .with_start_year(2024)
        .crawl()
        .await;

    assert_eq!(titles(&report.documents), vec!["Year 2024 article 1"]);
    assert!(matches!(
        report.stop,
        StopReason::Fatal(CrawlError::ListingNotFound { .. })
    ));
    assert!(!report.stop.is_normal());
}

#[tokio::test]
async fn test_unreachable_first_year_yields_nothing() {
    let browser = Site::new().build();
    let documents = ArchiveCrawler::new(browser, config(), None, None)
        .with_start_year(2024)
        .with_context(CrawlContext::new("nfcw-backfill"))
        .content()
        .await;
    assert!(documents.is_empty());
}
