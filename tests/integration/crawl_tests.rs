//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers for sitemaps, pages,
//! PDFs and the object-store API, and a fake browser that records how many
//! sessions were opened and closed.

use async_trait::async_trait;
use sitemap_scraper::config::{BrowserSettings, Config, CrawlerSettings};
use sitemap_scraper::crawler::{
    build_http_client, BrowserLauncher, BrowserSession, Coordinator, CrawlEvent, FetchedVia,
    PageFetcher, RenderError,
};
use sitemap_scraper::sitemap::{ResolutionStatus, SitemapResolver};
use sitemap_scraper::storage::{
    DatasetRow, HttpObjectStore, ObjectStore, Persistence, ScrapeDataset, StorageError,
    StorageResult, StorageTier,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ===== Fixtures =====

#[derive(Default)]
struct BrowserCounters {
    launches: AtomicUsize,
    closes: AtomicUsize,
}

impl BrowserCounters {
    fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
enum FakeRender {
    Html(String),
    Fail,
    Hang,
}

/// Browser double that records open/close calls
struct FakeBrowser {
    counters: Arc<BrowserCounters>,
    behaviour: FakeRender,
}

impl FakeBrowser {
    fn new(behaviour: FakeRender) -> (Arc<Self>, Arc<BrowserCounters>) {
        let counters = Arc::new(BrowserCounters::default());
        let browser = Arc::new(Self {
            counters: counters.clone(),
            behaviour,
        });
        (browser, counters)
    }
}

struct FakeSession {
    counters: Arc<BrowserCounters>,
    behaviour: FakeRender,
}

#[async_trait]
impl BrowserLauncher for FakeBrowser {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, RenderError> {
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            counters: self.counters.clone(),
            behaviour: self.behaviour.clone(),
        }))
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn render(&mut self, url: &str, _wait: Duration) -> Result<String, RenderError> {
        match &self.behaviour {
            FakeRender::Html(html) => Ok(html.clone()),
            FakeRender::Fail => Err(RenderError::Navigation {
                url: url.to_string(),
                message: "net::ERR_ABORTED".to_string(),
            }),
            FakeRender::Hang => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        self.counters.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Object store whose writes always fail
struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn put(&self, _: &str, _: &str, _: Vec<u8>, _: &str) -> StorageResult<()> {
        Err(StorageError::Network("connection reset".to_string()))
    }

    async fn get(&self, bucket: &str, path: &str) -> StorageResult<Vec<u8>> {
        Err(StorageError::NotFound(format!("{}/{}", bucket, path)))
    }

    async fn exists(&self, _: &str) -> StorageResult<bool> {
        Ok(true)
    }
}

fn words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| format!("{}{}", prefix, i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn urlset(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

fn sitemap_index(locs: &[String]) -> String {
    let entries: String = locs
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/xml"))
        .mount(server)
        .await;
}

async fn mount_html(server: &MockServer, route: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

fn resolver() -> SitemapResolver {
    SitemapResolver::new(build_http_client(&CrawlerSettings::default()).unwrap())
}

fn fetcher(browser: Arc<dyn BrowserLauncher>) -> PageFetcher {
    let settings = CrawlerSettings::default();
    let client = build_http_client(&settings).unwrap();
    PageFetcher::new(client, &settings, &BrowserSettings::default()).with_browser(browser)
}

// ===== Sitemap resolution =====

#[tokio::test]
async fn test_flat_sitemap_keeps_document_order() {
    let server = MockServer::start().await;
    let base = server.uri();
    let locs = vec![
        format!("{}/zeta", base),
        format!("{}/alpha", base),
        format!("{}/mid", base),
    ];
    mount_xml(&server, "/sitemap.xml", urlset(&locs)).await;

    let resolution = resolver().resolve(&format!("{}/sitemap.xml", base)).await;

    assert_eq!(resolution.status, ResolutionStatus::Success);
    assert!(!resolution.is_nested);
    assert_eq!(resolution.urls, locs);
}

#[tokio::test]
async fn test_nested_sitemap_drops_images() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/sitemap2.xml", base)]),
    )
    .await;
    mount_xml(
        &server,
        "/sitemap2.xml",
        urlset(&[format!("{}/page1", base), format!("{}/logo.png", base)]),
    )
    .await;

    let resolution = resolver().resolve(&format!("{}/sitemap.xml", base)).await;

    assert!(resolution.is_success());
    assert!(resolution.is_nested);
    assert_eq!(resolution.urls, vec![format!("{}/page1", base)]);
}

#[tokio::test]
async fn test_nested_union_is_deduplicated() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_xml(
        &server,
        "/index.xml",
        sitemap_index(&[
            format!("{}/posts.xml", base),
            format!("{}/pages.xml", base),
            format!("{}/missing.xml", base),
        ]),
    )
    .await;
    mount_xml(
        &server,
        "/posts.xml",
        urlset(&[format!("{}/a", base), format!("{}/b", base)]),
    )
    .await;
    mount_xml(
        &server,
        "/pages.xml",
        urlset(&[format!("{}/b", base), format!("{}/c", base)]),
    )
    .await;

    let resolution = resolver().resolve(&format!("{}/index.xml", base)).await;

    assert!(resolution.is_success());
    assert_eq!(
        resolution.urls,
        vec![
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/c", base)
        ]
    );
    assert!(resolution.message.contains("2 of 3 nested sitemaps"));
}

#[tokio::test]
async fn test_nested_sitemaps_with_no_pages_fail() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_xml(
        &server,
        "/sitemap.xml",
        sitemap_index(&[format!("{}/gone.xml", base)]),
    )
    .await;

    let resolution = resolver().resolve(&format!("{}/sitemap.xml", base)).await;

    assert_eq!(resolution.status, ResolutionStatus::Failure);
    assert!(resolution.is_nested);
    assert!(resolution.urls.is_empty());
    assert!(resolution.message.contains("yielded no page URLs"));
}

#[tokio::test]
async fn test_missing_seed_fails() {
    let server = MockServer::start().await;

    let resolution = resolver()
        .resolve(&format!("{}/sitemap.xml", server.uri()))
        .await;

    assert_eq!(resolution.status, ResolutionStatus::Failure);
    assert!(resolution.urls.is_empty());
    assert!(resolution.message.contains("404"));
}

#[tokio::test]
async fn test_empty_seed_body_fails() {
    let server = MockServer::start().await;
    mount_xml(&server, "/sitemap.xml", String::new()).await;

    let resolution = resolver()
        .resolve(&format!("{}/sitemap.xml", server.uri()))
        .await;

    assert_eq!(resolution.status, ResolutionStatus::Failure);
    assert!(resolution.urls.is_empty());
}

#[tokio::test]
async fn test_resolution_is_idempotent() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/one", base),
            format!("{}/two", base),
            format!("{}/one", base),
            format!("{}/photo.JPG", base),
        ]),
    )
    .await;

    let resolver = resolver();
    let seed = format!("{}/sitemap.xml", base);
    let first = resolver.resolve(&seed).await;
    let second = resolver.resolve(&seed).await;

    assert_eq!(first.urls, vec![format!("{}/one", base), format!("{}/two", base)]);
    assert_eq!(first.urls, second.urls);
    assert!(first.urls.iter().all(|u| !u.to_lowercase().ends_with(".jpg")));
}

// ===== Page fetching =====

#[tokio::test]
async fn test_static_page_with_enough_words_is_not_rendered() {
    let server = MockServer::start().await;
    let body = format!(
        "<html><body><nav>Home About Contact</nav><p>Hello world {}</p></body></html>",
        words("lorem", 60)
    );
    mount_html(&server, "/article", 200, body).await;

    let (browser, counters) = FakeBrowser::new(FakeRender::Html("<p>rendered</p>".to_string()));
    let page = fetcher(browser)
        .fetch(&format!("{}/article", server.uri()))
        .await;

    assert_eq!(page.fetched_via, FetchedVia::Static);
    assert!(page.error.is_none());
    assert!(page.text.starts_with("hello world lorem0"));
    assert!(!page.text.contains("contact"));
    assert_eq!(counters.launches(), 0);
}

#[tokio::test]
async fn test_thin_static_page_is_rendered() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/app",
        200,
        "<html><body><div id=\"root\">Loading</div><script>boot()</script></body></html>"
            .to_string(),
    )
    .await;

    let rendered = format!("<html><body><main>{}</main></body></html>", words("Rendered", 40));
    let (browser, counters) = FakeBrowser::new(FakeRender::Html(rendered));
    let page = fetcher(browser).fetch(&format!("{}/app", server.uri())).await;

    assert_eq!(page.fetched_via, FetchedVia::Rendered);
    assert!(page.error.is_none());
    assert!(page.text.starts_with("rendered0 rendered1"));
    assert_eq!(counters.launches(), 1);
    assert_eq!(counters.closes(), 1);
}

#[tokio::test]
async fn test_error_status_is_rendered() {
    let server = MockServer::start().await;
    mount_html(&server, "/blocked", 403, "Forbidden".to_string()).await;

    let rendered = format!("<p>{}</p>", words("real", 30));
    let (browser, counters) = FakeBrowser::new(FakeRender::Html(rendered));
    let page = fetcher(browser)
        .fetch(&format!("{}/blocked", server.uri()))
        .await;

    assert_eq!(page.fetched_via, FetchedVia::Rendered);
    assert!(page.text.starts_with("real0"));
    assert_eq!(counters.launches(), 1);
    assert_eq!(counters.closes(), 1);
}

#[tokio::test]
async fn test_rendered_thin_content_keeps_text_with_warning() {
    let server = MockServer::start().await;
    mount_html(&server, "/tiny", 200, "<p>tiny</p>".to_string()).await;

    let (browser, _) = FakeBrowser::new(FakeRender::Html("<p>Still tiny</p>".to_string()));
    let page = fetcher(browser).fetch(&format!("{}/tiny", server.uri())).await;

    assert_eq!(page.text, "still tiny");
    assert!(!page.is_failure());
    assert!(page.error.unwrap().contains("thin content"));
}

#[tokio::test]
async fn test_browser_closed_when_render_fails() {
    let server = MockServer::start().await;
    mount_html(&server, "/broken", 500, String::new()).await;

    let (browser, counters) = FakeBrowser::new(FakeRender::Fail);
    let page = fetcher(browser)
        .fetch(&format!("{}/broken", server.uri()))
        .await;

    assert!(page.is_failure());
    assert_eq!(page.fetched_via, FetchedVia::Rendered);
    assert!(page.error.unwrap().contains("net::ERR_ABORTED"));
    assert_eq!(counters.launches(), 1);
    assert_eq!(counters.closes(), counters.launches());
}

#[tokio::test]
async fn test_pdf_is_never_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(b"%PDF-1.4 truncated".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let (browser, counters) = FakeBrowser::new(FakeRender::Html("<p>html</p>".to_string()));
    let page = fetcher(browser)
        .fetch(&format!("{}/report", server.uri()))
        .await;

    assert_eq!(page.fetched_via, FetchedVia::Pdf);
    assert!(page.is_failure());
    assert!(page.error.unwrap().starts_with("PDF extraction failed"));
    assert_eq!(counters.launches(), 0);
}

#[tokio::test]
async fn test_disabled_browser_keeps_static_text() {
    let server = MockServer::start().await;
    mount_html(&server, "/short", 200, "<p>Only a few words here</p>".to_string()).await;

    let settings = CrawlerSettings::default();
    let client = build_http_client(&settings).unwrap();
    let fetcher = PageFetcher::new(client, &settings, &BrowserSettings::default());
    let page = fetcher.fetch(&format!("{}/short", server.uri())).await;

    assert_eq!(page.fetched_via, FetchedVia::Static);
    assert_eq!(page.text, "only a few words here");
    assert!(page.error.unwrap().contains("rendering is disabled"));
}

// ===== Persistence =====

fn sample_dataset() -> ScrapeDataset {
    ScrapeDataset::new(
        vec![DatasetRow {
            key: "https://example.com/".to_string(),
            text: "welcome".to_string(),
        }],
        chrono::Utc::now(),
    )
}

#[tokio::test]
async fn test_persistence_falls_through_to_local_data_dir() {
    let dir = TempDir::new().unwrap();
    let persistence = Persistence::new(dir.path().join("persistent"), dir.path())
        .with_object_store(Arc::new(FailingStore), "scrapes");

    let dataset = sample_dataset();
    let filename = format!("example.com_{}.csv", dataset.timestamp_label());
    let outcome = persistence.save_dataset(&dataset, &filename).await;

    assert!(outcome.success);
    assert_eq!(outcome.tier, Some(StorageTier::Fallback));
    assert!(dir.path().join("data").join(&filename).is_file());

    let loaded = persistence.load(&filename).await.unwrap();
    assert_eq!(loaded, dataset);
}

#[tokio::test]
async fn test_http_object_store_upload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/b/scrapes"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/scrapes/o"))
        .and(query_param("uploadType", "media"))
        .and(query_param("name", "data/example.com_2024-01-01T00-00-00.csv"))
        .and(header("authorization", "Bearer secret"))
        .and(header("content-type", "text/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = HttpObjectStore::new(&server.uri(), Some("secret".to_string())).unwrap();
    let persistence =
        Persistence::new(dir.path().join("persistent"), dir.path()).with_object_store(Arc::new(store), "scrapes");

    let outcome = persistence
        .save_dataset(&sample_dataset(), "example.com_2024-01-01T00-00-00.csv")
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.tier, Some(StorageTier::ObjectStore));
    assert!(!dir.path().join("data").exists());
}

#[tokio::test]
async fn test_http_object_store_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/storage/v1/b/private"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = HttpObjectStore::new(&server.uri(), Some("expired".to_string())).unwrap();
    let result = store.exists("private").await;

    assert!(matches!(result, Err(StorageError::Unauthenticated(_))));
}

// ===== End to end =====

#[tokio::test]
async fn test_full_crawl_single_sitemap() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&[
            format!("{}/long", base),
            format!("{}/short", base),
            "/relative".to_string(),
            format!("{}/doc.pdf", base),
            format!("{}/long", base),
            format!("{}/banner.gif", base),
        ]),
    )
    .await;
    mount_html(&server, "/long", 200, format!("<p>{}</p>", words("long", 60))).await;
    mount_html(&server, "/short", 200, "<p>short</p>".to_string()).await;
    mount_html(
        &server,
        "/relative",
        200,
        format!("<footer>Legal</footer><p>{}</p>", words("rel", 55)),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/doc.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"not a pdf".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let (browser, counters) =
        FakeBrowser::new(FakeRender::Html(format!("<p>{}</p>", words("js", 50))));
    let coordinator = Coordinator::new(
        Config::default(),
        resolver(),
        fetcher(browser),
        Persistence::new(dir.path().join("persistent"), dir.path()),
    );
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let coordinator = coordinator.with_progress(tx);

    let seed = format!("{}/sitemap.xml", base);
    let reports = coordinator.crawl(&[seed.clone()]).await.unwrap();

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    let keys: Vec<_> = report.dataset.rows.iter().map(|r| r.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            format!("{}/long", base),
            format!("{}/short", base),
            format!("{}/relative", base),
        ]
    );
    assert!(!report.dataset.rows[2].text.contains("legal"));
    assert_eq!(report.error_log.len(), 1);
    assert_eq!(report.error_log.rows[0].key, format!("{}/doc.pdf", base));
    assert!(!report.cancelled);

    assert!(report.filename.starts_with("127.0.0.1_"));
    assert!(dir.path().join("data").join(&report.filename).is_file());
    assert!(dir.path().join("log").join(&report.filename).is_file());
    assert_eq!(counters.launches(), 1);
    assert_eq!(counters.closes(), 1);

    let mut progress = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let CrawlEvent::Fetching { .. } = event {
            progress.push(event.to_string());
        }
    }
    assert_eq!(progress[0], format!("1 of 4: {}/long", base));
    assert_eq!(progress[3], format!("4 of 4: {}/doc.pdf", base));
}

#[tokio::test]
async fn test_relative_duplicate_is_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&[format!("{}/page1", base), "/page1".to_string()]),
    )
    .await;
    mount_html(&server, "/page1", 200, format!("<p>{}</p>", words("one", 60))).await;

    let dir = TempDir::new().unwrap();
    let (browser, _) = FakeBrowser::new(FakeRender::Fail);
    let coordinator = Coordinator::new(
        Config::default(),
        resolver(),
        fetcher(browser),
        Persistence::new(dir.path().join("persistent"), dir.path()),
    );

    let report = coordinator
        .crawl_seed(&format!("{}/sitemap.xml", base))
        .await
        .unwrap()
        .unwrap();

    let keys: Vec<_> = report.dataset.rows.iter().map(|r| r.key.clone()).collect();
    assert_eq!(keys, vec![format!("{}/page1", base)]);
    assert_eq!(report.stats.pages_attempted, 1);
}

#[tokio::test]
async fn test_crawl_skips_seed_without_pages() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let (browser, _) = FakeBrowser::new(FakeRender::Fail);
    let coordinator = Coordinator::new(
        Config::default(),
        resolver(),
        fetcher(browser),
        Persistence::new(dir.path().join("persistent"), dir.path()),
    );

    let reports = coordinator
        .crawl(&[format!("{}/sitemap.xml", server.uri())])
        .await
        .unwrap();

    assert!(reports.is_empty());
    assert!(!dir.path().join("data").exists());
}

#[tokio::test]
async fn test_max_pages_per_site_caps_fetches() {
    let server = MockServer::start().await;
    let base = server.uri();
    let locs: Vec<String> = (0..5).map(|i| format!("{}/p{}", base, i)).collect();
    mount_xml(&server, "/sitemap.xml", urlset(&locs)).await;
    for i in 0..5 {
        mount_html(&server, &format!("/p{}", i), 200, format!("<p>{}</p>", words("w", 60))).await;
    }

    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.crawler.max_pages_per_site = Some(2);
    let (browser, _) = FakeBrowser::new(FakeRender::Fail);
    let coordinator = Coordinator::new(
        config,
        resolver(),
        fetcher(browser),
        Persistence::new(dir.path().join("persistent"), dir.path()),
    );

    let report = coordinator
        .crawl_seed(&format!("{}/sitemap.xml", base))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(report.dataset.len(), 2);
    assert_eq!(report.stats.pages_attempted, 2);
}

#[tokio::test]
async fn test_cancellation_mid_render_releases_browser() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_xml(
        &server,
        "/sitemap.xml",
        urlset(&[format!("{}/ok", base), format!("{}/spa", base), format!("{}/never", base)]),
    )
    .await;
    mount_html(&server, "/ok", 200, format!("<p>{}</p>", words("ok", 60))).await;
    mount_html(&server, "/spa", 200, "<div id=\"app\"></div>".to_string()).await;

    let dir = TempDir::new().unwrap();
    let (browser, counters) = FakeBrowser::new(FakeRender::Hang);
    let token = CancellationToken::new();
    let coordinator = Coordinator::new(
        Config::default(),
        resolver(),
        fetcher(browser),
        Persistence::new(dir.path().join("persistent"), dir.path()),
    )
    .with_cancellation(token.clone());

    let canceller = {
        let counters = counters.clone();
        tokio::spawn(async move {
            while counters.launches() == 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
            token.cancel();
        })
    };

    let report = coordinator
        .crawl_seed(&format!("{}/sitemap.xml", base))
        .await
        .unwrap()
        .unwrap();
    canceller.await.unwrap();

    assert!(report.cancelled);
    assert_eq!(report.dataset.len(), 1);
    assert_eq!(report.dataset.rows[0].key, format!("{}/ok", base));
    assert!(dir.path().join("data").join(&report.filename).is_file());

    for _ in 0..50 {
        if counters.closes() == counters.launches() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(counters.launches(), 1);
    assert_eq!(counters.closes(), 1);
}
