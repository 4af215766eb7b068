use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// User agent sent with every sitemap and page request. Many sites reject
/// empty or library-default agents, so this identifies as a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Main configuration structure for the scraper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerSettings,
    pub browser: BrowserSettings,
    pub storage: StorageSettings,
}

/// HTTP fetching and text extraction settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerSettings {
    /// User-Agent header for every request
    pub user_agent: String,

    /// Total timeout per HTTP request (seconds)
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,

    /// Pages whose static text has fewer words than this are re-rendered in a browser
    pub min_static_words: usize,

    /// Rendered pages below this word count are kept but flagged in the error log
    pub thin_content_words: usize,

    /// Lowercase extracted text before storing it
    pub lowercase_text: bool,

    /// Fetch at most this many pages per seed sitemap
    pub max_pages_per_site: Option<usize>,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            min_static_words: 50,
            thin_content_words: 20,
            lowercase_text: true,
            max_pages_per_site: None,
        }
    }
}

impl CrawlerSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Headless browser used for the rendering fallback
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BrowserSettings {
    /// Disable to never launch a browser
    pub enabled: bool,

    pub headless: bool,

    pub no_sandbox: bool,

    /// Skip image loading while rendering
    pub disable_images: bool,

    /// Upper bound on waiting for the rendered DOM (seconds)
    pub render_wait_secs: u64,

    /// Path to a Chrome/Chromium binary; autodetected when absent
    pub executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            headless: true,
            no_sandbox: true,
            disable_images: true,
            render_wait_secs: 30,
            executable: None,
        }
    }
}

impl BrowserSettings {
    pub fn render_wait(&self) -> Duration {
        Duration::from_secs(self.render_wait_secs)
    }
}

/// Storage fallback chain configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StorageSettings {
    /// Designated local directory; used when its `data/` (or `log/`) subdirectory exists
    pub local_root: PathBuf,

    /// Last-resort root; `data/` and `log/` are created beneath it
    pub fallback_root: PathBuf,

    /// Remote object-storage bucket; the remote tier is skipped when unset
    pub bucket: Option<String>,

    /// Object-storage API base URL
    pub endpoint: String,

    /// Environment variable holding the bearer token for the object store
    pub token_env: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            local_root: PathBuf::from("/persistent"),
            fallback_root: PathBuf::from("."),
            bucket: None,
            endpoint: "https://storage.googleapis.com".to_string(),
            token_env: "STORAGE_ACCESS_TOKEN".to_string(),
        }
    }
}
