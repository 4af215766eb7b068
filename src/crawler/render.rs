//! Headless browser rendering
//!
//! Pages that return little or no text to a plain HTTP fetch are rendered in a
//! headless browser. Each render owns one browser process for exactly its own
//! duration:
//! - [`BrowserLauncher`] starts a fresh [`BrowserSession`]
//! - [`BrowserGuard`] owns the session and guarantees it is closed, either
//!   explicitly via [`BrowserGuard::close`] or, if the render future is dropped
//!   mid-flight, by scheduling the close from `Drop`
//! - [`ChromiumLauncher`] is the production launcher (Chrome DevTools Protocol)

use crate::config::BrowserSettings;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Errors raised while rendering a page in a browser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("browser rendering is disabled")]
    Disabled,

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("timed out after {0:?} waiting for the rendered page")]
    Timeout(Duration),

    #[error("failed to read rendered content: {0}")]
    Content(String),

    #[error("failed to close browser: {0}")]
    Close(String),
}

/// Starts browser sessions
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launches a new, exclusive browser session
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, RenderError>;
}

/// A running browser that can render pages
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates to `url`, waits up to `wait` for the DOM, and returns the rendered HTML
    async fn render(&mut self, url: &str, wait: Duration) -> Result<String, RenderError>;

    /// Shuts the browser down and releases its process
    async fn close(&mut self) -> Result<(), RenderError>;
}

/// Scoped owner of a browser session
///
/// Always prefer the explicit async [`close`](Self::close). The `Drop` fallback
/// exists for cancellation: when the future holding the guard is dropped, the
/// session is closed on a background task of the captured runtime.
pub struct BrowserGuard {
    session: Option<Box<dyn BrowserSession>>,
    url: String,
    runtime: Option<tokio::runtime::Handle>,
}

impl BrowserGuard {
    pub fn new(session: Box<dyn BrowserSession>, url: impl Into<String>) -> Self {
        Self {
            session: Some(session),
            url: url.into(),
            runtime: tokio::runtime::Handle::try_current().ok(),
        }
    }

    /// Renders the guarded URL
    pub async fn render(&mut self, wait: Duration) -> Result<String, RenderError> {
        match self.session.as_mut() {
            Some(session) => session.render(&self.url, wait).await,
            None => Err(RenderError::Content("browser session already closed".to_string())),
        }
    }

    /// Closes the session, consuming the guard
    pub async fn close(mut self) -> Result<(), RenderError> {
        match self.session.take() {
            Some(mut session) => {
                let result = session.close().await;
                match &result {
                    Ok(()) => tracing::trace!("Browser closed for {}", self.url),
                    Err(e) => tracing::warn!("Browser close failed for {}: {}", self.url, e),
                }
                result
            }
            None => Ok(()),
        }
    }
}

impl Drop for BrowserGuard {
    fn drop(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        let url = std::mem::take(&mut self.url);

        match &self.runtime {
            Some(handle) => {
                handle.spawn(async move {
                    match session.close().await {
                        Ok(()) => tracing::trace!("Browser closed after cancellation for {}", url),
                        Err(e) => {
                            tracing::warn!("Browser cleanup failed for {}: {}", url, e)
                        }
                    }
                });
            }
            None => {
                tracing::warn!("No runtime available to close browser for {}", url);
            }
        }
    }
}

/// Launches headless Chromium via the DevTools protocol
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    settings: BrowserSettings,
    user_agent: String,
}

impl ChromiumLauncher {
    pub fn new(settings: BrowserSettings, user_agent: impl Into<String>) -> Self {
        Self {
            settings,
            user_agent: user_agent.into(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(self.settings.render_wait())
            .arg("--disable-dev-shm-usage")
            .arg(format!("--user-agent={}", self.user_agent));

        if !self.settings.headless {
            builder = builder.with_head();
        }
        if self.settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if self.settings.disable_images {
            builder = builder.arg("--blink-settings=imagesEnabled=false");
        }
        if let Some(path) = &self.settings.executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(RenderError::Launch)
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, RenderError> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Box::new(ChromiumSession {
            browser,
            handler_task,
        }))
    }
}

struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn render(&mut self, url: &str, wait: Duration) -> Result<String, RenderError> {
        let navigation = |e: CdpError| RenderError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };

        let page = self.browser.new_page(url).await.map_err(navigation)?;

        let ready = tokio::time::timeout(wait, async {
            page.wait_for_navigation().await?;
            page.find_element("body").await?;
            Ok::<_, CdpError>(())
        })
        .await;

        match ready {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(navigation(e)),
            Err(_) => return Err(RenderError::Timeout(wait)),
        }

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::Content(e.to_string()))?;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close tab for {}: {}", url, e);
        }

        Ok(html)
    }

    async fn close(&mut self) -> Result<(), RenderError> {
        let result = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| RenderError::Close(e.to_string()));

        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Browser process did not exit cleanly: {}", e);
        }
        self.handler_task.abort();

        result
    }
}
