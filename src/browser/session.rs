//! Browser session bootstrap and teardown.

use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::infrastructure::dom::PageDom;

/// One browser connection, scoped to a single run.
///
/// Owned exclusively by the application; [`FormSession::close`] must run
/// on every exit path, success or failure.
pub struct FormSession {
    page: Page,
    events: JoinHandle<()>,
    _browser: Browser,
}

impl FormSession {
    /// Connects to a browser already listening on the devtools `port` and
    /// opens a fresh page for the run.
    pub async fn connect(port: u16) -> Result<Self> {
        let browser_url = format!("http://localhost:{port}");
        info!("connecting to browser at {browser_url}");

        let (browser, mut handler) = Browser::connect(&browser_url)
            .await
            .with_context(|| format!("failed to connect to browser at {browser_url}"))?;

        // Drain browser events in the background for the life of the session.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        // Give the connection a moment to settle before opening a page.
        sleep(Duration::from_millis(300)).await;

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to open a page")?;
        debug!("browser session established");

        Ok(Self {
            page,
            events,
            _browser: browser,
        })
    }

    /// DOM capability bound to this session's page.
    pub fn dom(&self) -> PageDom {
        PageDom::new(self.page.clone())
    }

    /// Releases the session: closes the run's page and stops the event
    /// task. The browser process itself is externally owned and stays up.
    pub async fn close(self) {
        if let Err(e) = self.page.close().await {
            warn!("failed to close session page: {e}");
        }
        self.events.abort();
        info!("browser session released");
    }
}
