use super::{until_network_idle, Browser, BrowserError, Launcher, NavigationFailure};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as Chrome, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::error::CdpError;
use chromiumoxide::listeners::EventStream;
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Budget for a single DevTools request, e.g., a page load.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Launches a headless Chrome per symbol.
#[derive(Clone, Debug, Default)]
pub struct ChromeLauncher {
    /// Show the browser window, for debugging.
    pub with_head: bool,
}

#[async_trait]
impl Launcher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> Result<ChromeSession, BrowserError> {
        let mut builder = BrowserConfig::builder().request_timeout(REQUEST_TIMEOUT);
        if self.with_head {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (chrome, mut handler) = Chrome::launch(config)
            .await
            .map_err(|err| BrowserError::Launch(err.to_string()))?;

        // the handler drives the CDP connection & must be polled for the session's lifetime
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    trace!("chrome handler stopped, error({err})");
                    break;
                }
            }
        });

        let page = chrome
            .new_page("about:blank")
            .await
            .map_err(|err| BrowserError::Launch(err.to_string()))?;
        page.execute(SetLifecycleEventsEnabledParams::new(true))
            .await
            .map_err(|err| BrowserError::Launch(err.to_string()))?;
        debug!("chrome session launched");

        Ok(ChromeSession {
            chrome,
            page,
            handler: Some(handler),
            lifecycle: None,
        })
    }
}

pub struct ChromeSession {
    chrome: Chrome,
    page: Page,
    handler: Option<JoinHandle<()>>,
    // lifecycle events since the last `goto` or click
    lifecycle: Option<EventStream<EventLifecycleEvent>>,
}

impl From<CdpError> for NavigationFailure {
    fn from(err: CdpError) -> Self {
        match err {
            CdpError::Timeout => NavigationFailure::Timeout(REQUEST_TIMEOUT),
            err if err.to_string().contains("net::ERR") => {
                NavigationFailure::Refused(err.to_string())
            }
            err => NavigationFailure::Other(err.to_string()),
        }
    }
}

#[async_trait]
impl Browser for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<(), NavigationFailure> {
        // subscribe first, so the new document's events cannot be missed
        let events = self
            .page
            .event_listener::<EventLifecycleEvent>()
            .await
            .map_err(NavigationFailure::from)?;
        self.lifecycle = Some(events);
        self.page.goto(url).await.map_err(NavigationFailure::from)?;
        Ok(())
    }

    async fn wait_for_network_idle(&mut self) -> Result<(), NavigationFailure> {
        let events = self.lifecycle.take().ok_or_else(|| {
            NavigationFailure::Other("no navigation to wait for".to_string())
        })?;
        let main_frame = self
            .page
            .mainframe()
            .await
            .map_err(NavigationFailure::from)?
            .ok_or_else(|| NavigationFailure::Other("page has no main frame".to_string()))?;

        let events = events.map(|event| {
            let source: &str = event.frame_id.as_ref();
            (source.to_string(), event.name.clone())
        });
        until_network_idle(events, main_frame.as_ref()).await
    }

    async fn click(&mut self, css: &str, index: usize) -> Result<bool, BrowserError> {
        let elements = self
            .page
            .find_elements(css)
            .await
            .map_err(|err| BrowserError::Page(err.to_string()))?;
        match elements.get(index) {
            Some(element) => {
                // the click may navigate, e.g., a consent redirect
                let events = self
                    .page
                    .event_listener::<EventLifecycleEvent>()
                    .await
                    .map_err(|err| BrowserError::Page(err.to_string()))?;
                self.lifecycle = Some(events);
                element
                    .click()
                    .await
                    .map_err(|err| BrowserError::Page(err.to_string()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn content(&mut self) -> Result<String, BrowserError> {
        self.page
            .content()
            .await
            .map_err(|err| BrowserError::Page(err.to_string()))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        let closed = self
            .chrome
            .close()
            .await
            .map(|_| ())
            .map_err(|err| BrowserError::Close(err.to_string()));
        if let Err(err) = self.chrome.wait().await {
            trace!("chrome process wait failed, error({err})");
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        closed
    }
}
