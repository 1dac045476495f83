use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A Chrome DevTools session; requires the `chrome` feature.
#[cfg(feature = "chrome")]
pub mod chrome;

mod navigate;
pub use navigate::{navigate, until_network_idle, RetryPolicy};

/// Why a single navigation attempt failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationFailure {
    #[error("page did not settle within {0:?}")]
    Timeout(Duration),

    #[error("navigation refused, {0}")]
    Refused(String),

    #[error("{0}")]
    Other(String),
}

/// Every navigation attempt failed; `last` is the failure of the final attempt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("failed to load {url} after {attempts} attempts, error({last})")]
pub struct NavigationError {
    pub url: String,
    pub attempts: u32,
    pub last: NavigationFailure,
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("browser launch failed, {0}")]
    Launch(String),

    #[error("page interaction failed, {0}")]
    Page(String),

    #[error("browser close failed, {0}")]
    Close(String),
}

/// One browser page, reused serially for every navigation of a symbol.
///
/// Element queries & text reads happen on the snapshot returned by [`Browser::content`], parsed as
/// a [`crate::dom::Document`].
#[async_trait]
pub trait Browser: Send {
    /// Start navigating to `url`.
    async fn goto(&mut self, url: &str) -> Result<(), NavigationFailure>;

    /// Wait until the document committed by the last `goto`, or by a navigating click, reports
    /// network idle; callers bound this with a timeout.
    async fn wait_for_network_idle(&mut self) -> Result<(), NavigationFailure>;

    /// Click the `index`-th element matching `css`; `false` when there is no such element.
    async fn click(&mut self, css: &str, index: usize) -> Result<bool, BrowserError>;

    /// The rendered DOM of the current page.
    async fn content(&mut self) -> Result<String, BrowserError>;

    /// Release the session; called on every exit path of a symbol's collection.
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// Opens a fresh [`Browser`] session per symbol.
#[async_trait]
pub trait Launcher: Send + Sync {
    type Session: Browser;

    async fn launch(&self) -> Result<Self::Session, BrowserError>;
}
