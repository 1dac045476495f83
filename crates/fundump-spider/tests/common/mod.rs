#![allow(dead_code)]

use async_trait::async_trait;
use fundump_spider::browser::{Browser, BrowserError, Launcher, NavigationFailure};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// pages
// ----------------------------------------------------------

pub const STATISTICS_PAGE: &str = r#"
<html><body>
  <div id="consent"><button>Accept all</button><button>Reject all</button></div>
  <div data-test="quote-header">
    <div><div><div>
      <span>Microsoft Corporation</span><span>NasdaqGS</span><span>1,234.56</span><span>+1.20</span>
    </div></div></div>
  </div>
  <table>
    <tbody>
      <tr><td>Market Cap (intraday)</td><td>2.5T</td></tr>
      <tr><td>Beta (5Y Monthly)</td><td>0.95</td></tr>
    </tbody>
  </table>
  <table>
    <thead><tr><th>Balance Sheet</th><th></th></tr></thead>
    <tbody>
      <tr><td>Total Cash (mrq)</td><td>1.2B</td></tr>
      <tr><td>Total Debt (mrq)</td><td>750M</td></tr>
      <tr><td>Shares Outstanding 5</td><td>7.43B</td></tr>
      <tr><td>Last Split Date 3</td><td>Feb 17, 2003</td></tr>
      <tr><td></td><td></td></tr>
      <tr><td>Forward Annual Dividend Yield 4</td><td>0.79%</td><td>extra</td></tr>
    </tbody>
  </table>
</body></html>
"#;

pub const CASH_FLOW_PAGE: &str = r#"
<html><body>
  <div data-test="fin-row">
    <div data-test="fin-col">87,582</div><div data-test="fin-col">76,740</div>
  </div>
  <div data-test="fin-row">
    <div data-test="fin-col">120,000</div>
    <div data-test="fin-col">100,000</div>
    <div data-test="fin-col">90,000</div>
    <div data-test="fin-col">80,000</div>
    <div data-test="fin-col">70,000</div>
  </div>
</body></html>
"#;

/// The oldest period has no figure.
pub const CASH_FLOW_PAGE_WITH_BLANK: &str = r#"
<html><body>
  <div data-test="fin-row">
    <div data-test="fin-col">120,000</div>
    <div data-test="fin-col">100,000</div>
    <div data-test="fin-col">90,000</div>
    <div data-test="fin-col">80,000</div>
    <div data-test="fin-col">-</div>
  </div>
</body></html>
"#;

fn filler_table(title: &str) -> String {
    format!("<table><thead><tr><th>{title}</th></tr></thead><tbody><tr><td>a</td><td>b</td></tr></tbody></table>")
}

/// Six tables; the last holds the growth estimates.
pub fn analysis_page() -> String {
    let fillers: String = [
        "Earnings Estimate",
        "Revenue Estimate",
        "Earnings History",
        "EPS Trend",
        "EPS Revisions",
    ]
    .iter()
    .map(|title| filler_table(title))
    .collect();

    format!(
        r#"<html><body>{fillers}
        <table>
          <thead><tr><th>Growth Estimates</th><th>MSFT</th><th>Industry</th></tr></thead>
          <tbody>
            <tr><td>Current Qtr.</td><td>5.60%</td><td>N/A</td></tr>
            <tr><td>Next 5 Years (per annum)</td><td>12.50%</td><td>N/A</td></tr>
            <tr><td>Past 5 Years (per annum)</td><td>24.09%</td><td>N/A</td></tr>
            <tr><td>Lonely</td></tr>
          </tbody>
        </table>
        </body></html>"#
    )
}

/// Fewer than six tables; the growth estimates are missing.
pub fn truncated_analysis_page() -> String {
    format!(
        "<html><body>{}{}</body></html>",
        filler_table("Earnings Estimate"),
        filler_table("Revenue Estimate")
    )
}

pub const INSIDER_PAGE: &str = r#"
<html><body>
  <div id="results">7 results.</div>
  <table class="tinytable"><tr><td>P - Purchase</td></tr></table>
</body></html>
"#;

// browser
// ----------------------------------------------------------

/// Serves canned pages by URL fragment, e.g., "/key-statistics".
#[derive(Clone, Default)]
pub struct MockBrowser {
    pages: Vec<(String, String)>,
    current: Option<String>,
    /// Number of upcoming `goto` calls that fail.
    pub failures: usize,
    pub visits: Vec<String>,
    pub clicks: usize,
    closed: Arc<AtomicUsize>,
}

impl MockBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, fragment: &str, html: impl Into<String>) -> Self {
        self.pages.push((fragment.to_string(), html.into()));
        self
    }

    pub fn failing(mut self, failures: usize) -> Self {
        self.failures = failures;
        self
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn goto(&mut self, url: &str) -> Result<(), NavigationFailure> {
        self.visits.push(url.to_string());
        if self.failures > 0 {
            self.failures -= 1;
            return Err(NavigationFailure::Refused("net::ERR_CONNECTION_RESET".to_string()));
        }
        match self.pages.iter().find(|(fragment, _)| url.contains(fragment.as_str())) {
            Some((_, html)) => {
                self.current = Some(html.clone());
                Ok(())
            }
            None => Err(NavigationFailure::Other(format!("no page for {url}"))),
        }
    }

    async fn wait_for_network_idle(&mut self) -> Result<(), NavigationFailure> {
        Ok(())
    }

    async fn click(&mut self, css: &str, index: usize) -> Result<bool, BrowserError> {
        let found = css == "button"
            && self
                .current
                .as_deref()
                .map_or(false, |html| html.matches("<button").count() > index);
        if found {
            self.clicks += 1;
        }
        Ok(found)
    }

    async fn content(&mut self) -> Result<String, BrowserError> {
        self.current
            .clone()
            .ok_or_else(|| BrowserError::Page("nothing loaded".to_string()))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out clones of `template`; every clone shares the close counter.
pub struct MockLauncher {
    pub template: MockBrowser,
}

impl MockLauncher {
    pub fn closed(&self) -> usize {
        self.template.closed()
    }
}

#[async_trait]
impl Launcher for MockLauncher {
    type Session = MockBrowser;

    async fn launch(&self) -> Result<MockBrowser, BrowserError> {
        Ok(self.template.clone())
    }
}

/// A browser serving every page of a healthy symbol.
pub fn full_browser() -> MockBrowser {
    MockBrowser::new()
        .page("/key-statistics", STATISTICS_PAGE)
        .page("/cash-flow", CASH_FLOW_PAGE)
        .page("/analysis", analysis_page())
}
