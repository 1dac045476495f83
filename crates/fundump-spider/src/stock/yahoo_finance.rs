use crate::browser::{navigate, Browser, RetryPolicy};
use crate::dom::{Document, SelectorError};
use crate::extract::cash_flow::{self, FreeCashFlow};
use crate::extract::growth::{self, GrowthEstimates, Positional};
use crate::extract::stats::{self, Statistics};
use crate::normalize::normalize;
use std::time::Duration;
use tracing::{debug, error, trace, warn};

const QUOTE_HEADER: &str = "[data-test=\"quote-header\"]";
const QUOTE_SPANS: &str = "div > div > div > span";
const FIN_ROW: &str = "[data-test=\"fin-row\"]";
const FIN_COL: &str = "[data-test=\"fin-col\"]";

/// The cookie consent dialog; its first button accepts.
const CONSENT_BUTTON: &str = "button";

/// Upper bound on settling after the consent click, which often does not navigate at all.
const CONSENT_SETTLE: Duration = Duration::from_secs(5);

// scrape
// ----------------------------------------------------------------------------

/// The key-statistics page: the quote price, plus every label/value table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatisticsPage {
    pub price: Option<f64>,
    pub statistics: Statistics,
}

pub async fn statistics<B>(
    browser: &mut B,
    base_url: &str,
    symbol: &str,
    policy: &RetryPolicy,
) -> anyhow::Result<StatisticsPage>
where
    B: Browser + ?Sized,
{
    let url = format!("{base_url}/quote/{symbol}/key-statistics?p={symbol}");
    navigate(browser, &url, policy).await.map_err(|err| {
        error!("failed to load statistics for [{symbol}], error({err})");
        err
    })?;

    // dismiss the consent dialog, if any, and let the page settle again
    match browser.click(CONSENT_BUTTON, 0).await {
        Ok(true) => {
            trace!("consent dismissed for [{symbol}]");
            let settle = policy.idle_timeout.min(CONSENT_SETTLE);
            match tokio::time::timeout(settle, browser.wait_for_network_idle()).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!("statistics page unsettled for [{symbol}], error({err})"),
                Err(_) => warn!("statistics page unsettled for [{symbol}], timed out"),
            }
        }
        Ok(false) => trace!("no consent dialog for [{symbol}]"),
        Err(err) => warn!("failed to dismiss consent for [{symbol}], error({err})"),
    }

    let html = browser.content().await?;
    let page = parse_statistics(&html)?;
    debug!("[{symbol}] {} statistics scraped", page.statistics.len());
    Ok(page)
}

pub async fn free_cash_flow<B>(
    browser: &mut B,
    base_url: &str,
    symbol: &str,
    policy: &RetryPolicy,
) -> anyhow::Result<FreeCashFlow>
where
    B: Browser + ?Sized,
{
    let url = format!("{base_url}/quote/{symbol}/cash-flow?p={symbol}");
    navigate(browser, &url, policy).await.map_err(|err| {
        error!("failed to load cash flow for [{symbol}], error({err})");
        err
    })?;

    let html = browser.content().await?;
    let series = parse_cash_flow(&html)?;
    trace!("[{symbol}] free cash flow row: {series:?}");
    let fcf = cash_flow::analyze(&series).map_err(|err| {
        error!("failed to analyze free cash flow for [{symbol}], error({err})");
        err
    })?;
    Ok(fcf)
}

/// The analysis page's growth estimates; `None` when the page or its table is missing.
pub async fn growth_estimates<B>(
    browser: &mut B,
    base_url: &str,
    symbol: &str,
    policy: &RetryPolicy,
) -> Option<GrowthEstimates>
where
    B: Browser + ?Sized,
{
    let url = format!("{base_url}/quote/{symbol}/analysis?p={symbol}");
    if let Err(err) = navigate(browser, &url, policy).await {
        warn!("skipping growth estimates for [{symbol}], error({err})");
        return None;
    }

    let html = match browser.content().await {
        Ok(html) => html,
        Err(err) => {
            warn!("skipping growth estimates for [{symbol}], error({err})");
            return None;
        }
    };
    let estimates = parse_growth_estimates(&html);
    if estimates.is_none() {
        warn!("growth estimates table missing for [{symbol}]");
    }
    estimates
}

// parse
// ----------------------------------------------------------------------------

pub fn parse_statistics(html: &str) -> Result<StatisticsPage, SelectorError> {
    let doc = Document::parse(html);

    // the 3rd span of the quote header holds the price
    let price = doc
        .groups(QUOTE_HEADER, QUOTE_SPANS)?
        .into_iter()
        .next()
        .and_then(|spans| spans.into_iter().nth(2))
        .and_then(|text| match normalize(&text) {
            Ok(price) => Some(price),
            Err(err) => {
                debug!("quote price unavailable, error({err})");
                None
            }
        });

    Ok(StatisticsPage {
        price,
        statistics: stats::extract(&doc.tables()),
    })
}

/// Cells of the last financial row (free cash flow), TTM first.
pub fn parse_cash_flow(html: &str) -> Result<Vec<String>, SelectorError> {
    let doc = Document::parse(html);
    Ok(doc.groups(FIN_ROW, FIN_COL)?.pop().unwrap_or_default())
}

pub fn parse_growth_estimates(html: &str) -> Option<GrowthEstimates> {
    let doc = Document::parse(html);
    growth::extract(&doc.tables(), &Positional::default())
}
