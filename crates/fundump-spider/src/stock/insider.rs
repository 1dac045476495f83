use crate::dom::{Document, SelectorError};
use crate::extract::insider;
use crate::http::*;
use tracing::{debug, error, trace};

/// The free-text summary of the screener, e.g., "7 results."
const RESULTS: &str = "#results";

/// Screener filters: purchases only, over the last 90 days, by officers & directors, capped at 100.
const FILTERS: [(&str, &str); 14] = [
    ("fd", "90"),
    ("td", "0"),
    ("xp", "1"),
    ("isofficer", "1"),
    ("iscob", "1"),
    ("isceo", "1"),
    ("ispres", "1"),
    ("iscoo", "1"),
    ("iscfo", "1"),
    ("isgc", "1"),
    ("isvp", "1"),
    ("isdirector", "1"),
    ("cnt", "100"),
    ("page", "1"),
];

/// The results summary of a rendered screener page, if present.
pub fn parse_summary(html: &str) -> Result<Option<String>, SelectorError> {
    let doc = Document::parse(html);
    Ok(doc.texts(RESULTS)?.into_iter().next())
}

/// Count insider purchases of `symbol` over the trailing 90 days.
pub async fn fetch_count(
    http_client: &HttpClient,
    base_url: &str,
    symbol: &str,
) -> anyhow::Result<u32> {
    trace!("fetching insider screener for [{symbol}]");
    let html = http_client
        .get(base_url)
        .query(&[("s", symbol)])
        .query(&FILTERS)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| {
            error!("failed to fetch insider screener for [{symbol}], error({err})");
            err
        })?
        .text()
        .await?;

    let summary = parse_summary(&html)?;
    let count = insider::count(summary.as_deref());
    debug!("[{symbol}] {count} insider purchases within 90 days");
    Ok(count)
}
