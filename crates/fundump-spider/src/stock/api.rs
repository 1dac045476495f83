use crate::http::*;
use std::collections::HashMap;
use tracing::{debug, error, trace};

/// Exchange code used for symbols without an exchange suffix.
const DEFAULT_EXCHANGE: &str = "US";

lazy_static::lazy_static! {
    /// Yahoo Finance exchange suffixes, rewritten to the API's exchange codes. Suffixes missing
    /// from the table are passed through unchanged.
    static ref EXCHANGES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("L", "LSE");
        map.insert("AX", "AU");
        map.insert("DE", "XETRA");
        map.insert("T", "TSE");
        map.insert("HK", "HK");
        map.insert("TO", "TO");
        map.insert("SA", "SA");
        map
    };
}

/// Translate a Yahoo Finance symbol to the API's `{TICKER}.{EXCHANGE}` form.
///
/// ```rust
/// use fundump_spider::stock::api::normalize_symbol;
///
/// assert_eq!(normalize_symbol("MSFT"), "MSFT.US");
/// assert_eq!(normalize_symbol("BRK-B"), "BRK.B.US");
/// assert_eq!(normalize_symbol("VOD.L"), "VOD.LSE");
/// ```
pub fn normalize_symbol(symbol: &str) -> String {
    let symbol = symbol.trim().to_uppercase();
    let (ticker, exchange) = match symbol.rsplit_once('.') {
        Some((ticker, suffix)) if !ticker.is_empty() && !suffix.is_empty() => {
            (ticker, EXCHANGES.get(suffix).copied().unwrap_or(suffix))
        }
        _ => (symbol.as_str(), DEFAULT_EXCHANGE),
    };
    format!("{}.{exchange}", ticker.replace('-', "."))
}

/// GET the fundamentals payload for `symbol`.
pub async fn fetch(
    http_client: &HttpClient,
    base_url: &str,
    api_key: &str,
    symbol: &str,
) -> anyhow::Result<serde_json::Value> {
    let time = std::time::Instant::now();
    let api_symbol = normalize_symbol(symbol);
    let url = format!("{}/{api_symbol}", base_url.trim_end_matches('/'));
    trace!("fetching fundamentals for [{symbol}] as {api_symbol}");

    let payload = http_client
        .get(&url)
        .query(&[("api_token", api_key), ("fmt", "json")])
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| {
            error!("failed to fetch fundamentals for [{symbol}], error({err})");
            err
        })?
        .json::<serde_json::Value>()
        .await
        .map_err(|err| {
            error!("failed to deserialize fundamentals for [{symbol}], error({err})");
            err
        })?;

    debug!("fundamentals fetched for [{symbol}], {}", crate::time_elapsed(time));
    Ok(payload)
}
