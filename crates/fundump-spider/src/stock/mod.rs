use serde::Deserialize;
use std::path::Path;

/// Fundamentals from [EODHD]; the payload is kept verbatim.
///
/// [EODHD]: https://eodhd.com/financial-apis/stock-etfs-fundamental-data-feeds
pub mod api;

/// Insider purchases from the [OpenInsider] screener.
///
/// [OpenInsider]: http://openinsider.com/screener
pub mod insider;

/// Key statistics, cash flow & analyst estimates, scraped from rendered [Yahoo Finance] pages.
///
/// [Yahoo Finance]: https://finance.yahoo.com/
pub mod yahoo_finance;

// One entry of the symbol list; any other fields are ignored.
#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(rename = "Symbol")]
    symbol: String,
}

/// Load the ticker symbols, in order, from a JSON list of `{ "Symbol": ... }` records.
pub async fn load_symbols(path: &Path) -> anyhow::Result<Vec<String>> {
    let listings: Vec<Listing> = crate::fs::read_json(path).await?;
    Ok(listings
        .into_iter()
        .map(|listing| listing.symbol.trim().to_string())
        .filter(|symbol| !symbol.is_empty())
        .collect())
}
