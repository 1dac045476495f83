/// Browser sessions, and the retrying navigator shared by every page scrape.
pub mod browser;

/// Environment configuration, read from `.env`.
pub mod config;

/// Rendered DOM snapshots, and the tables within them.
pub mod dom;

/// Pure transformations over already-fetched page content.
pub mod extract;

pub mod fs;

/// Locale-formatted numeric text, e.g., "1,234.5" or "2.5B".
pub mod normalize;

/// Per-symbol collection; the batch loop, persisting one record per symbol.
pub mod pipeline;

/// The consolidated record, and the merge precedence that builds it.
pub mod record;

/// Remote sources: Yahoo Finance pages, the insider screener, and the fundamentals API.
pub mod stock;

/// Discounted-cash-flow inputs, read back from a persisted record.
pub mod summary;

pub(crate) mod tui;

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}

/// Build the default HTTP client; `USER_AGENT` is used when set.
pub fn std_client_build() -> http::HttpClient {
    let user_agent = http::var("USER_AGENT").unwrap_or_else(|_| {
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)".to_string()
    });
    reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!("failed to build reqwest client, falling back to default, error({err})");
            http::HttpClient::new()
        })
}

/// Format the time elapsed since `time`, for debug logs.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
