use crate::browser::{Browser, Launcher};
use crate::config::Config;
use crate::http::*;
use crate::record::{self, FinancialRecord};
use crate::stock::{api, insider, yahoo_finance};
use crate::tui::Progress;
use chrono::NaiveDate;
use futures::{stream, StreamExt};
use std::path::PathBuf;
use tracing::{debug, error, info, trace, warn};

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct Report {
    /// Files written, in symbol order.
    pub persisted: Vec<PathBuf>,
    /// Symbols whose record was not saved, and why.
    pub failed: Vec<(String, String)>,
}

/// Collect & persist a record for each symbol, one at a time, in order.
///
/// A failing symbol is logged and skipped; the batch always runs to the end.
pub async fn scrape<L: Launcher>(
    config: &Config,
    launcher: &L,
    http_client: &HttpClient,
    symbols: Vec<String>,
    capture_date: NaiveDate,
    tui: bool,
) -> anyhow::Result<Report> {
    let time = std::time::Instant::now();
    let progress = Progress::new(symbols.len(), tui)?;
    let mut report = Report::default();

    info!("collecting {} symbols for {capture_date} ...", symbols.len());
    let mut stream = stream::iter(symbols);
    while let Some(symbol) = stream.next().await {
        progress.step(format!("collecting {symbol} ..."));

        let record = match collect(config, launcher, http_client, &symbol, capture_date).await {
            Ok(record) => record,
            Err(err) => {
                error!("failed to collect [{symbol}], error({err:#})");
                report.failed.push((symbol, format!("{err:#}")));
                progress.failed();
                continue;
            }
        };

        match persist(config, &record).await {
            Ok(path) => {
                report.persisted.push(path);
                progress.succeeded();
            }
            Err(err) => {
                error!("failed to persist [{symbol}], error({err:#})");
                report.failed.push((symbol, format!("{err:#}")));
                progress.failed();
            }
        }
    }
    progress.finish();

    info!(
        "{} records persisted, {} failed, {}",
        report.persisted.len(),
        report.failed.len(),
        crate::time_elapsed(time)
    );
    Ok(report)
}

/// Collect one symbol's record in a fresh browser session, which is closed on every exit path.
pub async fn collect<L: Launcher>(
    config: &Config,
    launcher: &L,
    http_client: &HttpClient,
    symbol: &str,
    capture_date: NaiveDate,
) -> anyhow::Result<FinancialRecord> {
    let mut session = launcher.launch().await.map_err(|err| {
        error!("failed to launch browser for [{symbol}], error({err})");
        err
    })?;

    let collected = collect_with(&mut session, config, http_client, symbol, capture_date).await;

    match session.close().await {
        Ok(()) => trace!("browser session closed for [{symbol}]"),
        Err(err) => warn!("failed to close browser for [{symbol}], error({err})"),
    }
    collected
}

/// Collect one symbol's record with an already open `browser`.
pub async fn collect_with<B: Browser + ?Sized>(
    browser: &mut B,
    config: &Config,
    http_client: &HttpClient,
    symbol: &str,
    capture_date: NaiveDate,
) -> anyhow::Result<FinancialRecord> {
    let time = std::time::Instant::now();
    let (yahoo, retry) = (config.yahoo_url.as_str(), &config.retry);

    // required: a record without statistics or free cash flow is not worth keeping
    let page = yahoo_finance::statistics(browser, yahoo, symbol, retry).await?;
    info!("[{symbol}] statistics collected");

    let fcf = yahoo_finance::free_cash_flow(browser, yahoo, symbol, retry).await?;
    info!("[{symbol}] free cash flow collected");

    // optional: degrade to "unavailable" & 0
    let growth = yahoo_finance::growth_estimates(browser, yahoo, symbol, retry).await;
    info!("[{symbol}] growth estimates collected");

    let insider_buys = insider::fetch_count(http_client, &config.insider_url, symbol)
        .await
        .unwrap_or_else(|err| {
            warn!("insider buys unavailable for [{symbol}], defaulting to 0, error({err})");
            0
        });
    info!("[{symbol}] insider activity collected");

    let payload = api::fetch(http_client, &config.api_url, &config.api_key, symbol).await?;
    info!("[{symbol}] fundamentals collected");

    let record = record::merge(page, fcf, growth, insider_buys, payload, symbol, capture_date);
    debug!("[{symbol}] record merged, {}", crate::time_elapsed(time));
    Ok(record)
}

/// Write `record` to `{output_dir}/{SYMBOL}/statistics/{YYYY.MM.DD}.json`.
pub async fn persist(config: &Config, record: &FinancialRecord) -> anyhow::Result<PathBuf> {
    let path = crate::fs::record_path(&config.output_dir, &record.symbol, record.capture_date);
    crate::fs::write_json(&path, record).await?;
    info!("[{}] record saved to {}", record.symbol, path.display());
    Ok(path)
}
