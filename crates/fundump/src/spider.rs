use chrono::{Local, NaiveDate};
use fundump_spider::browser::chrome::ChromeLauncher;
use fundump_spider::config::Config;
use fundump_spider::summary::ValuationInputs;
use fundump_spider::{self as spider, std_client_build};
use std::path::Path;
use tracing::{debug, error, info, trace};

/// Collect & save a record for each symbol; with no symbols, read the configured symbol list.
pub(crate) async fn run(symbols: Vec<String>, with_head: bool, tui: bool) -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|err| {
        error!("configuration error: {err}");
        err
    })?;
    debug!("configuration loaded: {config:?}");

    let symbols = if symbols.is_empty() {
        trace!("no symbols provided; reading {}", config.symbols_path.display());
        spider::stock::load_symbols(&config.symbols_path)
            .await
            .map_err(|err| {
                error!(
                    "failed to read symbol list at {}, error({err})",
                    config.symbols_path.display()
                );
                err
            })?
    } else {
        symbols
    };

    // start collecting data
    let time = std::time::Instant::now();
    let launcher = ChromeLauncher { with_head };
    let http_client = std_client_build();
    let today = Local::now().date_naive();
    let report =
        spider::pipeline::scrape(&config, &launcher, &http_client, symbols, today, tui).await?;

    if tui {
        println!(
            "{} records saved, {} failed",
            report.persisted.len(),
            report.failed.len()
        );
        for (symbol, reason) in &report.failed {
            println!("  [{symbol}] {reason}");
        }
    }

    info!(
        "spider finished collecting data, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(())
}

/// Print the valuation inputs of the record saved for `symbol` on `date` (default today).
pub(crate) async fn summary(symbol: String, date: Option<String>) -> anyhow::Result<()> {
    let output_dir = dotenv::var("FUNDUMP_DIR")?;
    let date = match date {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y.%m.%d")?,
        None => Local::now().date_naive(),
    };

    let path = spider::fs::record_path(Path::new(&output_dir), &symbol, date);
    let record: serde_json::Value = spider::fs::read_json(&path).await.map_err(|err| {
        error!("failed to read record at {}, error({err})", path.display());
        err
    })?;

    print!("{}", ValuationInputs::from_record(&symbol, &record));
    Ok(())
}
