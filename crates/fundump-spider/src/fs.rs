use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Records live under `{base}/{SYMBOL}/statistics/`.
const SUBDIRECTORY: &str = "statistics";

/// Path of the record for `symbol` captured on `date`, e.g., `./data/MSFT/statistics/2024.03.01.json`.
pub fn record_path(base: &Path, symbol: &str, date: NaiveDate) -> PathBuf {
    base.join(symbol)
        .join(SUBDIRECTORY)
        .join(format!("{}.json", date.format("%Y.%m.%d")))
}

/// Reads a `.json` file from `path`.
pub async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    trace!("reading file path: {}", path.display());
    let file = tokio::fs::read(path).await?;
    trace!("file read; deserializing bytes ...");
    let data: T = serde_json::from_slice(&file)?;
    Ok(data)
}

/// Writes `data` as pretty `.json` to `path`, creating the directory chain as necessary.
pub async fn write_json<T: Serialize>(path: &Path, data: &T) -> anyhow::Result<()> {
    let dir_path = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("failed to get directory path of {}", path.display()))?;
    trace!("checking directory path: {}", dir_path.display());
    tokio::fs::create_dir_all(dir_path).await?;

    let bytes = serde_json::to_vec_pretty(data)?;
    tokio::fs::write(path, bytes).await?;
    trace!("file written: {}", path.display());
    Ok(())
}
