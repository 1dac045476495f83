use tracing::warn;

/// The word following the count in a screener summary, e.g., "7 results."
const MARKER: &str = "result";

/// Count the insider purchases reported by a results summary.
///
/// An absent or empty summary counts as 0; so does one whose leading count cannot be read, with a
/// warning.
pub fn count(summary: Option<&str>) -> u32 {
    let summary = match summary.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => return 0,
    };

    let leading = summary
        .split(MARKER)
        .next()
        .unwrap_or_default()
        .trim()
        .replace(',', "");

    match leading.parse::<u32>() {
        Ok(count) => count,
        Err(err) => {
            warn!("unparseable insider summary \"{summary}\", defaulting to 0, error({err})");
            0
        }
    }
}
