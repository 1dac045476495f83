use thiserror::Error;

/// Text that is neither a plain number nor a number with a magnitude marker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable numeric text \"{0}\"")]
pub struct ParseFailure(pub String);

/// Trailing abbreviations, and the scale each one applies.
const MAGNITUDES: [(char, f64); 3] = [('T', 1e12), ('B', 1e9), ('M', 1e6)];

/// Parse locale-formatted numeric text into a magnitude, with any unit scale already applied.
///
/// ```rust
/// use fundump_spider::normalize::normalize;
///
/// assert_eq!(normalize("2.5B"), Ok(2_500_000_000.0));
/// assert_eq!(normalize("1,234.5"), Ok(1_234.5));
/// assert!(normalize("N/A").is_err());
/// ```
pub fn normalize(text: &str) -> Result<f64, ParseFailure> {
    let cleaned = text.replace(',', "");
    let cleaned = cleaned.trim();

    let (mantissa, scale) = match split_magnitude(cleaned) {
        Some((mantissa, scale)) => (mantissa, scale),
        None => (cleaned, 1.0),
    };

    mantissa
        .trim()
        .parse::<f64>()
        .ok()
        .map(|value| value * scale)
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseFailure(text.to_string()))
}

/// Whether `text` ends with a magnitude marker, e.g., "1.2B" or "750M".
pub fn has_magnitude(text: &str) -> bool {
    split_magnitude(text.trim()).is_some()
}

// "2.5B" -> ("2.5", 1e9)
fn split_magnitude(text: &str) -> Option<(&str, f64)> {
    let last = text.chars().last()?;
    MAGNITUDES
        .iter()
        .find(|(marker, _)| *marker == last)
        .map(|(marker, scale)| (&text[..text.len() - marker.len_utf8()], *scale))
}
