use crate::normalize::{normalize, ParseFailure};
use thiserror::Error;
use tracing::warn;

/// Number of most recent periods averaged.
pub const WINDOW: usize = 3;

/// Cash-flow figures are reported in thousands.
const UNIT_SCALE: f64 = 1_000.0;

pub const UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Error)]
pub enum FcfError {
    #[error("insufficient cash flow history, {found} periods found after TTM, {} required", WINDOW)]
    InsufficientData { found: usize },

    #[error("unparseable cash flow for period {period}, error({source})")]
    Unparseable {
        period: usize,
        #[source]
        source: ParseFailure,
    },
}

/// Trailing free-cash-flow summary.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeCashFlow {
    /// Mean of the `WINDOW` most recent periods, in absolute units.
    pub average: f64,
    /// Growth from the oldest available period to the most recent, e.g., "43%".
    pub growth_rate: String,
    /// The averaged periods, most recent first, in absolute units.
    pub components: [f64; WINDOW],
}

/// Analyze a free-cash-flow row; `series[0]` is the trailing-twelve-months column and is ignored.
///
/// The average spans the 3 most recent periods, whereas growth spans the whole history, from
/// `periods[0]` back to the last period.
pub fn analyze<S: AsRef<str>>(series: &[S]) -> Result<FreeCashFlow, FcfError> {
    let periods = series.get(1..).unwrap_or_default();
    if periods.len() < WINDOW {
        return Err(FcfError::InsufficientData {
            found: periods.len(),
        });
    }

    let parse = |period: usize| {
        normalize(periods[period].as_ref())
            .map_err(|source| FcfError::Unparseable { period, source })
    };

    let mut components = [0.0; WINDOW];
    for (period, component) in components.iter_mut().enumerate() {
        *component = parse(period)? * UNIT_SCALE;
    }
    let average = components.iter().sum::<f64>() / WINDOW as f64;

    // the oldest period only feeds growth, so a blank one degrades growth alone
    let ending = parse(0)?;
    let growth_rate = match parse(periods.len() - 1) {
        Ok(beginning) => percent_change(ending, beginning),
        Err(err) => {
            warn!("free cash flow growth unavailable, error({err})");
            UNAVAILABLE.to_string()
        }
    };

    Ok(FreeCashFlow {
        average,
        growth_rate,
        components,
    })
}

// Percent change, rounded with ties toward positive infinity, e.g., -42.5 -> "-42%".
fn percent_change(ending: f64, beginning: f64) -> String {
    let growth = ending / beginning - 1.0;
    if growth.is_finite() {
        format!("{}%", (growth * 100.0 + 0.5).floor() as i64)
    } else {
        warn!("free cash flow growth undefined, from {beginning} to {ending}");
        UNAVAILABLE.to_string()
    }
}
