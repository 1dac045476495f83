use crate::dom::Table;
use tracing::{debug, trace};

/// The consensus growth label read from the estimates table.
pub const CONSENSUS_LABEL: &str = "Next 5 Years (per annum)";

/// Picks the growth-estimates table out of a page's tables.
pub trait TableLocator {
    fn locate<'a>(&self, tables: &'a [Table]) -> Option<&'a Table>;
}

/// Select a table by its position on the page.
#[derive(Clone, Copy, Debug)]
pub struct Positional(pub usize);

impl Default for Positional {
    /// The growth estimates are the 6th table of the analysis page.
    fn default() -> Self {
        Positional(5)
    }
}

impl TableLocator for Positional {
    fn locate<'a>(&self, tables: &'a [Table]) -> Option<&'a Table> {
        tables.get(self.0)
    }
}

/// Raw label -> text pairs of the growth-estimates table, in row order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GrowthEstimates(Vec<(String, String)>);

impl GrowthEstimates {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The analyst consensus for the next 5 years, e.g., "12.50%".
    pub fn consensus(&self) -> Option<&str> {
        self.get(CONSENSUS_LABEL)
    }
}

/// Extract the growth estimates; `None` when the locator finds no table.
pub fn extract(tables: &[Table], locator: &impl TableLocator) -> Option<GrowthEstimates> {
    let Some(table) = locator.locate(tables) else {
        debug!("growth estimates table not found among {} tables", tables.len());
        return None;
    };

    let estimates = table
        .body()
        .filter_map(|row| match row.cells.as_slice() {
            [label, value, ..] if !label.trim().is_empty() && !value.trim().is_empty() => {
                Some((label.trim().to_string(), value.trim().to_string()))
            }
            _ => {
                trace!("skipping growth estimate row {:?}", row.cells);
                None
            }
        })
        .collect();

    Some(GrowthEstimates(estimates))
}
