use crate::dom::{Row, Table};
use crate::normalize::{has_magnitude, normalize};
use tracing::{debug, trace};

/// A statistic's value; numeric only when the source text carried a magnitude marker.
#[derive(Clone, Debug, PartialEq)]
pub enum StatValue {
    Raw(String),
    Numeric(f64),
}

impl From<&StatValue> for serde_json::Value {
    fn from(value: &StatValue) -> Self {
        match value {
            StatValue::Raw(text) => serde_json::Value::from(text.as_str()),
            StatValue::Numeric(val) => serde_json::Value::from(*val),
        }
    }
}

/// Insertion-ordered label -> value mapping; re-inserting a label overwrites it in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics(Vec<(String, StatValue)>);

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: StatValue) {
        let label = label.into();
        match self.0.iter_mut().find(|(key, _)| *key == label) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&StatValue> {
        self.0
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Accumulate the label/value rows of a single table.
    pub fn extend_from_rows<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) {
        for row in rows {
            // only strict label/value pairs
            let [label, raw] = row.cells.as_slice() else {
                trace!("skipping row with {} cells", row.cells.len());
                continue;
            };
            let (label, raw) = (label.trim(), raw.trim());
            if label.is_empty() || raw.is_empty() {
                continue;
            }

            let value = if has_magnitude(raw) {
                match normalize(raw) {
                    Ok(val) => StatValue::Numeric(val),
                    Err(err) => {
                        debug!("keeping raw text for \"{label}\", error({err})");
                        StatValue::Raw(raw.to_string())
                    }
                }
            } else {
                StatValue::Raw(raw.to_string())
            };
            self.insert(label, value);
        }
    }
}

/// Merge every table, in order, into a single mapping; later duplicate labels win.
pub fn extract(tables: &[Table]) -> Statistics {
    let mut stats = Statistics::new();
    for table in tables {
        stats.extend_from_rows(&table.rows);
    }
    stats
}
