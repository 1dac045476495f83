use crate::extract::cash_flow::{FreeCashFlow, UNAVAILABLE};
use crate::extract::growth::GrowthEstimates;
use crate::extract::stats::Statistics;
use crate::stock::yahoo_finance::StatisticsPage;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

pub const SYMBOL: &str = "Symbol";
pub const DATE: &str = "Date";
pub const PRICE: &str = "Price";
pub const FCF_AVERAGE: &str = "FreeCashFlowAverage";
pub const FCF_SERIES: &str = "FreeCashFlowSeries";
pub const GROWTH: &str = "Growth";
pub const CONSENSUS: &str = "Growth Next 5 Years (per annum)";
pub const API: &str = "Api";
pub const INSIDER_BUYS: &str = "InsiderBuys90Days";

/// One symbol's consolidated snapshot for a day; built once by [`merge`], then only read.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialRecord {
    pub symbol: String,
    pub price: Option<f64>,
    pub statistics: Statistics,
    pub free_cash_flow: FreeCashFlow,
    /// Analyst consensus growth, or "unavailable".
    pub growth_consensus: String,
    pub insider_buys: u32,
    /// The fundamentals payload, embedded verbatim under [`API`].
    pub api: Value,
    pub capture_date: NaiveDate,
}

/// Combine every source of a symbol into one record.
pub fn merge(
    page: StatisticsPage,
    free_cash_flow: FreeCashFlow,
    growth_estimates: Option<GrowthEstimates>,
    insider_buys: u32,
    api: Value,
    symbol: &str,
    capture_date: NaiveDate,
) -> FinancialRecord {
    let growth_consensus = growth_estimates
        .as_ref()
        .and_then(GrowthEstimates::consensus)
        .unwrap_or(UNAVAILABLE)
        .to_string();

    FinancialRecord {
        symbol: symbol.to_string(),
        price: page.price,
        statistics: page.statistics,
        free_cash_flow,
        growth_consensus,
        insider_buys,
        api,
        capture_date,
    }
}

impl FinancialRecord {
    /// The flattened record, in merge precedence; a later field overwrites an earlier one of the
    /// same name, in place: identity, statistics, free cash flow, consensus growth, API payload,
    /// then insider buys.
    pub fn fields(&self) -> Vec<(String, Value)> {
        let mut fields = Fields::default();

        fields.insert(SYMBOL, Value::from(self.symbol.as_str()));
        fields.insert(DATE, Value::from(self.capture_date.to_string()));

        if let Some(price) = self.price {
            fields.insert(PRICE, Value::from(price));
        }
        for (label, value) in self.statistics.iter() {
            fields.insert(label, Value::from(value));
        }

        fields.insert(FCF_AVERAGE, Value::from(self.free_cash_flow.average));
        fields.insert(FCF_SERIES, Value::from(self.free_cash_flow.components.to_vec()));
        fields.insert(GROWTH, Value::from(self.free_cash_flow.growth_rate.as_str()));

        fields.insert(CONSENSUS, Value::from(self.growth_consensus.as_str()));

        // nested, never flattened
        fields.insert(API, self.api.clone());

        fields.insert(INSIDER_BUYS, Value::from(self.insider_buys));

        fields.0
    }
}

impl Serialize for FinancialRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.fields();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (key, value) in &fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Default)]
struct Fields(Vec<(String, Value)>);

impl Fields {
    fn insert(&mut self, key: &str, value: Value) {
        match self.0.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key.to_string(), value)),
        }
    }
}
