use crate::record::{CONSENSUS, FCF_AVERAGE, GROWTH, PRICE};
use colored::Colorize;
use serde_json::Value;
use std::fmt;

/// Required rate of return, in percent.
pub const DISCOUNT: u32 = 15;
/// FCF multiple applied to the final projected year, for the terminal value.
pub const TERMINAL_MULTIPLE: u32 = 10;
/// In percent.
pub const MARGIN_OF_SAFETY: u32 = 50;

const TOTAL_CASH: &str = "Total Cash (mrq)";
const TOTAL_DEBT: &str = "Total Debt (mrq)";
const SHARES_OUTSTANDING: &str = "Shares Outstanding 5";

/// The inputs of a discounted-cash-flow valuation, as found in a persisted record.
#[derive(Clone, Debug, PartialEq)]
pub struct ValuationInputs {
    pub symbol: String,
    pub free_cash_flow: Option<Value>,
    pub total_cash: Option<Value>,
    pub total_debt: Option<Value>,
    pub shares_outstanding: Option<Value>,
    pub own_growth: Option<Value>,
    pub analyst_growth: Option<Value>,
    pub price: Option<Value>,
}

impl ValuationInputs {
    pub fn from_record(symbol: &str, record: &Value) -> Self {
        let field = |key: &str| record.get(key).filter(|val| !val.is_null()).cloned();
        Self {
            symbol: symbol.to_string(),
            free_cash_flow: field(FCF_AVERAGE),
            total_cash: field(TOTAL_CASH),
            total_debt: field(TOTAL_DEBT),
            shares_outstanding: field(SHARES_OUTSTANDING),
            own_growth: field(GROWTH),
            analyst_growth: field(CONSENSUS),
            price: field(PRICE),
        }
    }
}

fn show(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(value) => value.to_string(),
        None => "N/A".red().to_string(),
    }
}

impl fmt::Display for ValuationInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = "=".repeat(50);
        writeln!(f, "{bar}\n{:^50}\n{bar}", self.symbol.bold())?;

        let rows = [
            ("Free cash flow", show(&self.free_cash_flow)),
            ("Total cash", show(&self.total_cash)),
            ("Total debt", show(&self.total_debt)),
            ("Shares outstanding", show(&self.shares_outstanding)),
            ("Our growth rate", show(&self.own_growth)),
            ("Analysts growth rate", show(&self.analyst_growth)),
            ("Discount (%)", DISCOUNT.to_string()),
            ("Last FCF multiple", TERMINAL_MULTIPLE.to_string()),
            ("Margin of safety (%)", MARGIN_OF_SAFETY.to_string()),
            ("Current share price", show(&self.price)),
        ];
        for (label, value) in rows {
            writeln!(f, "{:<24}{}", label.cyan(), value)?;
        }
        Ok(())
    }
}
