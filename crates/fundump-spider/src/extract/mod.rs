/// Trailing free-cash-flow average & growth, from the cash-flow page's last financial row.
pub mod cash_flow;

/// Analyst consensus growth, from the analysis page.
pub mod growth;

/// Open-market insider purchase count, from the screener's results summary.
pub mod insider;

/// Key statistics; label/value tables, merged into one ordered mapping.
pub mod stats;
