use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Webscrape statistics for each symbol and save one record per symbol for today.
    Spider {
        /// Ticker symbols, e.g., MSFT BRK-B VOD.L
        ///
        /// If no symbols are provided, spider will read the list at FUNDUMP_SYMBOLS.
        symbols: Vec<String>,

        /// Show the browser window.
        #[arg(long)]
        with_head: bool,
    },

    /// Print the valuation inputs of a saved record.
    Summary {
        symbol: String,

        /// Capture date of the record, e.g., 2024.03.01; defaults to today.
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
