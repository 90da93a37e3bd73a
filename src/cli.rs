use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "court-officials backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema, dropping any existing tables
    InitDb,
    /// Print the settlement report for a period as JSON
    Settle {
        /// Period start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,
        /// Period end date (YYYY-MM-DD)
        #[arg(short, long)]
        end: String,
        /// Restrict the report to a single referee
        #[arg(short, long)]
        referee: Option<i64>,
    },
}
