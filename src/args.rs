use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "customer-importer",
    about = "Aggregate customer email domains from a CSV file into a sorted report",
    version,
    long_about = None
)]
pub struct Args {
    /// CSV file to import
    #[arg(default_value = "customers.csv")]
    pub file: PathBuf,

    /// Number of leading domains to display
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Emit the report as JSON instead of a text table
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
