use anyhow::Result;
use clap::Parser;
use tracing::error;

use customer_importer::{importer, report, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    utils::validate_args(&args)?;

    match importer::import_customers(&args.file) {
        Ok(domains) => {
            if args.json {
                println!("{}", report::render_json(&domains)?);
            } else {
                report::print_report(&domains, &args);
            }
            Ok(())
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
