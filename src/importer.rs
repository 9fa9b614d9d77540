use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

use crate::email;
use crate::report::{self, Domain};

pub fn import_customers(path: &Path) -> Result<Vec<Domain>> {
    let start_time = Instant::now();

    let path = if path.as_os_str().is_empty() {
        Path::new("customers.csv")
    } else {
        path
    };
    info!(action = "start", component = "importer", file = ?path, "Starting customer import");

    let file =
        File::open(path).with_context(|| format!("Failed to open CSV file {:?}", path))?;
    info!(action = "open", component = "importer", file = ?path, "Successfully opened the CSV file");

    let domains = import_from_reader(file)?;

    let total_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "importer",
        file = ?path,
        duration_ms = total_time.as_millis(),
        "Customer import completed"
    );

    Ok(domains)
}

pub fn import_from_reader<R: io::Read>(source: R) -> Result<Vec<Domain>> {
    // flexible: a short row is a per-row skip, not a structural failure.
    // has_headers: the header row is skipped by position, so a header whose
    // email cell happens to look like an address is never counted.
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut domains: HashMap<String, u32> = HashMap::new();
    let mut total_rows: usize = 0;
    let mut skipped_rows: usize = 0;

    for (index, record) in reader.records().enumerate() {
        let record = record.context("Structural CSV parse failure")?;
        total_rows += 1;

        // Header occupies row 0, data rows are numbered from 1
        let row = index + 1;

        let raw = match record.get(2) {
            Some(value) => value,
            None => {
                skipped_rows += 1;
                warn!(
                    action = "skip",
                    component = "importer",
                    row,
                    field_count = record.len(),
                    "Row has no email field"
                );
                continue;
            }
        };

        let address = match email::parse_address(raw) {
            Some(address) => address,
            None => {
                skipped_rows += 1;
                warn!(
                    action = "skip",
                    component = "importer",
                    row,
                    value = raw,
                    "Incorrect email address"
                );
                continue;
            }
        };

        let domain = email::extract_domain(&address);
        *domains.entry(domain.to_string()).or_insert(0) += 1;
    }

    info!(
        action = "aggregate",
        component = "importer",
        row_count = total_rows,
        skipped_rows,
        unique_domains = domains.len(),
        "Aggregated customer rows"
    );

    Ok(report::sort_domains(domains))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(address: &str, count: u32) -> Domain {
        Domain {
            address: address.to_string(),
            count,
        }
    }

    #[test]
    fn counts_domains_from_valid_rows() {
        let data = "\
first_name,last_name,email,gender,ip_address
Mildred,Hernandez,mhernandez0@github.io,Female,38.194.51.128
Bonnie,Ortiz,bortiz1@cyberchimps.com,Female,197.54.209.129
Dennis,Henry,dhenry2@hubpages.com,Male,155.75.186.217
Justin,Hansen,jhansen3@cyberchimps.com,Male,251.166.224.119
";

        let result = import_from_reader(data.as_bytes()).unwrap();

        assert_eq!(
            result,
            vec![
                domain("cyberchimps.com", 2),
                domain("github.io", 1),
                domain("hubpages.com", 1),
            ]
        );
    }

    #[test]
    fn skips_invalid_emails_without_affecting_other_rows() {
        let data = "\
first_name,last_name,email,gender,ip_address
Mildred,Hernandez,github.io,Female,38.194.51.128
Bonnie,Ortiz,,Female,197.54.209.129
Dennis,Henry,email,Male,155.75.186.217
Justin,Hansen,jhansen3@cyberchimps.com,Male,251.166.224.119
";

        let result = import_from_reader(data.as_bytes()).unwrap();

        assert_eq!(result, vec![domain("cyberchimps.com", 1)]);
    }

    #[test]
    fn skips_rows_with_fewer_than_three_fields() {
        let data = "\
first_name,last_name,email
Mildred,Hernandez
Justin,Hansen,jhansen3@cyberchimps.com
";

        let result = import_from_reader(data.as_bytes()).unwrap();

        assert_eq!(result, vec![domain("cyberchimps.com", 1)]);
    }

    #[test]
    fn header_only_input_yields_empty_list() {
        let data = "first_name,last_name,email,gender,ip_address\n";

        let result = import_from_reader(data.as_bytes()).unwrap();

        assert_eq!(result, Vec::<Domain>::new());
    }

    #[test]
    fn empty_input_yields_empty_list() {
        let result = import_from_reader("".as_bytes()).unwrap();

        assert_eq!(result, Vec::<Domain>::new());
    }

    #[test]
    fn domains_are_counted_case_sensitively() {
        let data = "\
first_name,last_name,email
A,A,a@Example.com
B,B,b@example.com
";

        let result = import_from_reader(data.as_bytes()).unwrap();

        assert_eq!(
            result,
            vec![domain("Example.com", 1), domain("example.com", 1)]
        );
    }

    #[test]
    fn non_utf8_input_is_a_fatal_error() {
        let data: &[u8] = b"first_name,last_name,email\nA,B,\xff\xfe@example.com\n";

        assert!(import_from_reader(data).is_err());
    }
}
