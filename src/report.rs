use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;

use crate::Args;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub address: String,
    pub count: u32,
}

// Map iteration order is unspecified, so the sort is what makes the output
// deterministic. Addresses are unique keys, ties cannot occur.
pub fn sort_domains(domains: HashMap<String, u32>) -> Vec<Domain> {
    let mut sorted: Vec<Domain> = domains
        .into_iter()
        .map(|(address, count)| Domain { address, count })
        .collect();

    sorted.sort_by(|a, b| a.address.cmp(&b.address));

    sorted
}

pub fn print_report(domains: &[Domain], args: &Args) {
    println!("\n--- Domain report for {} ---", args.file.display());

    let total_customers: u32 = domains.iter().map(|d| d.count).sum();
    println!(
        "Total unique domains found: {}",
        crate::utils::format_number(domains.len() as u32)
    );
    println!(
        "Total customers counted: {}",
        crate::utils::format_number(total_customers)
    );

    if let Some(top_count) = args.top {
        println!(
            "\nFirst {} domains:",
            std::cmp::min(top_count, domains.len())
        );
        for domain in domains.iter().take(top_count) {
            println!(
                "- {}: {} customers",
                domain.address,
                crate::utils::format_number(domain.count)
            );
        }
    } else {
        println!();
        for domain in domains {
            println!(
                "- {}: {} customers",
                domain.address,
                crate::utils::format_number(domain.count)
            );
        }
    }
}

pub fn render_json(domains: &[Domain]) -> Result<String> {
    serde_json::to_string_pretty(domains).context("Failed to serialize report as JSON")
}
