//! Extracted-table row source.
//!
//! Consumes plain text produced by a table-extraction collaborator (PDF or
//! OCR), shaped roughly like:
//!
//!   01 Oct, 2025 UPI/RAGHVENDRA/527431570952/Sent using Payt UPI-527431570952 -135.00 20,127.38
//!   01 Oct, 2025 OPENING BALANCE +20,262.38 20,262.38
//!
//! Header and summary lines are skipped by keyword sniffing; a line is
//! accepted only when its first three tokens form a `DD Mon, YYYY` date.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::RawRow;

fn date_gate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}\s+\w{3},\s+\d{4}$").unwrap())
}

fn looks_like_header(lower: &str) -> bool {
    lower.starts_with("date")
        || lower.contains("transaction details")
        || lower.contains("cheque/reference")
        || (lower.contains("debit") && lower.contains("credit") && lower.contains("balance"))
}

/// Turn extracted table text into raw rows with the synthetic header set
/// Date / Description / Amount / Balance / Credit/Debit.
///
/// The last digit-bearing token is the running balance, the one before it
/// the amount; a leading `-` on the amount token marks a debit. Lines that
/// don't fit the shape are skipped, never reported.
pub fn parse_table_text(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if looks_like_header(&lower) {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 {
            continue;
        }

        let date_candidate = parts[..3].join(" ");
        if !date_gate_re().is_match(&date_candidate) {
            continue;
        }

        let numeric_idx: Vec<usize> = parts
            .iter()
            .enumerate()
            .filter(|(_, tok)| tok.chars().any(|c| c.is_ascii_digit()))
            .map(|(i, _)| i)
            .collect();
        if numeric_idx.len() < 2 {
            continue;
        }

        let balance_idx = numeric_idx[numeric_idx.len() - 1];
        let amount_idx = numeric_idx[numeric_idx.len() - 2];

        let description = if amount_idx > 3 {
            parts[3..amount_idx].join(" ")
        } else {
            String::new()
        };
        let description = if description.is_empty() {
            "UNKNOWN TRANSACTION".to_string()
        } else {
            description
        };

        let amount_token = parts[amount_idx];
        let indicator = if amount_token.starts_with('-') {
            "Debit"
        } else {
            "Credit"
        };

        let mut row = RawRow::new();
        row.push("Date", date_candidate);
        row.push("Description", description);
        row.push("Amount", amount_token);
        row.push("Balance", parts[balance_idx]);
        row.push("Credit/Debit", indicator);
        rows.push(row);
    }

    rows
}
