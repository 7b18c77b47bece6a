//! Header-agnostic field resolution.
//!
//! Statement exports agree on almost nothing about column naming
//! ("Narration", "Transaction Details", "Particulars" all mean
//! description), so fields are located by case-insensitive substring match
//! against caller-supplied candidates.

use crate::types::RawRow;

/// Resolve a field value. Candidates are tried in the caller's priority
/// order; within one candidate, headers are scanned in original column
/// order and the first containing the candidate (case-insensitively) wins.
pub fn resolve_field<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a str> {
    resolve(row, candidates).map(|(_, value)| value)
}

/// Like [`resolve_field`] but returns the matched header name. The
/// synthesizer needs this to tell two genuinely separate columns apart from
/// one combined column matching both candidate sets.
pub fn resolve_header<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a str> {
    resolve(row, candidates).map(|(header, _)| header)
}

fn resolve<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<(&'a str, &'a str)> {
    for candidate in candidates {
        let needle = candidate.to_lowercase();
        for (header, value) in row.iter() {
            if header.to_lowercase().contains(&needle) {
                return Some((header, value));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let row = RawRow::from_pairs([("Txn Date", "2024-08-15"), ("NARRATION", "UPI/X")]);
        assert_eq!(resolve_field(&row, &["date"]), Some("2024-08-15"));
        assert_eq!(resolve_field(&row, &["narration"]), Some("UPI/X"));
        assert_eq!(resolve_field(&row, &["balance"]), None);
    }

    #[test]
    fn test_candidate_priority_order() {
        let row = RawRow::from_pairs([("Withdrawal Amt.", "450"), ("Amount", "100")]);
        // "withdrawal" outranks "amount" because the caller listed it first.
        assert_eq!(resolve_field(&row, &["withdrawal", "amount"]), Some("450"));
        assert_eq!(resolve_field(&row, &["amount", "withdrawal"]), Some("100"));
    }

    #[test]
    fn test_column_order_breaks_header_ties() {
        // Both headers contain "date"; the earlier column wins, not the
        // alphabetically-first or shortest header.
        let row = RawRow::from_pairs([("Value Date", "01/02/2024"), ("Date", "03/04/2024")]);
        assert_eq!(resolve_field(&row, &["date"]), Some("01/02/2024"));
    }

    #[test]
    fn test_empty_value_still_resolves() {
        // Resolution reports the column that matched; whether an empty cell
        // counts as "present" is the caller's call.
        let row = RawRow::from_pairs([("Credit", ""), ("Debit", "450")]);
        assert_eq!(resolve_field(&row, &["credit"]), Some(""));
    }

    #[test]
    fn test_resolve_header_names_the_column() {
        let row = RawRow::from_pairs([("Credit/Debit", "Debit"), ("Amount", "-135.00")]);
        assert_eq!(resolve_header(&row, &["credit"]), Some("Credit/Debit"));
        assert_eq!(resolve_header(&row, &["debit"]), Some("Credit/Debit"));
    }
}
