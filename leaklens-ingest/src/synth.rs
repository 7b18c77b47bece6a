//! Row -> canonical transaction synthesis.
//!
//! A small, explicit decision procedure: detect which column shape the row
//! has (separate credit/debit columns, or one amount column plus an
//! optional indicator), infer `(type, amount)` for that shape, gate on a
//! strictly positive amount, then attach merchant and category. Rows that
//! fail any step are dropped silently; only the batch-level count is
//! observable.

use leaklens_core::amount::{parse_amount, round2};
use leaklens_core::dates::to_iso;
use leaklens_core::merchant::MerchantStyle;
use leaklens_core::rules::RulePreset;
use leaklens_core::transaction::{Transaction, TxType};
use tracing::debug;

use crate::csv_rows;
use crate::fields::{resolve_field, resolve_header};
use crate::table_rows;
use crate::types::{IngestError, RawRow, StatementFormat};

const DATE_FIELDS: &[&str] = &["date", "txn date", "transaction date", "value date", "posting date"];
const DESCRIPTION_FIELDS: &[&str] =
    &["description", "narration", "details", "remark", "particular", "info"];
const CREDIT_FIELDS: &[&str] = &["credit", "deposit", "received"];
const DEBIT_FIELDS: &[&str] = &["debit", "withdrawal", "paid"];
const AMOUNT_FIELDS: &[&str] = &["amount", "amt"];
const INDICATOR_FIELDS: &[&str] =
    &["credit/debit", "cr/dr", "dr/cr", "transaction type", "txn type"];

/// Which columns carry the money on this row.
#[derive(Debug, PartialEq)]
enum ColumnShape<'a> {
    /// Distinct credit-like and debit-like columns.
    Split {
        credit: Option<&'a str>,
        debit: Option<&'a str>,
    },
    /// One amount column, optionally a type indicator. A single combined
    /// "Credit/Debit" column matches both candidate sets with the same
    /// header; that is an indicator, not a split shape.
    Single {
        amount: Option<&'a str>,
        indicator: Option<&'a str>,
    },
}

fn detect_shape<'a>(row: &'a RawRow) -> ColumnShape<'a> {
    let credit_header = resolve_header(row, CREDIT_FIELDS);
    let debit_header = resolve_header(row, DEBIT_FIELDS);

    let is_split = match (credit_header, debit_header) {
        (Some(c), Some(d)) => c != d,
        (Some(_), None) | (None, Some(_)) => true,
        (None, None) => false,
    };

    if is_split {
        ColumnShape::Split {
            credit: resolve_field(row, CREDIT_FIELDS),
            debit: resolve_field(row, DEBIT_FIELDS),
        }
    } else {
        ColumnShape::Single {
            amount: resolve_field(row, AMOUNT_FIELDS),
            indicator: resolve_field(row, INDICATOR_FIELDS),
        }
    }
}

fn infer_split(credit: Option<&str>, debit: Option<&str>) -> Option<(TxType, f64)> {
    let credit_present = credit.is_some_and(|v| !v.trim().is_empty());
    let debit_present = debit.is_some_and(|v| !v.trim().is_empty());

    let credit_amt = if credit_present { parse_amount(credit.unwrap_or("")) } else { 0.0 };
    let debit_amt = if debit_present { parse_amount(debit.unwrap_or("")) } else { 0.0 };

    if credit_present && !debit_present && credit_amt != 0.0 {
        Some((TxType::Credit, credit_amt.abs()))
    } else if debit_present && !credit_present && debit_amt != 0.0 {
        Some((TxType::Debit, debit_amt.abs()))
    } else if credit_present && debit_present {
        // Both filled in: larger magnitude wins, ties go to debit (the
        // debit column is declared first in every source seen so far).
        if debit_amt.abs() >= credit_amt.abs() {
            Some((TxType::Debit, debit_amt.abs()))
        } else {
            Some((TxType::Credit, credit_amt.abs()))
        }
    } else {
        None
    }
}

fn infer_single(amount: Option<&str>, indicator: Option<&str>) -> Option<(TxType, f64)> {
    let amount = amount?;
    let parsed = parse_amount(amount);

    match indicator.filter(|v| !v.trim().is_empty()) {
        Some(raw) => {
            let ind = raw.to_lowercase();
            if ind.contains("credit") || ind.contains(" cr") || ind.ends_with("cr") {
                Some((TxType::Credit, parsed.abs()))
            } else if ind.contains("debit") || ind.contains(" dr") || ind.ends_with("dr") {
                Some((TxType::Debit, parsed.abs()))
            } else {
                None
            }
        }
        None => {
            if parsed < 0.0 {
                Some((TxType::Debit, parsed.abs()))
            } else if parsed > 0.0 {
                // Bare positive single-amount columns are treated as spend:
                // the dominant source format for this shape is an outgoing
                // UPI export. Known misclassification risk for credit-only
                // single-column statements.
                Some((TxType::Debit, parsed))
            } else {
                None
            }
        }
    }
}

/// Per-row synthesizer with pluggable merchant and rule presets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Synthesizer {
    merchant: MerchantStyle,
    rules: RulePreset,
}

impl Synthesizer {
    pub fn new(merchant: MerchantStyle, rules: RulePreset) -> Self {
        Self { merchant, rules }
    }

    /// Synthesize one canonical transaction, or nothing when the row cannot
    /// yield a positive, typed amount.
    pub fn synthesize(&self, row: &RawRow) -> Option<Transaction> {
        let (tx_type, amount) = match detect_shape(row) {
            ColumnShape::Split { credit, debit } => infer_split(credit, debit),
            ColumnShape::Single { amount, indicator } => infer_single(amount, indicator),
        }?;

        if amount <= 0.0 {
            return None;
        }

        let raw_date = resolve_field(row, DATE_FIELDS).unwrap_or("");
        let date = if raw_date.trim().is_empty() {
            String::new()
        } else {
            to_iso(raw_date)
        };

        let description = resolve_field(row, DESCRIPTION_FIELDS).unwrap_or("").to_string();
        let merchant = self.merchant.extract(&description);
        let category = self.rules.categorize(&description, tx_type);

        Some(Transaction {
            date,
            description,
            amount: round2(amount),
            tx_type,
            category,
            merchant,
        })
    }
}

/// Run a full batch with the default presets.
pub fn extract_transactions(
    bytes: &[u8],
    format: StatementFormat,
) -> Result<Vec<Transaction>, IngestError> {
    extract_transactions_with(bytes, format, &Synthesizer::default())
}

/// Run a full batch: bytes -> rows -> ordered transactions. All failures
/// here are terminal and classified; there are no partial results.
pub fn extract_transactions_with(
    bytes: &[u8],
    format: StatementFormat,
    synth: &Synthesizer,
) -> Result<Vec<Transaction>, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let rows = match format {
        StatementFormat::Delimited => csv_rows::parse_delimited(bytes)?,
        StatementFormat::ExtractedTable => {
            table_rows::parse_table_text(&String::from_utf8_lossy(bytes))
        }
    };
    if rows.is_empty() {
        return Err(IngestError::NoRows);
    }

    // Rows are processed in original order; downstream tie-breaking and
    // month bucketing depend on first-encountered semantics.
    let transactions: Vec<Transaction> =
        rows.iter().filter_map(|row| synth.synthesize(row)).collect();

    debug!(
        rows = rows.len(),
        transactions = transactions.len(),
        "synthesized statement batch"
    );

    if transactions.is_empty() {
        return Err(IngestError::NoTransactions { rows: rows.len() });
    }
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaklens_core::transaction::Category;

    fn synth(row: &RawRow) -> Option<Transaction> {
        Synthesizer::default().synthesize(row)
    }

    #[test]
    fn test_split_debit_only() {
        let row = RawRow::from_pairs([
            ("Date", "15-08-2024"),
            ("Narration", "ATM FEE"),
            ("Debit", "450"),
            ("Credit", ""),
        ]);
        let tx = synth(&row).unwrap();
        assert_eq!(tx.tx_type, TxType::Debit);
        assert_eq!(tx.amount, 450.0);
        assert_eq!(tx.date, "2024-08-15");
    }

    #[test]
    fn test_split_credit_only() {
        let row = RawRow::from_pairs([
            ("Date", "15-08-2024"),
            ("Narration", "SALARY CREDIT"),
            ("Debit", ""),
            ("Credit", "2000"),
        ]);
        let tx = synth(&row).unwrap();
        assert_eq!(tx.tx_type, TxType::Credit);
        assert_eq!(tx.amount, 2000.0);
        assert_eq!(tx.category, Category::Income);
    }

    #[test]
    fn test_split_both_larger_magnitude_wins() {
        let row = RawRow::from_pairs([("Debit", "100"), ("Credit", "50")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 100.0));

        let row = RawRow::from_pairs([("Debit", "50"), ("Credit", "120")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Credit, 120.0));
    }

    #[test]
    fn test_split_tie_goes_to_debit() {
        let row = RawRow::from_pairs([("Debit", "75"), ("Credit", "75")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 75.0));
    }

    #[test]
    fn test_split_headers_by_synonym() {
        let row = RawRow::from_pairs([("Withdrawal Amt.", "450"), ("Deposit Amt.", "")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 450.0));
    }

    #[test]
    fn test_combined_indicator_column_is_not_split() {
        // "Credit/Debit" matches both candidate sets but is one column;
        // the row must route through the single-amount + indicator path.
        let row = RawRow::from_pairs([
            ("Date", "01 Oct, 2025"),
            ("Description", "UPI/RAGHVENDRA/527431570952/Sent using Payt"),
            ("Amount", "-135.00"),
            ("Balance", "20,127.38"),
            ("Credit/Debit", "Debit"),
        ]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 135.0));
        // That date shape isn't a supported format, so it stays raw.
        assert_eq!(tx.date, "01 Oct, 2025");
    }

    #[test]
    fn test_single_amount_with_cr_dr_indicator() {
        let row = RawRow::from_pairs([("Amount", "1200"), ("Cr/Dr", "CR")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Credit, 1200.0));

        let row = RawRow::from_pairs([("Amount", "1200"), ("Cr/Dr", "DR")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 1200.0));
    }

    #[test]
    fn test_single_amount_unknown_indicator_drops_row() {
        let row = RawRow::from_pairs([("Amount", "1200"), ("Txn Type", "REVERSAL")]);
        assert!(synth(&row).is_none());
    }

    #[test]
    fn test_single_amount_negative_is_debit() {
        let row = RawRow::from_pairs([("Amount", "-450")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 450.0));
    }

    #[test]
    fn test_bare_positive_amount_is_debit() {
        // Deliberate heuristic: a positive single-amount column is assumed
        // to be outgoing spend. Credit-only single-column statements will
        // be misread by this rule; that trade-off is intentional.
        let row = RawRow::from_pairs([("Amount", "450")]);
        let tx = synth(&row).unwrap();
        assert_eq!((tx.tx_type, tx.amount), (TxType::Debit, 450.0));
    }

    #[test]
    fn test_zero_or_unparseable_amount_drops_row() {
        assert!(synth(&RawRow::from_pairs([("Amount", "0")])).is_none());
        assert!(synth(&RawRow::from_pairs([("Amount", "abc")])).is_none());
        assert!(synth(&RawRow::from_pairs([("Debit", "0.00"), ("Credit", "")])).is_none());
        assert!(synth(&RawRow::from_pairs([("Narration", "no money columns")])).is_none());
    }

    #[test]
    fn test_amount_is_rounded_to_two_decimals() {
        let row = RawRow::from_pairs([("Amount", "-10.239")]);
        assert_eq!(synth(&row).unwrap().amount, 10.24);
    }

    #[test]
    fn test_merchant_and_category_are_attached() {
        let row = RawRow::from_pairs([
            ("Date", "2024-08-15"),
            ("Narration", "UPI/DEVRAJ VERMA/292703462833/Sent using Paytm"),
            ("Amount", "-135.00"),
        ]);
        let tx = synth(&row).unwrap();
        assert_eq!(tx.merchant, "DEVRAJ VERMA");
        assert_eq!(tx.category, Category::Transfer);
    }

    #[test]
    fn test_alternate_presets_flow_through() {
        let row = RawRow::from_pairs([
            ("Narration", "UPI/DEVRAJ VERMA/292703462833/Sent using Paytm"),
            ("Amount", "-135.00"),
        ]);
        let synth = Synthesizer::new(MerchantStyle::BrandFirst, RulePreset::Legacy);
        let tx = synth.synthesize(&row).unwrap();
        assert_eq!(tx.merchant, "Devraj Verma");
        assert_eq!(tx.category, Category::Transfer);
    }

    #[test]
    fn test_extract_transactions_batch_errors() {
        assert!(matches!(
            extract_transactions(b"", StatementFormat::Delimited),
            Err(IngestError::EmptyInput)
        ));
        assert!(matches!(
            extract_transactions(b"Date,Amount\n", StatementFormat::Delimited),
            Err(IngestError::NoRows)
        ));
        assert!(matches!(
            extract_transactions(b"Date,Amount\nnope,abc\n", StatementFormat::Delimited),
            Err(IngestError::NoTransactions { rows: 1 })
        ));
        assert!(matches!(
            extract_transactions(b"free text, no table\n", StatementFormat::ExtractedTable),
            Err(IngestError::NoRows)
        ));
    }

    #[test]
    fn test_extract_transactions_preserves_row_order() {
        let data = b"Date,Narration,Debit,Credit\n\
15-08-2024,first,100,\n\
16-08-2024,second,,250\n\
17-08-2024,third,75,\n";
        let txns = extract_transactions(data, StatementFormat::Delimited).unwrap();
        let descs: Vec<&str> = txns.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descs, ["first", "second", "third"]);
    }
}
