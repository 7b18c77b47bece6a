//! Canonical transaction and summary types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of a money movement: outgoing (debit) or incoming (credit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    #[serde(rename = "DEBIT")]
    Debit,
    #[serde(rename = "CREDIT")]
    Credit,
}

/// Fixed spending/income categories assigned by the rule tables.
///
/// `Ord` so category-keyed maps serialize in a stable order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "RENT")]
    Rent,
    #[serde(rename = "GROCERIES")]
    Groceries,
    #[serde(rename = "FOOD_DELIVERY")]
    FoodDelivery,
    #[serde(rename = "SHOPPING")]
    Shopping,
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[serde(rename = "UTILITIES")]
    Utilities,
    #[serde(rename = "SUBSCRIPTION")]
    Subscription,
    #[serde(rename = "BANK_FEES")]
    BankFees,
    #[serde(rename = "TRANSFER")]
    Transfer,
    #[serde(rename = "OTHER")]
    Other,
}

/// A single canonical transaction synthesized from one statement row.
///
/// Invariant: `amount` is strictly positive; the sign lives in `tx_type`.
/// Rows that cannot produce a positive, typed amount never become a
/// `Transaction`. Category and merchant are assigned once, at synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// ISO date (YYYY-MM-DD) when the source date parsed, otherwise the
    /// original trimmed text so the field is never empty for non-empty input.
    pub date: String,
    pub description: String,
    /// Strictly positive, two-decimal precision.
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub category: Category,
    /// Short counterparty name extracted from the description.
    pub merchant: String,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.tx_type == TxType::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.tx_type == TxType::Credit
    }
}

/// The three reducible "leak" sub-totals, read off the per-category totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaks {
    pub bank_fees: f64,
    pub subscriptions: f64,
    pub food_delivery: f64,
}

impl Leaks {
    pub fn total(&self) -> f64 {
        self.bank_fees + self.subscriptions + self.food_delivery
    }
}

/// Summed debit spend at one merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantSpend {
    pub merchant: String,
    pub amount: f64,
}

/// Income/spending totals for one "YYYY-MM" month bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    pub income: f64,
    pub spending: f64,
}

/// Aggregate view over one batch of transactions. Stateless: recomputed in
/// full from the ordered transaction list, never cached across batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: f64,
    pub total_spending: f64,
    /// totalIncome - totalSpending.
    pub net: f64,
    /// Category -> summed debit amount. Only categories with debit spend.
    pub by_category: BTreeMap<Category, f64>,
    pub leaks: Leaks,
    /// At most 10 entries, descending by amount, ties in first-seen order.
    pub top_merchants: Vec<MerchantSpend>,
    /// Month key "YYYY-MM" -> flows. Only months whose dates parsed.
    pub monthly: BTreeMap<String, MonthlyFlow>,
}

/// Full output envelope for one analyzed statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_type_wire_names() {
        assert_eq!(serde_json::to_string(&TxType::Debit).unwrap(), "\"DEBIT\"");
        assert_eq!(serde_json::to_string(&TxType::Credit).unwrap(), "\"CREDIT\"");
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&Category::FoodDelivery).unwrap(),
            "\"FOOD_DELIVERY\""
        );
        assert_eq!(
            serde_json::to_string(&Category::BankFees).unwrap(),
            "\"BANK_FEES\""
        );
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = Summary {
            total_income: 5000.0,
            total_spending: 500.0,
            net: 4500.0,
            by_category: BTreeMap::new(),
            leaks: Leaks::default(),
            top_merchants: vec![],
            monthly: BTreeMap::new(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("totalIncome").is_some());
        assert!(json.get("byCategory").is_some());
        assert!(json.get("topMerchants").is_some());
        assert!(json["leaks"].get("bankFees").is_some());
    }

    #[test]
    fn test_leaks_total() {
        let leaks = Leaks {
            bank_fees: 200.0,
            subscriptions: 300.0,
            food_delivery: 0.0,
        };
        assert_eq!(leaks.total(), 500.0);
    }
}
