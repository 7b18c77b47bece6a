//! Single-pass summary aggregation.

use std::collections::{BTreeMap, HashMap};

use leaklens_core::amount::round2;
use leaklens_core::dates::to_month_key;
use leaklens_core::transaction::{
    Category, Leaks, MerchantSpend, MonthlyFlow, Summary, Transaction, TxType,
};

/// Fold an ordered transaction list into a [`Summary`].
///
/// One pass, full-precision accumulation, rounding only on the way out.
/// Input order matters: merchant ties in `topMerchants` resolve to whichever
/// merchant was seen first, so any caller that parallelizes synthesis must
/// restore original row order before aggregating.
pub fn compute_summary(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0.0_f64;
    let mut total_spending = 0.0_f64;
    let mut by_category: BTreeMap<Category, f64> = BTreeMap::new();

    // Merchant totals keep insertion order for stable tie-breaking.
    let mut merchant_order: Vec<String> = Vec::new();
    let mut merchant_totals: HashMap<String, f64> = HashMap::new();

    let mut monthly: BTreeMap<String, MonthlyFlow> = BTreeMap::new();

    for tx in transactions {
        match tx.tx_type {
            TxType::Credit => total_income += tx.amount,
            TxType::Debit => {
                total_spending += tx.amount;
                *by_category.entry(tx.category).or_insert(0.0) += tx.amount;

                let merchant = if tx.merchant.is_empty() {
                    tx.description.as_str()
                } else {
                    tx.merchant.as_str()
                };
                if !merchant.is_empty() {
                    if !merchant_totals.contains_key(merchant) {
                        merchant_order.push(merchant.to_string());
                    }
                    *merchant_totals.entry(merchant.to_string()).or_insert(0.0) += tx.amount;
                }
            }
        }

        // Only dates that resolve to a month key contribute to the trend.
        if let Some(month) = to_month_key(&tx.date) {
            let flow = monthly.entry(month).or_default();
            match tx.tx_type {
                TxType::Credit => flow.income += tx.amount,
                TxType::Debit => flow.spending += tx.amount,
            }
        }
    }

    let leaks = Leaks {
        bank_fees: round2(by_category.get(&Category::BankFees).copied().unwrap_or(0.0)),
        subscriptions: round2(by_category.get(&Category::Subscription).copied().unwrap_or(0.0)),
        food_delivery: round2(by_category.get(&Category::FoodDelivery).copied().unwrap_or(0.0)),
    };

    let mut top_merchants: Vec<MerchantSpend> = merchant_order
        .iter()
        .map(|merchant| MerchantSpend {
            merchant: merchant.clone(),
            amount: merchant_totals[merchant],
        })
        .collect();
    // Stable sort: equal amounts keep first-encountered order.
    top_merchants.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    top_merchants.truncate(10);
    for entry in &mut top_merchants {
        entry.amount = round2(entry.amount);
    }

    Summary {
        total_income: round2(total_income),
        total_spending: round2(total_spending),
        net: round2(total_income - total_spending),
        by_category: by_category.into_iter().map(|(c, v)| (c, round2(v))).collect(),
        leaks,
        top_merchants,
        monthly: monthly
            .into_iter()
            .map(|(month, flow)| {
                (
                    month,
                    MonthlyFlow {
                        income: round2(flow.income),
                        spending: round2(flow.spending),
                    },
                )
            })
            .collect(),
    }
}
