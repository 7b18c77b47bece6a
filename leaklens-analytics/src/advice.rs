//! Deterministic budgeting advice composed from a summary.
//!
//! This is the fallback path behind the remote generative-text service: no
//! randomness, no I/O, same summary in -> same text out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use leaklens_core::transaction::{MonthlyFlow, Summary};

/// Advice text plus how it was produced. `degraded` is true when the remote
/// service failed (or returned nothing usable) and the local composer
/// answered instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
    pub degraded: bool,
}

/// Spending-trend sentence over the chronologically first and last month.
/// Changes inside ±10% read as stable.
fn trend_line(monthly: &BTreeMap<String, MonthlyFlow>) -> Option<String> {
    if monthly.len() < 2 {
        return None;
    }
    // BTreeMap iterates in key order and "YYYY-MM" keys sort chronologically.
    let first = monthly.values().next()?;
    let last = monthly.values().last()?;

    if last.spending > first.spending * 1.1 {
        Some(format!(
            "Your monthly spending has gone up from ~₹{:.0} to ~₹{:.0}.",
            first.spending, last.spending
        ))
    } else if last.spending < first.spending * 0.9 {
        Some(format!(
            "Your monthly spending has come down from ~₹{:.0} to ~₹{:.0}.",
            first.spending, last.spending
        ))
    } else {
        Some("Your monthly spending is roughly stable.".to_string())
    }
}

/// Compose advice text from a summary.
pub fn compose_advice(summary: &Summary) -> String {
    let leaks = &summary.leaks;
    let mut lines: Vec<String> = Vec::new();

    lines.push("Here's a quick summary of your situation based on the numbers I see.".to_string());
    lines.push(format!(
        "Your total income for this period is about ₹{:.0}, and you spent around ₹{:.0}, \
         leaving you with a net of ₹{:.0}.",
        summary.total_income, summary.total_spending, summary.net
    ));

    if let Some(trend) = trend_line(&summary.monthly) {
        lines.push(trend);
    }

    let mut leak_details: Vec<String> = Vec::new();
    if leaks.bank_fees > 0.0 {
        leak_details.push(format!("bank fees (₹{:.0})", leaks.bank_fees));
    }
    if leaks.subscriptions > 0.0 {
        leak_details.push(format!("subscriptions (₹{:.0})", leaks.subscriptions));
    }
    if leaks.food_delivery > 0.0 {
        leak_details.push(format!("food delivery (₹{:.0})", leaks.food_delivery));
    }
    if !leak_details.is_empty() {
        lines.push(format!(
            "The easiest places to cut back without hurting your basic lifestyle are: {}.",
            leak_details.join(", ")
        ));
    }

    let worst = summary
        .top_merchants
        .iter()
        .max_by(|a, b| a.amount.total_cmp(&b.amount));
    if let Some(worst) = worst {
        lines.push(format!(
            "You are also spending quite a bit at {} (₹{:.0} in this period). \
             Check if all those payments were actually necessary.",
            worst.merchant, worst.amount
        ));
    }

    let monthly_save = leaks.total();
    if monthly_save > 0.0 {
        lines.push(format!(
            "If you reduce these leak categories by even 50%, you could free up roughly \
             ₹{:.0} per month, or about ₹{:.0} per year.",
            monthly_save * 0.5,
            monthly_save * 12.0 * 0.5
        ));
    }

    lines.push("Here are a few practical next steps:".to_string());
    if leaks.bank_fees > 0.0 {
        lines.push(
            "- Talk to your bank about charges and see if you can switch to a low-fee \
             account or avoid penalty situations."
                .to_string(),
        );
    }
    if leaks.subscriptions > 0.0 {
        lines.push(
            "- Review all your subscriptions and cancel the ones you rarely use or can \
             share with family."
                .to_string(),
        );
    }
    if leaks.food_delivery > 0.0 {
        lines.push(
            "- Limit food delivery orders and replace a few of them each week with \
             home-cooked or office meals."
                .to_string(),
        );
    }
    lines.push(
        "- Decide a simple monthly spending limit and check this dashboard once a month \
         to ensure you are on track."
            .to_string(),
    );

    lines.join("\n")
}
