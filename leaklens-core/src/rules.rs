//! Ordered keyword rule tables for category assignment.
//!
//! Rule order is a correctness requirement, not style: keyword sets overlap
//! (a UPI channel marker can appear in a description that should land on an
//! earlier category), so the tables are ordered lists, never sets. Two
//! presets exist because two rule sets evolved independently; they are kept
//! separately testable instead of being merged.

use crate::transaction::{Category, TxType};

/// One ordered rule: first keyword hit assigns the category.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

const fn rule(category: Category, keywords: &'static [&'static str]) -> Rule {
    Rule { category, keywords }
}

/// Credit-side rules, Standard preset. Anything unmatched is income.
const STANDARD_CREDIT_RULES: &[Rule] = &[
    rule(
        Category::Income,
        &["salary", "sal ", "payroll", "salary credit", "credited by"],
    ),
    rule(Category::Income, &["refund", "cashback", "rebate"]),
    rule(
        Category::Transfer,
        &["self transfer", "own account", "transfer from"],
    ),
];

/// Debit-side rules, Standard preset, first match wins.
const STANDARD_DEBIT_RULES: &[Rule] = &[
    rule(Category::Rent, &["rent"]),
    rule(
        Category::Groceries,
        &[
            "grocery",
            "groceries",
            "supermarket",
            "dmart",
            "d-mart",
            "big bazaar",
            "bigbazaar",
            "reliance fresh",
        ],
    ),
    rule(
        Category::FoodDelivery,
        &["swiggy", "zomato", "blinkit", "instamart", "foodpanda", "ubereats", "eatfit"],
    ),
    rule(
        Category::Shopping,
        &[
            "amazon", "flipkart", "myntra", "ajio", "nykaa", "tatacliq", "tata cliq", "store",
            "shopping",
        ],
    ),
    rule(
        Category::Transport,
        &[
            "ola", "uber", "rapido", "cab", "metro", "irctc", "fuel", "petrol", "diesel", "hpcl",
            "bpcl", "indian oil",
        ],
    ),
    rule(
        Category::Utilities,
        &[
            "electricity",
            "power bill",
            "water bill",
            "gas bill",
            "broadband",
            "wifi",
            "dth",
            "mobile bill",
            "postpaid",
            "jio",
            "airtel",
            "vi postpaid",
        ],
    ),
    rule(
        Category::Subscription,
        &[
            "netflix",
            "spotify",
            "youtube premium",
            "prime video",
            "hotstar",
            "disney+",
            "sonyliv",
            "zee5",
            "icloud",
            "google storage",
            "drive storage",
            "aws",
            "digitalocean",
        ],
    ),
    rule(
        Category::BankFees,
        &[
            "fee",
            "charges",
            "charge",
            "penalty",
            "fine",
            "annual charge",
            "atm fee",
            "maintenance charge",
            "imps chg",
            "neft chg",
        ],
    ),
    rule(
        Category::Transfer,
        &["upi/", "upi-", "@ok", "@ybl", "@paytm", "@ibl"],
    ),
];

/// Debit-side rules, Legacy preset. Note the different priority order
/// (subscriptions and food delivery outrank rent) and the wider transfer
/// keyword set; reordering either table changes real outputs.
const LEGACY_DEBIT_RULES: &[Rule] = &[
    rule(
        Category::Subscription,
        &[
            "netflix",
            "spotify",
            "youtube premium",
            "hotstar",
            "prime",
            "zee5",
            "subscription",
            "renewal",
        ],
    ),
    rule(
        Category::FoodDelivery,
        &[
            "swiggy", "zomato", "blinkit", "instamart", "eats", "foodpanda", "dominos",
            "pizza hut",
        ],
    ),
    rule(Category::Rent, &["rent"]),
    rule(
        Category::Groceries,
        &[
            "big bazaar",
            "d-mart",
            "dmart",
            "grofers",
            "grocery",
            "more supermarket",
            "reliance fresh",
        ],
    ),
    rule(
        Category::Shopping,
        &[
            "amazon", "flipkart", "myntra", "ajio", "nykaa", "meesho", "croma",
            "reliance digital",
        ],
    ),
    rule(
        Category::Transport,
        &["uber", "ola", "rapido", "metro", "bus", "auto", "cab", "olacabs"],
    ),
    rule(
        Category::Utilities,
        &[
            "electricity",
            "water bill",
            "gas bill",
            "mobile bill",
            "postpaid",
            "prepaid",
            "wifi",
            "broadband",
            "jio",
            "airtel",
            "vi ",
        ],
    ),
    rule(
        Category::BankFees,
        &[
            "charge",
            "fee",
            "penalty",
            "fine",
            "interest",
            "late fee",
            "bank charge",
            "annual fee",
        ],
    ),
    rule(
        Category::Transfer,
        &["neft", "rtgs", "imps", "upi", "transfer", "to account", "from account"],
    ),
];

/// Categorization rule preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RulePreset {
    /// Current table. Default for synthesis.
    #[default]
    Standard,
    /// The earlier, independently maintained table. Kept selectable; which
    /// of the two is authoritative was never settled upstream.
    Legacy,
}

impl RulePreset {
    fn credit_rules(&self) -> &'static [Rule] {
        match self {
            RulePreset::Standard => STANDARD_CREDIT_RULES,
            // Legacy treated every credit as income outright.
            RulePreset::Legacy => &[],
        }
    }

    pub fn debit_rules(&self) -> &'static [Rule] {
        match self {
            RulePreset::Standard => STANDARD_DEBIT_RULES,
            RulePreset::Legacy => LEGACY_DEBIT_RULES,
        }
    }

    /// Assign a category. Pure function of the description text and the
    /// transaction type; nothing else may influence the outcome.
    pub fn categorize(&self, description: &str, tx_type: TxType) -> Category {
        let desc = description.to_lowercase();
        match tx_type {
            TxType::Credit => first_match(self.credit_rules(), &desc).unwrap_or(Category::Income),
            TxType::Debit => first_match(self.debit_rules(), &desc).unwrap_or(Category::Other),
        }
    }
}

fn first_match(rules: &[Rule], desc: &str) -> Option<Category> {
    for rule in rules {
        if rule.keywords.iter().any(|kw| desc.contains(kw)) {
            return Some(rule.category);
        }
    }
    None
}
