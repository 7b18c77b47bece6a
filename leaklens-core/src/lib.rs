//! leaklens-core: canonical transaction model, field normalizers, and the
//! merchant/category rule tables shared by ingestion and analytics.

pub mod amount;
pub mod dates;
pub mod merchant;
pub mod rules;
pub mod transaction;

pub use amount::{parse_amount, round2};
pub use dates::{to_iso, to_month_key};
pub use merchant::MerchantStyle;
pub use rules::RulePreset;
pub use transaction::{
    Analysis, Category, Leaks, MerchantSpend, MonthlyFlow, Summary, Transaction, TxType,
};
