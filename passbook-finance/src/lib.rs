//! passbook-finance: keyword categorization rules and transaction summaries

pub mod category_rules;
pub mod summary;

pub use category_rules::{categorize, Rule, RuleTable};
pub use summary::{format_compact, percentage, CategoryTotal, DailyTotal, Summary};
