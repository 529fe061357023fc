//! passbook-core: transaction and category types shared by the ingestion pipeline

pub mod category;
pub mod transaction;

pub use category::Category;
pub use transaction::{sort_chronologically, Direction, Transaction, UnknownDirection};
