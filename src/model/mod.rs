//! Types that represent the core data model, such as `Transaction` and
//! `Category`.
mod amount;
mod category;
mod classify;
mod transaction;

pub use amount::{Amount, CURRENCY_PREFIX};
pub use category::{Category, Kind, PaymentMethod};
pub use classify::{CategoryRule, CategoryRules};
pub use transaction::{Transaction, DATE_FORMAT, MIRROR_HEADER, TRANSACTION_HEADER};
