pub mod category;
pub mod fingerprint;
pub mod money;
pub mod period;
pub mod transaction;

pub use category::{Category, CategoryDef};
pub use fingerprint::{fnv1a_32, palette_index, transaction_id};
pub use money::Money;
pub use period::{filter_window, DateRange, Window};
pub use transaction::{Flow, SecondarySourceData, Transaction};
