pub mod category;
pub mod common;
pub mod ledger;
pub mod transaction;

pub use category::Category;
pub use common::{Displayable, Identifiable};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
