mod list;
mod write;

pub use list::{TransactionListing, TransactionQuery, TransactionWithDetails};
pub use write::TransactionDraft;
