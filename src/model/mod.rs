//! Plain data types shared across the crate.

pub mod outcome;
pub mod record;
pub mod region;

pub use outcome::{EntryOutcome, RunReport};
pub use record::{CompleteRecord, TransactionRecord};
pub use region::TableRegion;
