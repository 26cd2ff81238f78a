//! Replays transaction rows from a workbook table into a web entry form.
//!
//! Layers, bottom to top:
//! - [`infrastructure`]: the DOM capability and its devtools-backed
//!   implementation.
//! - [`excel`] and [`model`]: table extraction into typed records.
//! - [`browser`] and [`workflow`]: session lifecycle, sign-in, the
//!   per-record entry state machine, and the run loop.
//! - [`app`]: wires a configured run end to end.

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod excel;
pub mod infrastructure;
pub mod logging;
pub mod model;
pub mod wait;
pub mod workflow;

pub use app::App;
pub use config::Config;
pub use error::{ExtractError, FormError};
pub use model::{CompleteRecord, EntryOutcome, RunReport, TransactionRecord};
