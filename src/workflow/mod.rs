//! Flow layer: the sign-in step, the per-record entry state machine, and
//! the run loop that isolates row-local failures.

pub mod form_driver;
pub mod login;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use form_driver::{FormEntryDriver, OptionSelector};
pub use runner::{RunAborted, TranscriptionRunner};
