//! Error types for the transcription run.
//!
//! Two families with different blast radii: `ExtractError` is raised while
//! reading the workbook and aborts before any browser interaction ever
//! happens; `FormError` is a mechanical failure in the live form, which
//! abandons the current record and every record after it, because the
//! form's state after a partial entry is unknown. Incomplete input rows
//! are not errors at all; they surface as `EntryOutcome::Skipped`.

use thiserror::Error;

use crate::infrastructure::dom::Locator;

/// Failures while resolving and reading the named table.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no table named {name:?} in the workbook")]
    TableNotFound { name: String },

    #[error("malformed table reference {reference:?}: {detail}")]
    MalformedRegion { reference: String, detail: String },

    #[error("header row has no column named {name:?}")]
    MissingColumn { name: &'static str },

    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Mechanical failures in the live form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("timed out after {timeout_secs}s waiting for {locator}")]
    ElementTimeout { locator: Locator, timeout_secs: u64 },

    #[error("no option labeled {label:?} in the {menu} list")]
    CategoryNotFound { label: String, menu: &'static str },

    #[error("{action} failed on {locator}: {detail}")]
    Interaction {
        action: &'static str,
        locator: Locator,
        detail: String,
    },

    #[error("navigation to {url} failed: {detail}")]
    Navigation { url: String, detail: String },
}
