//! Run-level iteration with per-row failure isolation.

use thiserror::Error;
use tracing::{error, info};

use crate::error::FormError;
use crate::infrastructure::dom::Dom;
use crate::model::{EntryOutcome, RunReport, TransactionRecord};
use crate::workflow::form_driver::FormEntryDriver;

/// A mechanical failure that ended the run early. Carries the partial
/// report so run-level stats survive the abort.
#[derive(Debug, Error)]
#[error("run aborted at row {row}: {source}")]
pub struct RunAborted {
    pub row: usize,
    pub report: RunReport,
    #[source]
    pub source: FormError,
}

/// Feeds records through the completeness gate and the form driver,
/// strictly in order, one at a time.
///
/// Incomplete rows are logged and skipped without touching the browser;
/// a driver failure aborts the remaining rows, because the form's state
/// after a partial entry is unknown and unsafe to resume blindly. No
/// retries, no reordering, no batching.
pub struct TranscriptionRunner<'a, D: Dom> {
    driver: FormEntryDriver<'a, D>,
}

impl<'a, D: Dom> TranscriptionRunner<'a, D> {
    pub fn new(driver: FormEntryDriver<'a, D>) -> Self {
        Self { driver }
    }

    pub async fn run(&self, records: Vec<TransactionRecord>) -> Result<RunReport, RunAborted> {
        let mut report = RunReport::default();
        for (index, record) in records.into_iter().enumerate() {
            let row = index + 1;
            match record.into_complete() {
                Err(incomplete) => {
                    error!("row {row}: skipping incomplete record ({incomplete})");
                    report.push(EntryOutcome::Skipped(format!(
                        "incomplete record: {incomplete}"
                    )));
                }
                Ok(complete) => match self.driver.transcribe(&complete).await {
                    Ok(()) => report.push(EntryOutcome::Submitted),
                    Err(source) => {
                        report.push(EntryOutcome::Failed(source.to_string()));
                        return Err(RunAborted {
                            row,
                            report,
                            source,
                        });
                    }
                },
            }
        }
        info!("transcription finished: {report}");
        Ok(report)
    }
}
