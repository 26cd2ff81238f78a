//! Application shell: wires the workbook, the browser session, and the
//! transcription run together.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::browser::FormSession;
use crate::config::Config;
use crate::excel::{extract_records, XlsxWorkbook};
use crate::infrastructure::Dom;
use crate::model::{RunReport, TransactionRecord};
use crate::workflow::{login, FormEntryDriver, TranscriptionRunner};

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs one full transcription: extract, sign in, replay, report.
    ///
    /// Extraction happens before the browser is touched, so a bad workbook
    /// or a missing table aborts without any form interaction.
    pub async fn run(self) -> Result<RunReport> {
        let records = self.load_records()?;
        info!(
            "extracted {} record(s) from table '{}'",
            records.len(),
            self.config.table_name
        );

        let session = FormSession::connect(self.config.browser_debug_port).await?;
        let result = self.transcribe(&session, records).await;
        session.close().await;
        result
    }

    fn load_records(&self) -> Result<Vec<TransactionRecord>> {
        let workbook = XlsxWorkbook::open(&self.config.input_file)?;
        let records = extract_records(&workbook, &self.config.table_name)?;
        Ok(records)
    }

    async fn transcribe(
        &self,
        session: &FormSession,
        records: Vec<TransactionRecord>,
    ) -> Result<RunReport> {
        let dom = session.dom();

        login::sign_in(&dom, &self.config.signin_url, &self.config.user, &self.config.password)
            .await?;
        dom.navigate(&self.config.input_url).await?;

        let driver = FormEntryDriver::new(&dom, &self.config.wallet_xpath);
        driver
            .await_ready()
            .await
            .context("entry form never became ready")?;

        match TranscriptionRunner::new(driver).run(records).await {
            Ok(report) => Ok(report),
            Err(aborted) => {
                error!(
                    "aborting after row {}: {} ({})",
                    aborted.row, aborted.source, aborted.report
                );
                Err(aborted.into())
            }
        }
    }
}
