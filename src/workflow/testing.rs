//! Scripted DOM fake for exercising the form flow without a browser.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::FormError;
use crate::infrastructure::dom::{Dom, Locator};

/// Records every interaction and answers presence checks from a scripted
/// set of locators.
#[derive(Default)]
pub(crate) struct FakeDom {
    present: Mutex<HashSet<String>>,
    events: Mutex<Vec<String>>,
}

impl FakeDom {
    pub fn with_present(locators: impl IntoIterator<Item = Locator>) -> Self {
        let fake = Self::default();
        for locator in locators {
            fake.add(locator);
        }
        fake
    }

    pub fn add(&self, locator: Locator) {
        self.present.lock().unwrap().insert(locator.to_string());
    }

    /// All recorded events, presence checks included.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Interaction events only: navigations, clicks, fills, submits.
    pub fn actions(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| !e.starts_with("present?"))
            .collect()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn has(&self, locator: &Locator) -> bool {
        self.present.lock().unwrap().contains(&locator.to_string())
    }

    fn require(&self, action: &'static str, locator: &Locator) -> Result<(), FormError> {
        if self.has(locator) {
            Ok(())
        } else {
            Err(FormError::Interaction {
                action,
                locator: locator.clone(),
                detail: "element not found".to_string(),
            })
        }
    }
}

#[async_trait]
impl Dom for FakeDom {
    async fn navigate(&self, url: &str) -> Result<(), FormError> {
        self.record(format!("navigate {url}"));
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> Result<bool, FormError> {
        let hit = self.has(locator);
        self.record(format!("present? {locator} -> {hit}"));
        Ok(hit)
    }

    async fn click(&self, locator: &Locator) -> Result<(), FormError> {
        self.require("click", locator)?;
        self.record(format!("click {locator}"));
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), FormError> {
        self.require("fill", locator)?;
        self.record(format!("fill {locator} = {text}"));
        Ok(())
    }

    async fn submit_form(&self, locator: &Locator) -> Result<(), FormError> {
        self.require("form submit", locator)?;
        self.record(format!("submit {locator}"));
        Ok(())
    }
}
