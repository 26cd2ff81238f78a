//! Per-record form entry state machine.
//!
//! One complete record goes through a fixed, linear sequence: ready →
//! sign → amount → wallet → large category → middle category → content →
//! date → submit → confirm → ready again. Every transition that depends
//! on the page re-rendering waits on the element that signals readiness;
//! the only fixed sleeps are the dropdown animation allowances in
//! `wait`. Nothing here is caught per-record: any failure propagates to
//! the runner and ends the run.

use async_trait::async_trait;
use tracing::info;

use crate::error::FormError;
use crate::infrastructure::dom::{Dom, Locator};
use crate::model::CompleteRecord;
use crate::wait::{await_element, dropdown_pause, DEFAULT_TIMEOUT};

const SUBMIT_BUTTON: &str = "#submit-button";
const INCOME_TOGGLE: &str = ".plus-payment";
const AMOUNT_INPUT: &str = "#appendedPrependedInput";
const WALLET_OPENER: &str = "#user_asset_act_sub_account_id_hash";
const LARGE_CATEGORY_OPENER: &str = "#js-large-category-selected";
const MIDDLE_CATEGORY_OPENER: &str = "#js-middle-category-selected";
const CONTENT_FIELD: &str = "#js-content-field";
const DATE_FIELD: &str = "#updated-at";
const CONFIRM_BUTTON: &str = "#confirmation-button";

const LARGE_OPTION_CLASS: &str = "l_c_name";
const MIDDLE_OPTION_CLASS: &str = "m_c_name";

/// Selects one option from a rendered list by its exact label.
#[async_trait]
pub trait OptionSelector {
    async fn select_by_label(&self, label: &str) -> Result<(), FormError>;
}

/// A category dropdown: open the control, wait for the rendered list,
/// then require an exact label match. A missing label is
/// [`FormError::CategoryNotFound`], never a fallback selection; duplicate
/// labels resolve to the first match in document order.
pub struct CategoryDropdown<'a, D: Dom> {
    dom: &'a D,
    opener: Locator,
    option_class: &'static str,
    menu: &'static str,
}

impl<'a, D: Dom> CategoryDropdown<'a, D> {
    fn large(dom: &'a D) -> Self {
        Self {
            dom,
            opener: Locator::css(LARGE_CATEGORY_OPENER),
            option_class: LARGE_OPTION_CLASS,
            menu: "large category",
        }
    }

    fn middle(dom: &'a D) -> Self {
        Self {
            dom,
            opener: Locator::css(MIDDLE_CATEGORY_OPENER),
            option_class: MIDDLE_OPTION_CLASS,
            menu: "middle category",
        }
    }
}

#[async_trait]
impl<'a, D: Dom> OptionSelector for CategoryDropdown<'a, D> {
    async fn select_by_label(&self, label: &str) -> Result<(), FormError> {
        self.dom.click(&self.opener).await?;
        dropdown_pause().await;
        await_element(self.dom, &list_locator(self.option_class), DEFAULT_TIMEOUT).await?;

        let option = option_locator(self.option_class, label);
        if !self.dom.is_present(&option).await? {
            return Err(FormError::CategoryNotFound {
                label: label.to_string(),
                menu: self.menu,
            });
        }
        self.dom.click(&option).await?;
        dropdown_pause().await;
        Ok(())
    }
}

/// At least one rendered option anchor means the list is open.
fn list_locator(option_class: &str) -> Locator {
    Locator::xpath(format!("//a[@class='{option_class}']"))
}

/// Option anchors carry the label as their text and the list kind as
/// their class.
fn option_locator(option_class: &str, label: &str) -> Locator {
    Locator::xpath(format!(
        "//a[text()={} and @class='{}']",
        xpath_literal(label),
        option_class
    ))
}

/// Quotes `text` for use inside an xpath expression. Labels containing an
/// apostrophe need the concat() form.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    let parts: Vec<String> = text.split('\'').map(|part| format!("'{part}'")).collect();
    format!("concat({})", parts.join(r#", "'", "#))
}

/// Drives one complete record through the entry form.
pub struct FormEntryDriver<'a, D: Dom> {
    dom: &'a D,
    wallet_option: Locator,
}

impl<'a, D: Dom> FormEntryDriver<'a, D> {
    /// `wallet_xpath` locates the configured wallet option inside the
    /// opened sub-account list.
    pub fn new(dom: &'a D, wallet_xpath: &str) -> Self {
        Self {
            dom,
            wallet_option: Locator::xpath(wallet_xpath),
        }
    }

    /// Blocks until the form accepts a new entry: both the submit control
    /// and the income/expense toggle must be present.
    pub async fn await_ready(&self) -> Result<(), FormError> {
        await_element(self.dom, &Locator::css(SUBMIT_BUTTON), DEFAULT_TIMEOUT).await?;
        await_element(self.dom, &Locator::css(INCOME_TOGGLE), DEFAULT_TIMEOUT).await
    }

    /// Transcribes one record and leaves the form reset for the next one.
    pub async fn transcribe(&self, record: &CompleteRecord) -> Result<(), FormError> {
        self.await_ready().await?;

        // Expense is the form's default; only income needs the toggle.
        if record.is_income() {
            self.dom.click(&Locator::css(INCOME_TOGGLE)).await?;
        }

        let amount = record.entry_amount();
        self.dom
            .fill(&Locator::css(AMOUNT_INPUT), &amount.to_string())
            .await?;

        self.select_wallet().await?;

        CategoryDropdown::large(self.dom)
            .select_by_label(&record.large_category)
            .await?;
        // The middle list depends on the large choice just made.
        CategoryDropdown::middle(self.dom)
            .select_by_label(&record.middle_category)
            .await?;

        self.dom
            .fill(&Locator::css(CONTENT_FIELD), &record.content)
            .await?;

        let date = record.form_date();
        self.dom.fill(&Locator::css(DATE_FIELD), &date).await?;

        self.dom.click(&Locator::css(SUBMIT_BUTTON)).await?;

        let confirm = Locator::css(CONFIRM_BUTTON);
        await_element(self.dom, &confirm, DEFAULT_TIMEOUT).await?;
        self.dom.click(&confirm).await?;

        info!(
            "registered entry: date={} large_category={} middle_category={} content={:?} amount={}",
            date, record.large_category, record.middle_category, record.content, amount
        );

        // The form re-renders after confirmation; the next record must
        // not start until it is back in the ready state.
        self.await_ready().await
    }

    async fn select_wallet(&self) -> Result<(), FormError> {
        self.dom.click(&Locator::css(WALLET_OPENER)).await?;
        dropdown_pause().await;
        await_element(self.dom, &self.wallet_option, DEFAULT_TIMEOUT).await?;
        self.dom.click(&self.wallet_option).await?;
        dropdown_pause().await;
        Ok(())
    }
}
