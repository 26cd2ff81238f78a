//! DOM capability layer.
//!
//! Holds the scarce `Page` resource and exposes browser interactions as a
//! small capability trait, so the flow layers never touch chromiumoxide
//! directly and can run against a scripted fake in tests.

use async_trait::async_trait;
use chromiumoxide::Page;
use std::fmt;

use crate::error::FormError;

/// Where to find an element in the live document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{s}`"),
            Locator::XPath(s) => write!(f, "xpath `{s}`"),
        }
    }
}

/// The browser interactions the transcription flow needs.
///
/// Lookups resolve to the first matching element in document order.
#[async_trait]
pub trait Dom: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), FormError>;

    async fn is_present(&self, locator: &Locator) -> Result<bool, FormError>;

    async fn click(&self, locator: &Locator) -> Result<(), FormError>;

    /// Clears the input and enters `text`, firing input/change events.
    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), FormError>;

    /// Submits the form owning the located element.
    async fn submit_form(&self, locator: &Locator) -> Result<(), FormError>;
}

/// `Dom` implementation over a live chromiumoxide page.
///
/// The only owner of the `Page` handle above the session layer; everything
/// goes through JavaScript evaluation.
pub struct PageDom {
    page: Page,
}

impl PageDom {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn eval_bool(
        &self,
        js: String,
        action: &'static str,
        locator: &Locator,
    ) -> Result<bool, FormError> {
        let interaction = |detail: String| FormError::Interaction {
            action,
            locator: locator.clone(),
            detail,
        };
        let result = self
            .page
            .evaluate(js)
            .await
            .map_err(|e| interaction(e.to_string()))?;
        result
            .into_value::<bool>()
            .map_err(|e| interaction(e.to_string()))
    }
}

#[async_trait]
impl Dom for PageDom {
    async fn navigate(&self, url: &str) -> Result<(), FormError> {
        let navigation = |detail: String| FormError::Navigation {
            url: url.to_string(),
            detail,
        };
        self.page
            .goto(url)
            .await
            .map_err(|e| navigation(e.to_string()))?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| navigation(e.to_string()))?;
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> Result<bool, FormError> {
        let js = format!("!!({})", finder_js(locator));
        self.eval_bool(js, "presence check", locator).await
    }

    async fn click(&self, locator: &Locator) -> Result<(), FormError> {
        let js = format!(
            r#"(() => {{
                const el = {finder};
                if (el === null) return false;
                el.click();
                return true;
            }})()"#,
            finder = finder_js(locator)
        );
        if self.eval_bool(js, "click", locator).await? {
            Ok(())
        } else {
            Err(FormError::Interaction {
                action: "click",
                locator: locator.clone(),
                detail: "element not found".to_string(),
            })
        }
    }

    async fn fill(&self, locator: &Locator, text: &str) -> Result<(), FormError> {
        let js = format!(
            r#"(() => {{
                const el = {finder};
                if (el === null) return false;
                el.focus();
                el.value = '';
                el.value = {text};
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            finder = finder_js(locator),
            text = js_string(text)
        );
        if self.eval_bool(js, "fill", locator).await? {
            Ok(())
        } else {
            Err(FormError::Interaction {
                action: "fill",
                locator: locator.clone(),
                detail: "element not found".to_string(),
            })
        }
    }

    async fn submit_form(&self, locator: &Locator) -> Result<(), FormError> {
        let js = format!(
            r#"(() => {{
                const el = {finder};
                if (el === null || el.form === null) return false;
                el.form.submit();
                return true;
            }})()"#,
            finder = finder_js(locator)
        );
        if self.eval_bool(js, "form submit", locator).await? {
            Ok(())
        } else {
            Err(FormError::Interaction {
                action: "form submit",
                locator: locator.clone(),
                detail: "element or owning form not found".to_string(),
            })
        }
    }
}

/// JavaScript expression resolving `locator` to an element or null.
fn finder_js(locator: &Locator) -> String {
    match locator {
        Locator::Css(selector) => format!("document.querySelector({})", js_string(selector)),
        Locator::XPath(expression) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            js_string(expression)
        ),
    }
}

/// Encodes `text` as a JavaScript string literal.
fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_constructors_and_display() {
        assert_eq!(
            Locator::css("#submit-button").to_string(),
            "css `#submit-button`"
        );
        assert_eq!(
            Locator::xpath("//a[@class='l_c_name']").to_string(),
            "xpath `//a[@class='l_c_name']`"
        );
    }

    #[test]
    fn finder_js_escapes_quotes() {
        let js = finder_js(&Locator::css("input[name='mfid_user[email]']"));
        assert_eq!(
            js,
            r#"document.querySelector("input[name='mfid_user[email]']")"#
        );

        let js = finder_js(&Locator::xpath(r#"//a[text()="x"]"#));
        assert!(js.contains(r#""//a[text()=\"x\"]""#));
    }
}
