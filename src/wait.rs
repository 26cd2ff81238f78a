//! Readiness synchronization against the asynchronously rendered form.
//!
//! Every state transition that depends on the page re-rendering goes
//! through [`await_element`]; the only fixed sleep in the crate is the
//! dropdown animation allowance below, which is never a correctness
//! synchronization point.

use std::time::Duration;

use crate::error::FormError;
use crate::infrastructure::dom::{Dom, Locator};

/// Default ceiling for a presence wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How often a pending wait re-checks the document.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Fixed allowance for dropdown open/close animations.
pub const DROPDOWN_ANIMATION_PAUSE: Duration = Duration::from_secs(1);

/// Blocks until `locator` is present in the document, or fails with
/// [`FormError::ElementTimeout`] once `timeout` elapses.
pub async fn await_element<D: Dom + ?Sized>(
    dom: &D,
    locator: &Locator,
    timeout: Duration,
) -> Result<(), FormError> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if dom.is_present(locator).await? {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(FormError::ElementTimeout {
                locator: locator.clone(),
                timeout_secs: timeout.as_secs(),
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Sleeps out a dropdown animation.
pub async fn dropdown_pause() {
    tokio::time::sleep(DROPDOWN_ANIMATION_PAUSE).await;
}
