//! Fixed two-step credential submission at the sign-in page.

use tracing::info;

use crate::error::FormError;
use crate::infrastructure::dom::{Dom, Locator};
use crate::wait::{await_element, DEFAULT_TIMEOUT};

const EMAIL_FIELD: &str = "input[name='mfid_user[email]']";
const PASSWORD_FIELD: &str = "input[name='mfid_user[password]']";

/// Signs in with the configured credentials. On return the session is
/// authenticated; the caller decides where to navigate next.
pub async fn sign_in<D: Dom>(
    dom: &D,
    signin_url: &str,
    user: &str,
    password: &str,
) -> Result<(), FormError> {
    info!("signing in at {signin_url}");
    dom.navigate(signin_url).await?;

    let email = Locator::css(EMAIL_FIELD);
    await_element(dom, &email, DEFAULT_TIMEOUT).await?;
    dom.fill(&email, user).await?;
    dom.submit_form(&email).await?;

    // The password step renders only after the email form round-trips.
    let password_field = Locator::css(PASSWORD_FIELD);
    await_element(dom, &password_field, DEFAULT_TIMEOUT).await?;
    dom.fill(&password_field, password).await?;
    dom.submit_form(&password_field).await?;

    info!("credentials submitted");
    Ok(())
}
