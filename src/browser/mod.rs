//! Browser session management.

mod session;

pub use session::FormSession;
