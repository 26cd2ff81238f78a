//! Infrastructure layer: owns the scarce browser resource, exposes
//! capabilities only.

pub mod dom;

pub use dom::{Dom, Locator, PageDom};
