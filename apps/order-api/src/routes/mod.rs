//! HTTP route handlers, grouped by concern.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod system;
