//! Request and response schemas for the public API

pub mod availability;
pub mod blocked_day;
pub mod checkout;
pub mod hold;
pub mod pricing;
pub mod quote;
pub mod room;
