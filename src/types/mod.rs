//! Type definitions for the ESP API.

pub mod common;
pub mod domains;
pub mod emails;
pub mod ips;
pub mod messages;
pub mod stats;
pub mod subaccounts;
pub mod webhooks;
