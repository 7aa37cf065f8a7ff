//! Display models for CLI output
//!
//! Converts domain types into CLI-friendly display rows.

pub mod display;

pub use display::{CleanupDisplay, MemberDisplay, ServiceDisplay, TeamDisplay};
