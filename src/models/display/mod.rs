//! Display model implementations for table and JSON output
//!
//! Display models transform domain types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod service;
mod team;

pub use common::{or_dash, truncate_string};
pub use service::ServiceDisplay;
pub use team::{CleanupDisplay, MemberDisplay, TeamDisplay};
