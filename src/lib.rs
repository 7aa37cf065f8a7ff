//! OpsTeam - team and service lifecycle management for operations platforms
//!
//! The library reconciles a declared team (attributes plus membership) with
//! the remote platform, rolling back half-created teams and optionally
//! cleaning up the defaults the platform creates alongside them.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod service;
pub mod team;

pub use error::{Error, Result};
