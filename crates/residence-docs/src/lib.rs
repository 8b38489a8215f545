//! Decision tables and resolver for residence-period renewal applications.
//!
//! The rule data is hand-authored and compiled into the process: a student's
//! status and situational scenario select the base document list, and optional
//! scholarship selectors append further requirements. The [`renewal`] module
//! owns the tables and the resolution logic; [`config`], [`telemetry`], and
//! [`error`] carry the service plumbing.

pub mod config;
pub mod error;
pub mod renewal;
pub mod telemetry;
