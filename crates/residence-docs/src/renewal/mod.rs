//! Residence-period renewal rules: who needs which documents.
//!
//! [`RenewalRulebook`] holds the authored tables and is built once at process
//! start; [`RenewalRulebook::requirements`] resolves a query against them.

pub mod domain;
mod resolver;
mod rulebook;

pub use domain::{
    RequirementsError, RulebookError, Scenario, ScholarshipCategory, ScholarshipStatus,
    StudentStatus,
};
pub use resolver::RequirementsQuery;
pub use rulebook::{RenewalRulebook, ScenarioOptionGroup};
