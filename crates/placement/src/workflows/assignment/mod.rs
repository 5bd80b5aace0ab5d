//! Applicant-proposing deferred acceptance over quota-bound courses.
//!
//! A run builds a [`Registry`], prunes ineligible preferences once, drives
//! [`DeferredAcceptance`] to its fixed point and optionally audits the result
//! with [`StabilityAudit`].

pub mod audit;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod export;
pub mod overflow;
pub mod policy;
pub mod registry;
pub mod service;

#[cfg(test)]
mod tests;

pub use audit::{StabilityAudit, StabilityReport, StabilityViolation};
pub use domain::{
    Applicant, ApplicantKey, ApplicantRecord, Course, CourseKey, CourseRecord, Rank,
    HOLDING_COURSE_ID,
};
pub use eligibility::{filter_all, remove_impossible_preferences};
pub use engine::{DeferredAcceptance, EngineOutcome, RoundSummary};
pub use export::{write_assignments, write_assignments_to_path, ExportError};
pub use overflow::remove_overflow;
pub use policy::RankPolicy;
pub use registry::{AssignmentError, Registry};
pub use service::{AssignmentReport, AssignmentRun, AssignmentRunError, RunOptions};
