use serde::Serialize;
use tracing::info;

use super::audit::{StabilityAudit, StabilityReport};
use super::domain::{ApplicantRecord, CourseRecord};
use super::eligibility::filter_all;
use super::engine::{DeferredAcceptance, EngineOutcome};
use super::export::{write_assignments_to_path, ExportError};
use super::registry::{AssignmentError, Registry};
use crate::config::RunConfig;
use crate::workflows::intake::{ApplicantIntake, CourseIntake, IntakeError};

/// Switches for an in-memory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub check_stability: bool,
    pub seed: Option<u64>,
}

/// Summary of a completed run, suitable for printing or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentReport {
    pub applicants: usize,
    pub courses: usize,
    pub placed: usize,
    pub unplaced: usize,
    pub pruned_preferences: usize,
    pub rounds: usize,
    pub proposals: usize,
    pub rejections: usize,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityReport>,
}

impl AssignmentReport {
    pub fn unstable_cases(&self) -> Option<usize> {
        self.stability.as_ref().map(StabilityReport::count)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssignmentRunError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Assignment(#[from] AssignmentError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Composes intake, eligibility filtering, the engine, the audit and export.
pub struct AssignmentRun;

impl AssignmentRun {
    /// Read both CSV inputs, place applicants and write the assignment table.
    pub fn execute(config: &RunConfig) -> Result<AssignmentReport, AssignmentRunError> {
        let courses = CourseIntake::from_path(&config.courses_csv)?;
        let applicants = ApplicantIntake::from_path(&config.applicants_csv)?;

        let options = RunOptions {
            check_stability: config.check_stability,
            seed: config.seed,
        };
        let (registry, report) = Self::from_records(courses, applicants, options)?;

        info!(path = %config.output_csv.display(), "writing assignments");
        write_assignments_to_path(&registry, &config.output_csv)?;
        Ok(report)
    }

    /// Run the whole pipeline on in-memory records. Every validation failure is
    /// reported before the first proposal is made.
    pub fn from_records(
        courses: Vec<CourseRecord>,
        applicants: Vec<ApplicantRecord>,
        options: RunOptions,
    ) -> Result<(Registry, AssignmentReport), AssignmentError> {
        let seed = options.seed.unwrap_or_else(rand::random);
        let mut registry = Registry::build(courses, applicants, seed)?;

        let pruned_preferences = filter_all(&mut registry);
        let outcome: EngineOutcome = DeferredAcceptance::new(&mut registry).run();

        let stability = options
            .check_stability
            .then(|| StabilityAudit::run(&mut registry));

        let unplaced = registry.holding().roster().len();
        let report = AssignmentReport {
            applicants: registry.applicant_count(),
            courses: registry.course_count(),
            placed: registry.applicant_count() - unplaced,
            unplaced,
            pruned_preferences,
            rounds: outcome.rounds,
            proposals: outcome.proposals,
            rejections: outcome.rejections,
            seed: registry.seed(),
            stability,
        };

        Ok((registry, report))
    }
}
