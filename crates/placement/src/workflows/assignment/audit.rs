use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{ApplicantKey, CourseKey, Rank};
use super::registry::Registry;

/// An applicant who outranks the weakest admitted applicant of a course they
/// preferred over their own placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StabilityViolation {
    pub applicant_id: String,
    pub course_id: String,
    pub applicant_rank: Rank,
    pub worst_admitted_rank: Rank,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StabilityReport {
    pub violations: Vec<StabilityViolation>,
}

impl StabilityReport {
    pub fn count(&self) -> usize {
        self.violations.len()
    }

    pub fn is_stable(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Post-pass over a settled registry. Only the applicants' unstable-course
/// annotations are written; assignments, cursors and rosters are untouched.
pub struct StabilityAudit;

impl StabilityAudit {
    /// Annotate every applicant with the courses on which they are unstable,
    /// replacing the annotations of any earlier audit.
    pub fn run(registry: &mut Registry) -> StabilityReport {
        let findings = Self::inspect(registry);

        let keys: Vec<ApplicantKey> = registry.applicant_keys().collect();
        for key in keys {
            registry.applicant_mut(key).unstable_courses.clear();
        }

        let mut report = StabilityReport::default();
        for finding in findings {
            registry
                .applicant_mut(finding.applicant)
                .unstable_courses
                .push(finding.course);
            report.violations.push(StabilityViolation {
                applicant_id: registry.applicant(finding.applicant).id().to_string(),
                course_id: registry.course(finding.course).id().to_string(),
                applicant_rank: finding.applicant_rank,
                worst_admitted_rank: finding.worst_admitted_rank,
            });
        }

        if report.is_stable() {
            info!("assignment is stable");
        } else {
            warn!(unstable_cases = report.count(), "unstable assignments detected");
        }
        report
    }

    fn inspect(registry: &Registry) -> Vec<Finding> {
        let mut worst_admitted: HashMap<CourseKey, Option<Rank>> = HashMap::new();
        let mut findings = Vec::new();

        for (applicant_key, applicant) in registry.applicants() {
            let more_preferred = &applicant.preferences()[..applicant.cursor()];
            let mut seen = BTreeSet::new();
            for &course in more_preferred {
                if course == applicant.assigned() || !seen.insert(course) {
                    continue;
                }

                let worst = *worst_admitted.entry(course).or_insert_with(|| {
                    registry
                        .course(course)
                        .roster()
                        .iter()
                        .map(|&admitted| registry.rank(admitted, course))
                        .max()
                });
                let Some(worst) = worst else {
                    continue;
                };

                let rank = registry.rank(applicant_key, course);
                if rank < worst {
                    findings.push(Finding {
                        applicant: applicant_key,
                        course,
                        applicant_rank: rank,
                        worst_admitted_rank: worst,
                    });
                }
            }
        }

        findings
    }
}

struct Finding {
    applicant: ApplicantKey,
    course: CourseKey,
    applicant_rank: Rank,
    worst_admitted_rank: Rank,
}
