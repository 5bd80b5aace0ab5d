use tracing::debug;

use super::domain::{ApplicantKey, CourseKey};
use super::registry::Registry;

/// Drop every preference whose minimum rank the applicant does not reach.
/// Returns how many preferences were removed.
pub fn remove_impossible_preferences(registry: &mut Registry, applicant: ApplicantKey) -> usize {
    let retained: Vec<CourseKey> = registry
        .applicant(applicant)
        .preferences()
        .iter()
        .copied()
        .filter(|&course| registry.course(course).minimum_rank() <= registry.rank(applicant, course))
        .collect();

    let state = registry.applicant_mut(applicant);
    let removed = state.preferences.len() - retained.len();
    state.preferences = retained;
    removed
}

/// Apply [`remove_impossible_preferences`] once to every applicant.
pub fn filter_all(registry: &mut Registry) -> usize {
    let keys: Vec<ApplicantKey> = registry.applicant_keys().collect();
    let removed: usize = keys
        .into_iter()
        .map(|applicant| remove_impossible_preferences(registry, applicant))
        .sum();

    debug!(removed, "pruned preferences below course minimum rank");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assignment::{ApplicantRecord, CourseRecord};

    #[test]
    fn prunes_courses_above_applicant_rank() {
        let mut registry = Registry::build(
            vec![
                CourseRecord {
                    course_id: "OPEN".to_string(),
                    quota: 1,
                    minimum_rank: 0,
                    policy: 0,
                },
                CourseRecord {
                    course_id: "STRICT".to_string(),
                    quota: 1,
                    minimum_rank: 50,
                    policy: 1,
                },
            ],
            vec![ApplicantRecord {
                applicant_id: "A1".to_string(),
                preferences: vec!["STRICT".to_string(), "OPEN".to_string()],
                scores: vec![20, 40],
            }],
            3,
        )
        .expect("valid input");
        let a1 = registry.applicant_key("A1").expect("A1");

        let removed = remove_impossible_preferences(&mut registry, a1);

        assert_eq!(removed, 1);
        let open = registry.course_key("OPEN").expect("OPEN");
        assert_eq!(registry.applicant(a1).preferences(), &[open]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut registry = Registry::build(
            vec![CourseRecord {
                course_id: "EDGE".to_string(),
                quota: 1,
                minimum_rank: 40,
                policy: 0,
            }],
            vec![ApplicantRecord {
                applicant_id: "A1".to_string(),
                preferences: vec!["EDGE".to_string()],
                scores: vec![40],
            }],
            3,
        )
        .expect("valid input");

        assert_eq!(filter_all(&mut registry), 0);
    }
}
