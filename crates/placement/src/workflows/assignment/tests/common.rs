use crate::workflows::assignment::{
    filter_all, ApplicantKey, ApplicantRecord, CourseKey, CourseRecord, Rank, Registry,
};

pub(super) fn course(id: &str, quota: i64, minimum_rank: i64, policy: i64) -> CourseRecord {
    CourseRecord {
        course_id: id.to_string(),
        quota,
        minimum_rank,
        policy,
    }
}

pub(super) fn applicant(id: &str, preferences: &[&str], scores: &[Rank]) -> ApplicantRecord {
    ApplicantRecord {
        applicant_id: id.to_string(),
        preferences: preferences.iter().map(|p| p.to_string()).collect(),
        scores: scores.to_vec(),
    }
}

/// Registry with preferences already pruned, ready for the engine.
pub(super) fn prepared(courses: Vec<CourseRecord>, applicants: Vec<ApplicantRecord>) -> Registry {
    let mut registry = Registry::build(courses, applicants, 42).expect("valid fixture");
    filter_all(&mut registry);
    registry
}

pub(super) fn key(registry: &Registry, applicant: &str) -> ApplicantKey {
    registry
        .applicant_key(applicant)
        .unwrap_or_else(|| panic!("applicant {applicant} present"))
}

pub(super) fn course_key(registry: &Registry, course: &str) -> CourseKey {
    registry
        .course_key(course)
        .unwrap_or_else(|| panic!("course {course} present"))
}

pub(super) fn assigned_id<'a>(registry: &'a Registry, applicant: &str) -> &'a str {
    let assigned = registry.applicant(key(registry, applicant)).assigned();
    registry.course(assigned).id()
}

pub(super) fn roster_ids(registry: &Registry, course: &str) -> Vec<String> {
    let mut ids: Vec<String> = registry
        .course(course_key(registry, course))
        .roster()
        .iter()
        .map(|&applicant| registry.applicant(applicant).id().to_string())
        .collect();
    ids.sort();
    ids
}

/// Every applicant sits in exactly the roster of its assigned course, and every
/// input course is within quota.
pub(super) fn assert_round_invariants(registry: &Registry) {
    for (key, applicant) in registry.applicants() {
        let holders = std::iter::once(registry.holding())
            .chain(registry.courses().map(|(_, course)| course))
            .filter(|course| course.roster().contains(&key))
            .count();
        assert_eq!(holders, 1, "{} held by {holders} rosters", applicant.id());
        assert!(registry
            .course(applicant.assigned())
            .roster()
            .contains(&key));
        assert!(applicant.cursor() <= applicant.preferences().len());
    }
    for (_, course) in registry.courses() {
        assert!(
            course.roster().len() <= course.quota(),
            "{} over quota",
            course.id()
        );
    }
}
