use super::domain::{ApplicantKey, CourseKey, Rank};
use super::registry::Registry;

/// Return the least competitive applicants of an over-quota course to the holding
/// course. Ties in rank are broken by applicant ID so culling is reproducible.
/// Returns the number of applicants culled.
pub fn remove_overflow(registry: &mut Registry, course: CourseKey) -> usize {
    if course.is_holding() || !registry.course(course).is_over_quota() {
        return 0;
    }

    let quota = registry.course(course).quota();
    let mut ranked: Vec<(Rank, ApplicantKey)> = registry
        .course(course)
        .roster()
        .iter()
        .map(|&applicant| (registry.rank(applicant, course), applicant))
        .collect();

    ranked.sort_by(|(left_rank, left), (right_rank, right)| {
        left_rank.cmp(right_rank).then_with(|| {
            registry
                .applicant(*left)
                .id()
                .cmp(registry.applicant(*right).id())
        })
    });

    let culled = ranked.split_off(quota);
    for &(_, applicant) in &culled {
        registry.assign_to(applicant, CourseKey::HOLDING);
    }
    culled.len()
}
