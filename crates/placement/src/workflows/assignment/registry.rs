use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::domain::{
    Applicant, ApplicantKey, ApplicantRecord, Course, CourseKey, CourseRecord, Rank,
    HOLDING_COURSE_ID,
};
use super::policy::{draw_seed, RankPolicy};

/// Input consistency failures detected before any matching takes place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("course '{0}' is defined more than once")]
    DuplicateCourse(String),
    #[error("applicant '{0}' is defined more than once")]
    DuplicateApplicant(String),
    #[error("course id 'NONE' is reserved for unplaced applicants")]
    ReservedCourseId,
    #[error("course '{course}' has invalid quota {quota}; quotas must be positive")]
    InvalidQuota { course: String, quota: i64 },
    #[error("course '{course}' has negative minimum rank {minimum_rank}")]
    InvalidMinimumRank { course: String, minimum_rank: i64 },
    #[error("course '{course}' has unknown rank policy {code}; expected 0-5")]
    InvalidPolicy { course: String, code: i64 },
    #[error("applicant '{applicant}' has an empty rank set")]
    EmptyScoreSet { applicant: String },
    #[error("applicant '{applicant}' lists unknown course '{course}'")]
    UnknownCourse { applicant: String, course: String },
}

/// Arena owning every applicant and course of a run. Relations between the two are
/// expressed through [`ApplicantKey`] and [`CourseKey`] only.
#[derive(Debug, Clone)]
pub struct Registry {
    applicants: Vec<Applicant>,
    courses: Vec<Course>,
    applicant_index: HashMap<String, ApplicantKey>,
    course_index: HashMap<String, CourseKey>,
    seed: u64,
}

impl Registry {
    /// Validate the records and place every applicant in the holding course.
    pub fn build(
        courses: Vec<CourseRecord>,
        applicants: Vec<ApplicantRecord>,
        seed: u64,
    ) -> Result<Self, AssignmentError> {
        let mut course_index = HashMap::with_capacity(courses.len());
        let mut course_arena = Vec::with_capacity(courses.len() + 1);
        course_arena.push(Course::holding(applicants.len()));

        for record in courses {
            let course = validate_course(record)?;
            let key = CourseKey(course_arena.len());
            if course_index.insert(course.id.clone(), key).is_some() {
                return Err(AssignmentError::DuplicateCourse(course.id));
            }
            course_arena.push(course);
        }

        let mut applicant_index = HashMap::with_capacity(applicants.len());
        let mut applicant_arena = Vec::with_capacity(applicants.len());

        for record in applicants {
            let ApplicantRecord {
                applicant_id,
                preferences,
                scores,
            } = record;

            if scores.is_empty() {
                return Err(AssignmentError::EmptyScoreSet {
                    applicant: applicant_id,
                });
            }

            let preferences = preferences
                .into_iter()
                .map(|course| match course_index.get(&course) {
                    Some(key) => Ok(*key),
                    None => Err(AssignmentError::UnknownCourse {
                        applicant: applicant_id.clone(),
                        course,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            let key = ApplicantKey(applicant_arena.len());
            if applicant_index.insert(applicant_id.clone(), key).is_some() {
                return Err(AssignmentError::DuplicateApplicant(applicant_id));
            }

            course_arena[CourseKey::HOLDING.0].roster.insert(key);
            applicant_arena.push(Applicant {
                id: applicant_id,
                preferences,
                scores,
                assigned: CourseKey::HOLDING,
                cursor: 0,
                unstable_courses: Vec::new(),
            });
        }

        debug!(
            courses = course_arena.len() - 1,
            applicants = applicant_arena.len(),
            seed,
            "registry initialised"
        );

        Ok(Self {
            applicants: applicant_arena,
            courses: course_arena,
            applicant_index,
            course_index,
            seed,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Panics if `key` was not issued by this registry.
    pub fn applicant(&self, key: ApplicantKey) -> &Applicant {
        &self.applicants[key.0]
    }

    /// Panics if `key` was not issued by this registry.
    pub fn course(&self, key: CourseKey) -> &Course {
        &self.courses[key.0]
    }

    pub fn holding(&self) -> &Course {
        self.course(CourseKey::HOLDING)
    }

    pub fn applicant_key(&self, id: &str) -> Option<ApplicantKey> {
        self.applicant_index.get(id).copied()
    }

    pub fn course_key(&self, id: &str) -> Option<CourseKey> {
        if id == HOLDING_COURSE_ID {
            return Some(CourseKey::HOLDING);
        }
        self.course_index.get(id).copied()
    }

    /// Applicants in input order.
    pub fn applicants(&self) -> impl Iterator<Item = (ApplicantKey, &Applicant)> + '_ {
        self.applicants
            .iter()
            .enumerate()
            .map(|(index, applicant)| (ApplicantKey(index), applicant))
    }

    /// Input courses in input order, excluding the holding course.
    pub fn courses(&self) -> impl Iterator<Item = (CourseKey, &Course)> + '_ {
        self.courses
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, course)| (CourseKey(index), course))
    }

    pub fn applicant_count(&self) -> usize {
        self.applicants.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len() - 1
    }

    /// Sum of every applicant's preference-list length.
    pub fn total_preferences(&self) -> usize {
        self.applicants
            .iter()
            .map(|applicant| applicant.preferences.len())
            .sum()
    }

    /// Move `applicant` into `course`, leaving whatever roster held it before.
    pub fn assign_to(&mut self, applicant: ApplicantKey, course: CourseKey) {
        let previous = self.applicants[applicant.0].assigned;
        if previous == course {
            return;
        }
        self.courses[previous.0].roster.remove(&applicant);
        self.courses[course.0].roster.insert(applicant);
        self.applicants[applicant.0].assigned = course;
    }

    /// Rank of `applicant` as judged by `course`'s policy.
    pub fn rank(&self, applicant: ApplicantKey, course: CourseKey) -> Rank {
        let applicant = self.applicant(applicant);
        let course = self.course(course);
        course
            .policy
            .reduce(&applicant.scores, || {
                draw_seed(self.seed, &applicant.id, &course.id)
            })
            .unwrap_or(Rank::MAX)
    }

    pub(crate) fn applicant_mut(&mut self, key: ApplicantKey) -> &mut Applicant {
        &mut self.applicants[key.0]
    }

    pub(crate) fn applicant_keys(&self) -> impl Iterator<Item = ApplicantKey> {
        (0..self.applicants.len()).map(ApplicantKey)
    }

    pub(crate) fn applicants_in(&self, course: CourseKey) -> BTreeSet<ApplicantKey> {
        self.course(course).roster.clone()
    }
}

fn validate_course(record: CourseRecord) -> Result<Course, AssignmentError> {
    let CourseRecord {
        course_id,
        quota,
        minimum_rank,
        policy,
    } = record;

    if course_id == HOLDING_COURSE_ID {
        return Err(AssignmentError::ReservedCourseId);
    }

    let quota = match usize::try_from(quota) {
        Ok(quota) if quota > 0 => quota,
        _ => {
            return Err(AssignmentError::InvalidQuota {
                course: course_id,
                quota,
            })
        }
    };

    if minimum_rank < 0 {
        return Err(AssignmentError::InvalidMinimumRank {
            course: course_id,
            minimum_rank,
        });
    }

    let policy = RankPolicy::try_from(policy).map_err(|code| AssignmentError::InvalidPolicy {
        course: course_id.clone(),
        code,
    })?;

    Ok(Course {
        id: course_id,
        quota,
        minimum_rank,
        policy,
        roster: BTreeSet::new(),
    })
}
