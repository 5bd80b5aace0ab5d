use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::policy::RankPolicy;

/// Identifier reserved for the synthetic course that holds unplaced applicants.
pub const HOLDING_COURSE_ID: &str = "NONE";

/// Comparable competitiveness number. Lower values are more competitive.
pub type Rank = i64;

/// Arena index of an applicant inside a [`Registry`](super::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplicantKey(pub(crate) usize);

/// Arena index of a course inside a [`Registry`](super::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseKey(pub(crate) usize);

impl CourseKey {
    /// The holding course always occupies the first arena slot.
    pub const HOLDING: CourseKey = CourseKey(0);

    pub fn is_holding(self) -> bool {
        self == Self::HOLDING
    }
}

/// Course row as supplied by intake, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course_id: String,
    pub quota: i64,
    pub minimum_rank: i64,
    pub policy: i64,
}

/// Applicant row as supplied by intake, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub applicant_id: String,
    pub preferences: Vec<String>,
    pub scores: Vec<Rank>,
}

/// Applicant state tracked across placement rounds.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub(crate) id: String,
    pub(crate) preferences: Vec<CourseKey>,
    pub(crate) scores: Vec<Rank>,
    pub(crate) assigned: CourseKey,
    pub(crate) cursor: usize,
    pub(crate) unstable_courses: Vec<CourseKey>,
}

impl Applicant {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Preference list, most preferred first.
    pub fn preferences(&self) -> &[CourseKey] {
        &self.preferences
    }

    pub fn scores(&self) -> &[Rank] {
        &self.scores
    }

    pub fn assigned(&self) -> CourseKey {
        self.assigned
    }

    /// Index of the next preference to propose to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn unstable_courses(&self) -> &[CourseKey] {
        &self.unstable_courses
    }

    pub fn has_unexhausted_preferences(&self) -> bool {
        self.cursor < self.preferences.len()
    }

    /// Returns the next course to propose to and moves the cursor past it.
    pub(crate) fn advance(&mut self) -> Option<CourseKey> {
        let next = self.preferences.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(next)
    }
}

/// Course state: admission rules plus the applicants currently holding a seat offer.
#[derive(Debug, Clone)]
pub struct Course {
    pub(crate) id: String,
    pub(crate) quota: usize,
    pub(crate) minimum_rank: Rank,
    pub(crate) policy: RankPolicy,
    pub(crate) roster: BTreeSet<ApplicantKey>,
}

impl Course {
    pub(crate) fn holding(capacity: usize) -> Self {
        Self {
            id: HOLDING_COURSE_ID.to_string(),
            quota: capacity,
            minimum_rank: 0,
            policy: RankPolicy::Minimum,
            roster: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn minimum_rank(&self) -> Rank {
        self.minimum_rank
    }

    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    pub fn roster(&self) -> &BTreeSet<ApplicantKey> {
        &self.roster
    }

    pub fn is_over_quota(&self) -> bool {
        self.roster.len() > self.quota
    }
}
