use super::GeneratorError;

/// Shape of a synthetic placement dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub courses: usize,
    pub applicants: usize,
    pub min_preferences: usize,
    pub max_preferences: usize,
    pub quota_min: u32,
    pub quota_max: u32,
    /// Mean applicant rank as a fraction of `highest_rank`.
    pub rank_mean: f64,
    /// Mean course minimum rank as a fraction of `highest_rank`.
    pub course_rank_mean: f64,
    pub highest_rank: u32,
    /// Upper bound on the number of scores per applicant.
    pub max_attempts: usize,
    /// `None` draws a fresh seed.
    pub seed: Option<u64>,
}

/// Identifiers are six digits wide.
pub(crate) const ID_SPACE: usize = 900_000;

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            courses: 500,
            applicants: 10_000,
            min_preferences: 1,
            max_preferences: 6,
            quota_min: 1,
            quota_max: 200,
            rank_mean: 0.75,
            course_rank_mean: 0.7,
            highest_rank: 9950,
            max_attempts: 3,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_counts(mut self, courses: usize, applicants: usize) -> Self {
        self.courses = courses;
        self.applicants = applicants;
        self
    }

    pub fn with_preference_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_preferences = min;
        self.max_preferences = max;
        self
    }

    pub fn with_quota_bounds(mut self, min: u32, max: u32) -> Self {
        self.quota_min = min;
        self.quota_max = max;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.courses == 0 {
            return Err(GeneratorError::ZeroCount { field: "courses" });
        }
        if self.applicants == 0 {
            return Err(GeneratorError::ZeroCount { field: "applicants" });
        }
        if self.max_attempts == 0 {
            return Err(GeneratorError::ZeroCount {
                field: "study attempts",
            });
        }
        if self.quota_min == 0 {
            return Err(GeneratorError::ZeroCount {
                field: "minimum quota",
            });
        }
        if self.courses > ID_SPACE || self.applicants > ID_SPACE {
            return Err(GeneratorError::IdSpaceExhausted {
                requested: self.courses.max(self.applicants),
                available: ID_SPACE,
            });
        }
        if self.min_preferences > self.max_preferences {
            return Err(GeneratorError::InvertedBounds {
                field: "preferences",
                min: self.min_preferences as u64,
                max: self.max_preferences as u64,
            });
        }
        if self.quota_min > self.quota_max {
            return Err(GeneratorError::InvertedBounds {
                field: "quota",
                min: u64::from(self.quota_min),
                max: u64::from(self.quota_max),
            });
        }
        if self.max_preferences > self.courses {
            return Err(GeneratorError::TooManyPreferences {
                max_preferences: self.max_preferences,
                courses: self.courses,
            });
        }
        for (field, value) in [
            ("rank mean", self.rank_mean),
            ("course rank mean", self.course_rank_mean),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneratorError::FractionOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
