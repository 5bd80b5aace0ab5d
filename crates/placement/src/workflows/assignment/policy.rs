use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::domain::Rank;

/// Strategy reducing an applicant's score set to the single rank a course compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPolicy {
    /// Best (lowest) score across all attempts.
    Minimum,
    /// Worst (highest) score across all attempts.
    Maximum,
    /// Earliest attempt.
    First,
    /// Most recent attempt.
    Last,
    /// One attempt drawn at random, reproducible from the run seed.
    Random,
    /// Integer mean, truncated toward zero.
    Mean,
}

impl RankPolicy {
    pub const ALL: [RankPolicy; 6] = [
        RankPolicy::Minimum,
        RankPolicy::Maximum,
        RankPolicy::First,
        RankPolicy::Last,
        RankPolicy::Random,
        RankPolicy::Mean,
    ];

    pub fn code(self) -> i64 {
        match self {
            RankPolicy::Minimum => 0,
            RankPolicy::Maximum => 1,
            RankPolicy::First => 2,
            RankPolicy::Last => 3,
            RankPolicy::Random => 4,
            RankPolicy::Mean => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankPolicy::Minimum => "minimum",
            RankPolicy::Maximum => "maximum",
            RankPolicy::First => "first attempt",
            RankPolicy::Last => "last attempt",
            RankPolicy::Random => "random attempt",
            RankPolicy::Mean => "mean",
        }
    }

    /// Reduce `scores` to one rank. `draw_seed` is only consulted by
    /// [`RankPolicy::Random`]. Returns `None` for an empty score set.
    pub fn reduce<F>(self, scores: &[Rank], draw_seed: F) -> Option<Rank>
    where
        F: FnOnce() -> u64,
    {
        if scores.is_empty() {
            return None;
        }

        let rank = match self {
            RankPolicy::Minimum => *scores.iter().min()?,
            RankPolicy::Maximum => *scores.iter().max()?,
            RankPolicy::First => *scores.first()?,
            RankPolicy::Last => *scores.last()?,
            RankPolicy::Random => {
                let mut rng = StdRng::seed_from_u64(draw_seed());
                scores[rng.random_range(0..scores.len())]
            }
            RankPolicy::Mean => {
                let sum: i128 = scores.iter().map(|&score| i128::from(score)).sum();
                (sum / scores.len() as i128) as Rank
            }
        };

        Some(rank)
    }
}

impl TryFrom<i64> for RankPolicy {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        RankPolicy::ALL
            .into_iter()
            .find(|policy| policy.code() == code)
            .ok_or(code)
    }
}

impl fmt::Display for RankPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-pair seed for [`RankPolicy::Random`] draws (FNV-1a over both IDs, keyed by the run seed).
///
/// Every evaluation of the same applicant/course pair within a run sees the same draw,
/// so eligibility, overflow culling and the stability audit agree with one another.
pub(crate) fn draw_seed(run_seed: u64, applicant_id: &str, course_id: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS ^ run_seed;
    let separator = std::iter::once(0xff_u8);
    for byte in applicant_id
        .bytes()
        .chain(separator)
        .chain(course_id.bytes())
    {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
