use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicantKey, CourseKey};
use super::overflow::remove_overflow;
use super::registry::Registry;

/// Counters for a single proposal/overflow round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round: usize,
    pub proposals: usize,
    pub rejections: usize,
}

/// Totals once the engine reaches its fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineOutcome {
    pub rounds: usize,
    pub proposals: usize,
    pub rejections: usize,
}

/// Applicant-proposing deferred acceptance over a [`Registry`].
///
/// Preferences should already have been pruned with
/// [`filter_all`](super::eligibility::filter_all).
pub struct DeferredAcceptance<'a> {
    registry: &'a mut Registry,
    round_limit: usize,
    outcome: EngineOutcome,
}

impl<'a> DeferredAcceptance<'a> {
    pub fn new(registry: &'a mut Registry) -> Self {
        let round_limit = registry.total_preferences();
        Self {
            registry,
            round_limit,
            outcome: EngineOutcome::default(),
        }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// True once no applicant in the holding course has a preference left to try.
    pub fn is_settled(&self) -> bool {
        !self
            .registry
            .holding()
            .roster()
            .iter()
            .any(|&key| self.registry.applicant(key).has_unexhausted_preferences())
    }

    /// Issue every pending proposal, then cull every over-quota course.
    pub fn run_round(&mut self) -> RoundSummary {
        let proposers: Vec<ApplicantKey> = self
            .registry
            .applicants_in(CourseKey::HOLDING)
            .into_iter()
            .filter(|&key| self.registry.applicant(key).has_unexhausted_preferences())
            .collect();

        let mut proposals = 0;
        for applicant in proposers {
            if let Some(course) = self.registry.applicant_mut(applicant).advance() {
                self.registry.assign_to(applicant, course);
                proposals += 1;
            }
        }

        let overfull: Vec<CourseKey> = self
            .registry
            .courses()
            .filter(|(_, course)| course.is_over_quota())
            .map(|(key, _)| key)
            .collect();

        let mut rejections = 0;
        for course in overfull {
            rejections += remove_overflow(self.registry, course);
        }

        self.outcome.rounds += 1;
        self.outcome.proposals += proposals;
        self.outcome.rejections += rejections;

        let summary = RoundSummary {
            round: self.outcome.rounds,
            proposals,
            rejections,
        };
        debug!(
            round = summary.round,
            proposals, rejections, "placement round complete"
        );
        summary
    }

    /// Run rounds until settled.
    pub fn run(mut self) -> EngineOutcome {
        while !self.is_settled() {
            if self.outcome.rounds >= self.round_limit {
                warn!(
                    rounds = self.outcome.rounds,
                    limit = self.round_limit,
                    "round limit reached before settling"
                );
                break;
            }
            self.run_round();
        }

        info!(
            rounds = self.outcome.rounds,
            proposals = self.outcome.proposals,
            rejections = self.outcome.rejections,
            unplaced = self.registry.holding().roster().len(),
            "placement settled"
        );
        self.outcome
    }
}
