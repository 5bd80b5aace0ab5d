use super::common::*;
use crate::workflows::assignment::{
    AssignmentRun, DeferredAcceptance, EngineOutcome, RoundSummary, RunOptions,
    HOLDING_COURSE_ID,
};

#[test]
fn stronger_applicant_keeps_the_only_seat() {
    let mut registry = prepared(
        vec![course("C1", 1, 0, 0)],
        vec![applicant("A10", &["C1"], &[10]), applicant("A20", &["C1"], &[20])],
    );

    let outcome = DeferredAcceptance::new(&mut registry).run();

    assert_eq!(assigned_id(&registry, "A10"), "C1");
    assert_eq!(assigned_id(&registry, "A20"), HOLDING_COURSE_ID);
    let loser = registry.applicant(key(&registry, "A20"));
    assert_eq!(loser.cursor(), loser.preferences().len());
    assert_eq!(
        outcome,
        EngineOutcome {
            rounds: 1,
            proposals: 2,
            rejections: 1,
        }
    );
}

#[test]
fn ineligible_course_is_pruned_and_applicant_stays_unplaced() {
    let mut registry = prepared(
        vec![course("C1", 5, 100, 0)],
        vec![applicant("A1", &["C1"], &[60])],
    );

    assert!(registry
        .applicant(key(&registry, "A1"))
        .preferences()
        .is_empty());

    let outcome = DeferredAcceptance::new(&mut registry).run();
    assert_eq!(outcome.rounds, 0);
    assert_eq!(assigned_id(&registry, "A1"), HOLDING_COURSE_ID);
}

#[test]
fn rejected_applicants_fall_through_to_next_preference() {
    let mut registry = prepared(
        vec![course("A", 1, 0, 0), course("B", 1, 0, 0)],
        vec![
            applicant("P5", &["A", "B"], &[5]),
            applicant("P10", &["A", "B"], &[10]),
            applicant("P15", &["A", "B"], &[15]),
        ],
    );

    let mut engine = DeferredAcceptance::new(&mut registry);
    let first = engine.run_round();
    assert_eq!(
        first,
        RoundSummary {
            round: 1,
            proposals: 3,
            rejections: 2,
        }
    );
    assert_eq!(roster_ids(engine.registry(), "A"), vec!["P5"]);
    assert!(!engine.is_settled());

    let second = engine.run_round();
    assert_eq!(second.proposals, 2);
    assert_eq!(second.rejections, 1);
    assert!(engine.is_settled());
    let outcome = engine.run();
    assert_eq!(outcome.rounds, 2);

    assert_eq!(roster_ids(&registry, "A"), vec!["P5"]);
    assert_eq!(roster_ids(&registry, "B"), vec!["P10"]);
    assert_eq!(assigned_id(&registry, "P15"), HOLDING_COURSE_ID);
    assert_round_invariants(&registry);
}

#[test]
fn seated_applicant_is_displaced_by_later_stronger_proposal() {
    let mut registry = prepared(
        vec![course("X", 1, 0, 0), course("Y", 1, 0, 0)],
        vec![
            applicant("P", &["X"], &[20]),
            applicant("Q", &["Y", "X"], &[5]),
            applicant("S", &["Y"], &[1]),
        ],
    );

    let mut engine = DeferredAcceptance::new(&mut registry);
    engine.run_round();
    assert_eq!(roster_ids(engine.registry(), "X"), vec!["P"]);
    assert_eq!(roster_ids(engine.registry(), "Y"), vec!["S"]);

    let outcome = engine.run();
    assert_eq!(outcome.rounds, 2);
    assert_eq!(outcome.proposals, 4);
    assert_eq!(outcome.rejections, 2);
    assert_eq!(assigned_id(&registry, "Q"), "X");
    assert_eq!(assigned_id(&registry, "P"), HOLDING_COURSE_ID);
}

#[test]
fn course_policy_decides_which_score_competes() {
    // Under the maximum policy B's worst attempt (30) loses to A's single 25.
    let mut registry = prepared(
        vec![course("C1", 1, 0, 1)],
        vec![
            applicant("A", &["C1"], &[25]),
            applicant("B", &["C1"], &[1, 30]),
        ],
    );
    DeferredAcceptance::new(&mut registry).run();
    assert_eq!(roster_ids(&registry, "C1"), vec!["A"]);

    let mut registry = prepared(
        vec![course("C1", 1, 0, 0)],
        vec![
            applicant("A", &["C1"], &[25]),
            applicant("B", &["C1"], &[1, 30]),
        ],
    );
    DeferredAcceptance::new(&mut registry).run();
    assert_eq!(roster_ids(&registry, "C1"), vec!["B"]);
}

#[test]
fn random_policy_is_reproducible_for_a_seed() {
    let courses = || {
        vec![
            course("R1", 2, 0, 4),
            course("R2", 2, 0, 4),
            course("R3", 1, 0, 4),
        ]
    };
    let applicants = || {
        (0..9)
            .map(|index| {
                applicant(
                    &format!("A{index}"),
                    &["R1", "R2", "R3"],
                    &[index * 7 % 11, index * 5 % 13, index * 3 % 17],
                )
            })
            .collect::<Vec<_>>()
    };
    let options = RunOptions {
        check_stability: true,
        seed: Some(99),
    };

    let (first, first_report) =
        AssignmentRun::from_records(courses(), applicants(), options).expect("run");
    let (second, second_report) =
        AssignmentRun::from_records(courses(), applicants(), options).expect("run");

    assert_eq!(first_report, second_report);
    for (key, applicant) in first.applicants() {
        assert_eq!(applicant.assigned(), second.applicant(key).assigned());
    }
    assert_eq!(first_report.unstable_cases(), Some(0));
}
