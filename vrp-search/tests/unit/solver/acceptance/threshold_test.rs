use super::*;
use crate::construction::heuristics::InsertionContext;
use crate::helpers::construction::create_test_environment_with_seed;
use crate::helpers::solver::*;
use crate::solver::GreedyAcceptance;
use crate::solver::search::{Recreate, RecreateWithCheapest};

fn create_refinement_ctx_with_candidates() -> (RefinementContext, InsertionContext, InsertionContext) {
    let problem = create_default_line_problem();
    let environment = create_test_environment_with_seed(0);
    let mut refinement_ctx = create_test_refinement_ctx(problem.clone(), environment.clone());

    let unsolved = InsertionContext::new(problem, environment);
    let solved = RecreateWithCheapest::default().run(&refinement_ctx, unsolved.deep_copy());
    refinement_ctx.memory.add(solved.deep_copy());

    (refinement_ctx, solved, unsolved)
}

#[test]
fn cannot_create_acceptance_with_invalid_parameters() {
    assert!(ThresholdAcceptance::new(-1., 100.).is_err());
    assert!(ThresholdAcceptance::new(10., 0.).is_err());
    assert!(ThresholdAcceptance::new(10., 100.).is_ok());
}

#[test]
fn can_accept_worse_solution_within_initial_threshold() {
    let (refinement_ctx, _, unsolved) = create_refinement_ctx_with_candidates();

    // the unsolved candidate is worse by the unassigned penalties only
    let acceptance = ThresholdAcceptance::new(1E8, 100.).unwrap();

    assert!(acceptance.is_accepted(&refinement_ctx, &unsolved));
}

#[test]
fn can_reject_worse_solution_after_threshold_decay() {
    let (mut refinement_ctx, _, unsolved) = create_refinement_ctx_with_candidates();

    let acceptance = ThresholdAcceptance::new(1E8, 10.).unwrap();
    refinement_ctx.statistics.generation = 1000;

    assert!(!acceptance.is_accepted(&refinement_ctx, &unsolved));
}

#[test]
fn can_degenerate_to_greedy_with_zero_threshold() {
    let (refinement_ctx, solved, unsolved) = create_refinement_ctx_with_candidates();

    let threshold = ThresholdAcceptance::new(0., 100.).unwrap();
    let greedy = GreedyAcceptance::default();

    [&solved, &unsolved].iter().for_each(|candidate| {
        assert_eq!(
            threshold.is_accepted(&refinement_ctx, candidate),
            greedy.is_accepted(&refinement_ctx, candidate)
        );
    });
}
