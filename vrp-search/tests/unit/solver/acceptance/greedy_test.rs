use super::*;
use crate::construction::heuristics::InsertionContext;
use crate::helpers::construction::create_test_environment_with_seed;
use crate::helpers::solver::*;
use crate::solver::search::{Recreate, RecreateWithCheapest};

fn create_solved_and_unsolved() -> (RefinementContext, InsertionContext, InsertionContext) {
    let problem = create_default_line_problem();
    let environment = create_test_environment_with_seed(0);
    let refinement_ctx = create_test_refinement_ctx(problem.clone(), environment.clone());

    let unsolved = InsertionContext::new(problem, environment);
    let solved = RecreateWithCheapest::default().run(&refinement_ctx, unsolved.deep_copy());

    (refinement_ctx, solved, unsolved)
}

#[test]
fn can_accept_any_solution_with_empty_memory() {
    let (refinement_ctx, _, unsolved) = create_solved_and_unsolved();

    assert!(GreedyAcceptance::default().is_accepted(&refinement_ctx, &unsolved));
}

#[test]
fn can_reject_worse_solution() {
    let (mut refinement_ctx, solved, unsolved) = create_solved_and_unsolved();
    refinement_ctx.memory.add(solved);

    assert!(!GreedyAcceptance::default().is_accepted(&refinement_ctx, &unsolved));
}

#[test]
fn can_accept_better_or_equal_solution() {
    let (mut refinement_ctx, solved, _) = create_solved_and_unsolved();
    let same = solved.deep_copy();
    refinement_ctx.memory.add(solved);

    assert!(GreedyAcceptance::default().is_accepted(&refinement_ctx, &same));
}
