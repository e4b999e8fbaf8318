use super::*;
use crate::helpers::construction::create_test_environment_with_seed;
use crate::helpers::solver::*;

#[test]
fn can_terminate_when_search_stagnates() {
    let problem = create_default_line_problem();
    let mut refinement_ctx = create_test_refinement_ctx(problem, create_test_environment_with_seed(0));
    let termination = NoImprovement::new(50);

    refinement_ctx.statistics.generation = 100;
    refinement_ctx.statistics.last_improvement = 60;
    assert!(!termination.is_termination(&refinement_ctx));

    refinement_ctx.statistics.last_improvement = 50;
    assert!(termination.is_termination(&refinement_ctx));
}
