use super::*;
use crate::helpers::construction::create_test_environment_with_seed;
use crate::helpers::solver::*;

#[test]
fn can_terminate_on_generation_limit() {
    let problem = create_default_line_problem();
    let mut refinement_ctx = create_test_refinement_ctx(problem, create_test_environment_with_seed(0));
    let termination = MaxGeneration::new(10);

    refinement_ctx.statistics.generation = 9;
    assert!(!termination.is_termination(&refinement_ctx));

    refinement_ctx.statistics.generation = 10;
    assert!(termination.is_termination(&refinement_ctx));
}

#[test]
fn can_combine_criteria_with_any_semantics() {
    let problem = create_default_line_problem();
    let mut refinement_ctx = create_test_refinement_ctx(problem, create_test_environment_with_seed(0));

    let termination =
        CompositeTermination::new(vec![Box::new(MaxGeneration::new(10)), Box::new(MaxGeneration::new(5))]);

    refinement_ctx.statistics.generation = 4;
    assert!(!termination.is_termination(&refinement_ctx));

    refinement_ctx.statistics.generation = 5;
    assert!(termination.is_termination(&refinement_ctx));
}
