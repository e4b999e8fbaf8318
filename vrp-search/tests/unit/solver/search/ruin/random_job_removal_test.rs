use super::*;
use crate::helpers::construction::*;
use crate::helpers::solver::*;
use crate::solver::search::{Recreate, RecreateWithCheapest, RemovalLimits};

fn create_ruined_ctx(fraction: f64) -> (usize, InsertionContext) {
    let problem = create_default_line_problem();
    let environment = create_test_environment_with_seed(7);
    let refinement_ctx = create_test_refinement_ctx(problem.clone(), environment.clone());

    let insertion_ctx =
        RecreateWithCheapest::default().run(&refinement_ctx, InsertionContext::new(problem, environment));
    let assigned = insertion_ctx.solution.routes.iter().map(|rc| rc.route().tour.job_count()).sum::<usize>();

    let limits = RemovalLimits::new(fraction, usize::MAX).unwrap();
    let ruined = RandomJobRemoval::new(limits).run(&refinement_ctx, insertion_ctx);

    (assigned, ruined)
}

#[test]
fn can_keep_solution_untouched_with_zero_fraction() {
    let (assigned, ruined) = create_ruined_ctx(0.);

    assert_eq!(ruined.solution.required.len(), 0);
    assert_eq!(ruined.solution.routes.iter().map(|rc| rc.route().tour.job_count()).sum::<usize>(), assigned);
}

#[test]
fn can_remove_every_assigned_job_with_full_fraction() {
    let (assigned, ruined) = create_ruined_ctx(1.);

    assert_eq!(ruined.solution.required.len(), assigned);
    assert_eq!(ruined.solution.routes.iter().map(|rc| rc.route().tour.job_count()).sum::<usize>(), 0);
}

#[test]
fn can_remove_a_portion_of_assigned_jobs() {
    let (assigned, ruined) = create_ruined_ctx(0.34);

    assert_eq!(assigned, 3);
    assert_eq!(ruined.solution.required.len(), 1);
    assert_eq!(ruined.solution.routes.iter().map(|rc| rc.route().tour.job_count()).sum::<usize>(), 2);
}
