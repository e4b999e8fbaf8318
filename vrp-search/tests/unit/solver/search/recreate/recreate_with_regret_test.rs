use super::*;
use crate::helpers::construction::*;
use crate::helpers::models::problem::*;
use crate::helpers::solver::create_test_refinement_ctx;

/// Creates a context with three depots at 0, 40 and 100 whose empty routes are part of
/// the candidate list.
fn create_three_depot_ctx() -> (InsertionContext, Vec<RouteContext>) {
    let problem = create_line_problem(
        vec![
            test_vehicle_with_start("v1", 0),
            test_vehicle_with_start("v2", 40),
            test_vehicle_with_start("v3", 100),
        ],
        vec![test_single_job_with_location("far", 90), test_single_job_with_location("near", 8)],
    );
    let environment = create_test_environment_with_seed(1);
    let insertion_ctx = InsertionContext::new(problem, environment);

    let routes: Vec<RouteContext> =
        insertion_ctx.solution.registry.next_route().map(|route_ctx| route_ctx.deep_copy()).collect();
    assert_eq!(routes.len(), 3);

    (insertion_ctx, routes)
}

#[test]
fn can_insert_job_with_higher_regret_first() {
    let (insertion_ctx, routes) = create_three_depot_ctx();
    let jobs: Vec<Job> = insertion_ctx.problem.jobs.all().collect();

    // far@90: best 20 (v3), 2nd best 100 (v2) -> regret 80
    // near@8: best 16 (v1), 2nd best 64 (v2) -> regret 48
    // cheapest would pick near first, regret must pick far first
    let evaluator = RegretInsertionEvaluator::new(2, 2);
    let result =
        evaluator.evaluate_all(&insertion_ctx, jobs.as_slice(), routes.as_slice(), &BestResultSelector::default());

    let success = result.into_success().expect("must find an insertion");
    assert_eq!(get_job_id(&success.job), "far");

    let cheapest = PositionInsertionEvaluator::default().evaluate_all(
        &insertion_ctx,
        jobs.as_slice(),
        routes.as_slice(),
        &BestResultSelector::default(),
    );
    assert_eq!(get_job_id(&cheapest.into_success().unwrap().job), "near");
}

#[test]
fn can_degenerate_to_cheapest_insertion_with_regret_one() {
    let (insertion_ctx, routes) = create_three_depot_ctx();
    let jobs: Vec<Job> = insertion_ctx.problem.jobs.all().collect();

    let regret = RegretInsertionEvaluator::new(1, 1)
        .evaluate_all(&insertion_ctx, jobs.as_slice(), routes.as_slice(), &BestResultSelector::default())
        .into_success()
        .unwrap();
    let cheapest = PositionInsertionEvaluator::default()
        .evaluate_all(&insertion_ctx, jobs.as_slice(), routes.as_slice(), &BestResultSelector::default())
        .into_success()
        .unwrap();

    assert_eq!(get_job_id(&regret.job), get_job_id(&cheapest.job));
    assert_eq!(regret.cost, cheapest.cost);
}

#[test]
fn can_recreate_full_solution() {
    let problem = crate::helpers::solver::create_default_line_problem();
    let environment = create_test_environment_with_seed(1);
    let refinement_ctx = create_test_refinement_ctx(problem.clone(), environment.clone());

    let insertion_ctx =
        RecreateWithRegret::new(2, 3).run(&refinement_ctx, InsertionContext::new(problem, environment));

    assert!(insertion_ctx.solution.unassigned.is_empty());
    assert!(insertion_ctx.solution.required.is_empty());
}
