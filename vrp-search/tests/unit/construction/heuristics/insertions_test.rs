use super::*;
use crate::construction::features::CAPACITY_CONSTRAINT_CODE;
use crate::helpers::construction::*;
use crate::helpers::models::problem::*;
use crate::models::common::{Demand, SingleDimLoad};

fn run_cheapest_insertion(insertion_ctx: InsertionContext) -> InsertionContext {
    InsertionHeuristic::default().process(
        insertion_ctx,
        &AllJobSelector::default(),
        &AllRouteSelector::default(),
        &BestResultSelector::default(),
    )
}

/// Creates the four services scenario: one vehicle type (capacity 2, two instances,
/// start at (0, 0)) and four unit demand services in the corners of a rectangle.
fn create_four_services_scenario() -> InsertionContext {
    let points = vec![(0., 0.), (5., 7.), (5., 13.), (15., 7.), (15., 13.)];
    let transport = create_matrix_transport_cost(points);

    let jobs = (1..=4)
        .map(|idx| test_single_job_with_demand(&format!("s{idx}"), idx, Demand::delivery(SingleDimLoad::new(1))))
        .collect();

    let fleet = test_fleet_with_vehicles(vec![
        test_vehicle_with_capacity("v1", 2),
        test_vehicle_with_capacity("v2", 2),
    ]);

    let problem = create_test_problem(fleet, jobs, transport);

    create_empty_insertion_context(problem, create_test_environment_with_seed(42))
}

#[test]
fn can_split_jobs_into_two_routes_when_capacity_binds() {
    let insertion_ctx = run_cheapest_insertion(create_four_services_scenario());

    assert!(insertion_ctx.solution.unassigned.is_empty());
    assert!(insertion_ctx.solution.required.is_empty());
    assert_eq!(insertion_ctx.solution.routes.len(), 2);

    insertion_ctx.solution.routes.iter().for_each(|route_ctx| {
        assert_eq!(route_ctx.route().tour.job_count(), 2);
    });
}

#[test]
fn can_produce_deterministic_solution_under_fixed_seed() {
    let first = run_cheapest_insertion(create_four_services_scenario());
    let second = run_cheapest_insertion(create_four_services_scenario());

    assert_eq!(first.get_fitness(), second.get_fitness());
    assert_eq!(get_sorted_route_job_ids(&first.solution), get_sorted_route_job_ids(&second.solution));
}

#[test]
fn can_record_capacity_reason_for_unassignable_job() {
    let problem = create_line_problem(
        vec![test_vehicle_with_capacity("v1", 1)],
        vec![
            test_single_job_with_demand("fits", 5, Demand::delivery(SingleDimLoad::new(1))),
            test_single_job_with_demand("too_big", 10, Demand::delivery(SingleDimLoad::new(2))),
        ],
    );
    let insertion_ctx =
        run_cheapest_insertion(create_empty_insertion_context(problem, create_test_environment_with_seed(0)));

    assert_eq!(insertion_ctx.solution.unassigned.len(), 1);

    let (job, info) = insertion_ctx.solution.unassigned.iter().next().unwrap();
    assert_eq!(get_job_id(job), "too_big");
    match info {
        UnassignmentInfo::Simple(code) => assert_eq!(*code, CAPACITY_CONSTRAINT_CODE),
        _ => unreachable!("a specific reason code is expected"),
    }
}

#[test]
fn can_continue_after_infeasible_job() {
    // one infeasible job must not abort the pass: the rest is assigned
    let problem = create_line_problem(
        vec![test_vehicle_with_capacity("v1", 10)],
        vec![
            test_single_job_with_demand("s1", 5, Demand::delivery(SingleDimLoad::new(1))),
            test_single_job_with_demand("huge", 7, Demand::delivery(SingleDimLoad::new(100))),
            test_single_job_with_demand("s2", 10, Demand::delivery(SingleDimLoad::new(1))),
        ],
    );
    let insertion_ctx =
        run_cheapest_insertion(create_empty_insertion_context(problem, create_test_environment_with_seed(0)));

    assert_eq!(insertion_ctx.solution.unassigned.len(), 1);
    assert_eq!(insertion_ctx.solution.routes.len(), 1);
    assert_eq!(insertion_ctx.solution.routes.first().unwrap().route().tour.job_count(), 2);
}
