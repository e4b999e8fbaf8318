use super::*;
use crate::construction::heuristics::RouteContext;
use crate::helpers::construction::create_test_solution_context;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::*;
use crate::models::problem::Single;

const CAPACITY_CODE: ViolationCode = ViolationCode(2);

fn create_feature() -> Feature {
    create_capacity_limit_feature::<SingleDimLoad>("capacity", CAPACITY_CODE).unwrap()
}

fn create_delivery(id: &str, location: Location, size: i32) -> std::sync::Arc<Single> {
    let mut single = Single {
        places: vec![crate::models::problem::Place {
            location: Some(location),
            duration: 0.,
            times: vec![TimeSpan::Window(TimeWindow::new(0., 1000.))],
        }],
        dimens: Default::default(),
    };
    single.dimens.set_id(id.to_string());
    single.dimens.set_demand(Demand::<SingleDimLoad>::delivery(SingleDimLoad::new(size)));

    std::sync::Arc::new(single)
}

fn create_route_ctx_with_deliveries(capacity: i32, sizes: &[i32]) -> RouteContext {
    let fleet = test_fleet_with_vehicles(vec![test_vehicle_with_capacity("v1", capacity)]);
    let activities = sizes
        .iter()
        .enumerate()
        .map(|(idx, &size)| test_activity_with_job(create_delivery(&format!("d{idx}"), idx + 1, size)))
        .collect();
    let route = create_route_with_activities(&fleet, activities);

    let mut route_ctx = RouteContext::new_with_state(route, Default::default());
    let feature = create_feature();
    feature.state.as_ref().unwrap().accept_route_state(&mut route_ctx);
    route_ctx.mark_stale(false);

    route_ctx
}

#[test]
fn can_propagate_load_states_for_deliveries() {
    let route_ctx = create_route_ctx_with_deliveries(10, &[2, 3]);
    let state = route_ctx.state();

    // all deliveries are loaded at the route start and dropped on the way
    assert_eq!(state.get_current_capacity_at::<SingleDimLoad>(0).copied(), Some(SingleDimLoad::new(5)));
    assert_eq!(state.get_current_capacity_at::<SingleDimLoad>(1).copied(), Some(SingleDimLoad::new(3)));
    assert_eq!(state.get_current_capacity_at::<SingleDimLoad>(2).copied(), Some(SingleDimLoad::new(0)));
    assert_eq!(state.get_current_capacity_at::<SingleDimLoad>(3).copied(), Some(SingleDimLoad::new(0)));
}

#[test]
fn can_conserve_load_over_route() {
    let sizes = [2, 3, 4];
    let route_ctx = create_route_ctx_with_deliveries(10, &sizes);
    let state = route_ctx.state();

    let start_load = state.get_current_capacity_at::<SingleDimLoad>(0).copied().unwrap();
    let end_load =
        state.get_current_capacity_at::<SingleDimLoad>(route_ctx.route().tour.total() - 1).copied().unwrap();

    assert_eq!(start_load, SingleDimLoad::new(sizes.iter().sum()));
    assert_eq!(end_load, SingleDimLoad::default());
}

#[test]
fn can_reject_job_exceeding_vehicle_capacity() {
    let feature = create_feature();
    let route_ctx = create_route_ctx_with_deliveries(2, &[1, 1]);
    let fleet = test_fleet_with_vehicles(vec![test_vehicle_with_capacity("v1", 2)]);
    let solution_ctx = create_test_solution_context(&fleet);

    let job = test_single_job_with_demand("d_extra", 5, Demand::delivery(SingleDimLoad::new(1)));

    let violation =
        feature.constraint.as_ref().unwrap().evaluate(&MoveContext::route(&solution_ctx, &route_ctx, &job));

    assert_eq!(violation, Some(ConstraintViolation { code: CAPACITY_CODE, stopped: true }));
}

#[test]
fn can_accept_job_within_vehicle_capacity() {
    let feature = create_feature();
    let route_ctx = create_route_ctx_with_deliveries(5, &[1, 1]);
    let fleet = test_fleet_with_vehicles(vec![test_vehicle_with_capacity("v1", 5)]);
    let solution_ctx = create_test_solution_context(&fleet);

    let job = test_single_job_with_demand("d_extra", 5, Demand::delivery(SingleDimLoad::new(2)));

    let violation =
        feature.constraint.as_ref().unwrap().evaluate(&MoveContext::route(&solution_ctx, &route_ctx, &job));

    assert_eq!(violation, None);
}

#[test]
fn can_detect_activity_level_capacity_violation() {
    let feature = create_feature();
    let route_ctx = create_route_ctx_with_deliveries(2, &[1, 1]);

    let target = test_activity_with_job(create_delivery("d_extra", 5, 1));

    let activity_ctx = crate::construction::heuristics::ActivityContext {
        index: 1,
        prev: route_ctx.route().tour.get(1).unwrap(),
        target: &target,
        next: route_ctx.route().tour.get(2),
    };

    let violation = feature.constraint.as_ref().unwrap().evaluate(&MoveContext::activity(&route_ctx, &activity_ctx));

    assert_eq!(violation, Some(ConstraintViolation { code: CAPACITY_CODE, stopped: true }));
}

#[test]
fn can_treat_missing_capacity_as_violation() {
    let feature = create_feature();
    // vehicle without capacity dimension cannot serve demanded jobs
    let fleet = test_fleet();
    let solution_ctx = create_test_solution_context(&fleet);
    let route_ctx = RouteContext::new(fleet.actors.first().unwrap().clone());

    let job = test_single_job_with_demand("d1", 5, Demand::delivery(SingleDimLoad::new(1)));

    let violation =
        feature.constraint.as_ref().unwrap().evaluate(&MoveContext::route(&solution_ctx, &route_ctx, &job));

    assert_eq!(violation, Some(ConstraintViolation { code: CAPACITY_CODE, stopped: true }));
}
