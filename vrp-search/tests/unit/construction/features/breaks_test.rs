use super::*;
use crate::construction::heuristics::RouteContext;
use crate::helpers::construction::create_test_solution_context;
use crate::helpers::models::problem::*;
use crate::helpers::models::solution::test_activity_with_job;
use crate::models::problem::Single;
use std::sync::Arc;

const BREAK_CODE: ViolationCode = ViolationCode(4);

fn create_break_job(vehicle_id: &str) -> Job {
    let mut single = Single { places: vec![test_place_with_location(None)], dimens: Default::default() };
    single.dimens.set_id(format!("{vehicle_id}_break"));
    single.dimens.set_break_marker(true);
    single.dimens.set_required_vehicle_id(vehicle_id.to_string());

    Job::Single(Arc::new(single))
}

#[test]
fn can_keep_break_out_of_foreign_vehicle_route() {
    let feature = create_break_feature("break", BREAK_CODE).unwrap();
    let fleet = test_fleet_with_vehicles(vec![test_vehicle("v1"), test_vehicle("v2")]);
    let solution_ctx = create_test_solution_context(&fleet);

    let v1_route_ctx = RouteContext::new(fleet.actors[0].clone());
    let v2_route_ctx = RouteContext::new(fleet.actors[1].clone());
    let break_job = create_break_job("v1");

    let constraint = feature.constraint.as_ref().unwrap();

    assert_eq!(constraint.evaluate(&MoveContext::route(&solution_ctx, &v1_route_ctx, &break_job)), None);
    assert_eq!(
        constraint.evaluate(&MoveContext::route(&solution_ctx, &v2_route_ctx, &break_job)),
        ConstraintViolation::fail(BREAK_CODE)
    );
}

#[test]
fn can_demote_break_of_unused_vehicle() {
    let feature = create_break_feature("break", BREAK_CODE).unwrap();
    let fleet = test_fleet();
    let mut solution_ctx = create_test_solution_context(&fleet);

    solution_ctx.required.push(create_break_job("v1"));

    feature.state.as_ref().unwrap().accept_solution_state(&mut solution_ctx);

    assert!(solution_ctx.required.is_empty());
    assert_eq!(solution_ctx.ignored.len(), 1);
}

#[test]
fn can_promote_break_when_vehicle_gets_jobs() {
    let feature = create_break_feature("break", BREAK_CODE).unwrap();
    let fleet = test_fleet();
    let mut solution_ctx = create_test_solution_context(&fleet);

    let mut route_ctx = RouteContext::new(fleet.actors[0].clone());
    route_ctx.route_mut().tour.insert_last(test_activity_with_job(test_single_with_id_and_location("job1", 5)));
    solution_ctx.routes.push(route_ctx);
    solution_ctx.ignored.push(create_break_job("v1"));

    feature.state.as_ref().unwrap().accept_solution_state(&mut solution_ctx);

    assert!(solution_ctx.ignored.is_empty());
    assert_eq!(solution_ctx.required.len(), 1);
}

#[test]
fn can_remove_orphan_break_after_ruin() {
    let feature = create_break_feature("break", BREAK_CODE).unwrap();
    let fleet = test_fleet();
    let mut solution_ctx = create_test_solution_context(&fleet);

    // the route keeps only its break after all regular jobs were removed
    let break_job = create_break_job("v1");
    let mut route_ctx = RouteContext::new(fleet.actors[0].clone());
    route_ctx.route_mut().tour.insert_last(test_activity_with_job(break_job.to_single().clone()));
    solution_ctx.routes.push(route_ctx);

    feature.state.as_ref().unwrap().accept_solution_state(&mut solution_ctx);

    assert!(!solution_ctx.routes.first().unwrap().route().tour.has_jobs());
    assert_eq!(solution_ctx.ignored.len(), 1);
}
