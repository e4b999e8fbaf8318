use super::*;
use crate::helpers::construction::*;
use crate::helpers::models::problem::*;

struct TestStateKey;

#[test]
fn can_keep_tour_and_activity_states_independent() {
    let mut state = RouteState::default();

    state.set_tour_state::<TestStateKey, f64>(7.);
    state.set_activity_states::<TestStateKey, f64>(vec![1., 2., 3.]);

    assert_eq!(state.get_tour_state::<TestStateKey, f64>(), Some(&7.));
    assert_eq!(state.get_activity_state::<TestStateKey, f64>(1), Some(&2.));
}

#[test]
fn can_return_default_for_missing_state() {
    let state = RouteState::default();

    assert_eq!(state.get_tour_state::<TestStateKey, f64>().copied().unwrap_or(42.), 42.);
    assert_eq!(state.get_activity_state::<TestStateKey, f64>(10), None);
}

#[test]
fn can_clear_all_states() {
    let mut state = RouteState::default();
    state.set_tour_state::<TestStateKey, f64>(7.);
    state.set_activity_states::<TestStateKey, f64>(vec![1.]);

    state.clear();

    assert_eq!(state.get_tour_state::<TestStateKey, f64>(), None);
    assert_eq!(state.get_activity_state::<TestStateKey, f64>(0), None);
}

#[test]
fn can_mark_route_context_stale_on_mutable_access() {
    let fleet = test_fleet();
    let mut route_ctx = RouteContext::new(fleet.actors.first().unwrap().clone());
    route_ctx.mark_stale(false);

    assert!(!route_ctx.is_stale());
    let _ = route_ctx.route_mut();
    assert!(route_ctx.is_stale());
}

#[test]
fn can_release_actor_when_route_is_dropped() {
    let environment = create_test_environment_with_seed(0);
    let problem = create_line_problem(vec![test_vehicle("v1")], vec![test_single_job_with_location("s1", 5)]);

    let mut insertion_ctx = create_empty_insertion_context(problem, environment);

    let route_ctx = insertion_ctx.solution.registry.next_route().next().unwrap().deep_copy();
    assert!(insertion_ctx.solution.registry.use_route(&route_ctx));
    insertion_ctx.solution.routes.push(route_ctx);

    assert_eq!(insertion_ctx.solution.registry.next_route().count(), 0);

    // empty route is dropped and its actor is released
    insertion_ctx.restore();

    assert_eq!(insertion_ctx.solution.routes.len(), 0);
    assert_eq!(insertion_ctx.solution.registry.next_route().count(), 1);
}
