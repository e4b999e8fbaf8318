use super::*;
use crate::helpers::models::problem::test_fleet;
use crate::models::common::TimeWindow;
use crate::models::solution::Route;

fn create_test_route() -> Route {
    let fleet = test_fleet();
    let actor = fleet.actors.first().unwrap().clone();
    let tour = crate::models::solution::Tour::new(&actor);

    Route { actor, tour }
}

#[test]
fn can_create_matrix_costs_only_from_valid_data() {
    assert!(MatrixTransportCost::new(vec![vec![0.; 4]], vec![vec![0.; 4]]).is_ok());
    assert!(MatrixTransportCost::new(vec![vec![0.; 3]], vec![vec![0.; 3]]).is_err());
    assert!(MatrixTransportCost::new(vec![vec![0.; 4]], vec![]).is_err());
    assert!(MatrixTransportCost::new(vec![], vec![]).is_err());
}

#[test]
fn can_return_matrix_costs() {
    let durations = vec![0., 5., 5., 0.];
    let distances = vec![0., 7., 7., 0.];
    let costs = MatrixTransportCost::new(vec![durations], vec![distances]).unwrap();

    assert_eq!(costs.duration_approx(&Profile::default(), 0, 1), 5.);
    assert_eq!(costs.distance_approx(&Profile::default(), 1, 0), 7.);
}

#[test]
fn can_calculate_transport_cost_from_costs_coefficients() {
    let route = create_test_route();
    let costs = MatrixTransportCost::new(vec![vec![0., 5., 5., 0.]], vec![vec![0., 7., 7., 0.]]).unwrap();

    // vehicle per_distance is 1, other coefficients are zero
    assert_eq!(costs.cost(&route, 0, 1, TravelTime::Departure(0.)), 7.);
}

#[test]
fn can_estimate_activity_departure_and_arrival() {
    let route = create_test_route();
    let activity_cost = SimpleActivityCost::default();

    let mut activity = crate::models::solution::Activity::new_with_job(
        crate::helpers::models::problem::test_single_with_id("job"),
    );
    activity.place.time = TimeWindow::new(10., 100.);
    activity.place.duration = 5.;

    // arrival before time window start: wait, then serve
    assert_eq!(activity_cost.estimate_departure(&route, &activity, 5.), 15.);
    // arrival after time window start: serve immediately
    assert_eq!(activity_cost.estimate_departure(&route, &activity, 20.), 25.);
    // latest arrival is bounded by time window end
    assert_eq!(activity_cost.estimate_arrival(&route, &activity, 200.), 100.);
}
