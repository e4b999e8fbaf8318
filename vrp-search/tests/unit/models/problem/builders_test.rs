use super::*;

#[test]
fn can_build_single_job_with_simple_api() {
    let job = SingleBuilder::default()
        .id("job1")
        .location(5)
        .unwrap()
        .duration(3.)
        .unwrap()
        .times(vec![TimeWindow::new(0., 100.)])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(job.dimens.get_id().unwrap(), "job1");
    assert_eq!(job.places.len(), 1);
    assert_eq!(job.places.first().unwrap().location, Some(5));
    assert_eq!(job.places.first().unwrap().duration, 3.);
}

#[test]
fn cannot_build_single_job_without_places() {
    assert!(SingleBuilder::default().id("job1").build().is_err());
}

#[test]
fn cannot_build_multi_job_with_less_than_two_sub_jobs() {
    let single = SingleBuilder::default().id("s1").location(1).unwrap().build().unwrap();

    assert!(MultiBuilder::default().id("m1").add_job(single).build().is_err());
}

#[test]
fn cannot_build_vehicle_without_details() {
    assert!(VehicleBuilder::default().id("v1").build().is_err());
}

#[test]
fn can_build_vehicle_with_details() {
    let vehicle = VehicleBuilder::default()
        .id("v1")
        .set_distance_cost(2.)
        .capacity(SingleDimLoad::new(10))
        .add_detail(
            VehicleDetailBuilder::default()
                .set_start_location(0)
                .set_start_time(10.)
                .set_end_location(0)
                .set_end_time(100.)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    assert_eq!(vehicle.dimens.get_id().unwrap(), "v1");
    assert_eq!(vehicle.costs.per_distance, 2.);
    assert_eq!(vehicle.details.len(), 1);
}

#[test]
fn cannot_build_vehicle_detail_without_start() {
    assert!(VehicleDetailBuilder::default().set_end_location(0).build().is_err());
}

#[test]
fn cannot_build_problem_without_goal() {
    use crate::helpers::models::problem::{TestTransportCost, test_fleet, test_single_job_with_location};

    let result = ProblemBuilder::default()
        .with_fleet(test_fleet())
        .add_job(test_single_job_with_location("s1", 1))
        .with_transport_cost(TestTransportCost::new_shared())
        .build();

    assert!(result.is_err());
}
