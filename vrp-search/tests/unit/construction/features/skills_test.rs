use super::*;
use crate::construction::heuristics::RouteContext;
use crate::helpers::construction::create_test_solution_context;
use crate::helpers::models::problem::*;
use crate::models::problem::{Fleet, Job, Single};
use std::sync::Arc;

const SKILLS_CODE: ViolationCode = ViolationCode(3);

fn create_job_with_skills(all_of: Option<Vec<&str>>, one_of: Option<Vec<&str>>, none_of: Option<Vec<&str>>) -> Job {
    let owned = |skills: Option<Vec<&str>>| skills.map(|v| v.into_iter().map(String::from).collect::<Vec<_>>());

    let mut single = Single { places: vec![test_place_with_location(Some(1))], dimens: Default::default() };
    single.dimens.set_job_skills(JobSkills::new(owned(all_of), owned(one_of), owned(none_of)));

    Job::Single(Arc::new(single))
}

fn create_route_ctx_with_vehicle_skills(skills: Option<Vec<&str>>) -> (RouteContext, Fleet) {
    let mut vehicle = test_vehicle("v1");
    if let Some(skills) = skills {
        vehicle.dimens.set_vehicle_skills(skills.into_iter().map(String::from).collect::<HashSet<_>>());
    }

    let fleet = test_fleet_with_vehicles(vec![vehicle]);
    let route_ctx = RouteContext::new(fleet.actors.first().unwrap().clone());

    (route_ctx, fleet)
}

fn assert_skills(
    job_skills: (Option<Vec<&str>>, Option<Vec<&str>>, Option<Vec<&str>>),
    vehicle_skills: Option<Vec<&str>>,
    expected: Option<ConstraintViolation>,
) {
    let (all_of, one_of, none_of) = job_skills;
    let feature = create_skills_feature("skills", SKILLS_CODE).unwrap();
    let job = create_job_with_skills(all_of, one_of, none_of);
    let (route_ctx, fleet) = create_route_ctx_with_vehicle_skills(vehicle_skills);
    let solution_ctx = create_test_solution_context(&fleet);

    let violation =
        feature.constraint.as_ref().unwrap().evaluate(&MoveContext::route(&solution_ctx, &route_ctx, &job));

    assert_eq!(violation, expected);
}

#[test]
fn can_accept_job_without_skill_requirements() {
    assert_skills((None, None, None), None, None);
    assert_skills((None, None, None), Some(vec!["fridge"]), None);
}

#[test]
fn can_check_all_of_skills() {
    assert_skills((Some(vec!["fridge", "lift"]), None, None), Some(vec!["fridge", "lift"]), None);
    assert_skills(
        (Some(vec!["fridge", "lift"]), None, None),
        Some(vec!["fridge"]),
        ConstraintViolation::fail(SKILLS_CODE),
    );
    assert_skills((Some(vec!["fridge"]), None, None), None, ConstraintViolation::fail(SKILLS_CODE));
}

#[test]
fn can_check_one_of_skills() {
    assert_skills((None, Some(vec!["fridge", "lift"]), None), Some(vec!["lift"]), None);
    assert_skills(
        (None, Some(vec!["fridge", "lift"]), None),
        Some(vec!["crane"]),
        ConstraintViolation::fail(SKILLS_CODE),
    );
}

#[test]
fn can_check_none_of_skills() {
    assert_skills((None, None, Some(vec!["fragile"])), Some(vec!["crane"]), None);
    assert_skills(
        (None, None, Some(vec!["fragile"])),
        Some(vec!["fragile"]),
        ConstraintViolation::fail(SKILLS_CODE),
    );
}

#[test]
fn can_combine_skill_checks() {
    assert_skills(
        (Some(vec!["fridge"]), Some(vec!["lift", "crane"]), Some(vec!["fragile"])),
        Some(vec!["fridge", "crane"]),
        None,
    );
    assert_skills(
        (Some(vec!["fridge"]), Some(vec!["lift", "crane"]), Some(vec!["fragile"])),
        Some(vec!["fridge", "crane", "fragile"]),
        ConstraintViolation::fail(SKILLS_CODE),
    );
}
