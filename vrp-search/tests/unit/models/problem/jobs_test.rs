use super::*;
use crate::helpers::models::problem::{TestTransportCost, test_fleet, test_single_job_with_location};

#[test]
fn can_return_neighbours_in_distance_order() {
    let jobs = vec![
        test_single_job_with_location("s0", 0),
        test_single_job_with_location("s1", 10),
        test_single_job_with_location("s2", 2),
        test_single_job_with_location("s3", 5),
    ];
    let fleet = test_fleet();

    let jobs = Jobs::new(&fleet, jobs.clone(), TestTransportCost::new_shared());

    let seed = jobs.all().next().unwrap();
    let neighbours: Vec<String> = jobs
        .neighbors(&Profile::default(), &seed)
        .map(|(job, _)| job.dimens().get_id().unwrap().clone())
        .collect();

    assert_eq!(neighbours, vec!["s2".to_string(), "s3".to_string(), "s1".to_string()]);
}

#[test]
fn can_exclude_seed_job_from_its_neighbourhood() {
    let jobs =
        vec![test_single_job_with_location("s0", 0), test_single_job_with_location("s1", 1)];
    let fleet = test_fleet();

    let jobs = Jobs::new(&fleet, jobs, TestTransportCost::new_shared());
    let seed = jobs.all().next().unwrap();

    assert!(jobs.neighbors(&Profile::default(), &seed).all(|(job, _)| *job != seed));
    assert_eq!(jobs.size(), 2);
}

#[test]
fn can_keep_multi_job_sub_jobs_linked() {
    let multi = Multi::new_shared(
        vec![
            Arc::new(Single { places: vec![], dimens: Default::default() }),
            Arc::new(Single { places: vec![], dimens: Default::default() }),
        ],
        Default::default(),
    );

    let sub_job = multi.jobs.first().unwrap();
    let root = Multi::roots(sub_job).expect("sub job must reference its multi job");

    assert!(Arc::ptr_eq(&root, &multi));
}

#[test]
fn can_keep_sub_jobs_in_insertion_order() {
    let multi = Multi::new_shared(
        vec![
            Arc::new(Single { places: vec![], dimens: Default::default() }),
            Arc::new(Single { places: vec![], dimens: Default::default() }),
        ],
        Default::default(),
    );

    let permutations = multi.permutations();

    assert_eq!(permutations.len(), 1);
    assert!(Arc::ptr_eq(&permutations[0][0], &multi.jobs[0]));
    assert!(Arc::ptr_eq(&permutations[0][1], &multi.jobs[1]));
}
