use super::*;
use crate::construction::heuristics::InsertionContext;
use crate::helpers::construction::*;
use crate::helpers::solver::*;

fn create_insertion_ctx_with_assigned_jobs() -> InsertionContext {
    let problem = create_default_line_problem();
    let environment = create_test_environment_with_seed(0);

    let mut insertion_ctx = InsertionContext::new(problem.clone(), environment);
    let jobs: Vec<_> = problem.jobs.all().collect();
    insertion_ctx.solution.routes.push(create_route_ctx_with_jobs(&problem, 0, jobs.as_slice()));
    insertion_ctx.solution.registry.use_route(&insertion_ctx.solution.routes[0].deep_copy());
    insertion_ctx.solution.required.clear();

    insertion_ctx
}

#[test]
fn cannot_create_limits_with_invalid_fraction() {
    assert!(RemovalLimits::new(-0.1, 8).is_err());
    assert!(RemovalLimits::new(1.1, 8).is_err());
    assert!(RemovalLimits::new(0.5, 8).is_ok());
}

#[test]
fn can_compute_removal_target_from_fraction() {
    let insertion_ctx = create_insertion_ctx_with_assigned_jobs();

    let limits = RemovalLimits::new(1., 8).unwrap();
    let tracker = JobRemovalTracker::new(&limits, &insertion_ctx.solution);
    assert!(!tracker.is_limit());

    let limits = RemovalLimits::new(0., 8).unwrap();
    let tracker = JobRemovalTracker::new(&limits, &insertion_ctx.solution);
    // zero fraction: the limit is reached before any removal
    assert!(tracker.is_limit());
}

#[test]
fn can_remove_job_moving_it_to_required() {
    let mut insertion_ctx = create_insertion_ctx_with_assigned_jobs();
    let job = insertion_ctx.solution.routes[0].route().tour.jobs().next().unwrap();

    let limits = RemovalLimits::new(1., 8).unwrap();
    let mut tracker = JobRemovalTracker::new(&limits, &insertion_ctx.solution);

    assert!(tracker.try_remove_job(&mut insertion_ctx.solution, 0, &job));

    assert!(!insertion_ctx.solution.routes[0].route().tour.contains(&job));
    assert!(insertion_ctx.solution.required.contains(&job));
    assert_eq!(tracker.get_removed_jobs(), 1);

    // the same job cannot be removed twice
    assert!(!tracker.try_remove_job(&mut insertion_ctx.solution, 0, &job));
}

#[test]
fn cannot_remove_locked_job() {
    let mut insertion_ctx = create_insertion_ctx_with_assigned_jobs();
    let job = insertion_ctx.solution.routes[0].route().tour.jobs().next().unwrap();
    insertion_ctx.solution.locked.insert(job.clone());

    let limits = RemovalLimits::new(1., 8).unwrap();
    let mut tracker = JobRemovalTracker::new(&limits, &insertion_ctx.solution);

    assert!(!tracker.try_remove_job(&mut insertion_ctx.solution, 0, &job));
    assert!(insertion_ctx.solution.routes[0].route().tour.contains(&job));
}
