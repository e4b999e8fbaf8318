use crate::construction::heuristics::{RouteContext, SolutionContext};
use crate::models::common::Profile;
use crate::models::problem::Job;
use crate::utils::Random;
use std::collections::HashMap;

pub(crate) fn get_route_jobs(solution_ctx: &SolutionContext) -> HashMap<Job, usize> {
    solution_ctx
        .routes
        .iter()
        .enumerate()
        .flat_map(|(route_idx, route_ctx)| {
            route_ctx.route().tour.jobs().collect::<Vec<_>>().into_iter().map(move |job| (job, route_idx))
        })
        .collect()
}

/// Selects a seed job from the existing solution: a random job of a random route for
/// which both filters hold.
pub(crate) fn select_seed_job(
    routes: &[RouteContext],
    random: &(dyn Random + Send + Sync),
    route_filter: &(dyn Fn(&RouteContext) -> bool),
    job_filter: &(dyn Fn(&Job) -> bool),
) -> Option<(Profile, usize, Job)> {
    if routes.is_empty() {
        return None;
    }

    let initial_route_idx = random.uniform_int(0, (routes.len() - 1) as i32) as usize;
    let mut route_idx = initial_route_idx;

    loop {
        let route_ctx = routes.get(route_idx).unwrap();

        if route_ctx.route().tour.has_jobs() && route_filter(route_ctx) {
            if let Some(job) = select_random_job(route_ctx, random, job_filter) {
                return Some((route_ctx.route().actor.vehicle.profile.clone(), route_idx, job));
            }
        }

        route_idx = (route_idx + 1) % routes.len();
        if route_idx == initial_route_idx {
            break;
        }
    }

    None
}

fn select_random_job(
    route_ctx: &RouteContext,
    random: &(dyn Random + Send + Sync),
    job_filter: &(dyn Fn(&Job) -> bool),
) -> Option<Job> {
    let size = route_ctx.route().tour.job_activity_count();
    if size == 0 {
        return None;
    }

    let activity_index = random.uniform_int(1, size as i32) as usize;
    let mut ai = activity_index;

    loop {
        let job = route_ctx.route().tour.get(ai).and_then(|a| a.retrieve_job());

        if job.as_ref().is_some_and(|job| job_filter(job)) {
            return job;
        }

        ai = (ai + 1) % (size + 1);
        if ai == activity_index {
            break;
        }
    }

    None
}
