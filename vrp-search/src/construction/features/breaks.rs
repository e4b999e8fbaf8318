//! A vehicle break feature: an optional break is modelled as a job which may only be
//! served by its own vehicle and which is demoted when the vehicle is not used.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/breaks_test.rs"]
mod breaks_test;

use crate::construction::heuristics::*;
use crate::models::common::{Dimensions, IdDimension};
use crate::models::problem::Job;
use crate::models::*;
use crate::utils::GenericResult;
use std::collections::HashSet;

custom_dimension!(BreakMarker typeof bool);

custom_dimension!(RequiredVehicleId typeof String);

/// Checks whether the given job models a vehicle break.
pub fn is_break_job(job: &Job) -> bool {
    job.dimens().get_break_marker().copied().unwrap_or(false)
}

/// Creates a break feature:
/// * a hard route-level constraint which keeps a vehicle bound job (e.g. its break) out of
///   other vehicles' routes;
/// * a state which demotes breaks of unused vehicles and removes breaks left alone in a
///   route after ruin.
pub fn create_break_feature(name: &str, code: ViolationCode) -> GenericResult<Feature> {
    FeatureBuilder::default()
        .with_name(name)
        .with_constraint(VehicleBindingConstraint { code })
        .with_priority(ConstraintPriority::Critical)
        .with_state(BreakState {})
        .build()
}

struct VehicleBindingConstraint {
    code: ViolationCode,
}

impl FeatureConstraint for VehicleBindingConstraint {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        match move_ctx {
            MoveContext::Route { route_ctx, job, .. } => {
                if let Some(required_id) = job.dimens().get_required_vehicle_id() {
                    let vehicle_id = route_ctx.route().actor.vehicle.dimens.get_id();
                    if vehicle_id != Some(required_id) {
                        return ConstraintViolation::fail(self.code);
                    }
                }

                None
            }
            MoveContext::Activity { .. } => None,
        }
    }
}

struct BreakState {}

impl FeatureState for BreakState {
    fn accept_insertion(&self, _: &mut SolutionContext, _: usize, _: &Job) {}

    fn accept_route_state(&self, _: &mut RouteContext) {}

    fn accept_solution_state(&self, solution_ctx: &mut SolutionContext) {
        remove_orphan_breaks(solution_ctx);

        let used_vehicles: HashSet<String> = solution_ctx
            .routes
            .iter()
            .filter(|route_ctx| route_ctx.route().tour.jobs().any(|job| !is_break_job(&job)))
            .filter_map(|route_ctx| route_ctx.route().actor.vehicle.dimens.get_id().cloned())
            .collect();

        let is_active_break = |job: &Job| {
            job.dimens().get_required_vehicle_id().is_some_and(|vehicle_id| used_vehicles.contains(vehicle_id))
        };

        // demote breaks of unused vehicles, they cannot be assigned and are not failures
        let (active, inactive): (Vec<_>, Vec<_>) =
            solution_ctx.required.drain(0..).partition(|job| !is_break_job(job) || is_active_break(job));
        solution_ctx.required = active;
        solution_ctx.ignored.extend(inactive);

        let inactive_unassigned: Vec<Job> = solution_ctx
            .unassigned
            .keys()
            .filter(|job| is_break_job(job) && !is_active_break(job))
            .cloned()
            .collect();
        inactive_unassigned.iter().for_each(|job| {
            solution_ctx.unassigned.remove(job);
        });
        solution_ctx.ignored.extend(inactive_unassigned);

        // promote breaks of vehicles which got jobs assigned in the meantime
        let (promoted, ignored): (Vec<_>, Vec<_>) =
            solution_ctx.ignored.drain(0..).partition(|job| is_break_job(job) && is_active_break(job));
        solution_ctx.ignored = ignored;
        solution_ctx.required.extend(promoted);
    }
}

/// Removes breaks which do not serve any regular job in the route: after ruin a route may
/// keep only its break, such route must collapse to an empty one.
fn remove_orphan_breaks(solution_ctx: &mut SolutionContext) {
    solution_ctx.routes.iter_mut().for_each(|route_ctx| {
        let has_regular_jobs = route_ctx.route().tour.jobs().any(|job| !is_break_job(&job));
        if has_regular_jobs {
            return;
        }

        let breaks: Vec<Job> = route_ctx.route().tour.jobs().filter(is_break_job).collect();
        if breaks.is_empty() {
            return;
        }

        breaks.iter().for_each(|job| {
            route_ctx.route_mut().tour.remove(job);
        });
        solution_ctx.ignored.extend(breaks);
    });
}
