//! Provides a feature to add capacity limitation on a vehicle.

#[cfg(test)]
#[path = "../../../tests/unit/construction/features/capacity_test.rs"]
mod capacity_test;

use crate::construction::heuristics::*;
use crate::models::common::*;
use crate::models::problem::Job;
use crate::models::solution::Activity;
use crate::models::*;
use crate::utils::GenericResult;
use std::marker::PhantomData;

custom_activity_state!(CurrentCapacity typeof T: LoadOps);

custom_activity_state!(MaxFutureCapacity typeof T: LoadOps);

custom_activity_state!(MaxPastCapacity typeof T: LoadOps);

/// Creates a capacity feature as a hard constraint: cumulative load at any route prefix
/// must fit the vehicle capacity per dimension.
pub fn create_capacity_limit_feature<T: LoadOps>(name: &str, code: ViolationCode) -> GenericResult<Feature> {
    FeatureBuilder::default()
        .with_name(name)
        .with_constraint(CapacityConstraint::<T> { code, phantom: Default::default() })
        .with_priority(ConstraintPriority::Critical)
        .with_state(CapacityState::<T> { phantom: Default::default() })
        .build()
}

struct CapacityConstraint<T: LoadOps> {
    code: ViolationCode,
    phantom: PhantomData<T>,
}

impl<T: LoadOps> FeatureConstraint for CapacityConstraint<T> {
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        match move_ctx {
            MoveContext::Route { route_ctx, job, .. } => self.evaluate_job(route_ctx, job),
            MoveContext::Activity { route_ctx, activity_ctx } => self.evaluate_activity(route_ctx, activity_ctx),
        }
    }
}

impl<T: LoadOps> CapacityConstraint<T> {
    fn evaluate_job(&self, route_ctx: &RouteContext, job: &Job) -> Option<ConstraintViolation> {
        let can_handle = match job {
            Job::Single(job) => {
                self.has_demand_violation(route_ctx, 0, job.dimens.get_demand(), true).is_none()
                    || self
                        .has_demand_violation(
                            route_ctx,
                            route_ctx.route().tour.total().max(1) - 1,
                            job.dimens.get_demand(),
                            true,
                        )
                        .is_none()
            }
            Job::Multi(job) => job.jobs.iter().any(|job| {
                self.has_demand_violation(route_ctx, 0, job.dimens.get_demand(), true).is_none()
            }),
        };

        if can_handle { ConstraintViolation::success() } else { ConstraintViolation::fail(self.code) }
    }

    fn evaluate_activity(
        &self,
        route_ctx: &RouteContext,
        activity_ctx: &ActivityContext<'_>,
    ) -> Option<ConstraintViolation> {
        let demand = get_demand::<T>(activity_ctx.target);

        let violation = if activity_ctx.target.retrieve_job().is_some_and(|job| job.as_multi().is_some()) {
            // multi job has a dynamic demand which may grow and shrink along the route
            self.has_demand_violation(route_ctx, activity_ctx.index, demand, false)
        } else {
            self.has_demand_violation(route_ctx, activity_ctx.index, demand, true)
        };

        violation.map(|stopped| ConstraintViolation { code: self.code, stopped })
    }

    fn has_demand_violation(
        &self,
        route_ctx: &RouteContext,
        pivot_idx: usize,
        demand: Option<&Demand<T>>,
        stopped: bool,
    ) -> Option<bool> {
        let state = route_ctx.state();
        let demand = demand?;

        let capacity: T = if let Some(capacity) = route_ctx.route().actor.vehicle.dimens.get_capacity().copied() {
            capacity
        } else {
            return Some(stopped);
        };

        // check how the static delivery affects max load seen in the past
        if demand.delivery.0.is_not_empty() {
            let past: T = state.get_max_past_capacity_at(pivot_idx).copied().unwrap_or_default();
            if !capacity.can_fit(&(past + demand.delivery.0)) {
                return Some(stopped);
            }
        }

        // check how the static pickup affects max load ahead
        if demand.pickup.0.is_not_empty() {
            let future: T = state.get_max_future_capacity_at(pivot_idx).copied().unwrap_or_default();
            if !capacity.can_fit(&(future + demand.pickup.0)) {
                return Some(false);
            }
        }

        // check dynamic load change
        let change = demand.change();
        if change.is_not_empty() {
            let future: T = state.get_max_future_capacity_at(pivot_idx).copied().unwrap_or_default();
            if !capacity.can_fit(&(future + change)) {
                return Some(false);
            }

            let current: T = state.get_current_capacity_at(pivot_idx).copied().unwrap_or_default();
            if !capacity.can_fit(&(current + change)) {
                return Some(false);
            }
        }

        None
    }
}

struct CapacityState<T: LoadOps> {
    phantom: PhantomData<T>,
}

impl<T: LoadOps> CapacityState<T> {
    fn recalculate_states(&self, route_ctx: &mut RouteContext) {
        let tour_len = route_ctx.route().tour.total();
        if tour_len == 0 {
            return;
        }

        let mut current_capacities = vec![T::default(); tour_len];
        let mut max_past_capacities = vec![T::default(); tour_len];
        let mut max_future_capacities = vec![T::default(); tour_len];

        let route = route_ctx.route();

        // static deliveries are loaded at the route start
        let start_delivery = route
            .tour
            .all_activities()
            .filter_map(get_demand::<T>)
            .fold(T::default(), |acc, demand| acc + demand.delivery.0);

        // determine the actual load at each activity and max load in the past
        let (current, _) = route.tour.all_activities().enumerate().fold(
            (start_delivery, T::default()),
            |(current, max), (activity_idx, activity)| {
                let change = get_demand::<T>(activity).map(|demand| demand.change()).unwrap_or_default();

                let current = current + change;
                let max = max.max_load(current);

                // invariant: cumulative load at any route prefix stays non-negative
                assert!(
                    current.can_fit(&T::default()),
                    "negative cumulative load at activity {activity_idx}: {current:?}"
                );

                current_capacities[activity_idx] = current;
                max_past_capacities[activity_idx] = max;

                (current, max)
            },
        );

        // determine max load ahead for each activity
        (0..tour_len).rev().fold(current, |max, activity_idx| {
            let max = max.max_load(current_capacities[activity_idx]);
            max_future_capacities[activity_idx] = max;

            max
        });

        let state = route_ctx.state_mut();
        state.set_current_capacity_states(current_capacities);
        state.set_max_past_capacity_states(max_past_capacities);
        state.set_max_future_capacity_states(max_future_capacities);
    }
}

impl<T: LoadOps> FeatureState for CapacityState<T> {
    fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, _: &Job) {
        let route_ctx = solution_ctx.routes.get_mut(route_index).unwrap();
        self.accept_route_state(route_ctx);
    }

    fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        self.recalculate_states(route_ctx);
    }

    fn accept_solution_state(&self, solution_ctx: &mut SolutionContext) {
        solution_ctx.routes.iter_mut().filter(|route_ctx| route_ctx.is_stale()).for_each(|route_ctx| {
            self.recalculate_states(route_ctx);
        })
    }
}

fn get_demand<T: LoadOps>(activity: &Activity) -> Option<&Demand<T>> {
    activity.job.as_ref().and_then(|single| single.dimens.get_demand())
}
