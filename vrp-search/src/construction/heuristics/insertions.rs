#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/insertions_test.rs"]
mod insertions_test;

use crate::construction::heuristics::*;
use crate::models::ViolationCode;
use crate::models::common::Cost;
use crate::models::problem::Job;
use crate::models::solution::Activity;

/// Specifies insertion result variant.
pub enum InsertionResult {
    /// Successful insertion result.
    Success(InsertionSuccess),
    /// Insertion failure.
    Failure(InsertionFailure),
}

/// Specifies insertion success result needed to insert the job into the tour.
pub struct InsertionSuccess {
    /// Specifies the delta cost change for the insertion.
    pub cost: Cost,

    /// Original job to be inserted.
    pub job: Job,

    /// Specifies activities within the index where they have to be inserted.
    pub activities: Vec<(Activity, usize)>,

    /// Specifies the route context where insertion happens.
    pub context: RouteContext,
}

/// Specifies insertion failure.
pub struct InsertionFailure {
    /// Failed constraint code.
    pub constraint: ViolationCode,
    /// A flag which signalizes that the algorithm should stop trying to insert at next positions.
    pub stopped: bool,
    /// Original job failed to be inserted.
    pub job: Option<Job>,
}

impl InsertionResult {
    /// Creates a result which represents insertion success.
    pub fn make_success(cost: Cost, job: Job, activities: Vec<(Activity, usize)>, route_ctx: &RouteContext) -> Self {
        Self::Success(InsertionSuccess { cost, job, activities, context: route_ctx.deep_copy() })
    }

    /// Creates a result which represents insertion failure without any reason.
    pub fn make_failure() -> Self {
        Self::make_failure_with_code(ViolationCode::unknown(), false, None)
    }

    /// Creates a result which represents insertion failure with given code.
    pub fn make_failure_with_code(code: ViolationCode, stopped: bool, job: Option<Job>) -> Self {
        Self::Failure(InsertionFailure { constraint: code, stopped, job })
    }

    /// Compares two insertion results and returns the cheapest by cost.
    pub fn choose_best_result(left: Self, right: Self) -> Self {
        match (&left, &right) {
            (Self::Success(_), Self::Failure(_)) => left,
            (Self::Failure(_), Self::Success(_)) => right,
            (Self::Success(lhs), Self::Success(rhs)) => {
                if lhs.cost > rhs.cost {
                    right
                } else {
                    left
                }
            }
            (Self::Failure(_), Self::Failure(rhs)) => {
                if rhs.constraint.is_unknown() {
                    left
                } else {
                    right
                }
            }
        }
    }

    /// Returns insertion result as a success reference.
    pub fn as_success(&self) -> Option<&InsertionSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Returns insertion result as a success value.
    pub fn into_success(self) -> Option<InsertionSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }
}

/// Implements a generalized insertion heuristic.
/// Using [`JobSelector`], [`RouteSelector`], and [`ResultSelector`] it tries to identify the
/// next job to be inserted until there are no jobs left or it is not possible to insert due
/// to constraint limitations.
pub struct InsertionHeuristic {
    insertion_evaluator: Box<dyn InsertionEvaluator + Send + Sync>,
}

impl Default for InsertionHeuristic {
    fn default() -> Self {
        InsertionHeuristic::new(Box::new(PositionInsertionEvaluator::default()))
    }
}

impl InsertionHeuristic {
    /// Creates a new instance of `InsertionHeuristic`.
    pub fn new(insertion_evaluator: Box<dyn InsertionEvaluator + Send + Sync>) -> Self {
        Self { insertion_evaluator }
    }

    /// Runs the common insertion heuristic algorithm using given selector specializations.
    pub fn process(
        &self,
        insertion_ctx: InsertionContext,
        job_selector: &(dyn JobSelector + Send + Sync),
        route_selector: &(dyn RouteSelector + Send + Sync),
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionContext {
        let mut insertion_ctx = insertion_ctx;

        prepare_insertion_ctx(&mut insertion_ctx);

        while !insertion_ctx.solution.required.is_empty()
            && !insertion_ctx.environment.quota.as_ref().is_some_and(|q| q.is_reached())
        {
            let jobs = job_selector.select(&mut insertion_ctx);
            let routes = route_selector.select(&mut insertion_ctx, jobs.as_slice());

            let result =
                self.insertion_evaluator.evaluate_all(&insertion_ctx, jobs.as_slice(), routes.as_slice(), result_selector);

            match result {
                InsertionResult::Success(success) => {
                    apply_insertion_success(&mut insertion_ctx, success);
                }
                InsertionResult::Failure(failure) => {
                    apply_insertion_failure(&mut insertion_ctx, failure);
                }
            }
        }

        finalize_insertion_ctx(&mut insertion_ctx);

        insertion_ctx
    }
}

pub(crate) fn prepare_insertion_ctx(insertion_ctx: &mut InsertionContext) {
    insertion_ctx.solution.required.extend(insertion_ctx.solution.unassigned.keys().cloned());
    insertion_ctx.problem.goal.clone().accept_solution_state(&mut insertion_ctx.solution);
}

pub(crate) fn finalize_insertion_ctx(insertion_ctx: &mut InsertionContext) {
    finalize_unassigned(insertion_ctx, UnassignmentInfo::Unknown);

    insertion_ctx.problem.goal.clone().accept_solution_state(&mut insertion_ctx.solution);
}

/// Applies the previously evaluated insertion success to the solution: materializes a new
/// route if needed (locking its actor), inserts activities at their positions and runs the
/// state propagation for the affected route. This is the only place where routes mutate.
pub(crate) fn apply_insertion_success(insertion_ctx: &mut InsertionContext, success: InsertionSuccess) {
    let is_new_route = insertion_ctx.solution.registry.use_route(&success.context);
    let route_index = insertion_ctx.solution.routes.iter().position(|ctx| ctx == &success.context).unwrap_or_else(|| {
        assert!(is_new_route);
        insertion_ctx.solution.routes.push(success.context.deep_copy());
        insertion_ctx.solution.routes.len() - 1
    });

    let route_ctx = insertion_ctx.solution.routes.get_mut(route_index).unwrap();
    let route = route_ctx.route_mut();
    success.activities.into_iter().for_each(|(activity, index)| {
        route.tour.insert_at(activity, index + 1);
    });

    let job = success.job;
    insertion_ctx.solution.required.retain(|assigned| *assigned != job);
    insertion_ctx.solution.unassigned.remove(&job);
    insertion_ctx.problem.goal.clone().accept_insertion(&mut insertion_ctx.solution, route_index, &job);
}

fn apply_insertion_failure(insertion_ctx: &mut InsertionContext, failure: InsertionFailure) {
    // NOTE this happens when the evaluator fails to insert jobs due to lack of routes in the registry
    let no_routes_available = failure.job.is_none();

    if let Some(job) = failure.job {
        insertion_ctx.solution.unassigned.insert(job.clone(), UnassignmentInfo::Simple(failure.constraint));
        insertion_ctx.solution.required.retain(|other| *other != job);
    }

    if no_routes_available {
        finalize_unassigned(insertion_ctx, UnassignmentInfo::Simple(failure.constraint));
    }
}

fn finalize_unassigned(insertion_ctx: &mut InsertionContext, code: UnassignmentInfo) {
    let unassigned = &insertion_ctx.solution.unassigned;
    insertion_ctx.solution.required.retain(|job| !unassigned.contains_key(job));
    insertion_ctx.solution.unassigned.extend(insertion_ctx.solution.required.drain(0..).map(|job| (job, code.clone())));
}
