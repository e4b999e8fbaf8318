#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/selectors_test.rs"]
mod selectors_test;

use crate::construction::heuristics::*;
use crate::models::common::Cost;
use crate::models::problem::Job;
use crate::utils::{Either, Noise, map_reduce};
use rand::prelude::SliceRandom;

/// On each insertion step, selects a list of routes where jobs can be inserted.
/// It is up to implementation to decide whether the list consists of all possible routes
/// or just some subset.
pub trait RouteSelector {
    /// Returns routes for job insertion.
    fn select(&self, insertion_ctx: &mut InsertionContext, jobs: &[Job]) -> Vec<RouteContext>;
}

/// Returns a list of all possible routes for insertion, including "new route" candidates
/// from the registry, one per distinct actor group.
#[derive(Default)]
pub struct AllRouteSelector {}

impl RouteSelector for AllRouteSelector {
    fn select(&self, insertion_ctx: &mut InsertionContext, _jobs: &[Job]) -> Vec<RouteContext> {
        insertion_ctx.solution.routes.shuffle(&mut insertion_ctx.environment.random.get_rng());

        insertion_ctx
            .solution
            .routes
            .iter()
            .map(|route_ctx| route_ctx.deep_copy())
            .chain(insertion_ctx.solution.registry.next_route().map(|route_ctx| route_ctx.deep_copy()))
            .collect()
    }
}

/// On each insertion step, selects a list of jobs to be inserted.
/// It is up to implementation to decide whether the list consists of all jobs or some subset.
pub trait JobSelector {
    /// Returns a portion of all unassigned jobs.
    fn select(&self, insertion_ctx: &mut InsertionContext) -> Vec<Job>;
}

/// Returns a shuffled list of all jobs to be inserted.
#[derive(Default)]
pub struct AllJobSelector {}

impl JobSelector for AllJobSelector {
    fn select(&self, insertion_ctx: &mut InsertionContext) -> Vec<Job> {
        insertion_ctx.solution.required.shuffle(&mut insertion_ctx.environment.random.get_rng());

        insertion_ctx.solution.required.clone()
    }
}

/// Evaluates insertion of jobs into the given collection of routes.
pub trait InsertionEvaluator {
    /// Evaluates insertion of a single job into the given collection of routes.
    fn evaluate_job(
        &self,
        insertion_ctx: &InsertionContext,
        job: &Job,
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult;

    /// Evaluates insertion of a job collection into the given collection of routes and
    /// returns the most promising insertion.
    fn evaluate_all(
        &self,
        insertion_ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult;
}

/// Evaluates job insertion in routes at the given position.
pub struct PositionInsertionEvaluator {
    insertion_position: InsertionPosition,
}

impl Default for PositionInsertionEvaluator {
    fn default() -> Self {
        Self::new(InsertionPosition::Any)
    }
}

impl PositionInsertionEvaluator {
    /// Creates a new instance of `PositionInsertionEvaluator`.
    pub fn new(insertion_position: InsertionPosition) -> Self {
        Self { insertion_position }
    }

    /// Evaluates all (job, route) combinations preserving the results for each of them.
    pub(crate) fn evaluate_and_collect_all(
        &self,
        insertion_ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> Vec<InsertionResult> {
        let eval_pair = |job: &Job, route_ctx: &RouteContext| {
            let eval_ctx = EvaluationContext { goal: &insertion_ctx.problem.goal, job, result_selector };
            eval_job_insertion_in_route(
                insertion_ctx,
                &eval_ctx,
                route_ctx,
                self.insertion_position,
                InsertionResult::make_failure(),
            )
        };

        if Self::is_parallel_scan(insertion_ctx) {
            parallel_collect_pairs(jobs, routes, &eval_pair)
        } else {
            jobs.iter().flat_map(|job| routes.iter().map(move |route_ctx| (job, route_ctx)))
                .map(|(job, route_ctx)| eval_pair(job, route_ctx))
                .collect()
        }
    }

    fn is_parallel_scan(insertion_ctx: &InsertionContext) -> bool {
        insertion_ctx.environment.parallelism.is_enabled()
    }
}

impl InsertionEvaluator for PositionInsertionEvaluator {
    fn evaluate_job(
        &self,
        insertion_ctx: &InsertionContext,
        job: &Job,
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult {
        let eval_ctx = EvaluationContext { goal: &insertion_ctx.problem.goal, job, result_selector };

        routes.iter().fold(InsertionResult::make_failure(), |alternative, route_ctx| {
            eval_job_insertion_in_route(insertion_ctx, &eval_ctx, route_ctx, self.insertion_position, alternative)
        })
    }

    fn evaluate_all(
        &self,
        insertion_ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult {
        if Self::is_parallel_scan(insertion_ctx) {
            // NOTE: the parallel scan only reads shared route and state data; the global
            // minimum is reduced on the calling thread before any mutation happens
            map_reduce(
                jobs,
                |job| self.evaluate_job(insertion_ctx, job, routes, result_selector),
                InsertionResult::make_failure,
                |a, b| result_selector.select_insertion(insertion_ctx, a, b),
            )
        } else {
            jobs.iter().fold(InsertionResult::make_failure(), |alternative, job| {
                let candidate = self.evaluate_job(insertion_ctx, job, routes, result_selector);
                result_selector.select_insertion(insertion_ctx, alternative, candidate)
            })
        }
    }
}

/// Insertion result selector.
pub trait ResultSelector {
    /// Selects one insertion result from two to promote as the best.
    fn select_insertion(
        &self,
        insertion_ctx: &InsertionContext,
        left: InsertionResult,
        right: InsertionResult,
    ) -> InsertionResult;

    /// Selects one cost of two to promote as the best.
    fn select_cost(&self, left: Cost, right: Cost) -> Either<Cost, Cost> {
        if left < right { Either::Left(left) } else { Either::Right(right) }
    }
}

/// Selects the best result.
#[derive(Default)]
pub struct BestResultSelector {}

impl ResultSelector for BestResultSelector {
    fn select_insertion(&self, _: &InsertionContext, left: InsertionResult, right: InsertionResult) -> InsertionResult {
        InsertionResult::choose_best_result(left, right)
    }
}

/// Selects results with noise applied to their costs: used to perturb the search.
pub struct NoiseResultSelector {
    noise: Noise,
}

impl NoiseResultSelector {
    /// Creates a new instance of `NoiseResultSelector`.
    pub fn new(noise: Noise) -> Self {
        Self { noise }
    }
}

impl ResultSelector for NoiseResultSelector {
    fn select_insertion(&self, _: &InsertionContext, left: InsertionResult, right: InsertionResult) -> InsertionResult {
        match (&left, &right) {
            (InsertionResult::Success(_), InsertionResult::Failure(_)) => left,
            (InsertionResult::Failure(_), InsertionResult::Success(_)) => right,
            (InsertionResult::Success(left_success), InsertionResult::Success(right_success)) => {
                let left_cost = self.noise.generate(left_success.cost);
                let right_cost = self.noise.generate(right_success.cost);

                if left_cost < right_cost { left } else { right }
            }
            _ => right,
        }
    }

    fn select_cost(&self, left: Cost, right: Cost) -> Either<Cost, Cost> {
        let left = self.noise.generate(left);
        let right = self.noise.generate(right);

        if left < right { Either::Left(left) } else { Either::Right(right) }
    }
}

fn parallel_collect_pairs(
    jobs: &[Job],
    routes: &[RouteContext],
    eval_pair: &(dyn Fn(&Job, &RouteContext) -> InsertionResult + Send + Sync),
) -> Vec<InsertionResult> {
    use crate::utils::parallel_collect;

    let pairs: Vec<(&Job, &RouteContext)> =
        jobs.iter().flat_map(|job| routes.iter().map(move |route_ctx| (job, route_ctx))).collect();

    parallel_collect(&pairs, |(job, route_ctx)| eval_pair(job, route_ctx))
}
