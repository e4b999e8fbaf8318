#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/recreate/recreate_with_regret_test.rs"]
mod recreate_with_regret_test;

use super::*;
use crate::models::problem::{Actor, Job};
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// A recreate strategy which computes the difference in cost of inserting a job in its
/// best and kth best position ("regret"), then inserts the job with the max difference in
/// its least cost position first: deferring a high regret job risks losing its only good
/// slot.
pub struct RecreateWithRegret {
    recreate: ConfigurableRecreate,
}

impl RecreateWithRegret {
    /// Creates a new instance of `RecreateWithRegret`. The actual regret index is drawn
    /// uniformly from `[min, max]` on each insertion step.
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            recreate: ConfigurableRecreate::new(
                Box::<AllJobSelector>::default(),
                Box::<AllRouteSelector>::default(),
                Box::<BestResultSelector>::default(),
                InsertionHeuristic::new(Box::new(RegretInsertionEvaluator::new(min, max))),
            ),
        }
    }
}

impl Recreate for RecreateWithRegret {
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext {
        self.recreate.run(refinement_ctx, insertion_ctx)
    }
}

struct RegretInsertionEvaluator {
    min: usize,
    max: usize,
    fallback_evaluator: PositionInsertionEvaluator,
}

impl RegretInsertionEvaluator {
    pub fn new(min: usize, max: usize) -> Self {
        assert!(min > 0);
        assert!(min <= max);

        Self { min, max, fallback_evaluator: PositionInsertionEvaluator::default() }
    }
}

impl InsertionEvaluator for RegretInsertionEvaluator {
    fn evaluate_job(
        &self,
        insertion_ctx: &InsertionContext,
        job: &Job,
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult {
        self.fallback_evaluator.evaluate_job(insertion_ctx, job, routes, result_selector)
    }

    fn evaluate_all(
        &self,
        insertion_ctx: &InsertionContext,
        jobs: &[Job],
        routes: &[RouteContext],
        result_selector: &(dyn ResultSelector + Send + Sync),
    ) -> InsertionResult {
        let regret_index =
            insertion_ctx.environment.random.uniform_int(self.min as i32, self.max as i32) as usize;

        // NOTE no need to proceed with regret, fallback to the more performant reducer
        if regret_index == 1 || jobs.len() == 1 || routes.len() < 2 {
            return self.fallback_evaluator.evaluate_all(insertion_ctx, jobs, routes, result_selector);
        }

        let mut job_successes: HashMap<Job, Vec<InsertionSuccess>> = HashMap::new();
        self.fallback_evaluator
            .evaluate_and_collect_all(insertion_ctx, jobs, routes, result_selector)
            .into_iter()
            .filter_map(InsertionResult::into_success)
            .for_each(|success| job_successes.entry(success.job.clone()).or_default().push(success));

        let mut regrets = job_successes
            .into_values()
            .filter_map(|mut successes| {
                successes.sort_by(|a, b| a.cost.total_cmp(&b.cost));

                // take at most one success per route: regret compares route alternatives,
                // not positions within the same route
                let mut seen_actors: HashSet<Arc<Actor>> = HashSet::new();
                let mut alternatives: Vec<InsertionSuccess> = successes
                    .into_iter()
                    .filter(|success| seen_actors.insert(success.context.route().actor.clone()))
                    .collect();

                // the k-th best alternative is needed to compute the regret value
                if alternatives.len() >= regret_index {
                    let regret = alternatives[regret_index - 1].cost - alternatives[0].cost;
                    Some((regret, alternatives.swap_remove(0)))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        if !regrets.is_empty() {
            regrets.sort_by(|(a, _), (b, _)| b.total_cmp(a));

            let (_, best_success) = regrets.swap_remove(0);

            InsertionResult::Success(best_success)
        } else {
            self.fallback_evaluator.evaluate_all(insertion_ctx, jobs, routes, result_selector)
        }
    }
}
