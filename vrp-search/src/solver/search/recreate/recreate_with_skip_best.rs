use super::*;
use crate::models::problem::Job;

/// A recreate method which skips the best job insertion and takes the n-th best instead,
/// adding diversification to the construction phase.
pub struct RecreateWithSkipBest {
    recreate: ConfigurableRecreate,
}

impl RecreateWithSkipBest {
    /// Creates a new instance of `RecreateWithSkipBest`. The actual skip amount is drawn
    /// uniformly from `[min, max]` on each insertion step.
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            recreate: ConfigurableRecreate::new(
                Box::<AllJobSelector>::default(),
                Box::<AllRouteSelector>::default(),
                Box::<BestResultSelector>::default(),
                InsertionHeuristic::new(Box::new(SkipBestInsertionEvaluator::new(min, max))),
            ),
        }
    }
}

impl Recreate for RecreateWithSkipBest {
    fn run(&self, refinement_ctx: &RefinementContext, insertion_ctx: InsertionContext) -> InsertionContext {
        self.recreate.run(refinement_ctx, insertion_ctx)
    }
}

struct SkipBestInsertionEvaluator {
    min: usize,
    max: usize,
    fallback_evaluator: PositionInsertionEvaluator,
}

impl SkipBestInsertionEvaluator {
    pub fn new(min: usize, max: usize) -> Self {
        assert!(min > 0);
        assert!(min <= max);

        Self { min, max, fallback_evaluator: PositionInsertionEvaluator::default() }
    }
}

impl InsertionEvaluator for SkipBestInsertionEvaluator {
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
        let skip_index = insertion_ctx.environment.random.uniform_int(self.min as i32, self.max as i32) as usize;

        // NOTE no need to proceed, fallback to the more performant reducer
        if skip_index == 1 || jobs.len() == 1 {
            return self.fallback_evaluator.evaluate_all(insertion_ctx, jobs, routes, result_selector);
        }

        let mut results: Vec<InsertionSuccess> = jobs
            .iter()
            .map(|job| self.fallback_evaluator.evaluate_job(insertion_ctx, job, routes, result_selector))
            .filter_map(InsertionResult::into_success)
            .collect();

        if results.is_empty() {
            return self.fallback_evaluator.evaluate_all(insertion_ctx, jobs, routes, result_selector);
        }

        results.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        let skip_index = (skip_index - 1).min(results.len() - 1);

        InsertionResult::Success(results.swap_remove(skip_index))
    }
}
