use crate::construction::heuristics::*;
use crate::models::solution::Registry;
use crate::models::{Problem, Solution};
use crate::utils::Environment;
use std::collections::HashMap;
use std::sync::Arc;

/// Creates an insertion context for the given problem with all jobs unassigned.
pub fn create_insertion_context(problem: Arc<Problem>, environment: Arc<Environment>) -> InsertionContext {
    let mut ctx = InsertionContext {
        solution: SolutionContext {
            required: problem.jobs.all().collect(),
            ignored: vec![],
            unassigned: Default::default(),
            locked: Default::default(),
            routes: Default::default(),
            registry: RegistryContext::new(&problem.goal, Registry::new(&problem.fleet)),
            state: Default::default(),
        },
        problem,
        environment,
    };

    ctx.problem.goal.clone().accept_solution_state(&mut ctx.solution);

    ctx
}

/// Creates an insertion context from an existing solution: routes are deep copied, their
/// actors are locked in a fresh registry and all remaining jobs become required again.
pub fn create_insertion_context_from_solution(
    problem: Arc<Problem>,
    solution: Solution,
    environment: Arc<Environment>,
) -> InsertionContext {
    let mut registry = Registry::new(&problem.fleet);
    solution.routes.iter().for_each(|route| {
        assert!(registry.use_actor(&route.actor), "solution has multiple routes with the same actor");
    });
    let registry = RegistryContext::new(&problem.goal, registry);

    let routes: Vec<_> = solution
        .routes
        .iter()
        .map(|route| RouteContext::new_with_state(route.deep_copy(), Default::default()))
        .collect();

    let assigned: Vec<_> = routes.iter().flat_map(|route_ctx| route_ctx.route().tour.jobs()).collect();
    let unassigned: HashMap<_, _> = solution.unassigned.iter().map(|(job, code)| (job.clone(), code.clone())).collect();
    let required = problem
        .jobs
        .all()
        .filter(|job| !assigned.contains(job) && !unassigned.contains_key(job))
        .collect();

    InsertionContext {
        problem,
        solution: SolutionContext {
            required,
            ignored: vec![],
            unassigned,
            locked: Default::default(),
            routes,
            registry,
            state: Default::default(),
        },
        environment,
    }
}
