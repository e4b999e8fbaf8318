//! The solver module contains the metaheuristic driver: named weighted search strategies
//! composed of ruin and recreate operators, solution selection, acceptance criteria,
//! termination checks and the iteration loop itself.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

use crate::construction::heuristics::InsertionContext;
use crate::models::problem::Job;
use crate::models::{Problem, Solution};
use crate::utils::{Environment, GenericError, GenericResult, Timer};
use std::collections::HashSet;
use std::sync::Arc;

pub mod acceptance;
pub mod search;
pub mod termination;

pub use self::acceptance::{GreedyAcceptance, SolutionAcceptor, ThresholdAcceptance};
pub use self::search::{Recreate, Ruin};
pub use self::termination::{CompositeTermination, MaxGeneration, MaxTime, NoImprovement, Termination};

use self::search::{NeighbourRemoval, RandomJobRemoval, RandomRouteRemoval, WorstJobRemoval};
use self::search::{RecreateWithCheapest, RecreateWithPerturbation, RecreateWithRegret, RecreateWithSkipBest};

/// Keeps track of the search progress.
#[derive(Clone, Default)]
pub struct SearchStatistics {
    /// A number of the current generation (iteration).
    pub generation: usize,
    /// A generation at which the best known solution was improved the last time.
    pub last_improvement: usize,
}

/// A bounded memory of accepted solutions ordered by their fitness: the working set of
/// the search. Rejected solutions are discarded.
pub struct SolutionMemory {
    solutions: Vec<InsertionContext>,
    max_size: usize,
}

impl SolutionMemory {
    /// Creates a new instance of `SolutionMemory` with the given capacity.
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0);
        Self { solutions: Vec::with_capacity(max_size + 1), max_size }
    }

    /// Adds a solution to the memory keeping it sorted and bounded.
    /// Returns true if the solution became the new best known one.
    pub fn add(&mut self, insertion_ctx: InsertionContext) -> bool {
        let fitness = insertion_ctx.get_fitness();
        let is_improvement = self.best().map_or(true, |best| fitness < best.get_fitness());

        let position = self
            .solutions
            .iter()
            .position(|other| fitness < other.get_fitness())
            .unwrap_or(self.solutions.len());
        self.solutions.insert(position, insertion_ctx);
        self.solutions.truncate(self.max_size);

        is_improvement
    }

    /// Returns the best known solution.
    pub fn best(&self) -> Option<&InsertionContext> {
        self.solutions.first()
    }

    /// Returns a solution at the given position.
    pub fn get(&self, index: usize) -> Option<&InsertionContext> {
        self.solutions.get(index)
    }

    /// Returns amount of solutions in memory.
    pub fn size(&self) -> usize {
        self.solutions.len()
    }

    fn take_best(mut self) -> Option<InsertionContext> {
        if self.solutions.is_empty() { None } else { Some(self.solutions.swap_remove(0)) }
    }
}

/// Contains the data needed by search operators to explore the solution space.
pub struct RefinementContext {
    /// Original problem definition.
    pub problem: Arc<Problem>,
    /// A bounded memory of accepted solutions.
    pub memory: SolutionMemory,
    /// An environment with the seeded random source.
    pub environment: Arc<Environment>,
    /// Keeps track of the search progress.
    pub statistics: SearchStatistics,
}

impl RefinementContext {
    /// Creates a new instance of `RefinementContext`.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>, memory_size: usize) -> Self {
        Self { problem, memory: SolutionMemory::new(memory_size), environment, statistics: Default::default() }
    }
}

/// Selects a solution from the memory as the base for the next iteration.
pub trait SolutionSelector {
    /// Returns a solution from the memory.
    fn select<'a>(&self, refinement_ctx: &'a RefinementContext) -> Option<&'a InsertionContext>;
}

/// Selects the best known solution.
#[derive(Default)]
pub struct SelectBest {}

impl SolutionSelector for SelectBest {
    fn select<'a>(&self, refinement_ctx: &'a RefinementContext) -> Option<&'a InsertionContext> {
        refinement_ctx.memory.best()
    }
}

/// Selects a random solution from the memory.
#[derive(Default)]
pub struct SelectRandom {}

impl SolutionSelector for SelectRandom {
    fn select<'a>(&self, refinement_ctx: &'a RefinementContext) -> Option<&'a InsertionContext> {
        let size = refinement_ctx.memory.size();
        if size == 0 {
            return None;
        }

        let index = refinement_ctx.environment.random.uniform_int(0, (size - 1) as i32) as usize;
        refinement_ctx.memory.get(index)
    }
}

/// A named, weighted search strategy: an ordered module pair (ruin then recreate) applied
/// to a solution picked by its selector, with its own acceptance criterion.
pub struct SearchStrategy {
    name: String,
    weight: usize,
    selector: Box<dyn SolutionSelector + Send + Sync>,
    acceptor: Box<dyn SolutionAcceptor + Send + Sync>,
    ruin: Arc<dyn Ruin + Send + Sync>,
    recreate: Arc<dyn Recreate + Send + Sync>,
}

impl SearchStrategy {
    /// Creates a new instance of `SearchStrategy` validating its configuration.
    pub fn new(
        name: &str,
        weight: usize,
        selector: Box<dyn SolutionSelector + Send + Sync>,
        acceptor: Box<dyn SolutionAcceptor + Send + Sync>,
        ruin: Arc<dyn Ruin + Send + Sync>,
        recreate: Arc<dyn Recreate + Send + Sync>,
    ) -> GenericResult<Self> {
        if name.is_empty() {
            return Err(GenericError::from("strategy name must not be empty"));
        }

        if weight == 0 {
            return Err(GenericError::from(format!("strategy '{name}' must have a positive weight")));
        }

        Ok(Self { name: name.to_string(), weight, selector, acceptor, ruin, recreate })
    }

    /// Returns the name of the strategy.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Holds named weighted search strategies and picks one of them per iteration via
/// cumulative weight sampling from the shared seeded random source.
pub struct SearchStrategyManager {
    strategies: Vec<SearchStrategy>,
    weights: Vec<usize>,
}

impl SearchStrategyManager {
    /// Creates a new instance of `SearchStrategyManager` validating its configuration.
    pub fn new(strategies: Vec<SearchStrategy>) -> GenericResult<Self> {
        if strategies.is_empty() {
            return Err(GenericError::from("at least one search strategy must be specified"));
        }

        let weights = strategies.iter().map(|strategy| strategy.weight).collect();

        Ok(Self { strategies, weights })
    }

    /// Picks a random strategy respecting the weights.
    pub fn pick(&self, refinement_ctx: &RefinementContext) -> &SearchStrategy {
        let index = refinement_ctx.environment.random.weighted(self.weights.as_slice());

        &self.strategies[index]
    }
}

/// An ordered collection of plain listener functions notified by the driver on search
/// events. The core only dispatches these hooks, it never depends on them.
#[derive(Clone, Default)]
pub struct SearchListeners {
    iteration_start: Vec<Arc<dyn Fn(usize) + Send + Sync>>,
    ruin_start: Vec<Arc<dyn Fn(&InsertionContext) + Send + Sync>>,
    ruin_end: Vec<Arc<dyn Fn(&InsertionContext) + Send + Sync>>,
    insertion_start: Vec<Arc<dyn Fn(&InsertionContext) + Send + Sync>>,
    insertion_end: Vec<Arc<dyn Fn(&InsertionContext) + Send + Sync>>,
    job_removed: Vec<Arc<dyn Fn(&Job) + Send + Sync>>,
    job_inserted: Vec<Arc<dyn Fn(&Job) + Send + Sync>>,
}

impl SearchListeners {
    /// Adds an iteration start listener.
    pub fn on_iteration_start<F: Fn(usize) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.iteration_start.push(Arc::new(func));
        self
    }

    /// Adds a ruin start listener.
    pub fn on_ruin_start<F: Fn(&InsertionContext) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.ruin_start.push(Arc::new(func));
        self
    }

    /// Adds a ruin end listener.
    pub fn on_ruin_end<F: Fn(&InsertionContext) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.ruin_end.push(Arc::new(func));
        self
    }

    /// Adds an insertion start listener.
    pub fn on_insertion_start<F: Fn(&InsertionContext) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.insertion_start.push(Arc::new(func));
        self
    }

    /// Adds an insertion end listener.
    pub fn on_insertion_end<F: Fn(&InsertionContext) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.insertion_end.push(Arc::new(func));
        self
    }

    /// Adds a job removed listener.
    pub fn on_job_removed<F: Fn(&Job) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.job_removed.push(Arc::new(func));
        self
    }

    /// Adds a job inserted listener.
    pub fn on_job_inserted<F: Fn(&Job) + Send + Sync + 'static>(&mut self, func: F) -> &mut Self {
        self.job_inserted.push(Arc::new(func));
        self
    }

    fn notify_iteration_start(&self, generation: usize) {
        self.iteration_start.iter().for_each(|func| func(generation));
    }

    fn notify_ruin_start(&self, insertion_ctx: &InsertionContext) {
        self.ruin_start.iter().for_each(|func| func(insertion_ctx));
    }

    fn notify_ruin_end(&self, insertion_ctx: &InsertionContext) {
        self.ruin_end.iter().for_each(|func| func(insertion_ctx));
    }

    fn notify_insertion_start(&self, insertion_ctx: &InsertionContext) {
        self.insertion_start.iter().for_each(|func| func(insertion_ctx));
    }

    fn notify_insertion_end(&self, insertion_ctx: &InsertionContext) {
        self.insertion_end.iter().for_each(|func| func(insertion_ctx));
    }

    fn notify_job_removed(&self, job: &Job) {
        self.job_removed.iter().for_each(|func| func(job));
    }

    fn notify_job_inserted(&self, job: &Job) {
        self.job_inserted.iter().for_each(|func| func(job));
    }
}

/// A metaheuristic driver: runs the SELECT - RUIN - RECREATE - EVALUATE - ACCEPT loop
/// until a termination criterion is met and returns the best discovered solution.
pub struct Solver {
    problem: Arc<Problem>,
    environment: Arc<Environment>,
    strategies: SearchStrategyManager,
    termination: Box<dyn Termination + Send + Sync>,
    initial_recreate: Arc<dyn Recreate + Send + Sync>,
    listeners: SearchListeners,
    memory_size: usize,
}

impl Solver {
    /// Solves the problem and returns the best solution found, possibly with unassigned
    /// jobs. Fails only on configuration errors before the first iteration runs.
    pub fn solve(self) -> GenericResult<Solution> {
        let timer = Timer::start();
        let logger = self.environment.logger.clone();

        let mut refinement_ctx = RefinementContext::new(self.problem.clone(), self.environment.clone(), self.memory_size);

        // build an initial solution using the plain construction heuristic
        let insertion_ctx = InsertionContext::new(self.problem.clone(), self.environment.clone());
        self.listeners.notify_insertion_start(&insertion_ctx);
        let insertion_ctx = self.initial_recreate.run(&refinement_ctx, insertion_ctx);
        self.listeners.notify_insertion_end(&insertion_ctx);

        (logger)(&format!(
            "created initial solution in {}ms, fitness: {:.2}",
            timer.elapsed_millis(),
            insertion_ctx.get_fitness()
        ));
        refinement_ctx.memory.add(insertion_ctx);

        while !self.termination.is_termination(&refinement_ctx) && !self.is_quota_reached() {
            self.listeners.notify_iteration_start(refinement_ctx.statistics.generation);

            let strategy = self.strategies.pick(&refinement_ctx);

            let insertion_ctx = strategy
                .selector
                .select(&refinement_ctx)
                .ok_or_else(|| GenericError::from("no solution in memory"))?
                .deep_copy();

            self.listeners.notify_ruin_start(&insertion_ctx);
            let mut insertion_ctx = strategy.ruin.run(&refinement_ctx, insertion_ctx);
            insertion_ctx.restore();
            self.listeners.notify_ruin_end(&insertion_ctx);

            let removed: Vec<Job> = insertion_ctx.solution.required.clone();
            removed.iter().for_each(|job| self.listeners.notify_job_removed(job));

            self.listeners.notify_insertion_start(&insertion_ctx);
            let insertion_ctx = strategy.recreate.run(&refinement_ctx, insertion_ctx);
            self.listeners.notify_insertion_end(&insertion_ctx);

            let unassigned: HashSet<Job> = insertion_ctx.solution.unassigned.keys().cloned().collect();
            removed
                .iter()
                .filter(|job| !unassigned.contains(job))
                .for_each(|job| self.listeners.notify_job_inserted(job));

            if strategy.acceptor.is_accepted(&refinement_ctx, &insertion_ctx) {
                let fitness = insertion_ctx.get_fitness();
                let is_improvement = refinement_ctx.memory.add(insertion_ctx);

                if is_improvement {
                    refinement_ctx.statistics.last_improvement = refinement_ctx.statistics.generation;
                    (logger)(&format!(
                        "[{}s] generation {}: strategy '{}' improved best known fitness to {:.2}",
                        timer.elapsed_secs(),
                        refinement_ctx.statistics.generation,
                        strategy.name(),
                        fitness
                    ));
                }
            }

            refinement_ctx.statistics.generation += 1;
        }

        let generations = refinement_ctx.statistics.generation;
        let best = refinement_ctx
            .memory
            .take_best()
            .ok_or_else(|| GenericError::from("no solution was found"))?;

        (logger)(&format!(
            "stopped after {} generations in {}ms, best fitness: {:.2}, unassigned jobs: {}",
            generations,
            timer.elapsed_millis(),
            best.get_fitness(),
            best.solution.unassigned.len()
        ));

        Ok(best.into())
    }

    fn is_quota_reached(&self) -> bool {
        self.environment.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }
}

/// Provides a way to configure and build a [`Solver`] instance from typed arguments only:
/// all parsing of external configuration formats stays outside of the engine.
pub struct SolverBuilder {
    problem: Arc<Problem>,
    environment: Arc<Environment>,
    strategies: Option<SearchStrategyManager>,
    termination: Option<Box<dyn Termination + Send + Sync>>,
    initial_recreate: Option<Arc<dyn Recreate + Send + Sync>>,
    listeners: SearchListeners,
    memory_size: usize,
}

impl SolverBuilder {
    /// Creates a new instance of `SolverBuilder`.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>) -> Self {
        Self {
            problem,
            environment,
            strategies: None,
            termination: None,
            initial_recreate: None,
            listeners: Default::default(),
            memory_size: 4,
        }
    }

    /// Sets search strategies to be used.
    pub fn with_strategies(mut self, strategies: SearchStrategyManager) -> Self {
        self.strategies = Some(strategies);
        self
    }

    /// Sets the termination criterion. Default is 3000 generations.
    pub fn with_termination(mut self, termination: Box<dyn Termination + Send + Sync>) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Sets a recreate method used to build the initial solution. Default is the cheapest
    /// insertion.
    pub fn with_initial_recreate(mut self, recreate: Arc<dyn Recreate + Send + Sync>) -> Self {
        self.initial_recreate = Some(recreate);
        self
    }

    /// Sets search listeners.
    pub fn with_listeners(mut self, listeners: SearchListeners) -> Self {
        self.listeners = listeners;
        self
    }

    /// Sets the size of the accepted solutions memory. Default is 4.
    pub fn with_memory_size(mut self, memory_size: usize) -> Self {
        self.memory_size = memory_size;
        self
    }

    /// Builds a [`Solver`] instance. Returns an error on invalid configuration.
    pub fn build(self) -> GenericResult<Solver> {
        if self.memory_size == 0 {
            return Err(GenericError::from("solution memory size must be positive"));
        }

        let strategies = match self.strategies {
            Some(strategies) => strategies,
            None => create_default_search_strategies(self.environment.as_ref())?,
        };

        Ok(Solver {
            problem: self.problem,
            environment: self.environment,
            strategies,
            termination: self.termination.unwrap_or_else(|| Box::new(MaxGeneration::new(3000))),
            initial_recreate: self.initial_recreate.unwrap_or_else(|| Arc::new(RecreateWithCheapest::default())),
            listeners: self.listeners,
            memory_size: self.memory_size,
        })
    }
}

/// Creates the default set of search strategies: a mix of random, radial, worst and route
/// ruins with cheapest, regret and perturbation based recreates.
pub fn create_default_search_strategies(environment: &Environment) -> GenericResult<SearchStrategyManager> {
    let random = environment.random.clone();

    SearchStrategyManager::new(vec![
        SearchStrategy::new(
            "random-cheapest",
            100,
            Box::<SelectBest>::default(),
            Box::<GreedyAcceptance>::default(),
            Arc::new(RandomJobRemoval::default()),
            Arc::new(RecreateWithCheapest::default()),
        )?,
        SearchStrategy::new(
            "radial-regret",
            100,
            Box::<SelectBest>::default(),
            Box::<GreedyAcceptance>::default(),
            Arc::new(NeighbourRemoval::default()),
            Arc::new(RecreateWithRegret::new(2, 3)),
        )?,
        SearchStrategy::new(
            "worst-skip-best",
            50,
            Box::<SelectRandom>::default(),
            Box::<GreedyAcceptance>::default(),
            Arc::new(WorstJobRemoval::default()),
            Arc::new(RecreateWithSkipBest::new(1, 2)),
        )?,
        SearchStrategy::new(
            "routes-perturbation",
            10,
            Box::<SelectRandom>::default(),
            Box::<GreedyAcceptance>::default(),
            Arc::new(RandomRouteRemoval::default()),
            Arc::new(RecreateWithPerturbation::new_with_defaults(random)),
        )?,
    ])
}
