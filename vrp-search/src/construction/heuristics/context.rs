#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/context_test.rs"]
mod context_test;

use crate::construction::heuristics::factories::*;
use crate::models::common::Cost;
use crate::models::problem::*;
use crate::models::solution::*;
use crate::models::{GoalContext, Problem, Solution, ViolationCode};
use crate::utils::Environment;
use rustc_hash::FxHasher;
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;
use std::sync::Arc;

/// A context which contains the whole state needed by the insertion heuristic and the
/// metaheuristic on top of it.
pub struct InsertionContext {
    /// Original problem.
    pub problem: Arc<Problem>,

    /// Solution context: discovered solution.
    pub solution: SolutionContext,

    /// Information about environment.
    pub environment: Arc<Environment>,
}

impl InsertionContext {
    /// Creates an insertion context for the given problem with all jobs unassigned.
    pub fn new(problem: Arc<Problem>, environment: Arc<Environment>) -> Self {
        create_insertion_context(problem, environment)
    }

    /// Creates an insertion context from an existing solution.
    pub fn new_from_solution(problem: Arc<Problem>, solution: Solution, environment: Arc<Environment>) -> Self {
        let mut ctx = create_insertion_context_from_solution(problem, solution, environment);
        ctx.restore();

        ctx
    }

    /// Gets the scalar fitness of the solution.
    pub fn get_fitness(&self) -> Cost {
        self.problem.goal.fitness(self)
    }

    /// Restores valid context state: re-propagates stale routes and drops empty ones
    /// releasing their actors back to the registry.
    pub fn restore(&mut self) {
        self.problem.goal.accept_solution_state(&mut self.solution);
        self.solution.remove_empty_routes();
    }

    /// Creates a deep copy of the context.
    pub fn deep_copy(&self) -> Self {
        InsertionContext {
            problem: self.problem.clone(),
            solution: self.solution.deep_copy(),
            environment: self.environment.clone(),
        }
    }
}

impl From<InsertionContext> for Solution {
    fn from(insertion_ctx: InsertionContext) -> Self {
        let cost = insertion_ctx.get_fitness();
        let solution_ctx = insertion_ctx.solution;

        Solution {
            cost,
            registry: solution_ctx.registry.resources().deep_copy(),
            routes: solution_ctx.routes.iter().map(|route_ctx| route_ctx.route().deep_copy()).collect(),
            unassigned: solution_ctx
                .unassigned
                .iter()
                .map(|(job, code)| (job.clone(), code.clone()))
                .chain(solution_ctx.required.iter().map(|job| (job.clone(), UnassignmentInfo::Unknown)))
                .collect(),
        }
    }
}

/// Keeps information about an unassigned job reason.
#[derive(Clone, Debug)]
pub enum UnassignmentInfo {
    /// No reason code is available.
    Unknown,
    /// A violation code of the most specific failed constraint is available.
    Simple(ViolationCode),
}

/// Contains information regarding the discovered solution.
pub struct SolutionContext {
    /// List of jobs which require permanent assignment.
    pub required: Vec<Job>,

    /// List of jobs which at the moment do not require assignment and might be ignored,
    /// e.g. breaks of unused vehicles.
    pub ignored: Vec<Job>,

    /// Map of jobs which cannot be assigned within the reason code.
    pub unassigned: HashMap<Job, UnassignmentInfo>,

    /// Specifies jobs which should not be affected by ruin.
    pub locked: HashSet<Job>,

    /// Set of routes within their state.
    pub routes: Vec<RouteContext>,

    /// Keeps track of used routes and resources.
    pub registry: RegistryContext,

    /// A collection of data associated with the solution.
    pub state: SolutionState,
}

impl SolutionContext {
    /// Keep routes for which the given predicate returns true, releasing actors of the
    /// dropped ones.
    pub fn keep_routes(&mut self, predicate: &dyn Fn(&RouteContext) -> bool) {
        let (keep, remove): (Vec<_>, Vec<_>) = self.routes.drain(0..).partition(predicate);

        remove.into_iter().for_each(|route_ctx| {
            assert!(self.registry.free_route(route_ctx));
        });

        self.routes = keep;
    }

    /// Removes empty routes from the solution context.
    pub(crate) fn remove_empty_routes(&mut self) {
        self.keep_routes(&|route_ctx| route_ctx.route().tour.has_jobs())
    }

    /// Creates a deep copy of `SolutionContext`.
    pub fn deep_copy(&self) -> Self {
        Self {
            required: self.required.clone(),
            ignored: self.ignored.clone(),
            unassigned: self.unassigned.clone(),
            locked: self.locked.clone(),
            routes: self.routes.iter().map(|route_ctx| route_ctx.deep_copy()).collect(),
            registry: self.registry.deep_copy(),
            state: self.state.clone(),
        }
    }
}

/// Keeps track of some solution state values using typed keys.
#[derive(Clone, Default)]
pub struct SolutionState {
    index: HashMap<TypeId, Arc<dyn Any + Send + Sync>, BuildHasherDefault<FxHasher>>,
}

impl SolutionState {
    /// Gets the value from solution state using the key type provided.
    pub fn get_value<K: 'static, V: Send + Sync + 'static>(&self) -> Option<&V> {
        self.index.get(&TypeId::of::<K>()).and_then(|any| any.downcast_ref::<V>())
    }

    /// Sets the value to solution state using the key type provided.
    pub fn set_value<K: 'static, V: 'static + Sync + Send>(&mut self, value: V) {
        self.index.insert(TypeId::of::<K>(), Arc::new(value));
    }
}

/// Specifies an insertion context for a route.
pub struct RouteContext {
    route: Route,
    state: RouteState,
    is_stale: bool,
}

impl RouteContext {
    /// Creates a new instance of `RouteContext`.
    pub fn new(actor: Arc<Actor>) -> Self {
        let tour = Tour::new(&actor);
        Self::new_with_state(Route { actor, tour }, RouteState::default())
    }

    /// Creates a new instance of `RouteContext` with arguments provided.
    pub fn new_with_state(route: Route, state: RouteState) -> Self {
        RouteContext { route, state, is_stale: true }
    }

    /// Creates a deep copy of `RouteContext`.
    pub fn deep_copy(&self) -> Self {
        RouteContext { route: self.route.deep_copy(), state: self.state.clone(), is_stale: self.is_stale }
    }

    /// Returns a reference to the route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns a reference to the state.
    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// Unwraps given `RouteContext` as a pair of mutable references.
    /// Marks context as stale.
    pub fn as_mut(&mut self) -> (&mut Route, &mut RouteState) {
        self.is_stale = true;
        (&mut self.route, &mut self.state)
    }

    /// Returns a mutable reference to the route.
    /// Marks context as stale.
    pub fn route_mut(&mut self) -> &mut Route {
        self.is_stale = true;
        &mut self.route
    }

    /// Returns a mutable reference to the state.
    /// Marks context as stale.
    pub fn state_mut(&mut self) -> &mut RouteState {
        self.is_stale = true;
        &mut self.state
    }

    /// Returns true if the context is stale: it was mutated after the last state
    /// propagation pass. The flag is used to avoid recalculating unchanged states.
    pub fn is_stale(&self) -> bool {
        self.is_stale
    }

    /// Marks context stale or resets the flag.
    pub(crate) fn mark_stale(&mut self, is_stale: bool) {
        self.is_stale = is_stale;
    }
}

impl PartialEq<RouteContext> for RouteContext {
    fn eq(&self, other: &RouteContext) -> bool {
        std::ptr::eq(self.route.actor.as_ref(), other.route.actor.as_ref())
    }
}

impl Eq for RouteContext {}

/// Provides a way to associate arbitrary typed data within a route and its activities: the
/// state store of derived quantities (arrival times, loads, statistics).
///
/// Entries are written only by state updaters during a propagation pass over the owning
/// route and are read-only during constraint evaluation. The store is a derived side
/// table: it can always be rebuilt deterministically from the route contents.
#[derive(Clone)]
pub struct RouteState {
    index: HashMap<TypeId, Arc<dyn Any + Send + Sync>, BuildHasherDefault<FxHasher>>,
}

impl Default for RouteState {
    fn default() -> RouteState {
        RouteState { index: HashMap::with_capacity_and_hasher(8, BuildHasherDefault::<FxHasher>::default()) }
    }
}

impl RouteState {
    /// Gets a value associated with the whole tour using `K` type as a key.
    pub fn get_tour_state<K: 'static, V: Send + Sync + 'static>(&self) -> Option<&V> {
        self.index.get(&TypeId::of::<K>()).and_then(|any| any.downcast_ref::<V>())
    }

    /// Sets a value associated with the whole tour using `K` type as a key.
    pub fn set_tour_state<K: 'static, V: Send + Sync + 'static>(&mut self, value: V) {
        self.index.insert(TypeId::of::<K>(), Arc::new(value));
    }

    /// Removes the value associated with the whole tour using `K` type as a key.
    /// Returns true if the value was present.
    pub fn remove_tour_state<K: 'static>(&mut self) -> bool {
        self.index.remove(&TypeId::of::<K>()).is_some()
    }

    /// Gets a value associated with the activity at `activity_idx` using `K` type as a key.
    /// Tour-scoped and activity-scoped entries for the same key type are independent.
    pub fn get_activity_state<K: 'static, V: Send + Sync + 'static>(&self, activity_idx: usize) -> Option<&V> {
        self.index
            .get(&TypeId::of::<(K, ActivityScope)>())
            .and_then(|any| any.downcast_ref::<Vec<V>>())
            .and_then(|states| states.get(activity_idx))
    }

    /// Gets values associated with the key for all activities.
    pub fn get_activity_states<K: 'static, V: Send + Sync + 'static>(&self) -> Option<&Vec<V>> {
        self.index.get(&TypeId::of::<(K, ActivityScope)>()).and_then(|any| any.downcast_ref::<Vec<V>>())
    }

    /// Sets values associated with the key for all activities at once.
    pub fn set_activity_states<K: 'static, V: Send + Sync + 'static>(&mut self, values: Vec<V>) {
        self.index.insert(TypeId::of::<(K, ActivityScope)>(), Arc::new(values));
    }

    /// Clears all states.
    pub fn clear(&mut self) {
        self.index.clear();
    }
}

/// A marker type to keep activity-scoped entries separate from tour-scoped ones.
struct ActivityScope;

/// Keeps track on how routes are used: the insertion-time view over [`Registry`].
pub struct RegistryContext {
    registry: Registry,
    /// Index keeps track of actor mapping to empty route prototypes.
    index: HashMap<Arc<Actor>, Arc<RouteContext>>,
}

impl RegistryContext {
    /// Creates a new instance of `RegistryContext`.
    pub fn new(goal: &GoalContext, registry: Registry) -> Self {
        let index = registry
            .all()
            .map(|actor| {
                let mut route_ctx = RouteContext::new(actor.clone());
                // NOTE: need to initialize the empty route with states
                goal.accept_route_state(&mut route_ctx);

                (actor, Arc::new(route_ctx))
            })
            .collect();

        Self { registry, index }
    }

    /// Returns the underlying registry.
    pub fn resources(&self) -> &Registry {
        &self.registry
    }

    /// Returns empty route prototypes available for insertion, one per actor group.
    pub fn next_route(&self) -> impl Iterator<Item = &RouteContext> {
        self.registry.next().map(move |actor| self.index[&actor].as_ref())
    }

    /// Marks the actor of the given route as used.
    /// Returns true if the actor was available before, false if it is already in use.
    pub fn use_route(&mut self, route_ctx: &RouteContext) -> bool {
        self.registry.use_actor(&route_ctx.route().actor)
    }

    /// Returns the route back to be reused again.
    /// Returns true if the actor was not available before.
    pub fn free_route(&mut self, route_ctx: RouteContext) -> bool {
        self.registry.free_actor(&route_ctx.route().actor)
    }

    /// Creates a deep copy of `RegistryContext`.
    pub fn deep_copy(&self) -> Self {
        Self {
            registry: self.registry.deep_copy(),
            index: self.index.iter().map(|(actor, route_ctx)| (actor.clone(), route_ctx.clone())).collect(),
        }
    }
}

/// Specifies an insertion context for an activity.
pub struct ActivityContext<'a> {
    /// Activity insertion index.
    pub index: usize,

    /// Previous activity.
    pub prev: &'a Activity,

    /// Target activity.
    pub target: &'a Activity,

    /// Next activity. Absent if the tour is open and the target activity is inserted last.
    pub next: Option<&'a Activity>,
}

/// A local move context.
pub enum MoveContext<'a> {
    /// Evaluation of a job insertion into the given route.
    Route {
        /// A solution context.
        solution_ctx: &'a SolutionContext,
        /// A route context where the job is supposed to be inserted.
        route_ctx: &'a RouteContext,
        /// A job which is being evaluated.
        job: &'a Job,
    },
    /// Evaluation of an activity insertion into the given position.
    Activity {
        /// A route context where the activity is supposed to be inserted.
        route_ctx: &'a RouteContext,
        /// An activity context.
        activity_ctx: &'a ActivityContext<'a>,
    },
}

impl<'a> MoveContext<'a> {
    /// Creates a route variant of `MoveContext`.
    pub fn route(solution_ctx: &'a SolutionContext, route_ctx: &'a RouteContext, job: &'a Job) -> MoveContext<'a> {
        MoveContext::Route { solution_ctx, route_ctx, job }
    }

    /// Creates an activity variant of `MoveContext`.
    pub fn activity(route_ctx: &'a RouteContext, activity_ctx: &'a ActivityContext<'_>) -> MoveContext<'a> {
        MoveContext::Activity { route_ctx, activity_ctx }
    }
}
