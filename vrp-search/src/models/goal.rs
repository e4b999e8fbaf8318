#[cfg(test)]
#[path = "../../tests/unit/models/goal_test.rs"]
mod goal_test;

use crate::construction::heuristics::{InsertionContext, MoveContext, RouteContext, SolutionContext};
use crate::models::common::Cost;
use crate::models::problem::Job;
use crate::utils::{GenericError, GenericResult};
use std::collections::HashSet;
use std::sync::Arc;

/// An individual feature which is used to build a specific VRP variant, e.g. capacity
/// restriction, time windows, skills, etc. Each feature consists of three optional parts
/// (but at least one should be defined):
///
/// * **constraint**: an invariant which should hold to have a feasible VRP solution in the
///   end. Hard constraints have an explicit [`ConstraintPriority`] which controls their
///   evaluation order.
///
/// * **objective**: a soft constraint which contributes to the scalar solution cost and to
///   the marginal cost of a candidate insertion.
///
/// * **state**: the corresponding cached data of constraint/objective to speed up their
///   evaluation, recomputed by the propagation passes.
#[derive(Clone, Default)]
pub struct Feature {
    /// An unique id of the feature.
    pub name: String,
    /// A hard constraint.
    pub constraint: Option<Arc<dyn FeatureConstraint + Send + Sync>>,
    /// A priority of the hard constraint.
    pub priority: ConstraintPriority,
    /// An objective which models a soft constraint.
    pub objective: Option<Arc<dyn FeatureObjective + Send + Sync>>,
    /// A state change handler.
    pub state: Option<Arc<dyn FeatureState + Send + Sync>>,
}

/// Specifies a priority of a hard constraint: constraints are evaluated in strictly
/// decreasing priority order and evaluation short-circuits at the first violation, so a
/// lower priority constraint never runs once a higher priority one has failed.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub enum ConstraintPriority {
    /// Highest priority, e.g. capability constraints such as skills or vehicle exclusivity.
    Critical,
    /// Default priority, e.g. capacity or time windows.
    #[default]
    High,
    /// Lowest priority.
    Low,
}

/// Specifies a type for constraint violation code used to report unassignment reasons.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ViolationCode(pub i32);

impl ViolationCode {
    /// An unknown violation code: no specific reason is available.
    pub fn unknown() -> Self {
        Self(-1)
    }

    /// Checks whether violation code is unknown.
    pub fn is_unknown(&self) -> bool {
        self.0 == -1
    }
}

impl From<i32> for ViolationCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Specifies result of a hard constraint check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintViolation {
    /// Violation code which is used as a marker of specific constraint violated.
    pub code: ViolationCode,
    /// True if further insertion positions down the route should not be attempted: the
    /// violation can only get worse there.
    pub stopped: bool,
}

impl ConstraintViolation {
    /// A constraint violation which stops position scanning within the route.
    pub fn fail(code: ViolationCode) -> Option<Self> {
        Some(ConstraintViolation { code, stopped: true })
    }

    /// A constraint violation which skips the current position only.
    pub fn skip(code: ViolationCode) -> Option<Self> {
        Some(ConstraintViolation { code, stopped: false })
    }

    /// No constraint violation.
    pub fn success() -> Option<Self> {
        None
    }
}

/// Defines hard constraint behavior: evaluates a route-level (job into route) or an
/// activity-level (activity into position) move.
pub trait FeatureConstraint {
    /// Evaluates hard constraint violations.
    fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation>;
}

/// Defines feature objective behavior: contributes to the scalar solution fitness and
/// estimates a cost delta of a candidate move.
pub trait FeatureObjective {
    /// An objective fitness value for the given solution.
    fn fitness(&self, insertion_ctx: &InsertionContext) -> Cost;

    /// Estimates a cost delta of the candidate move.
    fn estimate(&self, move_ctx: &MoveContext<'_>) -> Cost;
}

/// Controls a cached state of the given feature.
pub trait FeatureState {
    /// Accept insertion of a specific job into the route.
    /// Called once a job has been inserted into the solution represented via `solution_ctx`.
    /// Target route is defined by `route_index` which refers to the `routes` collection in
    /// the solution context. This method should NOT modify the amount of job activities in
    /// the tour.
    fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, job: &Job);

    /// Accept route and update its state to allow more efficient constraint checks.
    /// This method should NOT modify the amount of job activities in the tour.
    fn accept_route_state(&self, route_ctx: &mut RouteContext);

    /// Accepts insertion solution context allowing to update job insertion data.
    /// This method is called at iteration boundaries: before insertion of all jobs starts
    /// and when it ends. Please note that it is important to update only stale routes to
    /// avoid updating unchanged route states.
    fn accept_solution_state(&self, solution_ctx: &mut SolutionContext);
}

/// Provides a way to build a feature with some checks.
#[derive(Default)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    /// Creates a builder from another feature.
    pub fn from_feature(other: Feature) -> Self {
        Self { feature: other }
    }

    /// Sets given name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.feature.name = name.to_string();
        self
    }

    /// Adds given constraint.
    pub fn with_constraint<T: FeatureConstraint + Send + Sync + 'static>(mut self, constraint: T) -> Self {
        self.feature.constraint = Some(Arc::new(constraint));
        self
    }

    /// Sets the priority of the hard constraint.
    pub fn with_priority(mut self, priority: ConstraintPriority) -> Self {
        self.feature.priority = priority;
        self
    }

    /// Adds given objective.
    pub fn with_objective<T: FeatureObjective + Send + Sync + 'static>(mut self, objective: T) -> Self {
        self.feature.objective = Some(Arc::new(objective));
        self
    }

    /// Adds given state.
    pub fn with_state<T: FeatureState + Send + Sync + 'static>(mut self, state: T) -> Self {
        self.feature.state = Some(Arc::new(state));
        self
    }

    /// Tries to build a feature.
    pub fn build(self) -> GenericResult<Feature> {
        let feature = self.feature;

        if feature.name == String::default() {
            return Err(GenericError::from("features with default id are not allowed"));
        }

        if feature.constraint.is_none() && feature.objective.is_none() && feature.state.is_none() {
            Err(GenericError::from("empty feature is not allowed"))
        } else {
            Ok(feature)
        }
    }
}

/// Defines a VRP variant by the list of its features. Keeps hard constraints ordered by
/// priority, soft constraints (objectives) and state updaters in registration order.
#[derive(Clone, Default)]
pub struct GoalContext {
    constraints: Vec<Arc<dyn FeatureConstraint + Send + Sync>>,
    objectives: Vec<Arc<dyn FeatureObjective + Send + Sync>>,
    states: Vec<Arc<dyn FeatureState + Send + Sync>>,
}

impl GoalContext {
    /// Creates a new instance of `GoalContext` from the list of features.
    pub fn new(features: &[Feature]) -> GenericResult<Self> {
        if features.is_empty() {
            return Err(GenericError::from("no features specified"));
        }

        let ids_all = features.iter().map(|feature| feature.name.clone()).collect::<Vec<_>>();
        let ids_unique = ids_all.iter().collect::<HashSet<_>>();
        if ids_unique.len() != ids_all.len() {
            return Err(GenericError::from(format!(
                "some of the features are defined more than once, check ids list: {}",
                ids_all.join(",")
            )));
        }

        let mut indexed_constraints = features
            .iter()
            .filter_map(|feature| feature.constraint.clone().map(|constraint| (feature.priority, constraint)))
            .collect::<Vec<_>>();
        indexed_constraints.sort_by_key(|(priority, _)| *priority);

        let constraints = indexed_constraints.into_iter().map(|(_, constraint)| constraint).collect();
        let objectives = features.iter().filter_map(|feature| feature.objective.clone()).collect();
        let states = features.iter().filter_map(|feature| feature.state.clone()).collect();

        Ok(Self { constraints, objectives, states })
    }

    /// Evaluates feasibility of the refinement move. Returns the violation of the highest
    /// priority constraint which is not fulfilled, if any.
    pub fn evaluate(&self, move_ctx: &MoveContext<'_>) -> Option<ConstraintViolation> {
        self.constraints.iter().find_map(|constraint| constraint.evaluate(move_ctx))
    }

    /// Estimates the cost delta (penalty) of the refinement move by blending all soft
    /// constraint estimations additively.
    pub fn estimate(&self, move_ctx: &MoveContext<'_>) -> Cost {
        self.objectives.iter().map(|objective| objective.estimate(move_ctx)).sum()
    }

    /// Returns the scalar fitness of the solution.
    pub fn fitness(&self, insertion_ctx: &InsertionContext) -> Cost {
        self.objectives.iter().map(|objective| objective.fitness(insertion_ctx)).sum()
    }

    /// Accepts job insertion.
    pub fn accept_insertion(&self, solution_ctx: &mut SolutionContext, route_index: usize, job: &Job) {
        self.states.iter().for_each(|state| state.accept_insertion(solution_ctx, route_index, job));
        solution_ctx.routes.get_mut(route_index).unwrap().mark_stale(false);
    }

    /// Accepts route state.
    pub fn accept_route_state(&self, route_ctx: &mut RouteContext) {
        if route_ctx.is_stale() {
            route_ctx.state_mut().clear();

            self.states.iter().for_each(|state| state.accept_route_state(route_ctx));

            route_ctx.mark_stale(false);
        }
    }

    /// Accepts solution state.
    pub fn accept_solution_state(&self, solution_ctx: &mut SolutionContext) {
        self.states.iter().for_each(|state| state.accept_solution_state(solution_ctx));

        solution_ctx.routes.iter_mut().for_each(|route_ctx| {
            route_ctx.mark_stale(false);
        })
    }
}
