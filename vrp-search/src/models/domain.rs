use crate::construction::heuristics::UnassignmentInfo;
use crate::models::GoalContext;
use crate::models::common::Cost;
use crate::models::problem::{ActivityCost, Fleet, Job, Jobs, TransportCost};
use crate::models::solution::{Registry, Route};
use std::sync::Arc;

/// Defines a Vehicle Routing Problem. Built once, immutable afterwards: the search engine
/// never mutates it.
pub struct Problem {
    /// Specifies used fleet.
    pub fleet: Arc<Fleet>,

    /// Specifies all jobs.
    pub jobs: Arc<Jobs>,

    /// Specifies the optimization goal: hard constraints, soft constraints and their
    /// cached state handlers.
    pub goal: Arc<GoalContext>,

    /// Specifies activity costs.
    pub activity: Arc<dyn ActivityCost + Send + Sync>,

    /// Specifies transport costs.
    pub transport: Arc<dyn TransportCost + Send + Sync>,
}

/// Represents a VRP solution.
pub struct Solution {
    /// A scalar cost of the solution.
    pub cost: Cost,

    /// Actor's registry.
    pub registry: Registry,

    /// List of assigned routes.
    pub routes: Vec<Route>,

    /// List of unassigned jobs within reason code.
    pub unassigned: Vec<(Job, UnassignmentInfo)>,
}
