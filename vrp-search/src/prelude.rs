//! This module re-imports commonly used types.

pub use crate::models::{
    ConstraintPriority, ConstraintViolation, Feature, FeatureBuilder, FeatureConstraint, FeatureObjective,
    FeatureState, GoalContext, Problem, Solution, ViolationCode,
};

pub use crate::models::common::{
    CapacityDimension, Cost, Demand, DemandDimension, Dimensions, Distance, Duration, IdDimension, Load, LoadOps,
    Location, MultiDimLoad, Profile, Schedule, SingleDimLoad, TimeSpan, TimeWindow, Timestamp,
};

pub use crate::models::problem::{
    ActivityCost, Costs, Driver, Fleet, FleetBuilder, Job, JobPlaceBuilder, Jobs, MatrixTransportCost, Multi,
    MultiBuilder, ProblemBuilder, SimpleActivityCost, Single, SingleBuilder, TransportCost, Vehicle, VehicleBuilder,
    VehicleDetail, VehicleDetailBuilder, VehiclePlace,
};

pub use crate::models::solution::{Activity, Registry, Route, Tour};

pub use crate::construction::features::{
    create_break_feature, create_capacity_limit_feature, create_default_goal_context, create_default_features,
    create_minimize_transport_costs_feature, create_minimize_unassigned_jobs_feature, create_skills_feature,
};
pub use crate::construction::heuristics::{InsertionContext, UnassignmentInfo};

pub use crate::solver::search::{RemovalLimits, Recreate, Ruin};
pub use crate::solver::{
    CompositeTermination, GreedyAcceptance, MaxGeneration, MaxTime, NoImprovement, RefinementContext, SearchListeners,
    SearchStatistics, SearchStrategy, SearchStrategyManager, SelectBest, SelectRandom, SolutionAcceptor,
    SolutionMemory, SolutionSelector, Solver, SolverBuilder, Termination, create_default_search_strategies,
};

pub use crate::utils::{
    DefaultRandom, Environment, GenericError, GenericResult, InfoLogger, Parallelism, Quota, Random, TimeQuota, Timer,
};
