//! Provides VRP features: building blocks which define a concrete problem variant via
//! hard constraints, soft constraints (objectives) and their cached states.

use crate::models::common::LoadOps;
use crate::models::problem::{ActivityCost, TransportCost};
use crate::models::{Feature, GoalContext, ViolationCode};
use crate::utils::GenericResult;
use std::sync::Arc;

mod breaks;
pub use self::breaks::*;

mod capacity;
pub use self::capacity::*;

mod minimize_unassigned;
pub use self::minimize_unassigned::*;

mod skills;
pub use self::skills::*;

mod transport;
pub use self::transport::*;

/// A violation code used to report a time window unassignment reason.
pub const TIME_CONSTRAINT_CODE: ViolationCode = ViolationCode(1);
/// A violation code used to report a capacity unassignment reason.
pub const CAPACITY_CONSTRAINT_CODE: ViolationCode = ViolationCode(2);
/// A violation code used to report a skills unassignment reason.
pub const SKILLS_CONSTRAINT_CODE: ViolationCode = ViolationCode(3);
/// A violation code used to report a vehicle binding unassignment reason.
pub const BREAK_CONSTRAINT_CODE: ViolationCode = ViolationCode(4);

/// A default penalty applied to each unassigned job in the solution cost.
pub const UNASSIGNED_JOB_PENALTY: f64 = 1E6;

/// Creates a goal context with the standard feature set: transport costs with time
/// windows, capacity, skills, vehicle bound breaks and unassigned jobs minimization.
pub fn create_default_goal_context<T: LoadOps>(
    transport: Arc<dyn TransportCost + Send + Sync>,
    activity: Arc<dyn ActivityCost + Send + Sync>,
) -> GenericResult<GoalContext> {
    create_default_features::<T>(transport, activity).and_then(|features| GoalContext::new(&features))
}

/// Creates a [`Feature`] list identical to [`create_default_goal_context`] for callers
/// which want to extend it before building the goal.
///
/// NOTE: state handlers run in the listed order, so features which mutate tours (breaks)
/// must be listed before the propagation features (transport, capacity).
pub fn create_default_features<T: LoadOps>(
    transport: Arc<dyn TransportCost + Send + Sync>,
    activity: Arc<dyn ActivityCost + Send + Sync>,
) -> GenericResult<Vec<Feature>> {
    Ok(vec![
        create_break_feature("break", BREAK_CONSTRAINT_CODE)?,
        create_minimize_transport_costs_feature("transport", transport, activity, TIME_CONSTRAINT_CODE)?,
        create_capacity_limit_feature::<T>("capacity", CAPACITY_CONSTRAINT_CODE)?,
        create_skills_feature("skills", SKILLS_CONSTRAINT_CODE)?,
        create_minimize_unassigned_jobs_feature("min_unassigned", UNASSIGNED_JOB_PENALTY)?,
    ])
}
