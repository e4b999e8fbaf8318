//! Provides a way to build core models using the builder pattern: the typed configuration
//! surface of the engine.

#[cfg(test)]
#[path = "../../../tests/unit/models/problem/builders_test.rs"]
mod builders_test;

use crate::models::common::*;
use crate::models::problem::*;
use crate::models::{GoalContext, Problem};
use crate::utils::{GenericError, GenericResult};
use std::sync::Arc;

/// Provides a way to build a [Single] job using the builder pattern.
pub struct SingleBuilder(Single);

impl Default for SingleBuilder {
    fn default() -> Self {
        Self(Single { places: vec![], dimens: Default::default() })
    }
}

impl SingleBuilder {
    /// Adds a new place to single job's `places` collection. Use this api to add multiple
    /// places which are used as alternative places (e.g. locations) to serve the job.
    pub fn add_place(mut self, place: Place) -> Self {
        self.0.places.push(place);
        self
    }

    /// Sets a job id dimension.
    pub fn id(mut self, id: &str) -> Self {
        self.0.dimens.set_id(id.to_string());
        self
    }

    /// A simple api to set a single job's demand.
    pub fn demand<T: LoadOps>(mut self, demand: Demand<T>) -> Self {
        self.0.dimens.set_demand(demand);
        self
    }

    /// A simple api to associate an arbitrary property within the job.
    pub fn dimension(mut self, func: impl FnOnce(&mut Dimensions)) -> Self {
        func(&mut self.0.dimens);
        self
    }

    /// A simple api to set the location of the first place.
    /// Normally, location is represented as an index in the routing matrix.
    /// Fails if used with more than one place, creates a new place if no places are specified.
    pub fn location(mut self, location: Location) -> GenericResult<Self> {
        self.ensure_single_place()?.location = Some(location);
        Ok(self)
    }

    /// A simple api to set the duration of the first place.
    /// Fails if used with more than one place, creates a new place if no places are specified.
    pub fn duration(mut self, duration: Duration) -> GenericResult<Self> {
        self.ensure_single_place()?.duration = duration;
        Ok(self)
    }

    /// A simple api to set time windows of the first place.
    /// Fails if used with more than one place, creates a new place if no places are specified.
    pub fn times(mut self, times: Vec<TimeWindow>) -> GenericResult<Self> {
        self.ensure_single_place()?.times = times.into_iter().map(TimeSpan::Window).collect();
        Ok(self)
    }

    /// Builds a [Single] job.
    pub fn build(self) -> GenericResult<Single> {
        if self.0.places.is_empty() {
            return Err(GenericError::from("at least one place must be specified"));
        }

        Ok(self.0)
    }

    /// Builds a [Job].
    pub fn build_as_job(self) -> GenericResult<Job> {
        Ok(Job::Single(Arc::new(self.build()?)))
    }

    fn ensure_single_place(&mut self) -> GenericResult<&mut Place> {
        if self.0.places.len() > 1 {
            return Err("cannot use the simple api with multiple places, use `SingleBuilder::add_place` instead".into());
        }

        if self.0.places.is_empty() {
            self.0.places.push(empty_place());
        }

        self.0.places.first_mut().ok_or_else(|| GenericError::from("no places"))
    }
}

/// Provides a way to build a [Place] used internally by a [Single] job.
pub struct JobPlaceBuilder(Place);

impl Default for JobPlaceBuilder {
    fn default() -> Self {
        Self(empty_place())
    }
}

impl JobPlaceBuilder {
    /// Sets place's location.
    pub fn location(mut self, loc: Option<Location>) -> Self {
        self.0.location = loc;
        self
    }

    /// Sets place's duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.0.duration = duration;
        self
    }

    /// Sets place's time windows.
    pub fn times(mut self, times: Vec<TimeWindow>) -> Self {
        self.0.times = times.into_iter().map(TimeSpan::Window).collect();
        self
    }

    /// Builds a job [Place].
    pub fn build(self) -> GenericResult<Place> {
        Ok(self.0)
    }
}

fn empty_place() -> Place {
    // NOTE a time window must be present as it is expected in the evaluator logic
    Place { location: None, duration: 0.0, times: vec![TimeSpan::Window(TimeWindow::max())] }
}

/// Provides a way to build a [Multi] job using the builder pattern.
#[derive(Default)]
pub struct MultiBuilder {
    jobs: Vec<Arc<Single>>,
    dimens: Dimensions,
    permutator: Option<Box<dyn JobPermutation + Send + Sync>>,
}

impl MultiBuilder {
    /// Sets a job id dimension.
    pub fn id(mut self, id: &str) -> Self {
        self.dimens.set_id(id.to_string());
        self
    }

    /// Adds a [Single] as a sub-job.
    pub fn add_job(mut self, single: Single) -> Self {
        self.jobs.push(Arc::new(single));
        self
    }

    /// A simple api to associate an arbitrary property within the job.
    pub fn dimension(mut self, func: impl FnOnce(&mut Dimensions)) -> Self {
        func(&mut self.dimens);
        self
    }

    /// Sets a permutation logic which tells the allowed order of sub-jobs assignment.
    /// If omitted, sub-jobs can be assigned only in the order of addition (e.g. pickup
    /// always before delivery).
    pub fn permutation(mut self, permutation: impl JobPermutation + Send + Sync + 'static) -> Self {
        self.permutator = Some(Box::new(permutation));
        self
    }

    /// Builds a [Multi] job as a shared reference.
    pub fn build(self) -> GenericResult<Arc<Multi>> {
        if self.jobs.len() < 2 {
            return Err("the number of sub-jobs must be 2 or more".into());
        }

        Ok(match self.permutator {
            Some(permutator) => Multi::new_shared_with_permutator(self.jobs, self.dimens, permutator),
            _ => Multi::new_shared(self.jobs, self.dimens),
        })
    }

    /// Builds a [Job].
    pub fn build_as_job(self) -> GenericResult<Job> {
        Ok(Job::Multi(self.build()?))
    }
}

/// Provides a way to build a [Vehicle].
pub struct VehicleBuilder(Vehicle);

impl Default for VehicleBuilder {
    fn default() -> Self {
        Self(Vehicle { profile: Default::default(), costs: Default::default(), dimens: Default::default(), details: vec![] })
    }
}

impl VehicleBuilder {
    /// Sets a vehicle id dimension.
    pub fn id(mut self, id: &str) -> Self {
        self.0.dimens.set_id(id.to_string());
        self
    }

    /// Adds a vehicle detail which specifies start/end location and time.
    /// Use [VehicleDetailBuilder] to construct one.
    pub fn add_detail(mut self, detail: VehicleDetail) -> Self {
        self.0.details.push(detail);
        self
    }

    /// Sets the routing profile index which configures which routing data to use.
    pub fn set_profile_idx(mut self, idx: usize) -> Self {
        self.0.profile.index = idx;
        self
    }

    /// Sets a fixed cost of using the vehicle.
    pub fn set_fixed_cost(mut self, cost: Cost) -> Self {
        self.0.costs.fixed = cost;
        self
    }

    /// Sets a cost per distance unit.
    pub fn set_distance_cost(mut self, cost: Cost) -> Self {
        self.0.costs.per_distance = cost;
        self
    }

    /// Sets a cost per duration unit.
    pub fn set_duration_cost(mut self, cost: Cost) -> Self {
        self.0.costs.per_driving_time = cost;
        self.0.costs.per_service_time = cost;
        self.0.costs.per_waiting_time = cost;
        self
    }

    /// Sets a vehicle capacity dimension.
    pub fn capacity<T: LoadOps>(mut self, value: T) -> Self {
        self.0.dimens.set_capacity(value);
        self
    }

    /// A simple api to associate an arbitrary property within the vehicle.
    pub fn dimension(mut self, func: impl FnOnce(&mut Dimensions)) -> Self {
        func(&mut self.0.dimens);
        self
    }

    /// Builds a [Vehicle].
    pub fn build(self) -> GenericResult<Vehicle> {
        if self.0.details.is_empty() {
            Err("at least one vehicle detail needs to be added, use `VehicleDetailBuilder` and `add_detail`".into())
        } else {
            Ok(self.0)
        }
    }
}

/// Provides a way to build a [VehicleDetail].
pub struct VehicleDetailBuilder(VehicleDetail);

impl Default for VehicleDetailBuilder {
    fn default() -> Self {
        Self(VehicleDetail { start: None, end: None })
    }
}

impl VehicleDetailBuilder {
    /// Sets the start location.
    pub fn set_start_location(mut self, location: Location) -> Self {
        self.ensure_start().location = location;
        self
    }

    /// Sets the earliest departure time for the start location.
    pub fn set_start_time(mut self, earliest: Timestamp) -> Self {
        self.ensure_start().time.start = earliest;
        self
    }

    /// Sets the end location. When no end place is set, the route is an open one.
    pub fn set_end_location(mut self, location: Location) -> Self {
        self.ensure_end().location = location;
        self
    }

    /// Sets the latest arrival time for the end location.
    pub fn set_end_time(mut self, latest: Timestamp) -> Self {
        self.ensure_end().time.end = latest;
        self
    }

    /// Builds a [VehicleDetail].
    pub fn build(self) -> GenericResult<VehicleDetail> {
        if self.0.start.is_none() {
            Err(GenericError::from("start place must be specified"))
        } else {
            Ok(self.0)
        }
    }

    fn ensure_start(&mut self) -> &mut VehiclePlace {
        if self.0.start.is_none() {
            self.0.start = Some(VehiclePlace { location: 0, time: TimeWindow::max() });
        }
        self.0.start.as_mut().unwrap()
    }

    fn ensure_end(&mut self) -> &mut VehiclePlace {
        if self.0.end.is_none() {
            self.0.end = Some(VehiclePlace { location: 0, time: TimeWindow::max() });
        }
        self.0.end.as_mut().unwrap()
    }
}

/// Provides a way to build a [Fleet].
#[derive(Default)]
pub struct FleetBuilder {
    drivers: Vec<Arc<Driver>>,
    vehicles: Vec<Arc<Vehicle>>,
}

impl FleetBuilder {
    /// Adds a driver to the fleet.
    pub fn add_driver(mut self, driver: Driver) -> Self {
        self.drivers.push(Arc::new(driver));
        self
    }

    /// Adds a vehicle to the fleet.
    pub fn add_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(Arc::new(vehicle));
        self
    }

    /// Adds multiple vehicles to the fleet.
    pub fn add_vehicles(mut self, vehicles: Vec<Vehicle>) -> Self {
        self.vehicles.extend(vehicles.into_iter().map(Arc::new));
        self
    }

    /// Builds a [Fleet].
    pub fn build(mut self) -> GenericResult<Fleet> {
        if self.drivers.is_empty() {
            self.drivers.push(Arc::new(Driver::empty()));
        }

        if self.vehicles.is_empty() {
            return Err(GenericError::from("at least one vehicle must be specified"));
        }

        Ok(Fleet::new(self.drivers, self.vehicles))
    }
}

/// Provides a way to build a [Problem]: the immutable input of the search engine.
#[derive(Default)]
pub struct ProblemBuilder {
    fleet: Option<Arc<Fleet>>,
    jobs: Vec<Job>,
    goal: Option<GoalContext>,
    transport: Option<Arc<dyn TransportCost + Send + Sync>>,
    activity: Option<Arc<dyn ActivityCost + Send + Sync>>,
}

impl ProblemBuilder {
    /// Sets the fleet.
    pub fn with_fleet(mut self, fleet: Fleet) -> Self {
        self.fleet = Some(Arc::new(fleet));
        self
    }

    /// Adds a job.
    pub fn add_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Adds multiple jobs.
    pub fn add_jobs(mut self, jobs: impl Iterator<Item = Job>) -> Self {
        self.jobs.extend(jobs);
        self
    }

    /// Sets the optimization goal built from features, e.g. via
    /// [crate::construction::features::create_default_goal_context].
    pub fn with_goal(mut self, goal: GoalContext) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the transport costs: the routing function of the problem.
    pub fn with_transport_cost(mut self, transport: Arc<dyn TransportCost + Send + Sync>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the activity costs. Default is [SimpleActivityCost].
    pub fn with_activity_cost(mut self, activity: Arc<dyn ActivityCost + Send + Sync>) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Builds a [Problem]. Fails on an incomplete configuration.
    pub fn build(self) -> GenericResult<Problem> {
        let fleet = self.fleet.ok_or_else(|| GenericError::from("fleet must be set"))?;
        let transport = self.transport.ok_or_else(|| GenericError::from("transport costs must be set"))?;
        let activity = self.activity.unwrap_or_else(|| Arc::new(SimpleActivityCost::default()));
        let goal = self.goal.ok_or_else(|| GenericError::from("goal must be set"))?;

        if self.jobs.is_empty() {
            return Err(GenericError::from("at least one job must be specified"));
        }

        let jobs = Jobs::new(&fleet, self.jobs, transport.clone());

        Ok(Problem { fleet, jobs: Arc::new(jobs), goal: Arc::new(goal), activity, transport })
    }
}
