#[cfg(test)]
#[path = "../../../tests/unit/models/problem/fleet_test.rs"]
mod fleet_test;

use crate::models::common::{Dimensions, Location, Profile, TimeWindow};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents operating costs for driver and vehicle.
#[derive(Clone, Debug)]
pub struct Costs {
    /// A fixed cost to use an actor.
    pub fixed: f64,
    /// Cost per distance unit.
    pub per_distance: f64,
    /// Cost per driving time unit.
    pub per_driving_time: f64,
    /// Cost per waiting time unit.
    pub per_waiting_time: f64,
    /// Cost per service time unit.
    pub per_service_time: f64,
}

impl Default for Costs {
    fn default() -> Self {
        Self { fixed: 0., per_distance: 1., per_driving_time: 0., per_waiting_time: 0., per_service_time: 0. }
    }
}

/// Represents a driver, person who drives a vehicle. Reserved for future scenarios such as
/// vehicle-driver reassignment, at the moment each vehicle gets the same zero cost driver.
pub struct Driver {
    /// Specifies operating costs for driver.
    pub costs: Costs,
    /// Dimensions which contains extra work requirements.
    pub dimens: Dimensions,
}

impl Driver {
    /// Creates a driver with no own costs.
    pub fn empty() -> Self {
        Self {
            costs: Costs {
                fixed: 0.,
                per_distance: 0.,
                per_driving_time: 0.,
                per_waiting_time: 0.,
                per_service_time: 0.,
            },
            dimens: Default::default(),
        }
    }
}

/// Represents a vehicle place: a location with operating time constraints.
#[derive(Clone, Debug)]
pub struct VehiclePlace {
    /// A location of the place.
    pub location: Location,
    /// A time when vehicle is allowed to be at the place.
    pub time: TimeWindow,
}

/// Represents a vehicle detail: a start/end configuration of the vehicle. Absent end place
/// specifies an open route.
#[derive(Clone, Debug)]
pub struct VehicleDetail {
    /// A place where vehicle starts.
    pub start: Option<VehiclePlace>,
    /// A place where vehicle ends.
    pub end: Option<VehiclePlace>,
}

/// Represents a vehicle.
pub struct Vehicle {
    /// A vehicle routing profile.
    pub profile: Profile,
    /// Specifies operating costs for vehicle.
    pub costs: Costs,
    /// Dimensions which contains extra work requirements such as id, capacity or skills.
    pub dimens: Dimensions,
    /// Specifies vehicle details.
    pub details: Vec<VehicleDetail>,
}

/// Represents an actor detail: the part of vehicle detail seen by a concrete route.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct ActorDetail {
    /// A place where actor starts.
    pub start: Option<VehiclePlace>,
    /// A place where actor ends.
    pub end: Option<VehiclePlace>,
    /// Time window when actor can work.
    pub time: TimeWindow,
}

/// Represents an actor: abstraction over vehicle and driver.
pub struct Actor {
    /// A vehicle associated within actor.
    pub vehicle: Arc<Vehicle>,
    /// A driver associated within actor.
    pub driver: Arc<Driver>,
    /// Specifies actor detail.
    pub detail: ActorDetail,
}

/// Represents available resources to serve jobs.
pub struct Fleet {
    /// All fleet drivers.
    pub drivers: Vec<Arc<Driver>>,
    /// All fleet vehicles.
    pub vehicles: Vec<Arc<Vehicle>>,
    /// All fleet profiles.
    pub profiles: Vec<Profile>,
    /// All fleet actors, one per vehicle detail.
    pub actors: Vec<Arc<Actor>>,
}

impl Fleet {
    /// Creates a new instance of `Fleet`.
    pub fn new(drivers: Vec<Arc<Driver>>, vehicles: Vec<Arc<Vehicle>>) -> Fleet {
        assert_eq!(drivers.len(), 1);
        assert!(!vehicles.is_empty());

        let profiles: HashSet<Profile> = vehicles.iter().map(|v| v.profile.clone()).collect();
        let mut profiles: Vec<Profile> = profiles.into_iter().collect();
        profiles.sort_by(|a, b| a.index.cmp(&b.index));

        let mut actors: Vec<Arc<Actor>> = Default::default();
        vehicles.iter().for_each(|vehicle| {
            vehicle.details.iter().for_each(|detail| {
                let time = match (detail.start.as_ref(), detail.end.as_ref()) {
                    (Some(start), Some(end)) => TimeWindow::new(start.time.start, end.time.end),
                    (Some(start), None) => TimeWindow::new(start.time.start, f64::MAX),
                    _ => TimeWindow::max(),
                };
                actors.push(Arc::new(Actor {
                    vehicle: vehicle.clone(),
                    driver: drivers.first().unwrap().clone(),
                    detail: ActorDetail { start: detail.start.clone(), end: detail.end.clone(), time },
                }));
            });
        });

        Fleet { drivers, vehicles, actors, profiles }
    }
}

impl Hash for VehiclePlace {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
        self.time.hash(state);
    }
}

impl PartialEq for VehiclePlace {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location && self.time == other.time
    }
}

impl Eq for VehiclePlace {}

impl Hash for Costs {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.fixed.to_bits() as i64).hash(state);
        (self.per_distance.to_bits() as i64).hash(state);
        (self.per_driving_time.to_bits() as i64).hash(state);
        (self.per_service_time.to_bits() as i64).hash(state);
        (self.per_waiting_time.to_bits() as i64).hash(state);
    }
}

impl Eq for Costs {}

impl PartialEq for Costs {
    fn eq(&self, other: &Self) -> bool {
        self.fixed == other.fixed
            && self.per_distance == other.per_distance
            && self.per_driving_time == other.per_driving_time
            && self.per_service_time == other.per_service_time
            && self.per_waiting_time == other.per_waiting_time
    }
}

impl PartialEq<Actor> for Actor {
    fn eq(&self, other: &Actor) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Actor {}

impl Hash for Actor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self as *const Actor).hash(state);
    }
}
