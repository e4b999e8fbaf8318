#[cfg(test)]
#[path = "../../../tests/unit/models/solution/registry_test.rs"]
mod registry_test;

use crate::models::problem::{Actor, ActorDetail, Costs, Fleet};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Specifies an entity responsible for providing actors and keeping track of their usage:
/// the fleet manager. Under a finite fleet each actor instance backs at most one active
/// route; an actor is locked when a route for it is materialized and released when the
/// route becomes empty.
pub struct Registry {
    available: HashMap<ActorKey, HashSet<Arc<Actor>>>,
    all: Vec<Arc<Actor>>,
}

impl Registry {
    /// Creates a new instance of [`Registry`].
    pub fn new(fleet: &Fleet) -> Self {
        Self {
            available: fleet.actors.iter().cloned().fold(HashMap::new(), |mut acc, actor| {
                acc.entry(ActorKey::new(&actor)).or_default().insert(actor.clone());
                acc
            }),
            all: fleet.actors.to_vec(),
        }
    }

    /// Removes actor from the list of available actors.
    /// Returns true if actor was actually available.
    pub fn use_actor(&mut self, actor: &Arc<Actor>) -> bool {
        self.available.get_mut(&ActorKey::new(actor)).is_some_and(|set| set.remove(actor))
    }

    /// Adds actor to the list of available actors.
    /// Returns true if actor was not available before.
    pub fn free_actor(&mut self, actor: &Arc<Actor>) -> bool {
        self.available.get_mut(&ActorKey::new(actor)).is_some_and(|set| set.insert(actor.clone()))
    }

    /// Returns all actors.
    pub fn all(&'_ self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        self.all.iter().cloned()
    }

    /// Returns list of all available actors.
    pub fn available(&'_ self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        self.available.values().flat_map(|set| set.iter().cloned())
    }

    /// Returns next available actor from each different actor type.
    pub fn next(&'_ self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        self.available.values().flat_map(|set| set.iter().take(1).cloned())
    }

    /// Creates a deep copy of registry.
    pub fn deep_copy(&self) -> Self {
        Self { available: self.available.clone(), all: self.all.clone() }
    }
}

/// Actors with equal details and costs are interchangeable, they are grouped under
/// the same key so that only one "new route" candidate per group is exposed.
#[derive(Clone, Hash, Eq, PartialEq)]
struct ActorKey {
    detail: ActorDetail,
    driver_costs: Costs,
    vehicle_costs: Costs,
}

impl ActorKey {
    fn new(actor: &Actor) -> Self {
        Self {
            detail: actor.detail.clone(),
            driver_costs: actor.driver.costs.clone(),
            vehicle_costs: actor.vehicle.costs.clone(),
        }
    }
}
