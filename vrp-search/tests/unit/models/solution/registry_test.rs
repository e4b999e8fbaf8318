use super::*;
use crate::helpers::models::problem::{test_driver, test_vehicle};

fn create_fleet_with_identical_vehicles(amount: usize) -> Fleet {
    let vehicles = (0..amount).map(|idx| Arc::new(test_vehicle(&format!("v{idx}")))).collect();
    Fleet::new(vec![Arc::new(test_driver())], vehicles)
}

#[test]
fn can_expose_one_candidate_per_actor_group() {
    let fleet = create_fleet_with_identical_vehicles(2);
    let registry = Registry::new(&fleet);

    // identical vehicles are interchangeable, only one next candidate is exposed
    assert_eq!(registry.next().count(), 1);
    assert_eq!(registry.available().count(), 2);
}

#[test]
fn can_lock_and_release_actors() {
    let fleet = create_fleet_with_identical_vehicles(2);
    let mut registry = Registry::new(&fleet);

    let actor = registry.next().next().unwrap();

    assert!(registry.use_actor(&actor));
    assert_eq!(registry.available().count(), 1);

    // the same instance cannot be locked twice
    assert!(!registry.use_actor(&actor));

    assert!(registry.free_actor(&actor));
    assert_eq!(registry.available().count(), 2);
}

#[test]
fn can_exhaust_finite_fleet() {
    let fleet = create_fleet_with_identical_vehicles(2);
    let mut registry = Registry::new(&fleet);

    let actors: Vec<_> = registry.available().collect();
    actors.iter().for_each(|actor| {
        assert!(registry.use_actor(actor));
    });

    assert_eq!(registry.next().count(), 0);
    assert_eq!(registry.available().count(), 0);
}
