use crate::helpers::models::problem::*;
use crate::models::common::{Schedule, TimeWindow};
use crate::models::problem::{Fleet, Single};
use crate::models::solution::{Activity, Place, Route, Tour};
use std::sync::Arc;

pub const DEFAULT_ACTIVITY_SCHEDULE: Schedule = Schedule { arrival: 0.0, departure: 0.0 };

pub fn test_activity_with_location(location: usize) -> Activity {
    Activity {
        place: Place { location, duration: DEFAULT_JOB_DURATION, time: DEFAULT_JOB_TIME_WINDOW },
        schedule: DEFAULT_ACTIVITY_SCHEDULE,
        job: Some(test_single_with_id_and_location("single", location)),
    }
}

pub fn test_activity_with_job(job: Arc<Single>) -> Activity {
    let location = job.places.first().and_then(|place| place.location).unwrap_or(0);
    let time = job
        .places
        .first()
        .and_then(|place| place.times.first())
        .map(|time| time.to_time_window(0.))
        .unwrap_or_else(TimeWindow::max);

    Activity {
        place: Place { location, duration: job.places.first().map(|p| p.duration).unwrap_or(0.), time },
        schedule: DEFAULT_ACTIVITY_SCHEDULE,
        job: Some(job),
    }
}

/// Creates a route for the first actor of the fleet with given activities appended in order.
pub fn create_route_with_activities(fleet: &Fleet, activities: Vec<Activity>) -> Route {
    let actor = fleet.actors.first().unwrap().clone();
    let mut tour = Tour::new(&actor);

    activities.into_iter().for_each(|activity| {
        tour.insert_last(activity);
    });

    Route { actor, tour }
}
