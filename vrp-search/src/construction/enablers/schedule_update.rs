#[cfg(test)]
#[path = "../../../tests/unit/construction/enablers/schedule_update_test.rs"]
mod schedule_update_test;

use crate::construction::heuristics::RouteContext;
use crate::construction::heuristics::RouteState;
use crate::models::common::{Distance, Duration, Schedule, Timestamp};
use crate::models::problem::{ActivityCost, TransportCost, TravelTime};

custom_activity_state!(LatestArrival typeof Timestamp);

custom_activity_state!(WaitingTime typeof Duration);

custom_tour_state!(TotalDistance typeof Distance);

custom_tour_state!(TotalDuration typeof Duration);

const SCHEDULE_EPSILON: f64 = 1E-6;

/// Updates route schedule data: the forward pass recomputes arrival and departure times,
/// the backward pass recomputes latest feasible arrivals and future waiting time, the last
/// pass accumulates route statistics. Each pass is a single O(n) traversal seeded only by
/// actor data and route contents, so rerunning it on an unchanged route is idempotent.
pub fn update_route_schedule(
    route_ctx: &mut RouteContext,
    activity: &(dyn ActivityCost + Send + Sync),
    transport: &(dyn TransportCost + Send + Sync),
) {
    update_schedules(route_ctx, activity, transport);
    update_states(route_ctx, activity, transport);
    update_statistics(route_ctx, transport);
}

/// Updates route departure to the new one.
pub fn update_route_departure(
    route_ctx: &mut RouteContext,
    activity: &(dyn ActivityCost + Send + Sync),
    transport: &(dyn TransportCost + Send + Sync),
    new_departure_time: Timestamp,
) {
    let start = route_ctx.route_mut().tour.get_mut(0).unwrap();
    start.schedule.departure = new_departure_time;

    update_route_schedule(route_ctx, activity, transport);
}

fn update_schedules(
    route_ctx: &mut RouteContext,
    activity: &(dyn ActivityCost + Send + Sync),
    transport: &(dyn TransportCost + Send + Sync),
) {
    let init = {
        let start = route_ctx.route().tour.start().unwrap();
        (start.place.location, start.schedule.departure)
    };

    (1..route_ctx.route().tour.total()).fold(init, |(loc, dep), activity_idx| {
        let (location, arrival, departure) = {
            let route = route_ctx.route();
            let a = route.tour.get(activity_idx).unwrap();
            let location = a.place.location;
            let arrival = dep + transport.duration(route, loc, location, TravelTime::Departure(dep));
            let departure = activity.estimate_departure(route, a, arrival);

            (location, arrival, departure)
        };

        route_ctx.route_mut().tour.get_mut(activity_idx).unwrap().schedule = Schedule::new(arrival, departure);

        (location, departure)
    });
}

fn update_states(
    route_ctx: &mut RouteContext,
    activity: &(dyn ActivityCost + Send + Sync),
    transport: &(dyn TransportCost + Send + Sync),
) {
    // update latest arrival and waiting states of non-terminal (job) activities
    let actor = route_ctx.route().actor.clone();
    let init = (
        actor.detail.time.end,
        actor
            .detail
            .end
            .as_ref()
            .unwrap_or_else(|| actor.detail.start.as_ref().expect("operational vehicle must have start place"))
            .location,
        0_f64,
    );

    let tour_len = route_ctx.route().tour.total();
    let mut waiting_times = vec![Duration::default(); tour_len];

    // terminal activities keep their theoretical latest: the operating window bound
    let mut latest_arrivals = route_ctx
        .route()
        .tour
        .all_activities()
        .map(|act| act.place.time.end.min(actor.detail.time.end))
        .collect::<Vec<_>>();

    {
        let route = route_ctx.route();
        route.tour.all_activities().enumerate().rev().fold(init, |acc, (activity_idx, act)| {
            if act.job.is_none() {
                return acc;
            }

            let (end_time, prev_loc, waiting) = acc;
            let latest_arrival_time = if end_time == f64::MAX {
                act.place.time.end
            } else {
                let latest_departure =
                    end_time - transport.duration(route, act.place.location, prev_loc, TravelTime::Arrival(end_time));
                activity.estimate_arrival(route, act, latest_departure)
            };
            let future_waiting = waiting + (act.place.time.start - act.schedule.arrival).max(0.);

            // invariant: forward arrival never exceeds the backward latest arrival
            assert!(
                act.schedule.arrival <= latest_arrival_time + SCHEDULE_EPSILON,
                "arrival time {} is greater than latest arrival {} at activity {}",
                act.schedule.arrival,
                latest_arrival_time,
                activity_idx
            );

            latest_arrivals[activity_idx] = latest_arrival_time;
            waiting_times[activity_idx] = future_waiting;

            (latest_arrival_time, act.place.location, future_waiting)
        });
    }

    let state = route_ctx.state_mut();
    state.set_latest_arrival_states(latest_arrivals);
    state.set_waiting_time_states(waiting_times);
}

fn update_statistics(route_ctx: &mut RouteContext, transport: &(dyn TransportCost + Send + Sync)) {
    let (total_dist, total_dur) = {
        let route = route_ctx.route();
        let start = route.tour.start().unwrap();
        let end = route.tour.end().unwrap();

        let total_dur = end.schedule.departure - start.schedule.departure;

        let init = (start.place.location, start.schedule.departure, Distance::default());
        let (_, _, total_dist) = route.tour.all_activities().skip(1).fold(init, |(loc, dep, total_dist), a| {
            let total_dist = total_dist + transport.distance(route, loc, a.place.location, TravelTime::Departure(dep));

            (a.place.location, a.schedule.departure, total_dist)
        });

        (total_dist, total_dur)
    };

    let state = route_ctx.state_mut();
    state.set_total_distance(total_dist);
    state.set_total_duration(total_dur);
}
