use super::*;
use crate::helpers::construction::*;
use crate::helpers::models::problem::*;
use crate::helpers::solver::create_test_refinement_ctx;
use crate::models::common::{Demand, SingleDimLoad};
use crate::solver::search::{Recreate, RecreateWithCheapest, RemovalLimits};

#[test]
fn can_remove_whole_route() {
    let unit_delivery = || Demand::delivery(SingleDimLoad::new(1));

    let problem = create_line_problem(
        vec![test_vehicle_with_capacity("v1", 2), test_vehicle_with_capacity("v2", 2)],
        vec![
            test_single_job_with_demand("s1", 5, unit_delivery()),
            test_single_job_with_demand("s2", 10, unit_delivery()),
            test_single_job_with_demand("s3", 15, unit_delivery()),
            test_single_job_with_demand("s4", 20, unit_delivery()),
        ],
    );
    let environment = create_test_environment_with_seed(5);
    let refinement_ctx = create_test_refinement_ctx(problem.clone(), environment.clone());

    let insertion_ctx =
        RecreateWithCheapest::default().run(&refinement_ctx, InsertionContext::new(problem, environment));
    assert_eq!(insertion_ctx.solution.routes.len(), 2);

    let limits = RemovalLimits { removed_jobs_fraction: 0.5, max_removed_jobs: 2, max_affected_routes: 1 };
    let mut ruined = RandomRouteRemoval::new(limits).run(&refinement_ctx, insertion_ctx);
    ruined.restore();

    // one route is fully cleared and dropped, the other stays intact
    assert_eq!(ruined.solution.routes.len(), 1);
    assert_eq!(ruined.solution.required.len(), 2);
    assert_eq!(ruined.solution.routes.first().unwrap().route().tour.job_count(), 2);
}
