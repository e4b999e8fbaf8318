use super::*;
use crate::construction::features::TIME_CONSTRAINT_CODE;
use crate::construction::heuristics::UnassignmentInfo;
use crate::helpers::construction::*;
use crate::helpers::models::problem::*;
use crate::models::common::{Demand, IdDimension, SingleDimLoad, TimeWindow};
use crate::solver::search::{RandomJobRemoval, RecreateWithCheapest, RemovalLimits};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

fn create_two_vehicle_problem() -> Arc<Problem> {
    let points = vec![(0., 0.), (5., 7.), (5., 13.), (15., 7.), (15., 13.)];
    let jobs = (1..=4)
        .map(|idx| test_single_job_with_demand(&format!("s{idx}"), idx, Demand::delivery(SingleDimLoad::new(1))))
        .collect();
    let fleet = test_fleet_with_vehicles(vec![
        test_vehicle_with_capacity("v1", 2),
        test_vehicle_with_capacity("v2", 2),
    ]);

    create_test_problem(fleet, jobs, create_matrix_transport_cost(points))
}

fn create_greedy_strategies() -> GenericResult<SearchStrategyManager> {
    create_strategies_with_acceptor(Box::<GreedyAcceptance>::default())
}

fn create_strategies_with_acceptor(
    acceptor: Box<dyn SolutionAcceptor + Send + Sync>,
) -> GenericResult<SearchStrategyManager> {
    SearchStrategyManager::new(vec![SearchStrategy::new(
        "test",
        1,
        Box::<SelectBest>::default(),
        acceptor,
        Arc::new(RandomJobRemoval::new(RemovalLimits::new(0.5, 8)?)),
        Arc::new(RecreateWithCheapest::default()),
    )?])
}

#[test]
fn cannot_create_manager_without_strategies() {
    assert!(SearchStrategyManager::new(vec![]).is_err());
}

#[test]
fn cannot_create_strategy_with_invalid_configuration() {
    let create_strategy = |name: &str, weight: usize| {
        SearchStrategy::new(
            name,
            weight,
            Box::<SelectBest>::default(),
            Box::<GreedyAcceptance>::default(),
            Arc::new(RandomJobRemoval::default()),
            Arc::new(RecreateWithCheapest::default()),
        )
    };

    assert!(create_strategy("", 1).is_err());
    assert!(create_strategy("zero", 0).is_err());
    assert!(create_strategy("valid", 1).is_ok());
}

#[test]
fn can_solve_problem_assigning_all_jobs() {
    let problem = create_two_vehicle_problem();
    let environment = create_test_environment_with_seed(42);

    let solution = SolverBuilder::new(problem, environment)
        .with_strategies(create_greedy_strategies().unwrap())
        .with_termination(Box::new(MaxGeneration::new(50)))
        .build()
        .unwrap()
        .solve()
        .unwrap();

    assert!(solution.unassigned.is_empty());
    assert_eq!(solution.routes.len(), 2);
    solution.routes.iter().for_each(|route| {
        assert_eq!(route.tour.job_count(), 2);
    });
}

#[test]
fn can_produce_identical_trajectories_under_same_seed() {
    let solve = |seed: u64| {
        SolverBuilder::new(create_two_vehicle_problem(), create_test_environment_with_seed(seed))
            .with_strategies(create_greedy_strategies().unwrap())
            .with_termination(Box::new(MaxGeneration::new(30)))
            .build()
            .unwrap()
            .solve()
            .unwrap()
    };

    assert_eq!(solve(42).cost, solve(42).cost);
}

#[test]
fn can_degenerate_zero_threshold_acceptance_to_greedy() {
    let solve = |strategies: SearchStrategyManager| {
        SolverBuilder::new(create_two_vehicle_problem(), create_test_environment_with_seed(17))
            .with_strategies(strategies)
            .with_termination(Box::new(MaxGeneration::new(30)))
            .build()
            .unwrap()
            .solve()
            .unwrap()
    };

    let greedy = solve(create_greedy_strategies().unwrap());
    let threshold =
        solve(create_strategies_with_acceptor(Box::new(ThresholdAcceptance::new(0., 100.).unwrap())).unwrap());

    assert_eq!(greedy.cost, threshold.cost);
}

#[test]
fn can_keep_greedy_search_monotone() {
    // greedy acceptance never replaces the working solution with a strictly worse one,
    // so the best known fitness never increases over the run
    let problem = create_two_vehicle_problem();
    let environment = create_test_environment_with_seed(3);
    let refinement_ctx =
        RefinementContext::new(problem.clone(), environment.clone(), 4);
    let initial = RecreateWithCheapest::default().run(
        &refinement_ctx,
        crate::construction::heuristics::InsertionContext::new(problem.clone(), environment.clone()),
    );
    let initial_fitness = initial.get_fitness();

    let solution = SolverBuilder::new(problem, environment)
        .with_strategies(create_greedy_strategies().unwrap())
        .with_termination(Box::new(MaxGeneration::new(100)))
        .build()
        .unwrap()
        .solve()
        .unwrap();

    assert!(solution.cost <= initial_fitness + 1E-6);
}

#[test]
fn can_tag_unassignable_job_with_time_window_reason() {
    // the job time window is over before any vehicle can reach its location
    let problem = create_line_problem(
        vec![test_vehicle("v1")],
        vec![
            test_single_job_with_location("ok", 5),
            test_single_job_with_time_window("late", 50, TimeWindow::new(0., 10.)),
        ],
    );

    let solution = SolverBuilder::new(problem, create_test_environment_with_seed(0))
        .with_termination(Box::new(MaxGeneration::new(10)))
        .build()
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(solution.unassigned.len(), 1);
    let (job, info) = solution.unassigned.first().unwrap();
    assert_eq!(get_job_id(job), "late");
    match info {
        UnassignmentInfo::Simple(code) => assert_eq!(*code, TIME_CONSTRAINT_CODE),
        _ => unreachable!("a time window reason code is expected"),
    }
}

#[test]
fn can_notify_search_listeners() {
    let iterations = Arc::new(AtomicUsize::new(0));
    let ruins = Arc::new(AtomicUsize::new(0));
    let removed_jobs = Arc::new(Mutex::new(Vec::<String>::new()));

    let mut listeners = SearchListeners::default();
    listeners.on_iteration_start({
        let iterations = iterations.clone();
        move |_| {
            iterations.fetch_add(1, Ordering::Relaxed);
        }
    });
    listeners.on_ruin_end({
        let ruins = ruins.clone();
        move |_| {
            ruins.fetch_add(1, Ordering::Relaxed);
        }
    });
    listeners.on_job_removed({
        let removed_jobs = removed_jobs.clone();
        move |job| {
            removed_jobs.lock().unwrap().push(job.dimens().get_id().cloned().unwrap_or_default());
        }
    });

    SolverBuilder::new(create_two_vehicle_problem(), create_test_environment_with_seed(5))
        .with_strategies(create_greedy_strategies().unwrap())
        .with_termination(Box::new(MaxGeneration::new(10)))
        .with_listeners(listeners)
        .build()
        .unwrap()
        .solve()
        .unwrap();

    assert_eq!(iterations.load(Ordering::Relaxed), 10);
    assert_eq!(ruins.load(Ordering::Relaxed), 10);
    assert!(!removed_jobs.lock().unwrap().is_empty());
}
