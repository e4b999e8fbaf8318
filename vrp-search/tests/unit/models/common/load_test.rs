use super::*;

#[test]
fn can_compare_single_dim_loads() {
    assert!(SingleDimLoad::new(10).can_fit(&SingleDimLoad::new(10)));
    assert!(SingleDimLoad::new(10).can_fit(&SingleDimLoad::new(5)));
    assert!(!SingleDimLoad::new(5).can_fit(&SingleDimLoad::new(10)));

    assert_eq!(SingleDimLoad::new(5).max_load(SingleDimLoad::new(7)), SingleDimLoad::new(7));
}

#[test]
fn can_compare_multi_dim_loads() {
    let capacity = MultiDimLoad::new(vec![10, 5]);

    assert!(capacity.can_fit(&MultiDimLoad::new(vec![10, 5])));
    assert!(capacity.can_fit(&MultiDimLoad::new(vec![5, 5])));
    assert!(!capacity.can_fit(&MultiDimLoad::new(vec![11, 0])));
    assert!(!capacity.can_fit(&MultiDimLoad::new(vec![0, 6])));
}

#[test]
fn can_detect_incomparable_multi_dim_loads() {
    let left = MultiDimLoad::new(vec![1, 2]);
    let right = MultiDimLoad::new(vec![2, 1]);

    assert_eq!(left.partial_cmp(&right), None);
}

#[test]
fn can_calculate_demand_change() {
    let demand = Demand::<SingleDimLoad> {
        pickup: (SingleDimLoad::new(3), SingleDimLoad::new(1)),
        delivery: (SingleDimLoad::new(2), SingleDimLoad::default()),
    };

    assert_eq!(demand.change(), SingleDimLoad::new(2));

    assert_eq!(Demand::<SingleDimLoad>::delivery(SingleDimLoad::new(2)).change(), SingleDimLoad::new(-2));
    assert_eq!(Demand::<SingleDimLoad>::pickup(SingleDimLoad::new(2)).change(), SingleDimLoad::new(2));
}

#[test]
fn can_store_and_read_demand_dimension() {
    let mut dimens = Dimensions::default();
    dimens.set_demand(Demand::<SingleDimLoad>::delivery(SingleDimLoad::new(3)));

    let demand: &Demand<SingleDimLoad> = dimens.get_demand().unwrap();
    assert_eq!(demand.delivery.0, SingleDimLoad::new(3));
}
