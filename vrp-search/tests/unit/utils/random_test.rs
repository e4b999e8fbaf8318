use super::*;

#[test]
fn can_produce_deterministic_sequence_with_same_seed() {
    let random1 = DefaultRandom::new_with_seed(42);
    let random2 = DefaultRandom::new_with_seed(42);

    let sequence1: Vec<i32> = (0..100).map(|_| random1.uniform_int(0, 1000)).collect();
    let sequence2: Vec<i32> = (0..100).map(|_| random2.uniform_int(0, 1000)).collect();

    assert_eq!(sequence1, sequence2);
}

#[test]
fn can_produce_different_sequences_with_different_seeds() {
    let random1 = DefaultRandom::new_with_seed(1);
    let random2 = DefaultRandom::new_with_seed(2);

    let sequence1: Vec<i32> = (0..100).map(|_| random1.uniform_int(0, 1000)).collect();
    let sequence2: Vec<i32> = (0..100).map(|_| random2.uniform_int(0, 1000)).collect();

    assert_ne!(sequence1, sequence2);
}

#[test]
fn can_keep_uniform_int_in_range() {
    let random = DefaultRandom::new_with_seed(0);

    (0..1000).for_each(|_| {
        let value = random.uniform_int(3, 7);
        assert!((3..=7).contains(&value));
    });

    assert_eq!(random.uniform_int(5, 5), 5);
}

#[test]
fn can_keep_uniform_real_in_range() {
    let random = DefaultRandom::new_with_seed(0);

    (0..1000).for_each(|_| {
        let value = random.uniform_real(0.5, 1.5);
        assert!((0.5..1.5).contains(&value));
    });
}

#[test]
fn can_sample_weighted_indices() {
    let random = DefaultRandom::new_with_seed(123);
    let weights = [1, 1000];

    let mut counts = [0_usize; 2];
    (0..1000).for_each(|_| counts[random.weighted(&weights)] += 1);

    assert!(counts[1] > counts[0]);
}
