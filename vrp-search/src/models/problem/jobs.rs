#[cfg(test)]
#[path = "../../../tests/unit/models/problem/jobs_test.rs"]
mod jobs_test;

use crate::models::common::*;
use crate::models::problem::{Fleet, TransportCost};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

/// Represents a job variant.
#[derive(Clone)]
pub enum Job {
    /// Single job.
    Single(Arc<Single>),
    /// Multi job with multiple dependent activities, e.g. pickup and delivery.
    Multi(Arc<Multi>),
}

impl Job {
    /// Considers job as [`Single`].
    pub fn as_single(&self) -> Option<&Arc<Single>> {
        match &self {
            Job::Single(single) => Some(single),
            _ => None,
        }
    }

    /// Considers job as [`Single`]. Panics if it is [`Multi`].
    pub fn to_single(&self) -> &Arc<Single> {
        self.as_single().expect("unexpected job type: multi")
    }

    /// Considers job as [`Multi`].
    pub fn as_multi(&self) -> Option<&Arc<Multi>> {
        match &self {
            Job::Multi(multi) => Some(multi),
            _ => None,
        }
    }

    /// Considers job as [`Multi`]. Panics if it is [`Single`].
    pub fn to_multi(&self) -> &Arc<Multi> {
        self.as_multi().expect("unexpected job type: single")
    }

    /// Returns dimensions collection.
    pub fn dimens(&self) -> &Dimensions {
        match &self {
            Job::Single(single) => &single.dimens,
            Job::Multi(multi) => &multi.dimens,
        }
    }

    /// Gets all places from the job.
    pub fn places(&self) -> Box<dyn Iterator<Item = &Place> + '_> {
        match &self {
            Job::Single(single) => Box::new(single.places.iter()),
            Job::Multi(multi) => Box::new(multi.jobs.iter().flat_map(|single| single.places.iter())),
        }
    }
}

impl PartialEq<Job> for Job {
    fn eq(&self, other: &Job) -> bool {
        match (&self, other) {
            (Job::Single(lhs), Job::Single(rhs)) => Arc::ptr_eq(lhs, rhs),
            (Job::Multi(lhs), Job::Multi(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl Eq for Job {}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Job::Single(single) => f.debug_tuple("Single").field(&Arc::as_ptr(single)).finish(),
            Job::Multi(multi) => f.debug_tuple("Multi").field(&Arc::as_ptr(multi)).finish(),
        }
    }
}

impl Hash for Job {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Job::Single(single) => (Arc::as_ptr(single) as usize).hash(state),
            Job::Multi(multi) => (Arc::as_ptr(multi) as usize).hash(state),
        }
    }
}

/// Represents a job place details where and/or when work has to be performed.
#[derive(Clone)]
pub struct Place {
    /// Location where work has to be performed. Absent location means that the work is
    /// performed at the place the vehicle happens to be (e.g. a break on the road).
    pub location: Option<Location>,
    /// Time has to be spend performing work.
    pub duration: Duration,
    /// Time data which specifies when work can be started.
    pub times: Vec<TimeSpan>,
}

/// Represents a job which should be performed once but actual place/time might vary.
pub struct Single {
    /// Specifies job details: where and when it can be performed.
    pub places: Vec<Place>,
    /// Dimensions which contains extra work requirements.
    pub dimens: Dimensions,
}

/// Represents a job which consists of multiple sub jobs.
/// All of these jobs must be performed in the same route or none of them. Order is
/// controlled by the permutator, e.g. pickup always before delivery.
pub struct Multi {
    /// A list of jobs which must be performed.
    pub jobs: Vec<Arc<Single>>,
    /// Dimensions which contains extra work requirements.
    pub dimens: Dimensions,
    /// Permutation generator.
    permutator: Box<dyn JobPermutation + Send + Sync>,
}

/// Defines a trait to work with multi job's permutations.
pub trait JobPermutation {
    /// Returns valid permutations.
    fn get(&self) -> Vec<Vec<usize>>;

    /// Validates given permutation.
    fn validate(&self, permutation: &[usize]) -> bool;
}

/// Specifies permutation generator which allows only fixed set of permutations.
pub struct FixedJobPermutation {
    permutations: Vec<Vec<usize>>,
}

impl FixedJobPermutation {
    /// Creates a new instance of `FixedJobPermutation`.
    pub fn new(permutations: Vec<Vec<usize>>) -> Self {
        Self { permutations }
    }
}

impl JobPermutation for FixedJobPermutation {
    fn get(&self) -> Vec<Vec<usize>> {
        self.permutations.clone()
    }

    fn validate(&self, permutation: &[usize]) -> bool {
        self.permutations
            .iter()
            .any(|prm| prm.len() == permutation.len() && prm.iter().zip(permutation.iter()).all(|(&a, &b)| a == b))
    }
}

struct MultiSharedDimensionKey;

impl Multi {
    /// Creates a new multi job from given `dimens` and `jobs` assuming that jobs have to be
    /// inserted in the order they are specified (e.g. pickup before delivery).
    pub fn new_shared(jobs: Vec<Arc<Single>>, dimens: Dimensions) -> Arc<Self> {
        let permutations = vec![(0..jobs.len()).collect()];
        Self::bind(Self { jobs, dimens, permutator: Box::new(FixedJobPermutation::new(permutations)) })
    }

    /// Creates a new multi job from given `dimens` and `jobs` using `permutator` to control
    /// insertion order.
    pub fn new_shared_with_permutator(
        jobs: Vec<Arc<Single>>,
        dimens: Dimensions,
        permutator: Box<dyn JobPermutation + Send + Sync>,
    ) -> Arc<Self> {
        Self::bind(Self { jobs, dimens, permutator })
    }

    /// Returns all sub-jobs in allowed insertion orders.
    pub fn permutations(&self) -> Vec<Vec<Arc<Single>>> {
        self.permutator
            .get()
            .iter()
            .map(|perm| perm.iter().map(|&i| self.jobs.get(i).unwrap().clone()).collect())
            .collect()
    }

    /// Validates given set of permutations.
    pub fn validate(&self, permutations: &[usize]) -> bool {
        self.permutator.validate(permutations)
    }

    /// Returns parent multi job for given sub-job.
    pub fn roots(single: &Single) -> Option<Arc<Multi>> {
        single.dimens.get_value::<MultiSharedDimensionKey, Weak<Multi>>().and_then(|w| w.upgrade())
    }

    /// Wraps given multi job into [`Arc`] adding reference to it from all sub-jobs.
    fn bind(mut multi: Self) -> Arc<Self> {
        Arc::new_cyclic(|weak_multi| {
            multi.jobs.iter_mut().for_each(|single| {
                Arc::get_mut(single)
                    .expect("single from multi should not be shared before binding")
                    .dimens
                    .set_value::<MultiSharedDimensionKey, Weak<Multi>>(weak_multi.clone());
            });

            multi
        })
    }
}

/// A function which estimates relative closeness of two jobs for a given profile.
pub type JobProximityMetric = Box<dyn Fn(&Profile, &Job, &Job) -> Cost + Send + Sync>;

type JobIndex = HashMap<Job, Vec<(Job, Cost)>>;

/// Stores all jobs taking into account their neighborhood: for every (profile, job) pair,
/// a list of other jobs sorted by increasing proximity metric is precomputed once. The
/// index drives radial ruin and is built from average inter-place transport distances by
/// default, but the metric is pluggable.
pub struct Jobs {
    jobs: Vec<Job>,
    index: HashMap<usize, JobIndex>,
}

impl Jobs {
    /// Creates a new instance of [`Jobs`] with the default proximity metric.
    pub fn new(fleet: &Fleet, jobs: Vec<Job>, transport: Arc<dyn TransportCost + Send + Sync>) -> Jobs {
        let metric: JobProximityMetric = Box::new(move |profile, from, to| {
            get_average_distance_between_jobs(profile, transport.as_ref(), from, to)
        });

        Self::new_with_metric(fleet, jobs, metric)
    }

    /// Creates a new instance of [`Jobs`] with a custom proximity metric.
    pub fn new_with_metric(fleet: &Fleet, jobs: Vec<Job>, metric: JobProximityMetric) -> Jobs {
        Jobs { index: create_index(fleet, jobs.as_slice(), &metric), jobs }
    }

    /// Returns all jobs in original order.
    pub fn all(&'_ self) -> impl Iterator<Item = Job> + '_ {
        self.jobs.iter().cloned()
    }

    /// Returns jobs "near" to the given one, in increasing distance order.
    pub fn neighbors(&self, profile: &Profile, job: &Job) -> impl Iterator<Item = &(Job, Cost)> {
        self.index.get(&profile.index).and_then(|index| index.get(job)).into_iter().flatten()
    }

    /// Returns amount of jobs.
    pub fn size(&self) -> usize {
        self.jobs.len()
    }
}

// Job with no location is assumed to be reachable with no costs.
const DEFAULT_COST: Cost = 0.;

fn create_index(fleet: &Fleet, jobs: &[Job], metric: &JobProximityMetric) -> HashMap<usize, JobIndex> {
    fleet
        .profiles
        .iter()
        .map(|profile| {
            let item = jobs
                .iter()
                .map(|job| {
                    let mut neighbours = jobs
                        .iter()
                        .filter(|other| *other != job)
                        .map(|other| (other.clone(), metric(profile, job, other).max(DEFAULT_COST)))
                        .collect::<Vec<_>>();
                    neighbours.sort_by(|(_, a), (_, b)| a.total_cmp(b));

                    (job.clone(), neighbours)
                })
                .collect::<JobIndex>();

            (profile.index, item)
        })
        .collect()
}

fn get_average_distance_between_jobs(
    profile: &Profile,
    transport: &(dyn TransportCost + Send + Sync),
    from: &Job,
    to: &Job,
) -> Cost {
    let from_locations: Vec<Location> = from.places().filter_map(|place| place.location).collect();
    let to_locations: Vec<Location> = to.places().filter_map(|place| place.location).collect();

    if from_locations.is_empty() || to_locations.is_empty() {
        return DEFAULT_COST;
    }

    let total: Cost = from_locations
        .iter()
        .flat_map(|&from| to_locations.iter().map(move |&to| (from, to)))
        .map(|(from, to)| transport.distance_approx(profile, from, to))
        .sum();

    total / (from_locations.len() * to_locations.len()) as Cost
}
