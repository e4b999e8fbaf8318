use crate::utils::{DefaultRandom, Random};
use std::sync::Arc;

/// Keeps track of execution resources: the seeded random source, an optional global
/// time/iteration quota, parallelism settings and a logger.
#[derive(Clone)]
pub struct Environment {
    /// An entity which provides a way to use randomized values, explicitly seeded per run.
    pub random: Arc<dyn Random + Send + Sync>,

    /// A global execution quota which, once reached, stops the search cooperatively.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// Keeps data parallelism settings.
    pub parallelism: Parallelism,

    /// A logger type which outputs progress information.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment` with given random generator.
    pub fn new_with_random(random: Arc<dyn Random + Send + Sync>) -> Self {
        Self { random, ..Self::default() }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            random: Arc::new(DefaultRandom::default()),
            quota: None,
            parallelism: Parallelism::default(),
            logger: Arc::new(|msg: &str| println!("{msg}")),
        }
    }
}

/// Keeps data parallelism settings used by the insertion evaluation scan.
#[derive(Clone)]
pub struct Parallelism {
    available_cpus: usize,
    is_enabled: bool,
}

impl Parallelism {
    /// Creates a new instance of `Parallelism` with parallel scan enabled.
    pub fn new() -> Self {
        Self { available_cpus: get_cpus(), is_enabled: true }
    }

    /// Creates a new instance of `Parallelism` which keeps all evaluations on the calling thread.
    pub fn new_sequential() -> Self {
        Self { available_cpus: 1, is_enabled: false }
    }

    /// Returns amount of available CPUs.
    pub fn available_cpus(&self) -> usize {
        self.available_cpus
    }

    /// Returns true if parallel candidate evaluation is enabled.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new_sequential()
    }
}

/// Specifies a computational quota for the search checked between iterations.
pub trait Quota {
    /// Returns true when computational quota is reached.
    fn is_reached(&self) -> bool;
}

/// Specifies a logger type which takes a string message.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Returns amount of CPUs.
#[cfg(not(target_arch = "wasm32"))]
fn get_cpus() -> usize {
    num_cpus::get()
}

/// Returns amount of CPUs.
#[cfg(target_arch = "wasm32")]
fn get_cpus() -> usize {
    1
}
