use super::*;
use crate::utils::Timer;

/// A termination criterion which is in terminated state when the wall clock time limit
/// is exceeded. The clock starts at construction time.
pub struct MaxTime {
    timer: Timer,
    limit_in_secs: f64,
}

impl MaxTime {
    /// Creates a new instance of `MaxTime`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { timer: Timer::start(), limit_in_secs }
    }
}

impl Termination for MaxTime {
    fn is_termination(&self, _: &RefinementContext) -> bool {
        self.timer.elapsed_secs_as_f64() > self.limit_in_secs
    }
}
