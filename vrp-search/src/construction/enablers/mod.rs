//! Provides functionality shared by multiple features, most notably the route schedule
//! propagation passes.

mod schedule_update;
pub use self::schedule_update::*;
