//! The search module provides the building blocks of the ruin and recreate principle,
//! introduced by [`Schrimpf et al. (2000)`].
//!
//! [`Schrimpf et al. (2000)`]: https://www.sciencedirect.com/science/article/pii/S0021999199964136

mod recreate;
pub use self::recreate::*;

mod ruin;
pub use self::ruin::*;

mod utils;
pub use self::utils::RemovalLimits;
pub(crate) use self::utils::*;
