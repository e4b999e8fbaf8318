//! This module contains a generalized insertion heuristic implementation within its
//! contexts and supporting entities.

mod context;
pub use self::context::*;

mod evaluators;
pub use self::evaluators::*;

mod factories;
pub use self::factories::*;

mod insertions;
pub use self::insertions::*;

mod selectors;
pub use self::selectors::*;
