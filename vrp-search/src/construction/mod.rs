//! Contains building blocks of the constructive insertion heuristic: contexts and the
//! state store, constraint/objective features, schedule propagation and the insertion
//! engine itself.

pub mod enablers;
pub mod features;
pub mod heuristics;
