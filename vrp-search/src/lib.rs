//! A crate which provides main building blocks of a *ruin and recreate* metaheuristic
//! to solve variations of ***Vehicle Routing Problem***.
//!
//! The crate is designed to be embedded into logistic planning tools: it consumes an
//! immutable problem definition (jobs, vehicles, routing costs) and produces a solution
//! (routes, unassigned jobs, cost) leaving all I/O, configuration parsing and reporting
//! to the caller.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod helpers;

#[macro_use]
mod macros;

pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;

pub mod prelude;
