//! # Deepcopy Demo
//!
//! Sample classes and console scenarios exercising the `deepcopy` engine on
//! a flat record, a cyclic pair of nodes and nested collections.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod models;
pub mod scenarios;

pub use scenarios::{Report, Scenario};
