//! # vrptw-genetic
//!
//! Genetic-algorithm core for the vehicle routing problem with time windows
//! (VRPTW): a two-segment chromosome encoding, capacity repair, population
//! initializers, fitness evaluation, and a wrapper that restricts generic
//! operators to one chromosome segment.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Stop, Vehicle, Instance, Route)
//! - [`distance`] — Euclidean distance matrix
//! - [`evaluation`] — Route scheduling and chromosome cost
//! - [`ga`] — Chromosome, repair, initialization, operators, GA problem
//! - [`error`] — Error type

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod models;

pub use error::{Result, RoutingError};
