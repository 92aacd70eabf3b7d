//! Distance and travel time matrices.
//!
//! Provides a dense Euclidean distance matrix over all stores of an instance.

mod matrix;

pub use matrix::{distance, DistanceMatrix};
