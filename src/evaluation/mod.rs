//! Fitness evaluation: route schedule simulation and chromosome cost.

mod evaluator;

pub use evaluator::{evaluate_chromosome, evaluate_route, RouteEvaluator};
