//! GA problem definition for VRPTW.
//!
//! Implements the [`GaProblem`](u_metaheur::ga::GaProblem) trait over the
//! two-segment [`Chromosome`] so [`GaRunner`](u_metaheur::ga::GaRunner) drives
//! the evolutionary loop.
//!
//! # Operators
//!
//! - **Initialization**: random permutation + partition strategy + repair
//! - **Crossover**: order crossover (OX) on the route segments of both parents
//! - **Mutation**: one route operator or one partition operator, then repair
//! - **Evaluation**: sum of per-vehicle tardiness + rate-weighted duration

use rand::Rng;
use u_metaheur::ga::GaProblem;

use crate::evaluation::evaluate_chromosome;
use crate::models::Instance;

use super::chromosome::Chromosome;
use super::init::{init_iterate_and_distribute, PartitionStrategy};
use super::operators::{
    scope_to_partition, scope_to_route, Decrement, Increment, OrderCrossover, Regenerate,
    ReverseSegment, Swap,
};
use super::repair::repair;

/// GA problem for the vehicle routing problem with time windows.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Instance, Position, Stop, TimeWindow, Vehicle};
/// use vrptw_genetic::ga::VrptwGaProblem;
/// use u_metaheur::ga::{GaConfig, GaRunner};
///
/// let tw = TimeWindow::new(0.0, 1000.0).unwrap();
/// let stores = vec![
///     Stop::new(Position::new(1.0, 0.0), 10.0, tw, 0.0),
///     Stop::new(Position::new(2.0, 0.0), 10.0, tw, 0.0),
///     Stop::new(Position::new(3.0, 0.0), 10.0, tw, 0.0),
///     Stop::depot(Position::new(0.0, 0.0), tw),
/// ];
/// let instance = Instance::new(stores, vec![Vehicle::new(30.0), Vehicle::new(30.0)]).unwrap();
///
/// let problem = VrptwGaProblem::new(instance);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30);
///
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert!(result.best_fitness < f64::INFINITY);
/// ```
#[derive(Debug, Clone)]
pub struct VrptwGaProblem {
    instance: Instance,
    strategy: PartitionStrategy,
    validate_on_build: bool,
    route_mutation_probability: f64,
}

impl VrptwGaProblem {
    /// Creates a GA problem for `instance`.
    ///
    /// Defaults: [`PartitionStrategy::Choice`], no build validation, route
    /// mutation probability 0.5.
    pub fn new(instance: Instance) -> Self {
        Self {
            instance,
            strategy: PartitionStrategy::default(),
            validate_on_build: false,
            route_mutation_probability: 0.5,
        }
    }

    /// Sets the partition strategy used for the initial population.
    pub fn with_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables strict construction: initial chromosomes that are still
    /// infeasible after repair abort the run.
    pub fn with_validation(mut self, validate_on_build: bool) -> Self {
        self.validate_on_build = validate_on_build;
        self
    }

    /// Sets the probability of mutating the route rather than the partition.
    ///
    /// Clamped to `[0, 1]`; NaN keeps the default of 0.5.
    pub fn with_route_mutation_probability(mut self, probability: f64) -> Self {
        if !probability.is_nan() {
            self.route_mutation_probability = probability.clamp(0.0, 1.0);
        }
        self
    }

    /// The instance being solved.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    fn repair_or_log(&self, chromosome: &mut Chromosome) {
        if let Err(err) = repair(chromosome, &self.instance) {
            log::warn!("skipping repair: {err}");
        }
    }
}

impl GaProblem for VrptwGaProblem {
    type Individual = Chromosome;

    /// # Panics
    ///
    /// Panics in strict mode (see [`VrptwGaProblem::with_validation`]) when a
    /// repaired chromosome still exceeds a vehicle's capacity.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        match init_iterate_and_distribute(&self.instance, self.strategy, self.validate_on_build, rng)
        {
            Ok(chromosome) => chromosome,
            Err(err) => panic!("initial population is infeasible: {err}"),
        }
    }

    fn evaluate(&self, individual: &Chromosome) -> f64 {
        evaluate_chromosome(individual, &self.instance).unwrap_or(f64::INFINITY)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let mut c1 = parent1.clone();
        let mut c2 = parent2.clone();
        if let Err(err) = scope_to_route(OrderCrossover).apply(&mut [&mut c1, &mut c2], rng) {
            log::warn!("crossover discarded: {err}");
        }
        self.repair_or_log(&mut c1);
        self.repair_or_log(&mut c2);
        vec![c1, c2]
    }

    fn mutate<R: Rng>(&self, individual: &mut Chromosome, rng: &mut R) {
        let max_cut = self.instance.store_count();
        let applied = if rng.random_bool(self.route_mutation_probability) {
            if rng.random_bool(0.5) {
                scope_to_route(Swap).apply(&mut [&mut *individual], rng)
            } else {
                scope_to_route(ReverseSegment).apply(&mut [&mut *individual], rng)
            }
        } else {
            match rng.random_range(0..3u8) {
                0 => scope_to_partition(Increment { max_value: max_cut })
                    .apply(&mut [&mut *individual], rng),
                1 => scope_to_partition(Decrement).apply(&mut [&mut *individual], rng),
                _ => scope_to_partition(Regenerate { max_value: max_cut })
                    .apply(&mut [&mut *individual], rng),
            }
        };
        if let Err(err) = applied {
            log::warn!("mutation discarded: {err}");
        }
        self.repair_or_log(individual);
    }
}
