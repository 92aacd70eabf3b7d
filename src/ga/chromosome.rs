//! Two-segment chromosome for multi-vehicle routing.
//!
//! A chromosome is a flat gene sequence of `store_count + vehicles - 1`
//! integers:
//!
//! ```text
//! [ r0 r1 ... r(n-1) | c0 c1 ... c(V-2) ]
//!   route segment      partition segment
//! ```
//!
//! The route segment is a permutation of the customer indices `0..n`. The
//! partition segment holds ascending cut positions into the route: vehicle
//! `v` serves `route[c(v-1)..c(v)]` with implicit `c(-1) = 0` and
//! `c(V-1) = n`.

use std::ops::Range;

use u_metaheur::ga::Individual;

use crate::error::{Result, RoutingError};
use crate::models::Instance;

/// Which part of the chromosome an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The customer permutation.
    Route,
    /// The vehicle cut positions.
    Partition,
}

/// A route permutation plus partition cut positions.
///
/// The fitness caches the evaluated cost; it is `f64::INFINITY` until
/// evaluated and is reset whenever the genes change through this API.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::ga::{decode, Chromosome};
///
/// let chromosome = Chromosome::new(vec![2, 0, 3, 1], vec![1, 1]);
/// assert_eq!(chromosome.route(), &[2, 0, 3, 1]);
/// assert_eq!(chromosome.partition(), &[1, 1]);
///
/// let routes = decode(&chromosome);
/// assert_eq!(routes, vec![(0, &[2][..]), (1, &[][..]), (2, &[0, 3, 1][..])]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<usize>,
    route_len: usize,
    fitness: f64,
}

impl Chromosome {
    /// Creates a chromosome from its two segments.
    pub fn new(mut route: Vec<usize>, partition: Vec<usize>) -> Self {
        let route_len = route.len();
        route.extend(partition);
        Self {
            genes: route,
            route_len,
            fitness: f64::INFINITY,
        }
    }

    /// Creates a chromosome from a flat gene sequence laid out for `instance`.
    ///
    /// Fails if the length does not match or the route segment is not a
    /// permutation of the instance's customers.
    pub fn from_genes(genes: Vec<usize>, instance: &Instance) -> Result<Self> {
        let expected = instance.chromosome_len();
        if genes.len() != expected {
            return Err(RoutingError::ChromosomeLength {
                expected,
                actual: genes.len(),
            });
        }
        let chromosome = Self {
            genes,
            route_len: instance.store_count(),
            fitness: f64::INFINITY,
        };
        chromosome.check_route()?;
        Ok(chromosome)
    }

    /// All genes, route segment first.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// The customer permutation.
    pub fn route(&self) -> &[usize] {
        &self.genes[..self.route_len]
    }

    /// The cut positions into the route.
    pub fn partition(&self) -> &[usize] {
        &self.genes[self.route_len..]
    }

    /// Returns the genes of one segment.
    pub fn segment(&self, segment: Segment) -> &[usize] {
        &self.genes[self.segment_range(segment)]
    }

    /// Overwrites one segment. The replacement must have the same length.
    ///
    /// Invalidates the cached fitness.
    pub fn replace_segment(&mut self, segment: Segment, values: &[usize]) -> Result<()> {
        let range = self.segment_range(segment);
        if values.len() != range.len() {
            return Err(RoutingError::OperatorContract(format!(
                "{segment:?} segment has {} genes, replacement has {}",
                range.len(),
                values.len()
            )));
        }
        self.genes[range].copy_from_slice(values);
        self.invalidate_fitness();
        Ok(())
    }

    /// Number of customers in the route segment.
    pub fn route_len(&self) -> usize {
        self.route_len
    }

    /// Number of vehicles this chromosome distributes customers over.
    pub fn vehicle_count(&self) -> usize {
        self.genes.len() - self.route_len + 1
    }

    /// Total number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if there are no genes at all.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns `true` once a finite fitness has been assigned.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Clears the cached fitness.
    pub fn invalidate_fitness(&mut self) {
        self.fitness = f64::INFINITY;
    }

    /// Verifies that this chromosome is laid out for `instance` and that its
    /// route visits every customer exactly once.
    pub fn check_against(&self, instance: &Instance) -> Result<()> {
        if self.genes.len() != instance.chromosome_len() {
            return Err(RoutingError::ChromosomeLength {
                expected: instance.chromosome_len(),
                actual: self.genes.len(),
            });
        }
        if self.route_len != instance.store_count() {
            return Err(RoutingError::ChromosomeLength {
                expected: instance.store_count(),
                actual: self.route_len,
            });
        }
        self.check_route()
    }

    fn check_route(&self) -> Result<()> {
        if !is_permutation(self.route()) {
            return Err(RoutingError::InvalidChromosome(format!(
                "route segment {:?} is not a permutation of 0..{}",
                self.route(),
                self.route_len
            )));
        }
        Ok(())
    }

    fn segment_range(&self, segment: Segment) -> Range<usize> {
        match segment {
            Segment::Route => 0..self.route_len,
            Segment::Partition => self.route_len..self.genes.len(),
        }
    }
}

impl Individual for Chromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Splits the route segment at the cut positions into one slice per vehicle.
///
/// Always yields exactly `vehicle_count` `(vehicle, slice)` pairs in vehicle
/// order; slices may be empty. Cuts are clamped into
/// `[previous cut, route_len]`, so a non-monotone partition collapses to empty
/// slices instead of assigning a customer twice.
pub fn decode(chromosome: &Chromosome) -> Vec<(usize, &[usize])> {
    let route = chromosome.route();
    slice_bounds(chromosome.partition(), route.len())
        .into_iter()
        .enumerate()
        .map(|(vehicle, range)| (vehicle, &route[range]))
        .collect()
}

/// Index ranges of every vehicle's slice for the given cuts over `n` customers.
pub(crate) fn slice_bounds(partition: &[usize], n: usize) -> Vec<Range<usize>> {
    let mut bounds = Vec::with_capacity(partition.len() + 1);
    let mut start = 0;
    for &cut in partition.iter().chain(std::iter::once(&n)) {
        let end = cut.clamp(start, n);
        bounds.push(start..end);
        start = end;
    }
    bounds
}

fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];
    for &v in values {
        if v >= values.len() || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Stop, TimeWindow, Vehicle};

    fn instance(customers: usize, vehicles: usize) -> Instance {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        let mut stores: Vec<Stop> = (0..customers)
            .map(|i| Stop::new(Position::new(i as f64, 0.0), 1.0, tw, 0.0))
            .collect();
        stores.push(Stop::depot(Position::new(0.0, 0.0), tw));
        Instance::new(stores, vec![Vehicle::new(10.0); vehicles]).expect("valid")
    }

    #[test]
    fn test_new_layout() {
        let c = Chromosome::new(vec![1, 0, 2], vec![2]);
        assert_eq!(c.genes(), &[1, 0, 2, 2]);
        assert_eq!(c.route_len(), 3);
        assert_eq!(c.vehicle_count(), 2);
        assert_eq!(c.len(), 4);
        assert!(!c.is_evaluated());
        assert_eq!(c.fitness(), f64::INFINITY);
    }

    #[test]
    fn test_segment_access() {
        let c = Chromosome::new(vec![1, 0, 2], vec![1, 3]);
        assert_eq!(c.segment(Segment::Route), &[1, 0, 2]);
        assert_eq!(c.segment(Segment::Partition), &[1, 3]);
    }

    #[test]
    fn test_replace_segment_invalidates_fitness() {
        let mut c = Chromosome::new(vec![1, 0, 2], vec![1, 3]);
        c.set_fitness(12.0);
        assert!(c.is_evaluated());
        c.replace_segment(Segment::Partition, &[0, 2]).expect("same length");
        assert_eq!(c.genes(), &[1, 0, 2, 0, 2]);
        assert!(!c.is_evaluated());
    }

    #[test]
    fn test_replace_segment_rejects_length_change() {
        let mut c = Chromosome::new(vec![1, 0, 2], vec![1]);
        assert!(c.replace_segment(Segment::Route, &[0, 1]).is_err());
        assert_eq!(c.genes(), &[1, 0, 2, 1]);
    }

    #[test]
    fn test_from_genes() {
        let inst = instance(3, 2);
        let c = Chromosome::from_genes(vec![2, 0, 1, 1], &inst).expect("valid");
        assert_eq!(c.route(), &[2, 0, 1]);
        assert_eq!(c.partition(), &[1]);

        assert!(matches!(
            Chromosome::from_genes(vec![2, 0, 1], &inst),
            Err(RoutingError::ChromosomeLength {
                expected: 4,
                actual: 3
            })
        ));
        assert!(Chromosome::from_genes(vec![2, 2, 1, 1], &inst).is_err());
        assert!(Chromosome::from_genes(vec![2, 0, 3, 1], &inst).is_err());
    }

    #[test]
    fn test_check_against() {
        let inst = instance(3, 2);
        assert!(Chromosome::new(vec![0, 1, 2], vec![3]).check_against(&inst).is_ok());
        assert!(Chromosome::new(vec![0, 1], vec![1, 2]).check_against(&inst).is_err());
    }

    #[test]
    fn test_check_against_rejects_bad_route_genes() {
        let inst = instance(2, 1);
        // duplicate customer, depot index, out of range
        for route in [vec![0, 0], vec![0, 2], vec![0, 7]] {
            let c = Chromosome::new(route, vec![]);
            assert!(matches!(
                c.check_against(&inst),
                Err(RoutingError::InvalidChromosome(_))
            ));
        }
    }

    #[test]
    fn test_decode_exactly_one_slice_per_vehicle() {
        let c = Chromosome::new(vec![4, 3, 2, 1, 0], vec![2, 4]);
        let routes = decode(&c);
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0], (0, &[4, 3][..]));
        assert_eq!(routes[1], (1, &[2, 1][..]));
        assert_eq!(routes[2], (2, &[0][..]));
    }

    #[test]
    fn test_decode_single_vehicle() {
        let c = Chromosome::new(vec![1, 0], vec![]);
        assert_eq!(decode(&c), vec![(0, &[1, 0][..])]);
    }

    #[test]
    fn test_decode_empty_slices() {
        let c = Chromosome::new(vec![0, 1], vec![0, 2]);
        let routes = decode(&c);
        assert!(routes[0].1.is_empty());
        assert_eq!(routes[1].1, &[0, 1]);
        assert!(routes[2].1.is_empty());
    }

    #[test]
    fn test_decode_non_monotone_cuts_never_duplicate() {
        let c = Chromosome::new(vec![0, 1, 2, 3], vec![3, 1, 9]);
        let served: Vec<usize> = decode(&c).into_iter().flat_map(|(_, s)| s.to_vec()).collect();
        assert_eq!(served, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_slice_bounds() {
        assert_eq!(slice_bounds(&[1, 3], 5), vec![0..1, 1..3, 3..5]);
        assert_eq!(slice_bounds(&[], 0), vec![0..0]);
        assert_eq!(slice_bounds(&[4, 2], 5), vec![0..4, 4..4, 4..5]);
    }
}
