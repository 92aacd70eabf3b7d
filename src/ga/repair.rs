//! Capacity repair of the partition segment.
//!
//! # Algorithm
//!
//! Two monotone sweeps over the route, leaving the permutation untouched:
//!
//! 1. **Forward**: for vehicles `0..V-1`, scan the current slice left to right
//!    and cut at the first customer whose cumulative demand exceeds the
//!    vehicle's capacity. The next vehicle's slice starts at that cut, so the
//!    overflow is pushed towards the tail.
//! 2. **Backward**: from the last vehicle to the second, scan the window
//!    between the forward cut and the already repaired right edge from right
//!    to left, and cut where the reverse cumulative demand would exceed the
//!    vehicle's capacity. This protects the tail vehicle, which otherwise
//!    absorbs every leftover customer.
//!
//! The backward cuts form the repaired partition. Both sweeps are linear in
//! the number of customers and always terminate. The result is a local
//! heuristic, not a certificate: [`validate_capacities`] reports the cases
//! it cannot fix (a customer heavier than every vehicle, too little total
//! capacity, or an unlucky tail).

use std::fmt;

use crate::error::{Result, RoutingError};
use crate::models::Instance;

use super::chromosome::{slice_bounds, Chromosome, Segment};

/// Length of the longest prefix of `demands` whose total fits `capacity`.
///
/// Returns `demands.len()` when everything fits.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::ga::find_forward_boundary;
///
/// assert_eq!(find_forward_boundary(&[4.0, 4.0, 4.0], 10.0), 2);
/// assert_eq!(find_forward_boundary(&[4.0, 4.0], 10.0), 2);
/// assert_eq!(find_forward_boundary(&[12.0, 1.0], 10.0), 0);
/// ```
pub fn find_forward_boundary(demands: &[f64], capacity: f64) -> usize {
    let mut load = 0.0;
    for (idx, &demand) in demands.iter().enumerate() {
        load += demand;
        if load > capacity {
            return idx;
        }
    }
    demands.len()
}

/// Start of the longest suffix of `demands` whose total fits `capacity`.
///
/// Returns `0` when everything fits.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::ga::find_backward_boundary;
///
/// assert_eq!(find_backward_boundary(&[4.0, 4.0, 4.0], 10.0), 1);
/// assert_eq!(find_backward_boundary(&[4.0, 4.0], 10.0), 0);
/// assert_eq!(find_backward_boundary(&[1.0, 12.0], 10.0), 2);
/// ```
pub fn find_backward_boundary(demands: &[f64], capacity: f64) -> usize {
    let mut load = 0.0;
    for (r_idx, &demand) in demands.iter().rev().enumerate() {
        load += demand;
        if load > capacity {
            return demands.len() - r_idx;
        }
    }
    0
}

/// Computes a capacity-repaired partition for `route` (customer indices).
///
/// `partition` may be infeasible or even non-monotone; the result is always
/// ascending and within `0..=route.len()`. Already feasible ascending
/// partitions come back unchanged.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Instance, Position, Stop, TimeWindow, Vehicle};
/// use vrptw_genetic::ga::repair_partition;
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let mut stores: Vec<Stop> = (0..4)
///     .map(|i| Stop::new(Position::new(i as f64, 1.0), 5.0, tw, 0.0))
///     .collect();
/// stores.push(Stop::depot(Position::new(0.0, 0.0), tw));
/// let instance = Instance::new(stores, vec![Vehicle::new(10.0), Vehicle::new(10.0)]).unwrap();
///
/// // Everything on the second vehicle overflows it; repair balances 2 / 2.
/// assert_eq!(repair_partition(&[0, 1, 2, 3], &[0], &instance), vec![2]);
/// ```
pub fn repair_partition(route: &[usize], partition: &[usize], instance: &Instance) -> Vec<usize> {
    let n = route.len();
    let demands: Vec<f64> = route.iter().map(|&sid| instance.demand(sid)).collect();
    let vehicles = instance.vehicles();

    // Forward: push overflow towards the tail
    let mut forward = Vec::with_capacity(partition.len());
    let mut start = 0;
    for (&cut, vehicle) in partition.iter().zip(vehicles) {
        let end = cut.clamp(start, n);
        start += find_forward_boundary(&demands[start..end], vehicle.capacity());
        forward.push(start);
    }

    // Backward: tighten from the tail towards the front
    let mut repaired = vec![0; forward.len()];
    let mut end = n;
    for v in (1..=forward.len()).rev() {
        let start = forward[v - 1];
        let boundary = start + find_backward_boundary(&demands[start..end], vehicles[v].capacity());
        repaired[v - 1] = boundary;
        end = boundary;
    }

    repaired
}

/// Repairs the partition segment of `chromosome` in place.
///
/// The route segment is never changed. Fitness is invalidated only when a
/// boundary actually moved.
pub fn repair(chromosome: &mut Chromosome, instance: &Instance) -> Result<()> {
    chromosome.check_against(instance)?;
    let repaired = repair_partition(chromosome.route(), chromosome.partition(), instance);
    if repaired.as_slice() != chromosome.partition() {
        log::debug!(
            "repair moved partition {:?} -> {:?}",
            chromosome.partition(),
            repaired
        );
        chromosome.replace_segment(Segment::Partition, &repaired)?;
    }
    Ok(())
}

/// A vehicle whose slice demand exceeds its capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityViolation {
    /// Offending vehicle index.
    pub vehicle: usize,
    /// That vehicle's capacity.
    pub capacity: f64,
    /// First route position of the slice.
    pub start: usize,
    /// One past the last route position of the slice.
    pub end: usize,
    /// Demands of the slice's customers, in route order.
    pub demands: Vec<f64>,
}

impl CapacityViolation {
    /// Total demand assigned to the vehicle.
    pub fn total_demand(&self) -> f64 {
        self.demands.iter().sum()
    }
}

impl fmt::Display for CapacityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let demands: Vec<String> = self.demands.iter().map(|d| d.to_string()).collect();
        write!(
            f,
            "vehicle {} has more demand than capacity: positions {}..{} demand {} > capacity {} [{}]",
            self.vehicle,
            self.start,
            self.end,
            self.total_demand(),
            self.capacity,
            demands.join(", ")
        )
    }
}

/// Checks that every vehicle's slice fits its capacity.
///
/// Read-only. Only ascending partitions with cuts in `0..=store_count` can
/// pass, which makes every validated chromosome a fixed point of [`repair`].
/// Fails with [`RoutingError::CapacityExceeded`] describing the first
/// offending vehicle, with [`RoutingError::InvalidChromosome`] for an
/// unordered or out-of-range partition, or with a layout error when the
/// chromosome does not belong to `instance`.
pub fn validate_capacities(chromosome: &Chromosome, instance: &Instance) -> Result<()> {
    chromosome.check_against(instance)?;
    let route = chromosome.route();
    let partition = chromosome.partition();
    let ordered = partition.windows(2).all(|w| w[0] <= w[1]);
    if !ordered || partition.last().is_some_and(|&cut| cut > route.len()) {
        return Err(RoutingError::InvalidChromosome(format!(
            "partition {partition:?} is not ascending within 0..={}",
            route.len()
        )));
    }

    for (vehicle, range) in slice_bounds(partition, route.len()).into_iter().enumerate() {
        let truck = &instance.vehicles()[vehicle];
        let demands: Vec<f64> = route[range.clone()]
            .iter()
            .map(|&sid| instance.demand(sid))
            .collect();
        if !truck.fits(demands.iter().sum()) {
            return Err(RoutingError::CapacityExceeded(CapacityViolation {
                vehicle,
                capacity: truck.capacity(),
                start: range.start,
                end: range.end,
                demands,
            }));
        }
    }
    Ok(())
}
