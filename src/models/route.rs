//! Simulated route schedule and visit types.

/// A single visit to a store within a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    /// Store index being visited.
    pub store: usize,
    /// Arrival time at this store.
    pub arrival_time: f64,
    /// Time service started (arrival, or ready time when early).
    pub service_start: f64,
    /// Departure time (service start + service time).
    pub departure_time: f64,
    /// Lateness past the due date measured at departure.
    pub tardiness: f64,
    /// Cumulative load delivered after this visit.
    pub load_after: f64,
}

/// The schedule a vehicle follows for its slice of the chromosome.
///
/// A route starts and ends at the depot (not stored in `visits`).
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Route, Visit};
///
/// let mut route = Route::new(0, 2.0);
/// route.push_visit(Visit {
///     store: 1,
///     arrival_time: 10.0,
///     service_start: 10.0,
///     departure_time: 15.0,
///     tardiness: 3.0,
///     load_after: 10.0,
/// });
/// route.set_total_duration(20.0);
/// assert_eq!(route.total_tardiness(), 3.0);
/// assert_eq!(route.cost(), 3.0 + 20.0 * 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    vehicle: usize,
    rate: f64,
    visits: Vec<Visit>,
    total_distance: f64,
    total_duration: f64,
    total_tardiness: f64,
    total_load: f64,
}

impl Route {
    /// Creates an empty route for the given vehicle index and cost rate.
    pub fn new(vehicle: usize, rate: f64) -> Self {
        Self {
            vehicle,
            rate,
            visits: Vec::new(),
            total_distance: 0.0,
            total_duration: 0.0,
            total_tardiness: 0.0,
            total_load: 0.0,
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.total_load = visit.load_after;
        self.total_tardiness += visit.tardiness;
        self.visits.push(visit);
    }

    /// Index of the vehicle driving this route.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Returns the number of visits (excluding depot).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Store indices in visit order.
    pub fn stores(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.store).collect()
    }

    /// Total travelled distance, including the return leg.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Elapsed time from depot departure to depot return.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Sum of tardiness over all visits.
    pub fn total_tardiness(&self) -> f64 {
        self.total_tardiness
    }

    /// Total load delivered.
    pub fn total_load(&self) -> f64 {
        self.total_load
    }

    /// Route cost: tardiness plus duration weighted by the vehicle rate.
    pub fn cost(&self) -> f64 {
        self.total_tardiness + self.total_duration * self.rate
    }

    /// Sets the total distance (used by evaluator).
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    /// Sets the total duration (used by evaluator).
    pub fn set_total_duration(&mut self, d: f64) {
        self.total_duration = d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(store: usize, tardiness: f64, load_after: f64) -> Visit {
        Visit {
            store,
            arrival_time: 0.0,
            service_start: 0.0,
            departure_time: 0.0,
            tardiness,
            load_after,
        }
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(0, 1.0);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle(), 0);
        assert_eq!(r.cost(), 0.0);
        assert_eq!(r.total_load(), 0.0);
    }

    #[test]
    fn test_route_push_visit() {
        let mut r = Route::new(1, 1.0);
        r.push_visit(visit(5, 1.0, 20.0));
        r.push_visit(visit(3, 2.5, 35.0));
        assert_eq!(r.len(), 2);
        assert_eq!(r.stores(), vec![5, 3]);
        assert_eq!(r.total_load(), 35.0);
        assert!((r.total_tardiness() - 3.5).abs() < 1e-10);
    }
}
