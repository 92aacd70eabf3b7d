//! Route evaluator that simulates timing, tardiness and cost.

use crate::error::Result;
use crate::ga::{decode, Chromosome};
use crate::models::{Instance, Route, Visit};

/// Simulates vehicles driving their decoded routes.
///
/// Each route departs the depot at time 0, visits its stores in order and
/// returns to the depot. Arriving early waits for the ready time; finishing
/// service after the due date accrues linear tardiness. The return leg is
/// never charged tardiness.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Instance, Position, Stop, TimeWindow, Vehicle};
/// use vrptw_genetic::evaluation::RouteEvaluator;
///
/// let tw = TimeWindow::new(20.0, 100.0).unwrap();
/// let stores = vec![
///     Stop::new(Position::new(3.0, 4.0), 10.0, tw, 5.0),
///     Stop::depot(Position::new(0.0, 0.0), TimeWindow::new(0.0, 500.0).unwrap()),
/// ];
/// let instance = Instance::new(stores, vec![Vehicle::new(100.0)]).unwrap();
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let route = evaluator.build_route(&[0], 0);
/// // Arrive at 5, wait until 20, serve until 25, drive back 5.
/// assert_eq!(route.visits()[0].service_start, 20.0);
/// assert!((route.total_duration() - 30.0).abs() < 1e-10);
/// assert!((route.cost() - 30.0).abs() < 1e-10);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Builds the schedule of `vehicle` serving `route` (store indices) in order.
    ///
    /// # Panics
    ///
    /// Panics if `vehicle` or any store index is out of bounds.
    pub fn build_route(&self, route: &[usize], vehicle: usize) -> Route {
        let instance = self.instance;
        let depot = instance.depot_index();
        let mut schedule = Route::new(vehicle, instance.vehicles()[vehicle].rate());
        let mut time = 0.0;
        let mut load = 0.0;
        let mut total_distance = 0.0;
        let mut prev = depot;

        for &sid in route {
            let stop = &instance.stores()[sid];
            let travel = instance.travel_time(prev, sid);
            total_distance += instance.distance(prev, sid);

            let arrival = time + travel;
            let service_start = stop.window().start_of_service(arrival);
            let departure = service_start + stop.service_time();
            load += stop.demand();

            schedule.push_visit(Visit {
                store: sid,
                arrival_time: arrival,
                service_start,
                departure_time: departure,
                tardiness: stop.window().tardiness(departure),
                load_after: load,
            });

            time = departure;
            prev = sid;
        }

        // Return to depot, no tardiness on this leg
        total_distance += instance.distance(prev, depot);
        time += instance.travel_time(prev, depot);

        schedule.set_total_distance(total_distance);
        schedule.set_total_duration(time);
        schedule
    }

    /// Decodes a chromosome and builds one schedule per vehicle, in vehicle order.
    pub fn build_routes(&self, chromosome: &Chromosome) -> Result<Vec<Route>> {
        chromosome.check_against(self.instance)?;
        Ok(decode(chromosome)
            .into_iter()
            .map(|(vehicle, slice)| self.build_route(slice, vehicle))
            .collect())
    }
}

/// Cost of `vehicle` serving `route`: total tardiness plus route duration
/// times the vehicle rate. An empty route costs exactly zero.
pub fn evaluate_route(route: &[usize], vehicle: usize, instance: &Instance) -> f64 {
    RouteEvaluator::new(instance).build_route(route, vehicle).cost()
}

/// Total cost of a chromosome: the sum of its decoded route costs.
///
/// Pure function of the chromosome and instance; lower is better.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Instance, Position, Stop, TimeWindow, Vehicle};
/// use vrptw_genetic::evaluation::evaluate_chromosome;
/// use vrptw_genetic::ga::Chromosome;
///
/// let stores = vec![
///     Stop::new(Position::new(41.0, 49.0), 10.0, TimeWindow::new(161.0, 171.0).unwrap(), 10.0),
///     Stop::depot(Position::new(35.0, 35.0), TimeWindow::new(0.0, 230.0).unwrap()),
/// ];
/// let instance = Instance::new(stores, vec![Vehicle::new(20.0)]).unwrap();
/// let chromosome = Chromosome::new(vec![0], vec![]);
///
/// let cost = evaluate_chromosome(&chromosome, &instance).unwrap();
/// assert!((cost - (171.0 + 232f64.sqrt())).abs() < 1e-9);
/// ```
pub fn evaluate_chromosome(chromosome: &Chromosome, instance: &Instance) -> Result<f64> {
    chromosome.check_against(instance)?;
    Ok(decode(chromosome)
        .into_iter()
        .map(|(vehicle, slice)| evaluate_route(slice, vehicle, instance))
        .sum())
}
