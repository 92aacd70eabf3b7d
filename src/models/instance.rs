//! Problem instance: stores (customers plus depot) and the vehicle fleet.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

use super::{Position, Stop, TimeWindow, Vehicle};

/// Plain store record as supplied by external instance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    /// `(x, y)` coordinates.
    pub position: (f64, f64),
    /// Units to deliver.
    pub demand: f64,
    /// `(ready_time, due_date)`.
    pub window: (f64, f64),
    /// Service duration.
    pub service_time: f64,
}

/// Plain vehicle record as supplied by external instance data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleData {
    /// Cost per unit of route time.
    pub rate: f64,
    /// Load capacity.
    pub capacity: f64,
}

/// Serializable form of an [`Instance`]. The last store is the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceData {
    /// Customers followed by the depot.
    pub stores: Vec<StoreData>,
    /// The fleet, in vehicle order.
    pub vehicles: Vec<VehicleData>,
}

/// An immutable VRPTW instance.
///
/// By convention the **last** store is the depot; stores `0..store_count()`
/// are customers. Travel times between all stores are precomputed.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::Instance;
///
/// let json = r#"{
///     "stores": [
///         {"position": [41.0, 49.0], "demand": 10.0, "window": [161.0, 171.0], "service_time": 10.0},
///         {"position": [35.0, 35.0], "demand": 0.0, "window": [0.0, 230.0], "service_time": 0.0}
///     ],
///     "vehicles": [{"rate": 1.0, "capacity": 20.0}]
/// }"#;
/// let instance = Instance::from_json(json).unwrap();
/// assert_eq!(instance.store_count(), 1);
/// assert_eq!(instance.depot_index(), 1);
/// assert_eq!(instance.chromosome_len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    stores: Vec<Stop>,
    vehicles: Vec<Vehicle>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Creates an instance, validating every store and vehicle.
    pub fn new(stores: Vec<Stop>, vehicles: Vec<Vehicle>) -> Result<Self> {
        if stores.is_empty() {
            return Err(RoutingError::InvalidInstance(
                "at least one store (the depot) is required".into(),
            ));
        }
        if vehicles.is_empty() {
            return Err(RoutingError::InvalidInstance(
                "at least one vehicle is required".into(),
            ));
        }

        for (idx, stop) in stores.iter().enumerate() {
            let p = stop.position();
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(invalid(format!("store {idx} has a non-finite position")));
            }
            if !(stop.demand() >= 0.0) || !stop.demand().is_finite() {
                return Err(invalid(format!(
                    "store {idx} has invalid demand {}",
                    stop.demand()
                )));
            }
            if !(stop.service_time() >= 0.0) || !stop.service_time().is_finite() {
                return Err(invalid(format!(
                    "store {idx} has invalid service time {}",
                    stop.service_time()
                )));
            }
        }

        for (idx, vehicle) in vehicles.iter().enumerate() {
            if !(vehicle.capacity() >= 0.0) || !vehicle.capacity().is_finite() {
                return Err(invalid(format!(
                    "vehicle {idx} has invalid capacity {}",
                    vehicle.capacity()
                )));
            }
            if !(vehicle.rate() >= 0.0) || !vehicle.rate().is_finite() {
                return Err(invalid(format!(
                    "vehicle {idx} has invalid rate {}",
                    vehicle.rate()
                )));
            }
        }

        check_depot_convention(&stores);

        let distances = DistanceMatrix::from_stops(&stores);
        Ok(Self {
            stores,
            vehicles,
            distances,
        })
    }

    /// Parses and validates an instance from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: InstanceData = serde_json::from_str(json)?;
        Self::try_from(data)
    }

    /// All stores; the last one is the depot.
    pub fn stores(&self) -> &[Stop] {
        &self.stores
    }

    /// The fleet, in vehicle order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Number of customers (stores minus the depot).
    pub fn store_count(&self) -> usize {
        self.stores.len() - 1
    }

    /// Number of vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Index of the depot in [`stores`](Self::stores).
    pub fn depot_index(&self) -> usize {
        self.stores.len() - 1
    }

    /// The depot stop.
    pub fn depot(&self) -> &Stop {
        &self.stores[self.depot_index()]
    }

    /// Number of genes of a chromosome for this instance:
    /// `store_count + vehicle_count - 1`.
    pub fn chromosome_len(&self) -> usize {
        self.store_count() + self.vehicle_count() - 1
    }

    /// Demand of store `idx`.
    pub fn demand(&self, idx: usize) -> f64 {
        self.stores[idx].demand()
    }

    /// Travel distance between two stores.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Travel time between two stores (unit speed).
    pub fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to)
    }

    /// Customers whose demand exceeds the capacity of every vehicle.
    ///
    /// No partition can serve these customers, so repair can never succeed
    /// while this list is non-empty.
    pub fn unservable_customers(&self) -> Vec<usize> {
        let max_capacity = self
            .vehicles
            .iter()
            .map(Vehicle::capacity)
            .fold(f64::NEG_INFINITY, f64::max);
        (0..self.store_count())
            .filter(|&idx| self.demand(idx) > max_capacity)
            .collect()
    }
}

impl TryFrom<InstanceData> for Instance {
    type Error = RoutingError;

    fn try_from(data: InstanceData) -> Result<Self> {
        let stores = data
            .stores
            .into_iter()
            .enumerate()
            .map(|(idx, s)| {
                let window = TimeWindow::new(s.window.0, s.window.1).ok_or_else(|| {
                    invalid(format!(
                        "store {idx} has invalid window ({}, {})",
                        s.window.0, s.window.1
                    ))
                })?;
                Ok(Stop::new(
                    Position::new(s.position.0, s.position.1),
                    s.demand,
                    window,
                    s.service_time,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let vehicles = data
            .vehicles
            .into_iter()
            .map(|v| Vehicle::new(v.capacity).with_rate(v.rate))
            .collect();
        Self::new(stores, vehicles)
    }
}

fn invalid(msg: String) -> RoutingError {
    RoutingError::InvalidInstance(msg)
}

/// Warns when the store list looks like it has the depot first instead of last.
fn check_depot_convention(stores: &[Stop]) {
    if stores.len() < 2 {
        return;
    }
    let first = &stores[0];
    let last = &stores[stores.len() - 1];
    let looks_like_depot = |s: &Stop| s.demand() == 0.0 && s.service_time() == 0.0;
    if looks_like_depot(first) && !looks_like_depot(last) {
        log::warn!(
            "last store (demand {}, service time {}) is used as depot but the first store looks like one; \
             was the instance built with the depot first?",
            last.demand(),
            last.service_time()
        );
    }
}
