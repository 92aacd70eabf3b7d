//! Vehicle type with capacity and cost rate.

/// A vehicle of the fleet.
///
/// Every vehicle starts and ends at the instance depot. Its route cost is the
/// accumulated tardiness plus the route duration scaled by `rate`.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::Vehicle;
///
/// let v = Vehicle::new(20.0).with_rate(1.5);
/// assert_eq!(v.capacity(), 20.0);
/// assert_eq!(v.rate(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    capacity: f64,
    rate: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity.
    ///
    /// Default: rate = 1.0.
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            rate: 1.0,
        }
    }

    /// Sets the cost per unit of route duration.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Maximum load this vehicle can deliver.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Cost per unit of elapsed route time.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns `true` if a load of `demand` fits this vehicle.
    pub fn fits(&self, demand: f64) -> bool {
        demand <= self.capacity
    }
}
