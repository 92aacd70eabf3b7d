//! Domain model types for the VRPTW.
//!
//! Provides stores with demands and time windows, vehicles with capacity and
//! cost rate, the immutable problem [`Instance`], and the simulated [`Route`]
//! schedule produced by the evaluator.

mod instance;
mod route;
mod stop;
mod vehicle;

pub use instance::{Instance, InstanceData, StoreData, VehicleData};
pub use route::{Route, Visit};
pub use stop::{Position, Stop, TimeWindow};
pub use vehicle::Vehicle;
