//! Genetic algorithm components for VRPTW.
//!
//! - [`Chromosome`] — route permutation plus partition cut positions
//! - [`repair`] — two-pass capacity repair of the partition segment
//! - [`Initializer`] — random permutation with a [`PartitionStrategy`]
//! - [`scope_to_route`] / [`scope_to_partition`] — lift segment operators onto chromosomes
//! - [`VrptwGaProblem`] — [`GaProblem`](u_metaheur::ga::GaProblem) implementation

mod chromosome;
mod init;
mod operators;
mod problem;
mod repair;

pub use chromosome::{decode, Chromosome, Segment};
pub use init::{init_iterate_and_distribute, Initializer, PartitionStrategy};
pub use operators::{
    scope_to_partition, scope_to_route, Decrement, Increment, OrderCrossover, Regenerate,
    ReverseSegment, Scoped, SegmentOperator, Swap,
};
pub use problem::VrptwGaProblem;
pub use repair::{
    find_backward_boundary, find_forward_boundary, repair, repair_partition,
    validate_capacities, CapacityViolation,
};
