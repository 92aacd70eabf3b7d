//! Chromosome initializers.
//!
//! A new individual is a uniform random permutation of the customers plus a
//! partition produced by one of the [`PartitionStrategy`] variants, passed
//! through [`repair`](super::repair) before it is handed out.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Instance;

use super::chromosome::Chromosome;
use super::repair::{find_forward_boundary, repair, validate_capacities};

/// How the initial partition segment is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// `V` equally long index ranges, ignoring demand.
    Uniform,
    /// `V - 1` distinct random cut positions, sorted. Ignores demand.
    #[default]
    Choice,
    /// Fill each vehicle in order until the next customer would overflow it.
    Greedy,
}

impl PartitionStrategy {
    /// Draws `vehicle_count - 1` cut positions for `route`.
    ///
    /// The cuts are not guaranteed to be feasible; repair takes care of that.
    pub fn cut_positions<R: Rng + ?Sized>(
        &self,
        route: &[usize],
        instance: &Instance,
        rng: &mut R,
    ) -> Vec<usize> {
        let n = route.len();
        let cuts = instance.vehicle_count() - 1;
        match self {
            PartitionStrategy::Uniform => uniform_cuts(n, cuts),
            PartitionStrategy::Choice => choice_cuts(n, cuts, rng),
            PartitionStrategy::Greedy => greedy_cuts(route, instance),
        }
    }
}

fn uniform_cuts(n: usize, cuts: usize) -> Vec<usize> {
    let step = n.div_ceil(cuts + 1);
    (1..=cuts).map(|i| (i * step).min(n)).collect()
}

fn choice_cuts<R: Rng + ?Sized>(n: usize, cuts: usize, rng: &mut R) -> Vec<usize> {
    let mut positions = if n == 0 {
        vec![0; cuts]
    } else if cuts <= n {
        index::sample(rng, n, cuts).into_vec()
    } else {
        // More vehicles than positions: distinct cuts are impossible
        (0..cuts).map(|_| rng.random_range(0..n)).collect()
    };
    positions.sort_unstable();
    positions
}

fn greedy_cuts(route: &[usize], instance: &Instance) -> Vec<usize> {
    let demands: Vec<f64> = route.iter().map(|&sid| instance.demand(sid)).collect();
    let vehicles = instance.vehicles();
    let mut cuts = Vec::with_capacity(vehicles.len() - 1);
    let mut start = 0;
    for vehicle in &vehicles[..vehicles.len() - 1] {
        start += find_forward_boundary(&demands[start..], vehicle.capacity());
        cuts.push(start);
    }
    cuts
}

/// Creates one repaired chromosome for `instance`.
///
/// Draws a uniform random permutation of the customers, asks `strategy` for
/// cut positions and repairs them. With `validate_on_build` the result is
/// re-checked and a still infeasible chromosome fails with
/// [`RoutingError::CapacityExceeded`](crate::error::RoutingError::CapacityExceeded)
/// naming the offending vehicle and its slice demands.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Instance, Position, Stop, TimeWindow, Vehicle};
/// use vrptw_genetic::ga::{init_iterate_and_distribute, PartitionStrategy};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let mut stores: Vec<Stop> = (0..6)
///     .map(|i| Stop::new(Position::new(i as f64, 2.0), 4.0, tw, 1.0))
///     .collect();
/// stores.push(Stop::depot(Position::new(0.0, 0.0), tw));
/// let instance = Instance::new(stores, vec![Vehicle::new(12.0), Vehicle::new(12.0)]).unwrap();
///
/// let mut rng = u_numflow::random::create_rng(7);
/// let c = init_iterate_and_distribute(&instance, PartitionStrategy::Greedy, true, &mut rng).unwrap();
/// assert_eq!(c.len(), 7);
/// assert_eq!(c.partition(), &[3]);
/// ```
pub fn init_iterate_and_distribute<R: Rng + ?Sized>(
    instance: &Instance,
    strategy: PartitionStrategy,
    validate_on_build: bool,
    rng: &mut R,
) -> Result<Chromosome> {
    let mut route: Vec<usize> = (0..instance.store_count()).collect();
    route.shuffle(rng);

    let cuts = strategy.cut_positions(&route, instance, rng);
    let mut chromosome = Chromosome::new(route, cuts);
    repair(&mut chromosome, instance)?;

    match validate_capacities(&chromosome, instance) {
        Err(err) if validate_on_build => return Err(err),
        Err(err) => log::warn!("initial chromosome left infeasible: {err}"),
        Ok(()) => {}
    }
    log::debug!(
        "initialized {strategy:?} partition {:?}",
        chromosome.partition()
    );
    Ok(chromosome)
}

/// An initializer bound to an instance and a partition strategy.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::models::{Instance, Position, Stop, TimeWindow, Vehicle};
/// use vrptw_genetic::ga::{Initializer, PartitionStrategy};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let stores = vec![
///     Stop::new(Position::new(1.0, 1.0), 3.0, tw, 0.0),
///     Stop::new(Position::new(2.0, 1.0), 3.0, tw, 0.0),
///     Stop::depot(Position::new(0.0, 0.0), tw),
/// ];
/// let instance = Instance::new(stores, vec![Vehicle::new(5.0), Vehicle::new(5.0)]).unwrap();
///
/// let init = Initializer::new(&instance)
///     .with_strategy(PartitionStrategy::Uniform)
///     .with_validation(true);
/// let mut rng = u_numflow::random::create_rng(1);
/// let c = init.create(&mut rng).unwrap();
/// assert_eq!(c.partition(), &[1]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Initializer<'a> {
    instance: &'a Instance,
    strategy: PartitionStrategy,
    validate_on_build: bool,
}

impl<'a> Initializer<'a> {
    /// Creates an initializer using the default strategy, without validation.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            strategy: PartitionStrategy::default(),
            validate_on_build: false,
        }
    }

    /// Sets the partition strategy.
    pub fn with_strategy(mut self, strategy: PartitionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Re-checks every repaired chromosome and fails if it is still infeasible.
    pub fn with_validation(mut self, validate_on_build: bool) -> Self {
        self.validate_on_build = validate_on_build;
        self
    }

    /// Partition strategy in use.
    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// Creates one chromosome.
    pub fn create<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Chromosome> {
        init_iterate_and_distribute(self.instance, self.strategy, self.validate_on_build, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use crate::models::{Position, Stop, TimeWindow, Vehicle};
    use proptest::prelude::*;

    const STRATEGIES: [PartitionStrategy; 3] = [
        PartitionStrategy::Uniform,
        PartitionStrategy::Choice,
        PartitionStrategy::Greedy,
    ];

    fn instance(demands: &[f64], capacities: &[f64]) -> Instance {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        let mut stores: Vec<Stop> = demands
            .iter()
            .enumerate()
            .map(|(i, &d)| Stop::new(Position::new(i as f64, 3.0), d, tw, 1.0))
            .collect();
        stores.push(Stop::depot(Position::new(0.0, 0.0), tw));
        let vehicles = capacities.iter().map(|&c| Vehicle::new(c)).collect();
        Instance::new(stores, vehicles).expect("valid")
    }

    fn is_permutation(route: &[usize]) -> bool {
        let mut sorted = route.to_vec();
        sorted.sort_unstable();
        sorted == (0..route.len()).collect::<Vec<_>>()
    }

    #[test]
    fn test_uniform_cuts() {
        assert_eq!(uniform_cuts(10, 2), vec![4, 8]);
        assert_eq!(uniform_cuts(9, 2), vec![3, 6]);
        assert!(uniform_cuts(5, 0).is_empty());
    }

    #[test]
    fn test_uniform_cuts_clamped_to_route() {
        // ceil(2 / 4) = 1 → 1, 2, 3 clamped to 2
        assert_eq!(uniform_cuts(2, 3), vec![1, 2, 2]);
        assert_eq!(uniform_cuts(0, 2), vec![0, 0]);
    }

    #[test]
    fn test_choice_cuts_sorted_and_distinct() {
        let mut rng = u_numflow::random::create_rng(42);
        for _ in 0..50 {
            let cuts = choice_cuts(10, 4, &mut rng);
            assert_eq!(cuts.len(), 4);
            assert!(cuts.windows(2).all(|w| w[0] < w[1]));
            assert!(cuts.iter().all(|&c| c < 10));
        }
    }

    #[test]
    fn test_choice_cuts_more_vehicles_than_customers() {
        let mut rng = u_numflow::random::create_rng(42);
        let cuts = choice_cuts(2, 5, &mut rng);
        assert_eq!(cuts.len(), 5);
        assert!(cuts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(choice_cuts(0, 2, &mut rng), vec![0, 0]);
    }

    #[test]
    fn test_greedy_cuts() {
        let inst = instance(&[4.0, 4.0, 4.0, 4.0, 4.0], &[8.0, 9.0, 20.0]);
        assert_eq!(greedy_cuts(&[0, 1, 2, 3, 4], &inst), vec![2, 4]);
    }

    #[test]
    fn test_greedy_cuts_leftover_vehicles_empty() {
        let inst = instance(&[1.0, 1.0], &[10.0, 10.0, 10.0]);
        assert_eq!(greedy_cuts(&[1, 0], &inst), vec![2, 2]);
    }

    #[test]
    fn test_strategy_serde_names() {
        let s: PartitionStrategy = serde_json::from_str("\"greedy\"").expect("known");
        assert_eq!(s, PartitionStrategy::Greedy);
        assert_eq!(
            serde_json::to_string(&PartitionStrategy::Uniform).expect("serializable"),
            "\"uniform\""
        );
        assert!(serde_json::from_str::<PartitionStrategy>("\"random_greedy\"").is_err());
        assert_eq!(PartitionStrategy::default(), PartitionStrategy::Choice);
    }

    #[test]
    fn test_init_single_customer() {
        let inst = instance(&[10.0], &[20.0]);
        let mut rng = u_numflow::random::create_rng(0);
        for strategy in STRATEGIES {
            let c = init_iterate_and_distribute(&inst, strategy, true, &mut rng).expect("feasible");
            assert_eq!(c.route(), &[0]);
            assert!(c.partition().is_empty());
        }
    }

    #[test]
    fn test_init_depot_only() {
        let inst = instance(&[], &[5.0, 5.0]);
        let mut rng = u_numflow::random::create_rng(0);
        for strategy in STRATEGIES {
            let c = init_iterate_and_distribute(&inst, strategy, true, &mut rng).expect("feasible");
            assert!(c.route().is_empty());
            assert_eq!(c.partition(), &[0]);
        }
    }

    #[test]
    fn test_strict_init_reports_unrepairable_customer() {
        let inst = instance(&[2.0, 30.0, 2.0], &[10.0, 10.0]);
        assert_eq!(inst.unservable_customers(), vec![1]);
        let mut rng = u_numflow::random::create_rng(3);
        let err = init_iterate_and_distribute(&inst, PartitionStrategy::Choice, true, &mut rng)
            .unwrap_err();
        match err {
            RoutingError::CapacityExceeded(v) => {
                assert!(v.demands.contains(&30.0));
                assert!(v.total_demand() > v.capacity);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_init_returns_infeasible_chromosome() {
        let inst = instance(&[2.0, 30.0, 2.0], &[10.0, 10.0]);
        let mut rng = u_numflow::random::create_rng(3);
        let c = init_iterate_and_distribute(&inst, PartitionStrategy::Greedy, false, &mut rng)
            .expect("no validation requested");
        assert!(validate_capacities(&c, &inst).is_err());
    }

    #[test]
    fn test_initializer_is_reproducible() {
        let inst = instance(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[8.0, 8.0, 8.0]);
        let init = Initializer::new(&inst).with_strategy(PartitionStrategy::Choice);
        let mut a = u_numflow::random::create_rng(11);
        let mut b = u_numflow::random::create_rng(11);
        for _ in 0..10 {
            assert_eq!(
                init.create(&mut a).expect("built").genes(),
                init.create(&mut b).expect("built").genes()
            );
        }
    }

    proptest! {
        #[test]
        fn prop_route_is_permutation(
            n in 0usize..30,
            vehicles in 1usize..6,
            seed in 0u64..1000,
            strategy_idx in 0usize..3,
        ) {
            let inst = instance(&vec![1.0; n], &vec![4.0; vehicles]);
            let mut rng = u_numflow::random::create_rng(seed);
            let c = init_iterate_and_distribute(&inst, STRATEGIES[strategy_idx], false, &mut rng)
                .expect("valid layout");
            prop_assert_eq!(c.len(), inst.chromosome_len());
            prop_assert!(is_permutation(c.route()));
            prop_assert!(c.partition().windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_feasible_when_capacity_is_ample(
            demands in prop::collection::vec(0.0f64..10.0, 0..25),
            vehicles in 1usize..5,
            seed in 0u64..1000,
            strategy_idx in 0usize..3,
        ) {
            let total: f64 = demands.iter().sum();
            let inst = instance(&demands, &vec![total + 1.0; vehicles]);
            let mut rng = u_numflow::random::create_rng(seed);
            let c = init_iterate_and_distribute(&inst, STRATEGIES[strategy_idx], true, &mut rng);
            prop_assert!(c.is_ok());
        }
    }
}
