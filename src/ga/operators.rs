//! Segment-scoped genetic operators.
//!
//! Operators are written against plain gene segments (`Vec<usize>`). The
//! [`scope_to_route`] and [`scope_to_partition`] wrappers lift them onto whole
//! chromosomes: extract the chosen segment from every chromosome, run the
//! operator on the batch, and write each result back in place, leaving the
//! other segment untouched.
//!
//! # Operators
//!
//! - [`Swap`] — exchange two random genes
//! - [`Increment`] / [`Decrement`] — nudge one cut position, keeping order
//! - [`Regenerate`] — replace the segment with a fresh ascending sample
//! - [`ReverseSegment`] — 2-opt style reversal of a random sub-range
//! - [`OrderCrossover`] — OX on a pair of route permutations
//!
//! Random picks that would break an operator's constraints are no-ops.

use rand::seq::index;
use rand::{Rng, RngCore};
use u_metaheur::ga::operators::order_crossover;

use crate::error::{Result, RoutingError};

use super::chromosome::{Chromosome, Segment};

/// An operator over a batch of gene segments.
///
/// Must return exactly one segment per input, each with its input's length.
/// Any `Fn(Vec<Vec<usize>>, &mut dyn RngCore) -> Vec<Vec<usize>>` qualifies.
pub trait SegmentOperator {
    /// Transforms the segments, returning them in input order.
    fn apply(&self, segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>>;
}

impl<F> SegmentOperator for F
where
    F: Fn(Vec<Vec<usize>>, &mut dyn RngCore) -> Vec<Vec<usize>>,
{
    fn apply(&self, segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        self(segments, rng)
    }
}

/// An operator restricted to one chromosome segment.
///
/// # Examples
///
/// ```
/// use vrptw_genetic::ga::{scope_to_partition, Chromosome, Swap};
///
/// let mut c = Chromosome::new(vec![3, 1, 0, 2], vec![1, 3]);
/// let mut rng = u_numflow::random::create_rng(5);
///
/// scope_to_partition(Swap).apply(&mut [&mut c], &mut rng).unwrap();
/// assert_eq!(c.route(), &[3, 1, 0, 2]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scoped<O> {
    op: O,
    segment: Segment,
}

/// Restricts `op` to the route segment.
pub fn scope_to_route<O: SegmentOperator>(op: O) -> Scoped<O> {
    Scoped {
        op,
        segment: Segment::Route,
    }
}

/// Restricts `op` to the partition segment.
pub fn scope_to_partition<O: SegmentOperator>(op: O) -> Scoped<O> {
    Scoped {
        op,
        segment: Segment::Partition,
    }
}

impl<O: SegmentOperator> Scoped<O> {
    /// Segment this operator acts on.
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Applies the operator to the scoped segment of every chromosome.
    ///
    /// Fails without modifying anything if the operator returns a different
    /// number of segments or changes a segment's length. Every written-back
    /// chromosome has its fitness invalidated.
    pub fn apply(&self, chromosomes: &mut [&mut Chromosome], rng: &mut dyn RngCore) -> Result<()> {
        let segments: Vec<Vec<usize>> = chromosomes
            .iter()
            .map(|c| c.segment(self.segment).to_vec())
            .collect();
        let updated = self.op.apply(segments, rng);

        if updated.len() != chromosomes.len() {
            return Err(RoutingError::OperatorContract(format!(
                "received {} segments, returned {}",
                chromosomes.len(),
                updated.len()
            )));
        }
        for (idx, (chromosome, genes)) in chromosomes.iter().zip(&updated).enumerate() {
            let expected = chromosome.segment(self.segment).len();
            if genes.len() != expected {
                return Err(RoutingError::OperatorContract(format!(
                    "segment {idx} changed length from {expected} to {}",
                    genes.len()
                )));
            }
        }

        for (chromosome, genes) in chromosomes.iter_mut().zip(&updated) {
            chromosome.replace_segment(self.segment, genes)?;
        }
        Ok(())
    }
}

/// Exchanges the values at two uniformly random positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swap;

impl SegmentOperator for Swap {
    fn apply(&self, mut segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        for genes in segments.iter_mut().filter(|g| !g.is_empty()) {
            let i = rng.random_range(0..genes.len());
            let j = rng.random_range(0..genes.len());
            genes.swap(i, j);
        }
        segments
    }
}

/// Adds one to a random gene if it stays `<= max_value` and not above its
/// right neighbour.
#[derive(Debug, Clone, Copy)]
pub struct Increment {
    /// Largest value a gene may take.
    pub max_value: usize,
}

impl SegmentOperator for Increment {
    fn apply(&self, mut segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        for genes in segments.iter_mut().filter(|g| !g.is_empty()) {
            let idx = rng.random_range(0..genes.len());
            let value = genes[idx];
            let below_right = idx + 1 == genes.len() || value < genes[idx + 1];
            if value < self.max_value && below_right {
                genes[idx] += 1;
            }
        }
        segments
    }
}

/// Subtracts one from a random gene if it stays non-negative and not below
/// its left neighbour.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decrement;

impl SegmentOperator for Decrement {
    fn apply(&self, mut segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        for genes in segments.iter_mut().filter(|g| !g.is_empty()) {
            let idx = rng.random_range(0..genes.len());
            let value = genes[idx];
            let above_left = idx == 0 || genes[idx - 1] < value;
            if value > 0 && above_left {
                genes[idx] -= 1;
            }
        }
        segments
    }
}

/// Replaces the whole segment with distinct ascending values in
/// `0..=max_value`.
///
/// No-op when the segment is longer than the value range.
#[derive(Debug, Clone, Copy)]
pub struct Regenerate {
    /// Largest value that may be drawn.
    pub max_value: usize,
}

impl SegmentOperator for Regenerate {
    fn apply(&self, mut segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        let range = self.max_value + 1;
        for genes in segments.iter_mut().filter(|g| g.len() <= range) {
            let mut fresh = index::sample(rng, range, genes.len()).into_vec();
            fresh.sort_unstable();
            *genes = fresh;
        }
        segments
    }
}

/// Reverses a random sub-range of at least two genes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseSegment;

impl SegmentOperator for ReverseSegment {
    fn apply(&self, mut segments: Vec<Vec<usize>>, rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        for genes in segments.iter_mut().filter(|g| g.len() >= 2) {
            let start = rng.random_range(0..genes.len() - 1);
            let end = rng.random_range(start + 2..=genes.len());
            genes[start..end].reverse();
        }
        segments
    }
}

/// Order crossover (OX) of two route permutations into two children.
///
/// Batches other than a pair of equally long permutations pass through
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCrossover;

impl SegmentOperator for OrderCrossover {
    fn apply(&self, segments: Vec<Vec<usize>>, mut rng: &mut dyn RngCore) -> Vec<Vec<usize>> {
        match segments.as_slice() {
            [a, b] if a.len() == b.len() && a.len() >= 2 => {
                let (c1, c2) = order_crossover(a, b, &mut rng);
                vec![c1, c2]
            }
            _ => segments,
        }
    }
}
