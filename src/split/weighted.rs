//! Weighted allocation using the Largest Remainder Method.
//!
//! 1. Compute each bucket's exact share `total × weight / Σweights`
//! 2. Floor it
//! 3. Hand the shortfall out one cent at a time, largest fractional part first
//!
//! Shares are compared as integer remainders over the common denominator, so
//! the result never depends on floating-point ordering. Ties go to the
//! bucket declared first.

use serde::{Deserialize, Serialize};

use crate::core::{Cents, CostWeights};

/// Allocate `total` across buckets in proportion to `weights`.
///
/// The result has one entry per weight and sums to `total` exactly. With a
/// non-negative total no entry is negative. An all-zero weight vector is
/// treated as equal weights; an empty one yields an empty result.
///
/// ```
/// use wertfluss::allocate_weighted;
///
/// assert_eq!(allocate_weighted(3601, &[22, 8, 10, 10]), vec![1585, 576, 720, 720]);
/// ```
pub fn allocate_weighted(total: Cents, weights: &[u32]) -> Vec<Cents> {
    if weights.is_empty() {
        return vec![];
    }

    let weight_sum: i128 = weights.iter().map(|w| i128::from(*w)).sum();
    if weight_sum == 0 {
        return allocate_weighted(total, &vec![1; weights.len()]);
    }

    let total_wide = i128::from(total);
    let mut allocations = Vec::with_capacity(weights.len());
    let mut remainders = Vec::with_capacity(weights.len());
    for weight in weights {
        let exact = total_wide * i128::from(*weight);
        allocations.push(exact.div_euclid(weight_sum));
        remainders.push(exact.rem_euclid(weight_sum));
    }

    // Shortfall is below the bucket count.
    let shortfall = total_wide - allocations.iter().sum::<i128>();

    let mut order: Vec<usize> = (0..weights.len()).collect();
    // Stable sort keeps declaration order among equal remainders.
    order.sort_by(|a, b| remainders[*b].cmp(&remainders[*a]));
    for idx in order.into_iter().take(shortfall as usize) {
        allocations[idx] += 1;
    }

    allocations.into_iter().map(|a| a as Cents).collect()
}

/// The four entrepreneur cost blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostBlocks {
    pub operations: Cents,
    pub logistics: Cents,
    pub risk: Cents,
    pub profit: Cents,
}

impl CostBlocks {
    /// Allocate `total` across the blocks by `weights`.
    pub fn allocate(total: Cents, weights: &CostWeights) -> Self {
        let parts = allocate_weighted(total, &weights.as_array());
        Self {
            operations: parts[0],
            logistics: parts[1],
            risk: parts[2],
            profit: parts[3],
        }
    }

    pub fn sum(&self) -> Cents {
        self.operations + self.logistics + self.risk + self.profit
    }
}
