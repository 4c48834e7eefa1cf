//! Stratified Splitting Primitive
//!
//! One two-way split, stratified on a categorical key. The three-way dataset
//! split is this primitive applied twice.

use std::collections::BTreeMap;
use std::fmt::Display;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{PipelineError, Result};

/// Members a class needs to appear on both sides of one split
pub const MIN_CLASS_MEMBERS: usize = 2;

/// Guards against `0.15 * 20 = 3.0000000000000004` rounding up to 4
const CEIL_EPSILON: f64 = 1e-9;

/// Split `records` into (kept, held_out), holding out roughly `fraction`
///
/// - held-out size is `ceil(fraction * n)`
/// - per-class quotas use largest remainder, then clamp to `[1, n_class - 1]`
///   so every class appears on both sides
/// - members of each class are shuffled by an RNG seeded with `seed`
/// - both outputs keep the input order
pub fn stratified_split<T, K, F>(
    records: Vec<T>,
    fraction: f64,
    key: F,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>)>
where
    K: Ord + Display,
    F: Fn(&T) -> K,
{
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(PipelineError::InvalidConfig(format!(
            "split fraction must be in (0, 1), got {}",
            fraction
        )));
    }

    let n = records.len();
    let mut classes: BTreeMap<K, Vec<usize>> = BTreeMap::new();
    for (index, record) in records.iter().enumerate() {
        classes.entry(key(record)).or_default().push(index);
    }

    for (class, members) in &classes {
        if members.len() < MIN_CLASS_MEMBERS {
            return Err(PipelineError::StratificationInfeasible {
                class: class.to_string(),
                count: members.len(),
                required: MIN_CLASS_MEMBERS,
            });
        }
    }

    let held_total = ((fraction * n as f64) - CEIL_EPSILON).ceil().max(0.0) as usize;
    if held_total < classes.len() {
        return Err(PipelineError::PartitionTooSmall {
            side: "held-out",
            size: held_total,
            classes: classes.len(),
        });
    }
    if n - held_total < classes.len() {
        return Err(PipelineError::PartitionTooSmall {
            side: "kept",
            size: n - held_total,
            classes: classes.len(),
        });
    }

    let sizes: Vec<usize> = classes.values().map(Vec::len).collect();
    let quotas = allocate(&sizes, held_total, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut held = vec![false; n];
    for (members, quota) in classes.values().zip(quotas) {
        let mut shuffled = members.clone();
        shuffled.shuffle(&mut rng);
        for index in shuffled.into_iter().take(quota) {
            held[index] = true;
        }
    }

    let mut kept_records = Vec::with_capacity(n - held_total);
    let mut held_records = Vec::with_capacity(held_total);
    for (record, is_held) in records.into_iter().zip(held) {
        if is_held {
            held_records.push(record);
        } else {
            kept_records.push(record);
        }
    }

    Ok((kept_records, held_records))
}

/// Largest-remainder allocation of `total` across classes of `sizes`
fn allocate(sizes: &[usize], total: usize, n: usize) -> Vec<usize> {
    let exact: Vec<f64> = sizes
        .iter()
        .map(|&size| size as f64 * total as f64 / n as f64)
        .collect();
    let mut quotas: Vec<usize> = exact.iter().map(|q| q.floor() as usize).collect();

    let assigned: usize = quotas.iter().sum();
    let mut by_remainder: Vec<usize> = (0..sizes.len()).collect();
    // Stable sort keeps class order on ties
    by_remainder.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });
    for &class in by_remainder.iter().take(total.saturating_sub(assigned)) {
        quotas[class] += 1;
    }

    quotas
        .into_iter()
        .zip(sizes)
        .map(|(quota, &size)| quota.clamp(1, size - 1))
        .collect()
}
