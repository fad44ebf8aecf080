use std::collections::BTreeMap;

use log::warn;
use ordered_float::OrderedFloat;

use crate::models::Sample;
use crate::types::Distribution;

pub const BIN_WIDTH_KG: f64 = 0.5;

/// Største spenn (i bins) som fylles ut med tomme bins. Bredere spenn
/// skyldes en vill vekt langt unna resten; da returneres bare bins med treff.
pub const MAX_DENSE_BINS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionOptions {
    /// Ta med bins uten treff.
    pub include_empty: bool,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self { include_empty: true }
    }
}

pub fn distribution(samples: &[Sample]) -> Distribution {
    distribution_with(samples, DistributionOptions::default())
}

/// Buckets weights into 0.5 kg bins spanning `[floor(min), ceil(max)]`.
pub fn distribution_with(samples: &[Sample], opts: DistributionOptions) -> Distribution {
    let weights = samples
        .iter()
        .filter(|s| s.weight.is_finite())
        .map(|s| OrderedFloat(s.weight));
    let (Some(min), Some(max)) = (weights.clone().min(), weights.max()) else {
        return Distribution::default();
    };
    let min_w = min.into_inner().floor();
    let max_w = max.into_inner().ceil();

    // én gjentatt heltallsvekt gir likevel én bin
    let num_bins = (((max_w - min_w) / BIN_WIDTH_KG).round() as usize).max(1);
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for s in samples {
        *counts.entry(bin_index(s.weight, min_w, num_bins)).or_default() += 1;
    }

    let include_empty = opts.include_empty && num_bins <= MAX_DENSE_BINS;
    if opts.include_empty && !include_empty {
        warn!(
            "weights span {min_w}..{max_w} kg ({num_bins} bins), returning occupied bins only"
        );
    }

    let mut out = Distribution::default();
    let mut push = |i: usize, count: usize| {
        let lo = min_w + i as f64 * BIN_WIDTH_KG;
        out.ranges.push(format!("{:.1}-{:.1}", lo, lo + BIN_WIDTH_KG));
        out.counts.push(count);
    };
    if include_empty {
        for i in 0..num_bins {
            push(i, counts.get(&i).copied().unwrap_or(0));
        }
    } else {
        for (&i, &count) in &counts {
            push(i, count);
        }
    }
    out
}

fn bin_index(weight: f64, min_w: f64, num_bins: usize) -> usize {
    let raw = ((weight - min_w) / BIN_WIDTH_KG).floor();
    // maksvekten havner én forbi siste bin – klem den inn
    if raw.is_nan() || raw < 0.0 {
        0
    } else {
        (raw as usize).min(num_bins - 1)
    }
}
