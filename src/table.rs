//! Angle lookup tables.
//!
//! Each table is a list of `(physical index, angle)` samples sorted by angle.
//! Besides one raw sample per pixel, a table holds a copy of every sample
//! shifted by one full domain period, so a range that wraps past the domain
//! end (θ = [350, 370]) is still a plain interval over the sorted list.
//!
//! # Azimuth (θ)
//!
//! Every ring sweeps the full 360° on its own: pixel `j` of ring `(lo, hi)`
//! sits at `(j - lo) * 360 / (hi - lo)`. Raw samples are duplicated at +360,
//! and one sentinel per ring boundary is pinned at 720 so that any target
//! below 720 has an upper bracket.
//!
//! # Inclination (φ)
//!
//! One ramp across the whole strip, pole to pole: pixel `j` sits at
//! `j * 180 / len`. Raw samples are duplicated at +180, and a single terminal
//! sentinel pinned at 360 closes the table.
//!
//! Ties are resolved by insertion order (raw, shifted, sentinel); the sort is
//! stable, so a boundary query never flips which sample it lands on.

use crate::error::{Result, SphereError};
use crate::topology::RingTopology;

pub const FULL_CIRCLE: f64 = 360.0;
pub const HALF_CIRCLE: f64 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleKind {
    Raw,
    Shifted,
    Sentinel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleSample {
    pub index: usize,
    pub angle: f64,
    pub kind: SampleKind,
}

/// Adjacent table positions around a target angle:
/// `table[lower].angle <= target <= table[upper].angle`, `upper == lower + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bracket {
    pub lower: usize,
    pub upper: usize,
}

#[derive(Clone, Debug)]
pub struct AngleTable {
    samples: Vec<AngleSample>,
    /// Raw angle per physical index, for direct lookups.
    raw: Vec<f64>,
    period: f64,
}

impl AngleTable {
    /// θ table for the given ring layout.
    pub fn azimuth(topology: &RingTopology) -> Self {
        let mut raw = vec![0.0; topology.strip_len()];
        for (lo, hi) in topology.rings() {
            let ring_size = (hi - lo) as f64;
            let delta = FULL_CIRCLE / ring_size;
            for j in lo..hi {
                raw[j] = (j - lo) as f64 * delta;
            }
        }

        let sentinels = topology.boundaries().iter().map(|&b| AngleSample {
            index: b,
            angle: 2.0 * FULL_CIRCLE,
            kind: SampleKind::Sentinel,
        });

        Self::assemble(raw, FULL_CIRCLE, sentinels)
    }

    /// φ table for a strip of `strip_len` pixels.
    pub fn inclination(strip_len: usize) -> Self {
        let delta = HALF_CIRCLE / strip_len as f64;
        let raw: Vec<f64> = (0..strip_len).map(|j| j as f64 * delta).collect();

        let sentinel = std::iter::once(AngleSample {
            index: strip_len,
            angle: 2.0 * HALF_CIRCLE,
            kind: SampleKind::Sentinel,
        });

        Self::assemble(raw, HALF_CIRCLE, sentinel)
    }

    fn assemble(raw: Vec<f64>, period: f64, sentinels: impl Iterator<Item = AngleSample>) -> Self {
        let mut samples = Vec::with_capacity(raw.len() * 2 + 8);
        samples.extend(raw.iter().enumerate().map(|(index, &angle)| AngleSample {
            index,
            angle,
            kind: SampleKind::Raw,
        }));
        samples.extend(raw.iter().enumerate().map(|(index, &angle)| AngleSample {
            index,
            angle: angle + period,
            kind: SampleKind::Shifted,
        }));
        samples.extend(sentinels);

        // stable: equal angles keep raw < shifted < sentinel order
        samples.sort_by(|a, b| a.angle.total_cmp(&b.angle));

        Self { samples, raw, period }
    }

    pub fn samples(&self) -> &[AngleSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duplication period (and domain size) of this table.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Raw angle of a physical index.
    pub fn angle_of(&self, index: usize) -> Option<f64> {
        self.raw.get(index).copied()
    }

    /// First adjacent pair of positions bracketing `target`.
    ///
    /// Binary search; returns the same pair a front-to-back scan for the
    /// first `a[i] <= target <= a[i + 1]` would.
    pub fn locate(&self, target: f64) -> Result<Bracket> {
        let samples = &self.samples;
        let not_found = || SphereError::InternalInvariant { target, len: samples.len() };

        if samples.len() < 2 || !target.is_finite() {
            return Err(not_found());
        }

        // first position whose angle is >= target
        let first_at_or_above = samples.partition_point(|s| s.angle < target);
        match first_at_or_above {
            n if n == samples.len() => Err(not_found()),
            0 if samples[0].angle == target => Ok(Bracket { lower: 0, upper: 1 }),
            0 => Err(not_found()),
            n => Ok(Bracket { lower: n - 1, upper: n }),
        }
    }

    /// Table position of the first sample whose angle is `>= target`.
    ///
    /// Every sample before the located bracket is below the target, so the
    /// lower end of the bracket can only equal the target at position 0.
    fn position_at_or_above(&self, target: f64) -> Result<usize> {
        let bracket = self.locate(target)?;
        if self.samples[bracket.lower].angle >= target {
            Ok(bracket.lower)
        } else {
            Ok(bracket.upper)
        }
    }

    /// Physical indices whose sample angle lies in `[lo, hi)`.
    ///
    /// Expects `0 <= lo < period` and `lo < hi <= lo + period`; under those
    /// bounds every physical index appears at most once and sentinels are
    /// never selected.
    pub fn indices_between(&self, lo: f64, hi: f64) -> Result<impl Iterator<Item = usize> + '_> {
        let start = self.position_at_or_above(lo)?;
        let end = self.position_at_or_above(hi)?;
        let end = end.max(start);

        Ok(self.samples[start..end]
            .iter()
            .filter(|s| s.kind != SampleKind::Sentinel)
            .map(|s| s.index))
    }
}
