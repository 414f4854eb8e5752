//! Ring layout of a strip wound around a sphere.
//!
//! The strip is cut (logically) into rings of consecutive pixels. Ring `r`
//! covers physical indices `[b[r], b[r+1])` of the boundary sequence `b`,
//! which must start at 0, end at the strip length and increase strictly.

use crate::error::{Result, SphereError};

#[derive(Clone, Debug, PartialEq)]
pub struct RingTopology {
    boundaries: Vec<usize>,
}

impl RingTopology {
    pub fn new(boundaries: &[usize], strip_len: usize) -> Result<Self> {
        if strip_len == 0 {
            return Err(SphereError::config("strip length must be at least one pixel"));
        }
        if boundaries.len() < 2 {
            return Err(SphereError::config(format!(
                "need at least two ring boundaries, got {}",
                boundaries.len()
            )));
        }
        if boundaries[0] != 0 {
            return Err(SphereError::config(format!(
                "ring boundaries must start at 0, got {}",
                boundaries[0]
            )));
        }
        if let Some(pair) = boundaries.windows(2).find(|w| w[1] <= w[0]) {
            return Err(SphereError::config(format!(
                "ring boundaries must increase strictly ({} followed by {})",
                pair[0], pair[1]
            )));
        }
        let last = boundaries[boundaries.len() - 1];
        if last != strip_len {
            return Err(SphereError::config(format!(
                "ring boundaries must end at the strip length {}, got {}",
                strip_len, last
            )));
        }

        Ok(Self { boundaries: boundaries.to_vec() })
    }

    /// A single ring spanning the whole strip.
    pub fn single_ring(strip_len: usize) -> Result<Self> {
        Self::new(&[0, strip_len], strip_len)
    }

    pub fn ring_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn strip_len(&self) -> usize {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// `(lo, hi)` physical bounds of ring `ring`, `hi` exclusive.
    pub fn ring_bounds(&self, ring: usize) -> Option<(usize, usize)> {
        if ring >= self.ring_count() {
            return None;
        }
        Some((self.boundaries[ring], self.boundaries[ring + 1]))
    }

    pub fn rings(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.boundaries.windows(2).map(|w| (w[0], w[1]))
    }

    /// Ring that holds physical index `index`.
    pub fn ring_of(&self, index: usize) -> Option<usize> {
        if index >= self.strip_len() {
            return None;
        }
        // boundaries[0] == 0 <= index, so the partition point is at least 1
        Some(self.boundaries.partition_point(|&b| b <= index) - 1)
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }
}
