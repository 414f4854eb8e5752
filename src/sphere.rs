//! Angle-addressed sphere over a wound LED strip.
//!
//! # Coordinate Systems
//!
//! - **Physical**: index along the strip, `0..len`.
//! - **Spherical**: azimuth θ ∈ [0, 360) around the vertical axis and
//!   inclination φ ∈ [0, 180) from pole to pole.
//!
//! θ is ring-relative: each ring of the [`RingTopology`] sweeps a full turn.
//! φ is a single ramp across the whole strip. Both mappings are tabulated
//! once in [`LightSphere::new`] and read-only afterwards.
//!
//! # Range queries
//!
//! A query `θ × φ` is answered per axis as the set of pixels whose sample
//! angle lies in the normalized half-open interval `[lo, hi)` (see
//! [`AngleRange::normalized`]); the two sets are then intersected.

use log::{debug, info};

use crate::error::Result;
use crate::range::AngleRange;
use crate::strip::{Rgb, Strip};
use crate::table::{AngleTable, FULL_CIRCLE, HALF_CIRCLE};
use crate::topology::RingTopology;

pub struct LightSphere<S: Strip> {
    strip: S,
    topology: RingTopology,
    thetas: AngleTable,
    phis: AngleTable,
}

impl<S: Strip> LightSphere<S> {
    /// Build a sphere over `strip` with the given ring boundaries.
    pub fn new(strip: S, ring_boundaries: &[usize]) -> Result<Self> {
        let topology = RingTopology::new(ring_boundaries, strip.len())?;
        let thetas = AngleTable::azimuth(&topology);
        let phis = AngleTable::inclination(topology.strip_len());

        info!(
            "[SPHERE] {} pixels in {} rings ({} θ samples, {} φ samples)",
            topology.strip_len(),
            topology.ring_count(),
            thetas.len(),
            phis.len()
        );

        Ok(Self { strip, topology, thetas, phis })
    }

    /// Physical indices inside `theta × phi`, ascending.
    ///
    /// `None` selects the whole axis.
    pub fn select(&self, theta: Option<AngleRange>, phi: Option<AngleRange>) -> Result<Vec<usize>> {
        let theta = theta.unwrap_or_else(AngleRange::full_theta).normalized(FULL_CIRCLE)?;
        let phi = phi.unwrap_or_else(AngleRange::full_phi).normalized(HALF_CIRCLE)?;

        let len = self.topology.strip_len();
        let mut in_theta = vec![false; len];
        for i in self.thetas.indices_between(theta.lo, theta.hi)? {
            in_theta[i] = true;
        }

        let mut selected: Vec<usize> = self
            .phis
            .indices_between(phi.lo, phi.hi)?
            .filter(|&i| in_theta[i])
            .collect();
        selected.sort_unstable();

        debug!(
            "[SPHERE] θ [{:.1}, {:.1}) × φ [{:.1}, {:.1}) -> {} pixels",
            theta.lo,
            theta.hi,
            phi.lo,
            phi.hi,
            selected.len()
        );
        Ok(selected)
    }

    /// Paint every pixel inside `theta × phi` with `color`.
    ///
    /// The index set is fully resolved before the strip is touched, so a
    /// failed lookup leaves the strip as it was.
    pub fn fill(
        &mut self,
        color: Rgb,
        theta: Option<AngleRange>,
        phi: Option<AngleRange>,
    ) -> Result<()> {
        let indices = self.select(theta, phi)?;
        self.strip.set_pixels(&indices, color)
    }

    /// Shorthand for [`fill`](Self::fill) with both ranges given.
    pub fn set(
        &mut self,
        theta: impl Into<AngleRange>,
        phi: impl Into<AngleRange>,
        color: Rgb,
    ) -> Result<()> {
        self.fill(color, Some(theta.into()), Some(phi.into()))
    }

    /// Write `color` at raw physical indices, bypassing the angle mapping.
    pub fn set_indices(&mut self, indices: &[usize], color: Rgb) -> Result<()> {
        self.strip.set_pixels(indices, color)
    }

    pub fn clear(&mut self) {
        self.strip.clear();
    }

    pub fn show(&mut self) -> Result<()> {
        self.strip.show()
    }

    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        self.strip.set_brightness(brightness)
    }

    pub fn theta_of(&self, index: usize) -> Option<f64> {
        self.thetas.angle_of(index)
    }

    pub fn phi_of(&self, index: usize) -> Option<f64> {
        self.phis.angle_of(index)
    }

    pub fn topology(&self) -> &RingTopology {
        &self.topology
    }

    pub fn len(&self) -> usize {
        self.topology.strip_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }
}

impl<S: Strip> std::fmt::Debug for LightSphere<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightSphere")
            .field("topology", &self.topology)
            .field("theta_samples", &self.thetas.len())
            .field("phi_samples", &self.phis.len())
            .finish()
    }
}
