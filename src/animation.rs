//! Wave animation.
//!
//! The sphere is cut into equal azimuth slices. In every slice a travelling
//! sine wave sets the inclination where a lower colour band meets an upper
//! one; both bands scroll through the palette at their own speeds, and the
//! wave amplitude breathes slowly between a minimum and a maximum.

use crate::error::{Result, SphereError};
use crate::model::WaveConfig;
use crate::palette::Palette;
use crate::range::AngleRange;
use crate::sphere::LightSphere;
use crate::strip::{Rgb, Strip};
use crate::table::{FULL_CIRCLE, HALF_CIRCLE};

/// What one slice looks like on a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceFrame {
    pub theta: AngleRange,
    pub boundary: f64,
    pub lo_color: Rgb,
    pub hi_color: Rgb,
}

pub struct WaveAnimation {
    config: WaveConfig,
    palette: Palette,
    frame: u64,
}

impl WaveAnimation {
    pub fn new(config: WaveConfig, palette: Palette) -> Result<Self> {
        if config.slices == 0 {
            return Err(SphereError::config("wave animation needs at least one slice"));
        }
        Ok(Self { config, palette, frame: 0 })
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Animation clock for a frame number.
    pub fn counter(&self, frame: u64) -> i64 {
        (frame as f64 * self.config.total_speed).floor() as i64
    }

    pub fn amplitude(&self, counter: i64) -> f64 {
        let c = &self.config;
        let swing = (counter as f64 * c.amplitude_speed).sin().abs();
        (c.max_amplitude - c.min_amplitude) * swing + c.min_amplitude
    }

    /// Slice layout for one frame. Pure; does not advance the clock.
    pub fn slices(&self, frame: u64) -> Vec<SliceFrame> {
        let c = &self.config;
        let counter = self.counter(frame);
        let amplitude = self.amplitude(counter);
        let slice_width = FULL_CIRCLE / c.slices as f64;
        let color_width = (self.palette.len() / c.slices) as f64;

        (0..c.slices)
            .map(|i| {
                let i = i as f64;
                let t = counter as f64;
                let phase = (i + t * c.wave_speed) * c.wavelength;
                let boundary = HALF_CIRCLE / 2.0 + amplitude * phase.sin();
                let lo_index = ((i + t * c.lo_color_speed) * color_width) as i64;
                let hi_index = ((i + t * c.hi_color_speed) * color_width) as i64;

                SliceFrame {
                    theta: AngleRange::new(i * slice_width, (i + 1.0) * slice_width),
                    boundary,
                    lo_color: self.palette.wrapped(lo_index),
                    hi_color: self.palette.wrapped(hi_index),
                }
            })
            .collect()
    }

    /// Paint the next frame onto the sphere. Does not flush.
    pub fn render<S: Strip>(&mut self, sphere: &mut LightSphere<S>) -> Result<()> {
        self.frame += 1;
        for slice in self.slices(self.frame) {
            sphere.set(slice.theta, (0.0, slice.boundary), slice.lo_color)?;
            sphere.set(slice.theta, (slice.boundary, HALF_CIRCLE), slice.hi_color)?;
        }
        Ok(())
    }
}
