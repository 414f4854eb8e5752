//! Strip capability and an in-memory strip.

use crate::error::{Result, SphereError};

/// RGB colour, one byte per channel.
pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];

/// Anything that holds a row of addressable pixels and can push them out.
pub trait Strip {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pixel(&self, index: usize) -> Option<Rgb>;

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()>;

    /// Write `color` at every index. All indices are checked first; on error
    /// nothing is written.
    fn set_pixels(&mut self, indices: &[usize], color: Rgb) -> Result<()> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(out_of_range(bad, len));
        }
        for &i in indices {
            self.set_pixel(i, color)?;
        }
        Ok(())
    }

    /// Set every pixel to black.
    fn clear(&mut self);

    /// Push the buffer to the output.
    fn show(&mut self) -> Result<()>;

    /// Output brightness in `[0, 1]`.
    fn set_brightness(&mut self, brightness: f32) -> Result<()>;
}

pub(crate) fn out_of_range(index: usize, len: usize) -> SphereError {
    SphereError::argument(format!("pixel index {} is out of range for a strip of {}", index, len))
}

pub(crate) fn check_brightness(brightness: f32) -> Result<f32> {
    if !(0.0..=1.0).contains(&brightness) {
        return Err(SphereError::argument(format!(
            "brightness must be within [0, 1], got {}",
            brightness
        )));
    }
    Ok(brightness)
}

/// Clamp arbitrary channel values into a colour.
pub fn rgb_clamped(r: f32, g: f32, b: f32) -> Rgb {
    let c = |v: f32| if v.is_nan() { 0 } else { v.clamp(0.0, 255.0) as u8 };
    [c(r), c(g), c(b)]
}

/// Scale a colour by a brightness factor in `[0, 1]`.
pub fn scaled(color: Rgb, brightness: f32) -> Rgb {
    let s = |v: u8| (v as f32 * brightness).round().clamp(0.0, 255.0) as u8;
    [s(color[0]), s(color[1]), s(color[2])]
}

/// Pixel buffer kept in memory. `show` only counts frames.
#[derive(Clone, Debug)]
pub struct MemoryStrip {
    data: Vec<Rgb>,
    brightness: f32,
    frames_shown: u64,
}

impl MemoryStrip {
    pub fn new(pixel_count: usize) -> Self {
        Self {
            data: vec![BLACK; pixel_count],
            brightness: 1.0,
            frames_shown: 0,
        }
    }

    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn frames_shown(&self) -> u64 {
        self.frames_shown
    }

    /// Indices of every pixel that is not black.
    pub fn lit(&self) -> Vec<usize> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != BLACK)
            .map(|(i, _)| i)
            .collect()
    }
}

impl Strip for MemoryStrip {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn pixel(&self, index: usize) -> Option<Rgb> {
        self.data.get(index).copied()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()> {
        let len = self.data.len();
        match self.data.get_mut(index) {
            Some(px) => {
                *px = color;
                Ok(())
            }
            None => Err(out_of_range(index, len)),
        }
    }

    fn clear(&mut self) {
        self.data.fill(BLACK);
    }

    fn show(&mut self) -> Result<()> {
        self.frames_shown += 1;
        Ok(())
    }

    fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        self.brightness = check_brightness(brightness)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_back() {
        let mut strip = MemoryStrip::new(5);
        strip.set_pixel(2, [255, 0, 0]).unwrap();
        assert_eq!(strip.pixel(2), Some([255, 0, 0]));
        assert_eq!(strip.pixel(5), None);
        assert_eq!(strip.lit(), vec![2]);
    }

    #[test]
    fn test_batch_write_is_all_or_nothing() {
        let mut strip = MemoryStrip::new(4);
        let err = strip.set_pixels(&[0, 1, 9], [0, 255, 0]).unwrap_err();
        assert!(matches!(err, SphereError::Argument(_)));
        assert!(strip.lit().is_empty(), "No pixel may change when one index is bad");

        strip.set_pixels(&[0, 3], [0, 255, 0]).unwrap();
        assert_eq!(strip.lit(), vec![0, 3]);
    }

    #[test]
    fn test_clear_and_show() {
        let mut strip = MemoryStrip::new(3);
        strip.set_pixels(&[0, 1, 2], [9, 9, 9]).unwrap();
        strip.clear();
        assert!(strip.lit().is_empty());
        strip.show().unwrap();
        strip.show().unwrap();
        assert_eq!(strip.frames_shown(), 2);
    }

    #[test]
    fn test_brightness_bounds() {
        let mut strip = MemoryStrip::new(1);
        strip.set_brightness(0.4).unwrap();
        assert_eq!(strip.brightness(), 0.4);
        assert!(strip.set_brightness(1.5).is_err());
        assert!(strip.set_brightness(f32::NAN).is_err());
        assert_eq!(strip.brightness(), 0.4, "Rejected brightness must not stick");
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(rgb_clamped(-20.0, 300.0, 127.9), [0, 255, 127]);
        assert_eq!(rgb_clamped(f32::NAN, 1.0, 2.0), [0, 1, 2]);
        assert_eq!(scaled([200, 100, 0], 0.5), [100, 50, 0]);
        assert_eq!(scaled([200, 100, 0], 0.0), BLACK);
    }
}
