use serde::{Deserialize, Serialize};

/// Output side of the strip: where its pixels land in sACN space.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StripConfig {
    pub universe: u16,
    pub start_channel: u16,
    pub color_order: String, // "RGB", "GRB", "BGR"
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            universe: 1,
            start_channel: 1,
            color_order: "GRB".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub use_multicast: bool,
    pub unicast_ip: String,
    pub source_name: String,
    pub priority: u8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            use_multicast: true,
            unicast_ip: "192.168.1.50".to_string(), // Default placeholder
            source_name: "LightSphere".to_string(),
            priority: 100,
        }
    }
}

/// Parameters of the wave animation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WaveConfig {
    pub slices: usize,
    pub wavelength: f64,
    pub total_speed: f64,
    pub wave_speed: f64,
    pub amplitude_speed: f64,
    pub lo_color_speed: f64,
    pub hi_color_speed: f64,
    pub min_amplitude: f64,
    pub max_amplitude: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            slices: 32,
            wavelength: 0.2,
            total_speed: 0.75,
            wave_speed: 0.7,
            amplitude_speed: 0.001,
            lo_color_speed: -0.1,
            hi_color_speed: -0.25,
            min_amplitude: 60.0,
            max_amplitude: 90.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    pub pixel_count: usize,
    /// Ring start indices plus the strip end; a single ring when absent.
    pub ring_boundaries: Option<Vec<usize>>,
    pub brightness: f32,
    pub fps: u32,
    /// Built-in palette name, used unless `palette_stops` is given.
    pub palette: String,
    /// Custom stops (`[r, g, b]`, `0xRRGGBB` or colour names).
    pub palette_stops: Option<Vec<serde_json::Value>>,
    pub palette_length: usize,
    pub strip: StripConfig,
    pub network: NetworkConfig,
    pub wave: WaveConfig,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            pixel_count: 357,
            ring_boundaries: None,
            brightness: 0.4,
            fps: 60,
            palette: "spectrum".to_string(),
            palette_stops: None,
            palette_length: 256,
            strip: StripConfig::default(),
            network: NetworkConfig::default(),
            wave: WaveConfig::default(),
        }
    }
}

impl SphereConfig {
    pub fn boundaries(&self) -> Vec<usize> {
        self.ring_boundaries
            .clone()
            .unwrap_or_else(|| vec![0, self.pixel_count])
    }
}
