//! Strip that streams its buffer over sACN (E1.31).
//!
//! Pixels are packed three channels each, in the configured colour order,
//! starting at `start_channel` of `universe`. A universe carries at most 170
//! pixels; the rest spill into the following universes. Brightness scales
//! channel values when the frame is sent, never the buffer itself.

use std::collections::{BTreeMap, HashSet};
use std::net::{IpAddr, SocketAddr};

use log::{debug, error, info, warn};
use sacn::source::SacnSource;

use crate::error::{Result, SphereError};
use crate::model::{NetworkConfig, StripConfig};
use crate::strip::{check_brightness, out_of_range, scaled, Rgb, Strip, BLACK};

pub const UNIVERSE_SIZE: usize = 512;
const SACN_PORT: u16 = 5568;
const MAX_UNIVERSE: u16 = 63999;

pub struct SacnStrip {
    sender: SacnSource,
    registered_universes: HashSet<u16>,
    data: Vec<Rgb>,
    brightness: f32,
    strip: StripConfig,
    network: NetworkConfig,
    warned_bad_destination: bool,
}

impl SacnStrip {
    pub fn new(pixel_count: usize, strip: StripConfig, network: NetworkConfig) -> Result<Self> {
        info!("[LIGHTS] Initializing sACN (E1.31) network stack...");

        let local_addr = SocketAddr::from(([0, 0, 0, 0], 0));
        debug!("[LIGHTS] Binding to address: {}", local_addr);

        let sender = SacnSource::with_ip(&network.source_name, local_addr).map_err(|e| {
            error!("[LIGHTS] Failed to create sACN sender: {:?}", e);
            SphereError::Transport(format!("cannot create sACN source: {:?}", e))
        })?;

        info!(
            "[LIGHTS] sACN sender ready: {} pixels from universe {} channel {} ({})",
            pixel_count, strip.universe, strip.start_channel, strip.color_order
        );

        Ok(Self {
            sender,
            registered_universes: HashSet::new(),
            data: vec![BLACK; pixel_count],
            brightness: 1.0,
            strip,
            network,
            warned_bad_destination: false,
        })
    }

    fn ensure_registered(&mut self, universe: u16) -> Result<()> {
        if self.registered_universes.contains(&universe) {
            return Ok(());
        }
        match self.sender.register_universe(universe) {
            Ok(_) => {
                self.registered_universes.insert(universe);
                info!("[LIGHTS] Registered sACN Universe {}", universe);
                Ok(())
            }
            Err(e) => {
                error!("[LIGHTS] Failed to register sACN Universe {}: {:?}", universe, e);
                Err(SphereError::Transport(format!(
                    "cannot register universe {}: {:?}",
                    universe, e
                )))
            }
        }
    }
}

/// Where frames go: `None` for multicast, the receiver's sACN port for
/// unicast. An unparsable unicast address is an `Argument` error.
pub fn destination(network: &NetworkConfig) -> Result<Option<SocketAddr>> {
    if network.use_multicast {
        return Ok(None);
    }
    network
        .unicast_ip
        .parse::<IpAddr>()
        .map(|ip| Some(SocketAddr::new(ip, SACN_PORT)))
        .map_err(|_| {
            SphereError::argument(format!("invalid unicast address '{}'", network.unicast_ip))
        })
}

/// Lay pixels out as DMX channel data, one 512-byte buffer per universe.
pub fn pack_universes(
    pixels: &[Rgb],
    strip: &StripConfig,
    brightness: f32,
) -> BTreeMap<u16, Vec<u8>> {
    let mut universe_data: BTreeMap<u16, Vec<u8>> = BTreeMap::new();
    let first = strip.universe.clamp(1, MAX_UNIVERSE);
    let mut universe = first;
    let mut channel = (strip.start_channel as usize).saturating_sub(1);

    for pixel in pixels {
        // pixels never straddle a universe boundary
        if channel + 3 > UNIVERSE_SIZE {
            if universe == MAX_UNIVERSE {
                warn!(
                    "[LIGHTS] Strip runs past universe {}, dropping remaining pixels",
                    MAX_UNIVERSE
                );
                break;
            }
            universe += 1;
            channel = 0;
        }

        let entry = universe_data.entry(universe).or_insert_with(|| vec![0; UNIVERSE_SIZE]);
        let px = scaled(*pixel, brightness);
        let ordered = match strip.color_order.as_str() {
            "GRB" => [px[1], px[0], px[2]],
            "BGR" => [px[2], px[1], px[0]],
            _ => px, // RGB
        };
        entry[channel..channel + 3].copy_from_slice(&ordered);
        channel += 3;
    }

    universe_data
}

impl Strip for SacnStrip {
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
        let dst_ip = match destination(&self.network) {
            Ok(dst_ip) => dst_ip,
            Err(e) => {
                // nothing to send to; keep the frame loop alive
                if !self.warned_bad_destination {
                    warn!("[LIGHTS] {}, skipping sACN output", e);
                    self.warned_bad_destination = true;
                }
                return Ok(());
            }
        };
        let priority = self.network.priority;

        for (u, data) in pack_universes(&self.data, &self.strip, self.brightness) {
            self.ensure_registered(u)?;

            let mut fixed_data = vec![0u8]; // Start Code
            fixed_data.extend_from_slice(&data);

            if let Err(e) = self.sender.send(&[u], &fixed_data, Some(priority), dst_ip, None) {
                warn!("[LIGHTS] sACN send error on Universe {} (Dest: {:?}): {:?}", u, dst_ip, e);
                let msg = format!("send on universe {} failed: {:?}", u, e);
                return Err(SphereError::Transport(msg));
            }
        }
        Ok(())
    }

    fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        self.brightness = check_brightness(brightness)?;
        debug!("[LIGHTS] Brightness set to {:.2}", self.brightness);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config(universe: u16, start_channel: u16, color_order: &str) -> StripConfig {
        StripConfig {
            universe,
            start_channel,
            color_order: color_order.to_string(),
        }
    }

    fn create_test_network(use_multicast: bool, unicast_ip: &str) -> NetworkConfig {
        NetworkConfig {
            use_multicast,
            unicast_ip: unicast_ip.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_destination() {
        assert_eq!(destination(&create_test_network(true, "not an ip")), Ok(None));

        let dst = destination(&create_test_network(false, "192.168.1.50")).unwrap();
        assert_eq!(dst, Some(SocketAddr::from(([192, 168, 1, 50], 5568))));

        let err = destination(&create_test_network(false, "192.168.1")).unwrap_err();
        assert!(matches!(err, SphereError::Argument(_)), "Bad unicast IP should be an argument error");
    }

    #[test]
    fn test_bad_unicast_ip_skips_sending() {
        // skipped before any socket use, so show() succeeds and keeps the buffer
        let network = create_test_network(false, "sphere.local");
        let mut strip = match SacnStrip::new(4, create_test_config(1, 1, "GRB"), network) {
            Ok(strip) => strip,
            Err(_) => return, // no UDP socket available in this environment
        };
        strip.set_pixel(2, [9, 9, 9]).unwrap();

        assert_eq!(strip.show(), Ok(()));
        assert_eq!(strip.show(), Ok(()));
        assert!(strip.warned_bad_destination);
        assert!(strip.registered_universes.is_empty(), "Nothing should be registered or sent");
        assert_eq!(strip.pixel(2), Some([9, 9, 9]));
    }

    #[test]
    fn test_color_orders() {
        let pixels = [[10, 20, 30]];

        let rgb = pack_universes(&pixels, &create_test_config(1, 1, "RGB"), 1.0);
        assert_eq!(&rgb[&1][0..3], &[10, 20, 30]);

        let grb = pack_universes(&pixels, &create_test_config(1, 1, "GRB"), 1.0);
        assert_eq!(&grb[&1][0..3], &[20, 10, 30]);

        let bgr = pack_universes(&pixels, &create_test_config(1, 1, "BGR"), 1.0);
        assert_eq!(&bgr[&1][0..3], &[30, 20, 10]);
    }

    #[test]
    fn test_start_channel_offset() {
        let packed = pack_universes(&[[1, 2, 3]], &create_test_config(4, 10, "RGB"), 1.0);
        let data = &packed[&4];
        assert_eq!(data.len(), UNIVERSE_SIZE);
        assert_eq!(&data[9..12], &[1, 2, 3]);
        assert!(data[..9].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_spills_into_next_universe() {
        // 357 pixels: 170 + 170 + 17
        let pixels = vec![[255, 255, 255]; 357];
        let packed = pack_universes(&pixels, &create_test_config(1, 1, "RGB"), 1.0);

        assert_eq!(packed.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(packed[&1][509], 255);
        assert_eq!(packed[&1][510], 0, "Last two channels of a universe stay unused");
        assert_eq!(packed[&3][17 * 3 - 1], 255);
        assert_eq!(packed[&3][17 * 3], 0);
    }

    #[test]
    fn test_brightness_scales_output() {
        let packed = pack_universes(&[[200, 100, 50]], &create_test_config(1, 1, "RGB"), 0.5);
        assert_eq!(&packed[&1][0..3], &[100, 50, 25]);
    }
}
