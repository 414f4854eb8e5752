use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use lightsphere::animation::WaveAnimation;
use lightsphere::config::{load_or_default, palette_from_config};
use lightsphere::sacn_strip::SacnStrip;
use lightsphere::LightSphere;

/// Resolves once the operator presses Enter. With no terminal attached
/// (stdin at EOF) the channel just disconnects and never fires.
fn start_stop_watcher() -> Receiver<()> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        if let Ok(n) = stdin.lock().read_line(&mut line) {
            if n > 0 {
                let _ = tx.send(());
            }
        }
    });

    rx
}

fn main() -> Result<()> {
    env_logger::init();

    let config = load_or_default()?;

    let strip = SacnStrip::new(config.pixel_count, config.strip.clone(), config.network.clone())
        .context("Failed to open the sACN output")?;
    let mut sphere =
        LightSphere::new(strip, &config.boundaries()).context("Failed to build the sphere")?;
    sphere.set_brightness(config.brightness)?;

    let palette = palette_from_config(&config)?;
    let mut animation = WaveAnimation::new(config.wave.clone(), palette)?;

    let frame_time = Duration::from_secs_f64(1.0 / config.fps as f64);
    let stop = start_stop_watcher();
    info!("[SPHERE] Running at {} fps, press Enter to stop", config.fps);

    let mut send_errors: u64 = 0;
    let mut last_error_log = Instant::now();

    loop {
        if stop.try_recv().is_ok() {
            break;
        }

        let frame_start = Instant::now();

        // a bad frame means a table bug; stop instead of showing garbage
        animation.render(&mut sphere).context("Failed to render frame")?;

        if let Err(e) = sphere.show() {
            send_errors += 1;
            // Rate limit: once per second
            if last_error_log.elapsed() > Duration::from_secs(1) {
                warn!("[LIGHTS] {} (failed frames so far: {})", e, send_errors);
                last_error_log = Instant::now();
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        } else {
            debug!("[SPHERE] Frame {} took {:?}, over budget", animation.frame(), elapsed);
        }
    }

    info!("[SPHERE] Stopping...");
    sphere.clear();
    sphere.show().context("Failed to blank the strip")?;
    Ok(())
}
