//! Config file discovery and loading.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::error::SphereError;
use crate::model::SphereConfig;
use crate::palette::Palette;

pub const CONFIG_ENV: &str = "LIGHTSPHERE_CONFIG";

/// `sphere.json` under `$XDG_CONFIG_HOME/lightsphere`, falling back to
/// `~/.config/lightsphere`. An empty or relative `XDG_CONFIG_HOME` is ignored.
pub fn user_config_path() -> PathBuf {
    config_path_in(std::env::var_os("XDG_CONFIG_HOME"), home::home_dir())
}

fn config_path_in(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    let base = xdg_config_home
        .map(PathBuf::from)
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".config")));

    match base {
        Some(dir) => dir.join("lightsphere").join("sphere.json"),
        None => PathBuf::from("sphere.json"),
    }
}

/// Parse and check a config file.
pub fn load_config(path: &Path) -> Result<SphereConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read config at {:?}", path))?;
    let config: SphereConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config at {:?}", path))?;
    validate(&config).with_context(|| format!("Invalid config at {:?}", path))?;
    Ok(config)
}

/// Config from `$LIGHTSPHERE_CONFIG`, else the per-user file, else defaults.
pub fn load_or_default() -> Result<SphereConfig> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        let path = PathBuf::from(path);
        info!("[CONFIG] Loading {:?} (from {})", path, CONFIG_ENV);
        return load_config(&path);
    }

    let path = user_config_path();
    if path.exists() {
        info!("[CONFIG] Loading {:?}", path);
        load_config(&path)
    } else {
        warn!("[CONFIG] No config at {:?}, using defaults", path);
        Ok(SphereConfig::default())
    }
}

/// Checks that do not need a strip. Ring boundaries are checked when the
/// sphere is built.
pub fn validate(config: &SphereConfig) -> std::result::Result<(), SphereError> {
    if config.pixel_count == 0 {
        return Err(SphereError::config("pixel_count must be at least 1"));
    }
    if config.fps == 0 {
        return Err(SphereError::config("fps must be at least 1"));
    }
    if !(0.0..=1.0).contains(&config.brightness) {
        return Err(SphereError::config(format!(
            "brightness must be within [0, 1], got {}",
            config.brightness
        )));
    }
    if config.wave.slices == 0 {
        return Err(SphereError::config("wave.slices must be at least 1"));
    }
    if !matches!(config.strip.color_order.as_str(), "RGB" | "GRB" | "BGR") {
        return Err(SphereError::config(format!(
            "unknown color_order '{}'",
            config.strip.color_order
        )));
    }
    Ok(())
}

pub fn palette_from_config(config: &SphereConfig) -> std::result::Result<Palette, SphereError> {
    match &config.palette_stops {
        Some(stops) => Palette::from_json(stops, config.palette_length),
        None => Palette::named(&config.palette, config.palette_length),
    }
}
