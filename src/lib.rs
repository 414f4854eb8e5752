//! Drive an LED strip wound into rings around a sphere, addressing pixels by
//! azimuth and inclination instead of strip index.

pub mod animation;
pub mod config;
pub mod error;
pub mod model;
pub mod palette;
pub mod range;
pub mod sacn_strip;
pub mod sphere;
pub mod strip;
pub mod table;
pub mod topology;

pub use error::{Result, SphereError};
pub use range::AngleRange;
pub use sphere::LightSphere;
pub use strip::{MemoryStrip, Rgb, Strip};
