//! Pointer samples fed to the stroke renderer.

use kurbo::Point;
use serde::{Deserialize, Deserializer};

/// Pen tilt in degrees from vertical along each canvas axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

/// A single pointer observation in canvas space.
///
/// Pressure is expected in [0, 1]; values outside that range are not
/// rejected and simply scale the brush accordingly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    pub x: f64,
    pub y: f64,
    pub pressure: f32,
    pub tilt: Option<Tilt>,
}

impl InputSample {
    pub fn new(x: f64, y: f64, pressure: f32) -> Self {
        Self {
            x,
            y,
            pressure,
            tilt: None,
        }
    }

    pub fn with_tilt(mut self, tilt: Tilt) -> Self {
        self.tilt = Some(tilt);
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Accepted spellings of a sample in paint scripts.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSample {
    Pair([f64; 2]),
    Triple([f64; 3]),
    Full {
        x: f64,
        y: f64,
        #[serde(default = "full_pressure")]
        pressure: f32,
        #[serde(default)]
        tilt: Option<Tilt>,
    },
}

fn full_pressure() -> f32 {
    1.0
}

impl<'de> Deserialize<'de> for InputSample {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSample::deserialize(deserializer)? {
            RawSample::Pair([x, y]) => InputSample::new(x, y, 1.0),
            RawSample::Triple([x, y, p]) => InputSample::new(x, y, p as f32),
            RawSample::Full {
                x,
                y,
                pressure,
                tilt,
            } => InputSample {
                x,
                y,
                pressure,
                tilt,
            },
        })
    }
}
