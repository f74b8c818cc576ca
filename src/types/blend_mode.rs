//! Compositing operators a brush can paint with.
//!
//! Names follow the 2D canvas `globalCompositeOperation` keywords so that
//! paint scripts read the same as the brushes they were exported from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PaletteaError, Result};

/// How a new dab combines with the pixels already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    SourceOver,
    SourceIn,
    SourceOut,
    SourceAtop,
    DestinationOver,
    DestinationIn,
    DestinationOut,
    DestinationAtop,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

impl BlendMode {
    /// Every supported mode, Porter-Duff operators first.
    pub const ALL: [BlendMode; 22] = [
        BlendMode::SourceOver,
        BlendMode::SourceIn,
        BlendMode::SourceOut,
        BlendMode::SourceAtop,
        BlendMode::DestinationOver,
        BlendMode::DestinationIn,
        BlendMode::DestinationOut,
        BlendMode::DestinationAtop,
        BlendMode::Lighter,
        BlendMode::Copy,
        BlendMode::Xor,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
    ];

    /// The canvas keyword for this mode.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::SourceIn => "source-in",
            BlendMode::SourceOut => "source-out",
            BlendMode::SourceAtop => "source-atop",
            BlendMode::DestinationOver => "destination-over",
            BlendMode::DestinationIn => "destination-in",
            BlendMode::DestinationOut => "destination-out",
            BlendMode::DestinationAtop => "destination-atop",
            BlendMode::Lighter => "lighter",
            BlendMode::Copy => "copy",
            BlendMode::Xor => "xor",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
        }
    }

    /// True for the separable colour blend modes (multiply, screen, ...),
    /// false for plain Porter-Duff operators.
    pub fn is_separable_blend(self) -> bool {
        matches!(
            self,
            BlendMode::Multiply
                | BlendMode::Screen
                | BlendMode::Overlay
                | BlendMode::Darken
                | BlendMode::Lighten
                | BlendMode::ColorDodge
                | BlendMode::ColorBurn
                | BlendMode::HardLight
                | BlendMode::SoftLight
                | BlendMode::Difference
                | BlendMode::Exclusion
        )
    }
}

impl FromStr for BlendMode {
    type Err = PaletteaError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        BlendMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PaletteaError::Parse {
                message: format!("Unknown blend mode: {}", wanted),
                help: Some("Run `palettea list` to see supported blend modes".to_string()),
            })
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for mode in BlendMode::ALL {
            assert_eq!(mode.name().parse::<BlendMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_default_is_source_over() {
        assert_eq!(BlendMode::default(), BlendMode::SourceOver);
    }

    #[test]
    fn test_serde_uses_canvas_keywords() {
        let mode: BlendMode = serde_yaml::from_str("color-dodge").unwrap();
        assert_eq!(mode, BlendMode::ColorDodge);
        let mode: BlendMode = serde_yaml::from_str("destination-out").unwrap();
        assert_eq!(mode, BlendMode::DestinationOut);
    }

    #[test]
    fn test_unknown_mode() {
        assert!("hue".parse::<BlendMode>().is_err());
    }

    #[test]
    fn test_separable_classification() {
        assert!(BlendMode::Multiply.is_separable_blend());
        assert!(!BlendMode::SourceOver.is_separable_blend());
        assert!(!BlendMode::DestinationOut.is_separable_blend());
    }
}
