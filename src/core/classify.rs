//! Color classification capability
//!
//! The camera side samples one HSV pixel per sticker; turning that into a
//! label is injected through [`ColorClassifier`] so the rest of the crate
//! never depends on the thresholds.

use serde::{Deserialize, Serialize};

use crate::types::{FaceStickers, Label};

/// One HSV sample, OpenCV ranges: hue 0-180, saturation and value 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvSample {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl HsvSample {
    pub fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// Maps a color sample to a discrete label
pub trait ColorClassifier {
    fn classify(&self, h: u8, s: u8, v: u8) -> Label;

    /// Classify the nine samples of one face
    fn classify_face(&self, samples: &[HsvSample; 9]) -> FaceStickers {
        (*samples).map(|px| self.classify(px.h, px.s, px.v))
    }
}

impl<F> ColorClassifier for F
where
    F: Fn(u8, u8, u8) -> Label,
{
    fn classify(&self, h: u8, s: u8, v: u8) -> Label {
        self(h, s, v)
    }
}

/// Hue bands for the six sticker colors. Everything saturated outside the
/// bands falls back to orange, the color most often smeared by glare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvThresholds {
    /// At or below this saturation (with enough value) a sticker is white
    pub white_max_saturation: u8,
    pub white_min_value: u8,
    /// Red wraps around the hue circle: [0, red_low_max] ∪ [red_high_min, 180]
    pub red_low_max: u8,
    pub red_high_min: u8,
    pub orange_max: u8,
    pub yellow_max: u8,
    pub green_max: u8,
    pub blue_max: u8,
}

impl Default for HsvThresholds {
    fn default() -> Self {
        Self {
            white_max_saturation: 80,
            white_min_value: 50,
            red_low_max: 4,
            red_high_min: 165,
            orange_max: 20,
            yellow_max: 45,
            green_max: 90,
            blue_max: 140,
        }
    }
}

impl ColorClassifier for HsvThresholds {
    fn classify(&self, h: u8, s: u8, v: u8) -> Label {
        if s <= self.white_max_saturation {
            return Label(if v >= self.white_min_value { 'W' } else { 'O' });
        }
        let c = if h <= self.red_low_max || h >= self.red_high_min {
            'R'
        } else if h <= self.orange_max {
            'O'
        } else if h <= self.yellow_max {
            'Y'
        } else if h <= self.green_max {
            'G'
        } else if h <= self.blue_max {
            'B'
        } else {
            'O'
        };
        Label(c)
    }
}
