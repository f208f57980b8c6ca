//! Brightness curves for breathing and fading
//!
//! Phase is measured in radians. A single fade moves the phase by π, a full
//! breathing cycle covers 2π. Both curves follow the raised cosine
//! `(1 - cos(phase)) / 2`, so phase 0 and 2π are dark and phase π is full
//! brightness.

use core::f32::consts::PI;

use crate::MAX_BRIGHTNESS;

/// Phase span of one fade (0% to 100%)
pub const HALF_CYCLE: f32 = PI;

/// Phase span of one breathing cycle
pub const FULL_CYCLE: f32 = 2.0 * PI;

/// Maps a phase to a brightness percentage
pub trait BrightnessCurve {
    /// Brightness in `0..=100` for `phase` in `0..=2π`
    fn percent(&self, phase: f32) -> u8;
}

/// Raised cosine evaluated on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineCurve;

impl BrightnessCurve for CosineCurve {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn percent(&self, phase: f32) -> u8 {
        let value = (1.0 - libm::cosf(phase)) / 2.0 * f32::from(MAX_BRIGHTNESS);
        libm::roundf(value).clamp(0.0, f32::from(MAX_BRIGHTNESS)) as u8
    }
}

const TABLE_SIZE: usize = 128;

/// Raised cosine sampled at `2π * i / 128`
#[rustfmt::skip]
const RAISED_COSINE: [u8; TABLE_SIZE + 1] = [
      0,   0,   0,   1,   1,   1,   2,   3,   4,   5,   6,   7,   8,  10,  11,  13,
     15,  16,  18,  20,  22,  24,  26,  29,  31,  33,  35,  38,  40,  43,  45,  48,
     50,  52,  55,  57,  60,  62,  65,  67,  69,  71,  74,  76,  78,  80,  82,  84,
     85,  87,  89,  90,  92,  93,  94,  95,  96,  97,  98,  99,  99,  99, 100, 100,
    100, 100, 100,  99,  99,  99,  98,  97,  96,  95,  94,  93,  92,  90,  89,  87,
     85,  84,  82,  80,  78,  76,  74,  71,  69,  67,  65,  62,  60,  57,  55,  52,
     50,  48,  45,  43,  40,  38,  35,  33,  31,  29,  26,  24,  22,  20,  18,  16,
     15,  13,  11,  10,   8,   7,   6,   5,   4,   3,   2,   1,   1,   1,   0,   0,
      0,
];

/// Precomputed raised cosine with linear interpolation between samples
///
/// Avoids trigonometry on targets without an FPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupCurve;

impl BrightnessCurve for LookupCurve {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn percent(&self, phase: f32) -> u8 {
        let step = FULL_CYCLE / TABLE_SIZE as f32;
        let position = phase / step;
        if position <= 0.0 {
            return RAISED_COSINE[0];
        }

        let index = position as usize;
        if index >= TABLE_SIZE {
            return RAISED_COSINE[TABLE_SIZE];
        }

        let fraction = position - index as f32;
        let low = f32::from(RAISED_COSINE[index]);
        let high = f32::from(RAISED_COSINE[index + 1]);
        let value = libm::roundf(low + (high - low) * fraction);

        value.clamp(0.0, f32::from(MAX_BRIGHTNESS)) as u8
    }
}
