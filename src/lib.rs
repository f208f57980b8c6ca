#![no_std]

pub mod channel;
pub mod config;
pub mod controller;
pub mod curve;
pub mod device;
pub mod engine;
pub mod error;
pub mod registry;

pub use channel::{CommandChannel, CommandReceiver, CommandSender, LedCommand};
pub use config::{BLOCK_FOREVER, DEFAULT_POLL_PERIOD, EffectConfig, LedMode, ticks};
pub use controller::LedController;
pub use curve::{BrightnessCurve, CosineCurve, LookupCurve};
pub use device::{LedState, LedStatus};
pub use engine::EffectEngine;
pub use error::LedError;
pub use registry::LedRegistry;

pub use embassy_time::Duration;

/// LED identifier, an index into the [`LedRegistry`]
pub type LedId = u8;

/// Full brightness percentage
pub const MAX_BRIGHTNESS: u8 = 100;

/// Zero brightness percentage
pub const MIN_BRIGHTNESS: u8 = 0;

/// Hardware brightness sink
///
/// Implement this trait for a PWM channel (or anything else that can show a
/// brightness). It is called from the tick handler, so it must not block.
pub trait BrightnessOutput {
    /// Set brightness in percent (0-100)
    fn set_percent(&mut self, percent: u8);
}

impl<F: FnMut(u8)> BrightnessOutput for F {
    fn set_percent(&mut self, percent: u8) {
        self(percent);
    }
}

/// Notification fired once when an effect lifetime runs out
pub trait ExpiryHandler {
    fn on_expired(&mut self);
}

impl<F: FnMut()> ExpiryHandler for F {
    fn on_expired(&mut self) {
        self();
    }
}
