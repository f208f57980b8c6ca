use core::ops::Not;

use crate::config::TickConfig;
use crate::{BrightnessOutput, ExpiryHandler, LedId};

/// Logical on/off flag used by blink and alternate bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LedState {
    #[default]
    Off,
    On,
}

impl LedState {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// Brightness matching a steady state
    pub const fn brightness(self) -> u8 {
        match self {
            Self::On => crate::MAX_BRIGHTNESS,
            Self::Off => crate::MIN_BRIGHTNESS,
        }
    }
}

impl Not for LedState {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

/// Runtime status of a LED, owned by the effect engine
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LedStatus {
    /// Current brightness (0-100)
    pub brightness: u8,
    pub state: LedState,
    /// Ticks until the next transition, `BLOCK_FOREVER` when idle
    pub next_event: u32,
    /// Ticks until the effect expires, zero when indefinite
    pub lifetime_remaining: u32,
    /// Curve phase in radians
    pub phase: f32,
    /// Phase change per transition
    pub phase_step: f32,
    /// Set once the lifetime countdown has run out
    pub expired: bool,
}

/// Registry slot for a single LED
pub(crate) struct LedDevice<'a> {
    pub(crate) id: LedId,
    pub(crate) config: TickConfig,
    pub(crate) status: LedStatus,
    pub(crate) output: Option<&'a mut dyn BrightnessOutput>,
    pub(crate) expiry: Option<&'a mut dyn ExpiryHandler>,
}

impl<'a> LedDevice<'a> {
    pub(crate) fn new(id: LedId) -> Self {
        Self {
            id,
            config: TickConfig::default(),
            status: LedStatus::default(),
            output: None,
            expiry: None,
        }
    }

    /// Drop everything and attach a new output
    pub(crate) fn reset(&mut self, output: &'a mut dyn BrightnessOutput) {
        *self = Self::new(self.id);
        self.output = Some(output);
    }

    /// Write the current brightness to the output
    pub(crate) fn flush(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.set_percent(self.status.brightness);
        }
    }

    /// Notify the expiry handler, once per configuration
    pub(crate) fn expire(&mut self) {
        if self.status.expired {
            return;
        }
        self.status.expired = true;
        if let Some(handler) = self.expiry.as_mut() {
            handler.on_expired();
        }
    }
}
