//! Fixed-size LED table
//!
//! The registry owns every LED record. Callers initialize slots, write
//! effect configurations and read status snapshots; the
//! [`EffectEngine`](crate::EffectEngine) advances the records on each tick.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{DEFAULT_POLL_PERIOD, EffectConfig, LedMode, TickConfig};
use crate::curve::HALF_CYCLE;
use crate::device::{LedDevice, LedStatus};
use crate::{BrightnessOutput, ExpiryHandler, LedError, LedId, MAX_BRIGHTNESS, MIN_BRIGHTNESS};

/// Table of `N` LEDs sharing one poll period
pub struct LedRegistry<'a, const N: usize> {
    poll_period: Duration,
    pub(crate) devices: [LedDevice<'a>; N],
}

impl<'a, const N: usize> LedRegistry<'a, N> {
    /// Create a registry polled every `poll_period`
    ///
    /// The period is only used to convert effect durations into ticks, it
    /// must match the real calling cadence of the tick handler.
    ///
    /// # Panics
    ///
    /// Panics if `poll_period` is zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub fn new(poll_period: Duration) -> Self {
        const { assert!(N <= LedId::MAX as usize + 1, "LED ids must fit into LedId") };
        assert!(poll_period.as_ticks() > 0, "poll period must be positive");

        Self {
            poll_period,
            devices: core::array::from_fn(|id| LedDevice::new(id as LedId)),
        }
    }

    /// Number of LED slots
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub const fn poll_period(&self) -> Duration {
        self.poll_period
    }

    /// Bind an output to a LED slot
    ///
    /// Any previous effect and expiry handler on the slot are discarded.
    pub fn init(&mut self, id: LedId, output: &'a mut dyn BrightnessOutput) -> Result<(), LedError> {
        self.device_mut(id)?.reset(output);
        Ok(())
    }

    /// Attach a handler called once when the effect lifetime runs out
    pub fn register_expiry_handler(
        &mut self,
        id: LedId,
        handler: &'a mut dyn ExpiryHandler,
    ) -> Result<(), LedError> {
        self.device_mut(id)?.expiry = Some(handler);
        Ok(())
    }

    /// Start a new effect on a LED
    ///
    /// Cancels the effect in progress. On error the slot is left untouched.
    pub fn configure(&mut self, id: LedId, config: &EffectConfig) -> Result<(), LedError> {
        config.validate(id, N)?;

        let poll_period = self.poll_period;
        let device = self.device_mut(id)?;
        device.config = TickConfig::new(config, poll_period);
        device.status = LedStatus {
            lifetime_remaining: device.config.lifetime,
            ..LedStatus::default()
        };

        if config.mode.uses_phase() {
            init_phase(&mut device.status, device.config.mode, device.config.fade);
        }

        #[cfg(feature = "esp32-log")]
        println!(
            "[LedRegistry.configure] led {:?}: {} ({:?})",
            id,
            config.mode.as_str(),
            device.config
        );

        Ok(())
    }

    /// Snapshot of the LED runtime status
    pub fn status(&self, id: LedId) -> Result<LedStatus, LedError> {
        Ok(self.device(id)?.status)
    }

    /// Mode the LED is running, `Off` once its lifetime ran out
    pub fn mode(&self, id: LedId) -> Result<LedMode, LedError> {
        Ok(self.device(id)?.config.mode)
    }

    fn device(&self, id: LedId) -> Result<&LedDevice<'a>, LedError> {
        self.devices
            .get(usize::from(id))
            .ok_or(LedError::InvalidArgument)
    }

    fn device_mut(&mut self, id: LedId) -> Result<&mut LedDevice<'a>, LedError> {
        self.devices
            .get_mut(usize::from(id))
            .ok_or(LedError::InvalidArgument)
    }
}

impl<const N: usize> Default for LedRegistry<'_, N> {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_PERIOD)
    }
}

/// Set up the curve phase for breathing and fading modes
#[allow(clippy::cast_precision_loss)]
fn init_phase(status: &mut LedStatus, mode: LedMode, fade_ticks: u32) {
    let step = if fade_ticks == 0 {
        HALF_CYCLE / f32::from(MAX_BRIGHTNESS)
    } else {
        HALF_CYCLE / fade_ticks as f32
    };

    if mode == LedMode::FadeOut {
        status.brightness = MAX_BRIGHTNESS;
        status.phase = HALF_CYCLE;
        status.phase_step = -step;
    } else {
        status.brightness = MIN_BRIGHTNESS;
        status.phase = 0.0;
        status.phase_step = step;
    }
}
