//! Tick-driven effect engine
//!
//! [`EffectEngine::tick`] must be called exactly once per poll period. It
//! walks the registry in ascending id order, so an alternate LED with a
//! higher id always sees the state its lower-id driver set in the same tick.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{BLOCK_FOREVER, LedMode};
use crate::curve::{BrightnessCurve, FULL_CYCLE, HALF_CYCLE, LookupCurve};
use crate::device::{LedDevice, LedState};
use crate::{LedRegistry, MAX_BRIGHTNESS, MIN_BRIGHTNESS};

/// Advances every registered LED by one tick
#[derive(Debug, Clone, Default)]
pub struct EffectEngine<C: BrightnessCurve = LookupCurve> {
    curve: C,
}

impl<C: BrightnessCurve> EffectEngine<C> {
    pub const fn new(curve: C) -> Self {
        Self { curve }
    }

    pub const fn curve(&self) -> &C {
        &self.curve
    }

    /// Process one poll period
    ///
    /// Never fails: LEDs without an output and unreachable alternate peers
    /// are skipped.
    pub fn tick<const N: usize>(&self, registry: &mut LedRegistry<'_, N>) {
        for index in 0..N {
            let peer_state = peer_state(registry, index);
            let device = &mut registry.devices[index];
            if device.output.is_none() {
                continue;
            }

            if countdown_lifetime(device) || countdown_event(device) {
                continue;
            }

            self.dispatch(device, peer_state);
            device.flush();
        }
    }

    fn dispatch(&self, device: &mut LedDevice<'_>, peer_state: Option<LedState>) {
        match device.config.mode {
            LedMode::Off => hold(device, LedState::Off),
            LedMode::On => hold(device, LedState::On),
            LedMode::Blink => blink(device),
            LedMode::Breath | LedMode::FadeIn | LedMode::FadeOut => self.fade(device),
            LedMode::Alternate => alternate(device, peer_state),
        }
    }

    /// Move along the brightness curve
    fn fade(&self, device: &mut LedDevice<'_>) {
        let status = &mut device.status;
        status.phase += status.phase_step;

        match device.config.mode {
            LedMode::Breath => {
                if status.phase >= FULL_CYCLE {
                    status.phase -= FULL_CYCLE;
                }
            }
            LedMode::FadeIn => {
                if status.phase >= HALF_CYCLE {
                    status.phase = HALF_CYCLE;
                    status.next_event = BLOCK_FOREVER;
                }
            }
            LedMode::FadeOut => {
                if status.phase <= 0.0 {
                    status.phase = 0.0;
                    status.next_event = BLOCK_FOREVER;
                }
            }
            _ => {}
        }

        status.brightness = self.curve.percent(status.phase).min(MAX_BRIGHTNESS);
    }
}

/// State of the alternate peer, read before the LED itself is touched
fn peer_state<const N: usize>(registry: &LedRegistry<'_, N>, index: usize) -> Option<LedState> {
    let config = &registry.devices[index].config;
    if config.mode != LedMode::Alternate {
        return None;
    }
    registry
        .devices
        .get(usize::from(config.alternate_peer))
        .map(|peer| peer.status.state)
}

/// Count down the effect lifetime
///
/// Returns true when the effect has just expired. The LED is switched to
/// `Off` and extinguished on the next tick.
fn countdown_lifetime(device: &mut LedDevice<'_>) -> bool {
    let status = &mut device.status;
    if status.lifetime_remaining == 0 {
        return false;
    }

    status.lifetime_remaining -= 1;
    if status.lifetime_remaining != 0 {
        return false;
    }

    device.config.mode = LedMode::Off;
    device.status.next_event = 0;

    #[cfg(feature = "esp32-log")]
    println!("[EffectEngine.tick] led {:?}: effect expired", device.id);

    device.expire();
    true
}

/// Count down to the next transition
///
/// Returns true while the LED should stay idle.
fn countdown_event(device: &mut LedDevice<'_>) -> bool {
    let status = &mut device.status;
    match status.next_event {
        BLOCK_FOREVER => true,
        0 => false,
        _ => {
            status.next_event -= 1;
            status.next_event != 0
        }
    }
}

fn hold(device: &mut LedDevice<'_>, state: LedState) {
    let status = &mut device.status;
    status.state = state;
    status.brightness = state.brightness();
    status.next_event = BLOCK_FOREVER;
}

fn blink(device: &mut LedDevice<'_>) {
    let status = &mut device.status;
    status.state = !status.state;
    if status.state.is_on() {
        status.next_event = device.config.on;
        status.brightness = MAX_BRIGHTNESS;
    } else {
        status.next_event = device.config.off;
        status.brightness = MIN_BRIGHTNESS;
    }
}

/// Lower id of a pair drives, the higher id mirrors the inverse
fn alternate(device: &mut LedDevice<'_>, peer_state: Option<LedState>) {
    let Some(peer_state) = peer_state else {
        return;
    };

    let status = &mut device.status;
    status.next_event = device.config.alternate;
    status.state = if device.id < device.config.alternate_peer {
        !status.state
    } else {
        !peer_state
    };
    status.brightness = status.state.brightness();
}
