//! Effect configuration
//!
//! Callers describe effects with [`EffectConfig`] using wall-clock durations.
//! The registry converts them into whole tick counts once, at configure time.

use embassy_time::Duration;

use crate::{LedError, LedId};

/// Poll period used by [`LedRegistry::default`](crate::LedRegistry)
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(100);

/// Next-event value meaning "no further timed transition"
pub const BLOCK_FOREVER: u32 = u32::MAX;

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_ON: &str = "on";
const MODE_NAME_BLINK: &str = "blink";
const MODE_NAME_BREATH: &str = "breath";
const MODE_NAME_FADE_IN: &str = "fade_in";
const MODE_NAME_FADE_OUT: &str = "fade_out";
const MODE_NAME_ALTERNATE: &str = "alternate";

const MODE_ID_OFF: u8 = 0;
const MODE_ID_ON: u8 = 1;
const MODE_ID_BLINK: u8 = 2;
const MODE_ID_BREATH: u8 = 3;
const MODE_ID_FADE_IN: u8 = 4;
const MODE_ID_FADE_OUT: u8 = 5;
const MODE_ID_ALTERNATE: u8 = 6;

/// LED effect mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum LedMode {
    /// Always off
    #[default]
    Off = MODE_ID_OFF,
    /// Always on
    On = MODE_ID_ON,
    /// Periodic on/off
    Blink = MODE_ID_BLINK,
    /// Endless smooth breathing
    Breath = MODE_ID_BREATH,
    /// Smooth rise to full brightness, then hold
    FadeIn = MODE_ID_FADE_IN,
    /// Smooth fall to zero, then hold
    FadeOut = MODE_ID_FADE_OUT,
    /// Toggle in opposition to a peer LED
    Alternate = MODE_ID_ALTERNATE,
}

impl LedMode {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_OFF => Self::Off,
            MODE_ID_ON => Self::On,
            MODE_ID_BLINK => Self::Blink,
            MODE_ID_BREATH => Self::Breath,
            MODE_ID_FADE_IN => Self::FadeIn,
            MODE_ID_FADE_OUT => Self::FadeOut,
            MODE_ID_ALTERNATE => Self::Alternate,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::On => MODE_NAME_ON,
            Self::Blink => MODE_NAME_BLINK,
            Self::Breath => MODE_NAME_BREATH,
            Self::FadeIn => MODE_NAME_FADE_IN,
            Self::FadeOut => MODE_NAME_FADE_OUT,
            Self::Alternate => MODE_NAME_ALTERNATE,
        }
    }

    pub fn parse_from_str(s: &str) -> Result<Self, LedError> {
        match s {
            MODE_NAME_OFF => Ok(Self::Off),
            MODE_NAME_ON => Ok(Self::On),
            MODE_NAME_BLINK => Ok(Self::Blink),
            MODE_NAME_BREATH => Ok(Self::Breath),
            MODE_NAME_FADE_IN => Ok(Self::FadeIn),
            MODE_NAME_FADE_OUT => Ok(Self::FadeOut),
            MODE_NAME_ALTERNATE => Ok(Self::Alternate),
            _ => Err(LedError::InvalidMode),
        }
    }

    /// Returns true for modes driven by the brightness curve
    pub const fn uses_phase(self) -> bool {
        matches!(self, Self::Breath | Self::FadeIn | Self::FadeOut)
    }
}

impl TryFrom<u8> for LedMode {
    type Error = LedError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or(LedError::InvalidMode)
    }
}

/// Effect configuration written by the caller
///
/// Durations shorter than one poll period truncate to zero ticks, which
/// means "every tick" for blink/alternate spans and "indefinite" for the
/// lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectConfig {
    pub mode: LedMode,
    /// LED paired with this one in [`LedMode::Alternate`]
    pub alternate_peer: LedId,
    /// Active span of [`LedMode::Blink`]
    pub on: Duration,
    /// Inactive span of [`LedMode::Blink`]
    pub off: Duration,
    /// Time of one 0% to 100% transition (or the reverse)
    pub fade: Duration,
    /// Time between [`LedMode::Alternate`] toggles
    pub alternate: Duration,
    /// Total effect lifetime, zero means indefinite
    pub lifetime: Duration,
}

impl EffectConfig {
    pub const fn off() -> Self {
        Self::with_mode(LedMode::Off)
    }

    pub const fn on() -> Self {
        Self::with_mode(LedMode::On)
    }

    pub const fn blink(on: Duration, off: Duration) -> Self {
        let mut config = Self::with_mode(LedMode::Blink);
        config.on = on;
        config.off = off;
        config
    }

    pub const fn breath(fade: Duration) -> Self {
        Self::faded(LedMode::Breath, fade)
    }

    pub const fn fade_in(fade: Duration) -> Self {
        Self::faded(LedMode::FadeIn, fade)
    }

    pub const fn fade_out(fade: Duration) -> Self {
        Self::faded(LedMode::FadeOut, fade)
    }

    pub const fn alternate(peer: LedId, period: Duration) -> Self {
        let mut config = Self::with_mode(LedMode::Alternate);
        config.alternate_peer = peer;
        config.alternate = period;
        config
    }

    /// Stop the effect automatically after `lifetime`
    #[must_use]
    pub const fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    const fn with_mode(mode: LedMode) -> Self {
        Self {
            mode,
            alternate_peer: 0,
            on: Duration::from_ticks(0),
            off: Duration::from_ticks(0),
            fade: Duration::from_ticks(0),
            alternate: Duration::from_ticks(0),
            lifetime: Duration::from_ticks(0),
        }
    }

    const fn faded(mode: LedMode, fade: Duration) -> Self {
        let mut config = Self::with_mode(mode);
        config.fade = fade;
        config
    }

    /// Check the configuration against LED `id` of a registry with `count` slots
    pub(crate) fn validate(&self, id: LedId, count: usize) -> Result<(), LedError> {
        if usize::from(id) >= count {
            return Err(LedError::InvalidArgument);
        }
        if self.mode == LedMode::Alternate && self.alternate_peer == id {
            return Err(LedError::InvalidAlternatePeer);
        }
        Ok(())
    }
}

/// Effect configuration converted to tick counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TickConfig {
    pub(crate) mode: LedMode,
    pub(crate) alternate_peer: LedId,
    pub(crate) on: u32,
    pub(crate) off: u32,
    pub(crate) fade: u32,
    pub(crate) alternate: u32,
    pub(crate) lifetime: u32,
}

impl TickConfig {
    pub(crate) fn new(config: &EffectConfig, poll_period: Duration) -> Self {
        Self {
            mode: config.mode,
            alternate_peer: config.alternate_peer,
            on: ticks(config.on, poll_period),
            off: ticks(config.off, poll_period),
            fade: ticks(config.fade, poll_period),
            alternate: ticks(config.alternate, poll_period),
            lifetime: ticks(config.lifetime, poll_period),
        }
    }
}

/// Convert a duration into whole poll periods
///
/// Works on timer ticks, so sub-millisecond periods convert exactly. The
/// remainder is truncated. The result never reaches [`BLOCK_FOREVER`].
pub fn ticks(duration: Duration, poll_period: Duration) -> u32 {
    let count = duration.as_ticks() / poll_period.as_ticks().max(1);
    u32::try_from(count).map_or(BLOCK_FOREVER - 1, |count| count.min(BLOCK_FOREVER - 1))
}
