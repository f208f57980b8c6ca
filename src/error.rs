use core::fmt;

/// Errors returned by the registry and the command channel
///
/// All of them are reported synchronously by the call that introduced the
/// bad input. The tick handler itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// LED id is outside of the registry
    InvalidArgument,
    /// Raw mode value or mode name is not known
    InvalidMode,
    /// Alternate mode is paired with the LED itself
    InvalidAlternatePeer,
    /// Command channel has no free slots
    QueueFull,
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidArgument => "invalid LED id",
            Self::InvalidMode => "unknown LED mode",
            Self::InvalidAlternatePeer => "LED cannot alternate with itself",
            Self::QueueFull => "command queue is full",
        };
        f.write_str(message)
    }
}

impl core::error::Error for LedError {}
