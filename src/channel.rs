//! Reconfiguration queue for `no_std` environments.
//!
//! Lets a foreground task or an interrupt handler request new effects while
//! the tick handler runs elsewhere. Requests are checked when they are sent
//! and applied by [`LedController::poll`](crate::LedController) before the
//! next tick, so records are never mutated in the middle of a tick.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::{EffectConfig, LedError, LedId};

/// Request queued for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    /// Start a new effect on a LED
    Configure { id: LedId, config: EffectConfig },
    /// Cancel the running effect and switch the LED off
    Stop(LedId),
}

impl LedCommand {
    pub const fn id(&self) -> LedId {
        match self {
            Self::Configure { id, .. } | Self::Stop(id) => *id,
        }
    }

    /// Effect the command will write to its LED
    pub const fn config(&self) -> EffectConfig {
        match self {
            Self::Configure { config, .. } => *config,
            Self::Stop(_) => EffectConfig::off(),
        }
    }
}

/// Bounded command queue for a registry of `LEDS` slots.
///
/// Guarded by a critical section, so senders may live in interrupt context.
pub struct CommandChannel<const LEDS: usize, const SIZE: usize> {
    inner: Mutex<RefCell<Deque<LedCommand, SIZE>>>,
}

impl<const LEDS: usize, const SIZE: usize> CommandChannel<LEDS, SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    pub const fn sender(&self) -> CommandSender<'_, LEDS, SIZE> {
        CommandSender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> CommandReceiver<'_, LEDS, SIZE> {
        CommandReceiver { channel: self }
    }

    /// Queue a command after checking it against the registry layout.
    pub fn try_send(&self, command: LedCommand) -> Result<(), LedError> {
        command.config().validate(command.id(), LEDS)?;
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(command).map_err(|_| LedError::QueueFull)
        })
    }

    /// Take the oldest pending command, if any.
    pub fn try_receive(&self) -> Option<LedCommand> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of commands waiting to be applied.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const LEDS: usize, const SIZE: usize> Default for CommandChannel<LEDS, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`CommandChannel`].
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const LEDS: usize, const SIZE: usize> {
    channel: &'a CommandChannel<LEDS, SIZE>,
}

impl<const LEDS: usize, const SIZE: usize> CommandSender<'_, LEDS, SIZE> {
    /// Request a new effect on LED `id`.
    ///
    /// Bad ids and self-paired alternation are rejected here, the same way
    /// [`LedRegistry::configure`](crate::LedRegistry::configure) rejects them.
    pub fn configure(&self, id: LedId, config: EffectConfig) -> Result<(), LedError> {
        self.channel.try_send(LedCommand::Configure { id, config })
    }

    /// Request LED `id` to be switched off.
    pub fn stop(&self, id: LedId) -> Result<(), LedError> {
        self.channel.try_send(LedCommand::Stop(id))
    }
}

/// Receiving half of a [`CommandChannel`].
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const LEDS: usize, const SIZE: usize> {
    channel: &'a CommandChannel<LEDS, SIZE>,
}

impl<const LEDS: usize, const SIZE: usize> CommandReceiver<'_, LEDS, SIZE> {
    pub fn try_receive(&self) -> Option<LedCommand> {
        self.channel.try_receive()
    }
}
