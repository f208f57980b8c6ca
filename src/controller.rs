//! Polling front-end combining the registry, the engine and the command queue.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::CommandReceiver;
use crate::curve::{BrightnessCurve, LookupCurve};
use crate::{EffectEngine, LedRegistry};

/// Owns the LED table and applies queued commands before every tick
///
/// # Usage
///
/// ```ignore
/// let commands: CommandChannel<4, 8> = CommandChannel::new();
/// let mut controller = LedController::new(registry, EffectEngine::default(), commands.receiver());
///
/// loop {
///     controller.poll();
///     // Platform-specific wait for DEFAULT_POLL_PERIOD
/// }
/// ```
pub struct LedController<'a, 'c, const N: usize, const SIZE: usize, C = LookupCurve>
where
    C: BrightnessCurve,
{
    registry: LedRegistry<'a, N>,
    engine: EffectEngine<C>,
    commands: CommandReceiver<'c, N, SIZE>,
}

impl<'a, 'c, const N: usize, const SIZE: usize, C> LedController<'a, 'c, N, SIZE, C>
where
    C: BrightnessCurve,
{
    pub const fn new(
        registry: LedRegistry<'a, N>,
        engine: EffectEngine<C>,
        commands: CommandReceiver<'c, N, SIZE>,
    ) -> Self {
        Self {
            registry,
            engine,
            commands,
        }
    }

    /// Process one poll period
    ///
    /// Drains every pending command in order, then runs a single engine tick.
    pub fn poll(&mut self) {
        self.apply_commands();
        self.engine.tick(&mut self.registry);
    }

    fn apply_commands(&mut self) {
        while let Some(command) = self.commands.try_receive() {
            let result = self.registry.configure(command.id(), &command.config());

            #[cfg(feature = "esp32-log")]
            if let Err(err) = result {
                println!("[LedController.poll] dropped {:?}: {}", command, err);
            }
            // Commands are validated when sent
            debug_assert!(result.is_ok());
        }
    }

    pub const fn registry(&self) -> &LedRegistry<'a, N> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LedRegistry<'a, N> {
        &mut self.registry
    }

    pub const fn engine(&self) -> &EffectEngine<C> {
        &self.engine
    }
}
