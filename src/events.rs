//! Minimal synchronous publish/subscribe channel.

use alloc::boxed::Box;
use alloc::vec::Vec;

type Handler<P> = Box<dyn FnMut(&P)>;

/// Named-event bus. Handlers run in subscription order, synchronously, inside
/// `emit`.
pub struct EventBus<P> {
    handlers: Vec<(&'static str, Handler<P>)>,
}

impl<P> EventBus<P> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Subscribe `handler` to `event`.
    pub fn on<F>(&mut self, event: &'static str, handler: F)
    where
        F: FnMut(&P) + 'static,
    {
        self.handlers.push((event, Box::new(handler)));
    }

    /// Deliver `payload` to every handler subscribed to `event`. Returns how
    /// many handlers ran.
    pub fn emit(&mut self, event: &str, payload: &P) -> usize {
        let mut delivered = 0;
        for (name, handler) in self.handlers.iter_mut() {
            if *name == event {
                handler(payload);
                delivered += 1;
            }
        }
        delivered
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.handlers.iter().filter(|(name, _)| *name == event).count()
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> core::fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
