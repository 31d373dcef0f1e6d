use std::time::Instant;

use crossbeam_channel::Sender;

use super::error::LifecycleError;
use super::event::LifecycleEvent;

/// Posts lifecycle events to a [`Lifecycle`](super::Lifecycle) from any thread.
///
/// Events are processed in posting order when the owner calls `pump`.
pub struct LifecycleHandle<S> {
    tx: Sender<LifecycleEvent<S>>,
}

impl<S> Clone for LifecycleHandle<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S> LifecycleHandle<S> {
    pub(crate) fn new(tx: Sender<LifecycleEvent<S>>) -> Self {
        Self { tx }
    }

    pub fn post(&self, event: LifecycleEvent<S>) -> Result<(), LifecycleError> {
        self.tx.send(event).map_err(|_| LifecycleError::Closed)
    }

    pub fn surface_available(&self, surface: S) -> Result<(), LifecycleError> {
        self.post(LifecycleEvent::SurfaceAvailable(surface))
    }

    pub fn surface_resized(&self, width: u32, height: u32) -> Result<(), LifecycleError> {
        self.post(LifecycleEvent::SurfaceResized { width, height })
    }

    pub fn resume(&self) -> Result<(), LifecycleError> {
        self.post(LifecycleEvent::Resume)
    }

    pub fn pause(&self) -> Result<(), LifecycleError> {
        self.post(LifecycleEvent::Pause)
    }

    pub fn tick(&self, now: Instant) -> Result<(), LifecycleError> {
        self.post(LifecycleEvent::Tick(now))
    }

    /// Posts a surface loss and blocks until the owner has destroyed the swap
    /// target and drained the engine.
    ///
    /// Must not be called from the thread that pumps the lifecycle.
    pub fn surface_lost_blocking(&self) -> Result<(), LifecycleError> {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        self.post(LifecycleEvent::SurfaceLost { ack: Some(ack_tx) })?;
        ack_rx.recv().map_err(|_| LifecycleError::Closed)
    }
}
