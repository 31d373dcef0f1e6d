/// Failure posting to a lifecycle through a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// The lifecycle has been shut down and no longer accepts events.
    #[error("lifecycle is closed")]
    Closed,
}
