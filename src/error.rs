use thiserror::Error;

/// Failures of the crate's own machinery.
///
/// Load failures reported by a [`Delegate`](crate::delegate::Delegate) are
/// not represented here; they travel as opaque
/// [`LoadError`](crate::delegate::LoadError) values.
#[derive(Debug, Error)]
pub enum Error {
    /// The task owning an actor stopped and can no longer answer.
    #[error("{0} actor is no longer running")]
    ActorGone(&'static str),
    /// The load-more threshold must be a finite, non-negative distance.
    #[error("invalid load-more threshold: {0}")]
    InvalidThreshold(f64),
}
