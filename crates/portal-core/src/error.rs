use thiserror::Error;

/// Failures surfaced by the generator, the registry and the camera controller.
///
/// Only `InvalidArgument` is ever returned to a caller as a hard failure from
/// generation. The controller recovers the other two locally and reports them
/// as frame events.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UniverseError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unresolved entity reference: {0}")]
    UnresolvedReference(String),

    #[error("preset slot {index} is out of range (slot count {count})")]
    OutOfRangeSlot { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, UniverseError>;
