use thiserror::Error;

/// Errors reported by the carousel state machines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// Bad construction parameters (empty slide set, zero period, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A navigation target outside `[0, len)`.
    #[error("index {index} out of range for {len} slides")]
    OutOfRange { index: usize, len: usize },

    /// The controller was used after `dispose()`.
    #[error("controller has been disposed")]
    Disposed,
}

impl CarouselError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CarouselError>;
