use core::fmt;

/// Error during strip driver operation.
///
/// `E` is the error type of the [`TransferEngine`](crate::TransferEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// More pixels requested than the strip was built for.
    TooManyPixels {
        /// Requested pixel count.
        requested: usize,
        /// Capacity of the strip.
        max: usize,
    },
    /// Pulse buffer cannot hold a full frame.
    BufferTooSmall {
        /// Slots a frame needs.
        required: usize,
        /// Slots provided.
        actual: usize,
    },
    /// Pixel index at or past the configured pixel count.
    PixelOutOfRange {
        /// Index passed by the caller.
        index: usize,
        /// Configured pixel count.
        count: usize,
    },
    /// The transfer engine rejected the resolved thresholds.
    Configure(E),
    /// The transfer engine refused to start. The pulse buffer already holds
    /// the new frame.
    Transfer(E),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooManyPixels { requested, max } => {
                write!(f, "{requested} pixels requested, strip holds at most {max}")
            }
            Error::BufferTooSmall { required, actual } => {
                write!(f, "pulse buffer has {actual} slots, a frame needs {required}")
            }
            Error::PixelOutOfRange { index, count } => {
                write!(f, "pixel {index} out of range for {count} pixels")
            }
            Error::Configure(err) => write!(f, "engine rejected timing: {err:?}"),
            Error::Transfer(err) => write!(f, "transfer error: {err:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}
