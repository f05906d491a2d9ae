//! Error types for the synthesis bank.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors that can occur while rendering a track.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Sample rate of zero or otherwise unusable.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// An event carried a non-finite or negative start time.
    #[error("invalid event time: {time}")]
    InvalidEventTime {
        /// The invalid time in seconds.
        time: f64,
    },

    /// An event carried a non-finite frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SynthError::InvalidSampleRate { rate: 0 };
        assert!(err.to_string().contains("sample rate"));

        let err = SynthError::InvalidEventTime { time: -1.0 };
        assert!(err.to_string().contains("-1"));
    }
}
