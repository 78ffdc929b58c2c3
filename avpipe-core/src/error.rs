//! Error types for media pipeline operations
//!
//! This module defines the error type shared by every stage of the pipeline,
//! distinguishing caller precondition violations from codec failures and from
//! the terminal end-of-stream signal.

use thiserror::Error;

/// Main error type for media pipeline operations
#[derive(Error, Debug)]
pub enum AvError {
    /// Slice indices fall outside the frame's sample range
    #[error("slice out of range: [{start}, {end}) on a {len}-sample frame")]
    SliceOutOfRange {
        /// First sample index requested
        start: usize,
        /// One-past-last sample index requested
        end: usize,
        /// Sample count of the sliced frame
        len: usize,
    },

    /// Two frames disagree on sample rate, channel layout, or sample format
    #[error("frame format mismatch: expected {expected}, got {actual}")]
    FormatMismatch {
        /// Format of the receiving frame
        expected: String,
        /// Format of the offending frame
        actual: String,
    },

    /// Two frames carry a different number of data planes
    #[error("plane count mismatch: expected {expected} planes, got {actual}")]
    PlaneCountMismatch {
        /// Plane count of the receiving frame
        expected: usize,
        /// Plane count of the offending frame
        actual: usize,
    },

    /// A frame's plane holds fewer bytes than its sample count requires
    #[error("plane {plane} too short: need {needed} bytes, have {available}")]
    ShortPlane {
        /// Index of the offending plane
        plane: usize,
        /// Bytes required by the sample range
        needed: usize,
        /// Bytes actually present in the plane
        available: usize,
    },

    /// Byte offsets cannot be computed for an unrecognized sample format
    #[error("unknown sample width for format {format}")]
    UnknownSampleFormat {
        /// Display name of the format
        format: String,
    },

    /// A packet referenced a stream index not declared in the header
    #[error("unknown stream index {index}: header declared {count} streams")]
    UnknownStream {
        /// Stream index carried by the packet
        index: usize,
        /// Number of streams declared in the header
        count: usize,
    },

    /// A muxer call arrived out of order
    #[error("invalid muxer state: expected {expected}, got {actual}")]
    InvalidState {
        /// State required by the call
        expected: String,
        /// State the muxer was actually in
        actual: String,
    },

    /// Codec configuration bytes failed to parse
    #[error("invalid codec data for {codec}: {reason}")]
    InvalidCodecData {
        /// Codec family name
        codec: String,
        /// Parse failure reason
        reason: String,
    },

    /// Encoding operation failed
    #[error("encoding failed: {codec} - {reason}")]
    EncodingFailed {
        /// Codec family name
        codec: String,
        /// Failure reason
        reason: String,
    },

    /// Decoding operation failed
    #[error("decoding failed: {codec} - {reason}")]
    DecodingFailed {
        /// Codec family name
        codec: String,
        /// Failure reason
        reason: String,
    },

    /// Demuxer has no further packets; a clean stop, not a failure
    #[error("end of stream")]
    EndOfStream,

    /// I/O operation failed in a muxer or demuxer implementation
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },
}

/// Result type alias for media pipeline operations
pub type AvResult<T> = Result<T, AvError>;

impl AvError {
    /// True for the distinguished end-of-stream signal, so callers can stop
    /// cleanly instead of treating exhaustion as a transport failure.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, AvError::EndOfStream)
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            AvError::SliceOutOfRange { .. } => ErrorCategory::Precondition,
            AvError::FormatMismatch { .. } => ErrorCategory::Precondition,
            AvError::PlaneCountMismatch { .. } => ErrorCategory::Precondition,
            AvError::ShortPlane { .. } => ErrorCategory::Precondition,
            AvError::UnknownSampleFormat { .. } => ErrorCategory::Precondition,
            AvError::UnknownStream { .. } => ErrorCategory::Precondition,
            AvError::InvalidState { .. } => ErrorCategory::Precondition,
            AvError::InvalidCodecData { .. } => ErrorCategory::CodecData,
            AvError::EncodingFailed { .. } => ErrorCategory::Codec,
            AvError::DecodingFailed { .. } => ErrorCategory::Codec,
            AvError::EndOfStream => ErrorCategory::Stream,
            AvError::Io { .. } => ErrorCategory::System,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller violated a documented precondition
    Precondition,
    /// Codec configuration bytes were malformed
    CodecData,
    /// Codec-specific encode/decode failure
    Codec,
    /// Stream lifecycle signals
    Stream,
    /// System-level errors (I/O, permissions, etc.)
    System,
}
