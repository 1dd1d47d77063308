use thiserror::Error;

/// Main error type for BER-TLV decoding
///
/// Decode errors are terminal for the walk that produced them: the walker
/// stops at the first error and returns everything rendered up to that
/// point. The variants carry the violated bound as structured fields so
/// callers can log or inspect the diagnostic without parsing a message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlvError {
    /// The remaining buffer is smaller than the decoded object requires,
    /// either for the minimum header or for the full tag + length + value
    /// span. Component sizes not yet decoded at the point of failure are
    /// reported as zero.
    #[error(
        "insufficient data: {actual} bytes remaining, at least {required} required \
         (tag {tag_size} + length {length_size} + value {value_length})"
    )]
    InsufficientData {
        actual: usize,
        required: usize,
        tag_size: usize,
        length_size: usize,
        value_length: usize,
    },

    /// Constructed objects are nested deeper than the supported maximum.
    #[error("nesting depth exceeds the supported maximum of {max} constructed levels")]
    DepthExceeded { max: usize },
}

/// Result type alias for BER-TLV operations
pub type TlvResult<T> = Result<T, TlvError>;
