//! Errors raised by the byte-slice entry points.

/// Length violations on slice-based inputs.
///
/// The array-based API cannot fail; these only arise when callers hand in
/// `&[u8]` of the wrong size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Sm4Error {
    /// Master key was not 16 bytes.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
    /// Block was not 16 bytes.
    #[error("invalid block length: expected {expected} bytes, got {got}")]
    InvalidBlockLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },
}
