use thiserror::Error;

/// Errors surfaced while decoding or flattening a children value
#[derive(Debug, Error)]
pub enum FlattenError {
    /// The JSON value does not describe a children value
    #[error("invalid children value: {0}")]
    Decode(String),

    /// A `$bigint` literal that is not an integer
    #[error("invalid bigint literal: {0:?}")]
    InvalidBigInt(String),

    /// NaN or an infinity, which has no JSON number form
    #[error("non-finite number: {0}")]
    NonFiniteNumber(f64),

    /// The host could not copy an element with its new key
    #[error("cannot re-key element as {key:?}: {reason}")]
    Clone { key: String, reason: String },
}
