use thiserror::Error;

use crate::types::Type;

/// Errors raised while decoding, splitting, or unquoting attribute values.
///
/// Storing a raw value never fails; these are only produced lazily when a
/// raw string is interpreted through its type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(r#"cannot parse {0} from "{1}""#)]
    NumberFormat(Type, String),
    #[error(r#"invalid version "{0}": {1}"#)]
    InvalidVersion(String, &'static str),
    #[error(r#"trailing backslash in multi-valued attribute value "{0}""#)]
    UnterminatedEscape(String),
    #[error(r#"for key {key}, expected {expected} but had a {actual}, value is "{raw}""#)]
    TypeMismatch {
        key: String,
        expected: Type,
        actual: Type,
        raw: String,
    },
    #[error(r#"malformed quoted value "{0}""#)]
    MalformedQuote(String),
    #[error(r#"trailing backslash inside quoted value "{0}""#)]
    DanglingQuoteEscape(String),
}
