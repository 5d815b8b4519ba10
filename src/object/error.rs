use thiserror::Error;

use super::Kind;

/// Describes the ways an object can fail to encode or decode.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("unknown object kind `{0}`")]
    UnknownObjectKind(String),

    #[error("cannot serialize a {0} with no data")]
    EmptyBody(Kind),

    #[error("malformed tree: {0}")]
    MalformedTree(String),

    #[error("malformed object: {0}")]
    MalformedObject(String),

    #[error("invalid key `{key}` for {kind}")]
    InvalidHeaderKey { kind: Kind, key: String },

    #[error("invalid `{key}` value in {kind}: {reason}")]
    InvalidHeaderValue {
        kind: Kind,
        key: String,
        reason: String,
    },

    #[error("{0} body is not valid UTF-8")]
    InvalidUtf8(Kind),
}
