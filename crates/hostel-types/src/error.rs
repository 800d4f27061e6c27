use thiserror::Error;

/// Errors produced by record decoding and encoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("cannot decode {kind} document {id}: {reason}")]
    Decode {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("cannot encode {kind} document {id}: {reason}")]
    Encode {
        kind: &'static str,
        id: String,
        reason: String,
    },

    #[error("document {id} is not a JSON object")]
    NotAnObject { id: String },
}
