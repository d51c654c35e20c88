// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! The closed error taxonomy used throughout this crate.
//!
//! Every fallible operation returns [`OmniError`]; there is no open-ended
//! "other" variant so callers can match exhaustively on the kind of
//! failure rather than stringly-typed causes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OmniError>;

#[derive(Debug, Error)]
pub enum OmniError {
    /// Bad argument to an API call: out-of-range value, empty host, bad port, non-positive timeout.
    #[error("validation error: {0}")]
    Validation(String),

    /// No ACK after retries exhausted, a per-fragment wait, or the overall call timeout.
    #[error("timeout waiting for {context}")]
    Timeout { context: String },

    /// Header under-length, unknown opcode/client-type, or zlib decompression failure.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// LeadMessage payload failed to parse, or the fragment reassembly budget was exceeded.
    #[error("fragmentation error: {0}")]
    Fragmentation(String),

    /// Underlying socket error reported by the OS.
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    /// XML document could not be validated against the model schema.
    #[error("parsing error: {0}")]
    Parsing(String),

    /// Controller-reported logical error. Reserved: the controller rarely returns one.
    #[error("command error: {0}")]
    Command(String),
}

impl OmniError {
    pub fn validation(msg: impl Into<String>) -> Self {
        OmniError::Validation(msg.into())
    }

    pub fn timeout(context: impl Into<String>) -> Self {
        OmniError::Timeout { context: context.into() }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        OmniError::MalformedMessage(msg.into())
    }

    pub fn fragmentation(msg: impl Into<String>) -> Self {
        OmniError::Fragmentation(msg.into())
    }

    pub fn parsing(msg: impl Into<String>) -> Self {
        OmniError::Parsing(msg.into())
    }
}

impl From<roxmltree::Error> for OmniError {
    fn from(e: roxmltree::Error) -> Self {
        OmniError::Parsing(e.to_string())
    }
}
