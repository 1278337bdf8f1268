//! Save/load persistence with integrity verification
//!
//! Features:
//! - Bit-exact binary encoding for rollback hosts
//! - BLAKE3 state digest (equal digest == bit-identical state)
//! - Versioned JSON envelope for human-readable saves

pub mod envelope;
pub mod rollback;

pub use envelope::{SaveEnvelope, load_json, save_json};
pub use rollback::{decode_rollback, encode_rollback, state_digest};

use thiserror::Error;

/// Errors raised while restoring saved state
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Not a ball pit snapshot")]
    BadMagic,

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Snapshot truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("Snapshot has {0} unexpected trailing bytes")]
    TrailingBytes(usize),

    #[error("Snapshot digest mismatch")]
    DigestMismatch,

    #[error("State contains non-finite values and cannot be saved as JSON")]
    NonFinite,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
