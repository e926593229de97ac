//! Persistence for the high score table
//!
//! Features:
//! - Length-prefixed binary records (7-bit encoded string lengths)
//! - Literal signature header for validation
//! - Atomic writes (tmp file then rename)
//! - Corruption detection; callers regenerate defaults on error

pub mod atomic;
pub mod codec;
pub mod highscore_file;

use thiserror::Error;

pub use atomic::write_bytes_atomic;
pub use codec::{BinaryReader, BinaryWriter};
pub use highscore_file::{HIGH_SCORE_SIGNATURE, decode_table, encode_table};

/// Errors raised while reading or writing persisted data
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid high score file (signature {found:?})")]
    BadSignature { found: String },
    #[error("unexpected end of data at byte {offset}")]
    Truncated { offset: usize },
    #[error("string is not valid utf-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("string length prefix is malformed")]
    LengthOverflow,
}
