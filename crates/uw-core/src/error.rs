//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `UwError` as one variant
//! via `#[from]`, so configuration mistakes detected here surface unchanged.

use thiserror::Error;

/// The top-level error type for `uw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum UwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `uw-*` crates.
pub type UwResult<T> = Result<T, UwError>;
