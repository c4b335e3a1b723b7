//! Error types for keyline.

use std::collections::TryReserveError;
use std::fmt;
use std::io;

/// Errors produced by the keyline command layer.
#[derive(Debug, thiserror::Error)]
pub enum KeylineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("already registered: {0}")]
    AlreadyRegistered(String),

    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("output error: {0}")]
    Output(#[from] fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KeylineError>;
