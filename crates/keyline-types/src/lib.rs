//! Foundation types for keyline.
//!
//! This crate contains the types shared by all keyline crates: key-code
//! constants, the command-layer configuration, and the error type.

pub mod config;
pub mod error;
pub mod key;
