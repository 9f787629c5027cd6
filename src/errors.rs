//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AfterimageError`] covers the failure modes that can
//! occur while a stage is being set up:
//! - Configuration validation
//! - Asset loading and decoding
//! - Session storage access
//!
//! Per-frame operations (sampling, ghost binding, transport polling, music
//! events) never return errors. They log and degrade instead.
//!
//! # Usage
//!
//! ```rust,ignore
//! use afterimage::errors::Result;
//!
//! fn load_config(text: &str) -> Result<StageConfig> {
//!     StageConfig::from_json(text)
//! }
//! ```

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum AfterimageError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A configuration value is outside of its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// Data URI parsing error.
    #[error("Data URI error: {0}")]
    DataUriError(String),

    /// Base64 decoding error.
    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    // ========================================================================
    // I/O & Storage Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Key-value storage backend rejected an operation.
    #[error("Storage error: {0}")]
    StorageError(String),

    // ========================================================================
    // Platform-Specific Errors
    // ========================================================================
    /// WASM-specific error.
    #[cfg(target_arch = "wasm32")]
    #[error("WASM error: {0}")]
    WasmError(String),
}

impl From<image::ImageError> for AfterimageError {
    fn from(err: image::ImageError) -> Self {
        AfterimageError::ImageDecodeError(err.to_string())
    }
}

/// Alias for `Result<T, AfterimageError>`.
pub type Result<T> = std::result::Result<T, AfterimageError>;
