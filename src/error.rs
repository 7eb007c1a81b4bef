//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level pin errors
//!
//! Writes that land outside the chain (a position past the last display, a
//! pixel beyond the last column) are clipped and are not errors.
//!
//! ## Example
//!
//! ```
//! use pixie::{Builder, BuilderError};
//!
//! // Missing display count
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDisplayCount)));
//!
//! // Empty chain
//! let result = Builder::new().displays(0).build();
//! assert!(result.is_err());
//! ```

use crate::interface::PixieInterface;

/// Maximum number of displays addressable by the driver
///
/// Positions are `u8`, so a chain can hold at most 255 displays.
pub const MAX_DISPLAYS: u8 = u8::MAX;

/// Errors that can occur when driving the chain
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: PixieInterface> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the [`PixieInterface`] implementation.
    Interface(I::Error),
    /// Buffer is too small for the chain
    ///
    /// The provided buffer must be at least `config.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// A value could not be formatted as text
    Format,
}

impl<I: PixieInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::Format => write!(f, "Formatting failed"),
        }
    }
}

impl<I: PixieInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Display count was not specified
    ///
    /// [`Builder::displays()`](crate::config::Builder::displays) must be called before building.
    MissingDisplayCount,
    /// Invalid display count
    InvalidDisplayCount {
        /// Number of displays requested
        count: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDisplayCount => write!(f, "Display count must be specified"),
            Self::InvalidDisplayCount { count } => write!(
                f,
                "Invalid display count {count} (must be 1..={MAX_DISPLAYS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
