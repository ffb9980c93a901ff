//! Error types for sstview.
//!
//! This module provides a unified error handling approach using `thiserror`.

use thiserror::Error;

/// Result type alias for sstview operations.
pub type Result<T> = std::result::Result<T, SstError>;

/// Errors that can occur while loading, slicing or rendering a dataset.
#[derive(Debug, Error)]
pub enum SstError {
    /// A local path was given but nothing exists there.
    #[error("Source not found: {path}")]
    SourceNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// The NetCDF library could not open the source.
    #[error("Failed to open {source_name}: {message}")]
    Open {
        /// URL or path that was opened.
        source_name: String,
        /// Message reported by the NetCDF library.
        message: String,
    },

    /// Failed to read NetCDF data.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// A named variable does not exist in the dataset.
    #[error("Variable not found: {name}")]
    VariableNotFound {
        /// Variable name.
        name: String,
    },

    /// A variable is not shaped the way slicing expects.
    #[error("Unexpected layout for '{variable}': {reason}")]
    Layout {
        /// Variable name.
        variable: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Time index is past the end of the time dimension.
    #[error("Time index {index} out of range (time dimension has {len} steps)")]
    TimeIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the time dimension.
        len: usize,
    },

    /// A month string or year/month pair could not be converted to an index.
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Color scale bounds are unusable.
    #[error("Invalid color scale: vmin={vmin}, vmax={vmax}")]
    InvalidColorScale {
        /// Lower bound.
        vmin: f64,
        /// Upper bound.
        vmax: f64,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl SstError {
    /// Create an Open error.
    pub fn open(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Open {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a VariableNotFound error.
    pub fn variable_not_found(name: impl Into<String>) -> Self {
        Self::VariableNotFound { name: name.into() }
    }

    /// Create a Layout error.
    pub fn layout(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Layout {
            variable: variable.into(),
            reason: reason.into(),
        }
    }
}

impl From<netcdf::Error> for SstError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
