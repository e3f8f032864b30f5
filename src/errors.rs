/*!
 * Error types for the cueplay engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::player::PlayerState;
use crate::subtitle_model::{SubtitleFormat, SubtitleProtocol};

/// Errors that can occur when fetching subtitle text from a source
#[derive(Error, Debug)]
pub enum FetchError {
    /// Error when the source URL cannot be parsed
    #[error("Invalid subtitle URL: {0}")]
    InvalidUrl(String),

    /// Error when the request itself fails
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the source itself
    #[error("Source responded with {status_code}: {message}")]
    SourceError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the source
        message: String,
    },
}

/// Errors that can occur while loading a subtitle track
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The declared format is not one of the parseable dialects
    #[error("Subtitle format {0} is not supported")]
    UnsupportedFormat(SubtitleFormat),

    /// The delivery protocol is not direct-text
    #[error("Subtitle protocol {0} is not supported")]
    UnsupportedProtocol(SubtitleProtocol),

    /// Error from the fetch collaborator, surfaced unchanged
    #[error("Failed to fetch subtitle: {0}")]
    FetchFailed(#[from] FetchError),
}

/// Errors reported by a media transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// A transport operation was rejected or failed
    #[error("{operation} failed: {message}")]
    OperationFailed {
        /// The operation that failed
        operation: &'static str,
        /// Error message from the transport
        message: String,
    },
}

impl TransportError {
    pub fn failed(operation: &'static str, message: impl Into<String>) -> Self {
        TransportError::OperationFailed {
            operation,
            message: message.into(),
        }
    }
}

/// Errors that can occur when driving the playback state machine
#[derive(Error, Debug)]
pub enum PlayerError {
    /// The requested lifecycle action is illegal in the current state
    #[error("Cannot {action} while the player is {state}")]
    InvalidOperation {
        /// The rejected action
        action: &'static str,
        /// The state the player was in
        state: PlayerState,
    },

    /// Error from the transport
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] TransportError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle loading
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from playback control
    #[error("Playback error: {0}")]
    Playback(#[from] PlayerError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
