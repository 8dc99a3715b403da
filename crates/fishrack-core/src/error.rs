//! Application error types with rich context

use thiserror::Error;

use crate::types::{TankId, TankSize};

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Grid Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid position format '{label}'. Use format like A1, B2, etc.")]
    InvalidPositionFormat { label: String },

    #[error("Position {label} is outside grid boundaries")]
    OutOfBounds { label: String },

    #[error("Tanks of different sizes cannot be swapped")]
    SizeMismatch { size: TankSize, target_size: TankSize },

    #[error("No tank at target position {label}")]
    NoTankAtTargetPosition { label: String },

    #[error("Tank {id} has no position on the grid")]
    TankNotPlaced { id: TankId },

    #[error("{message}")]
    Validation { field: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Remote Service Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Authentication failed{}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    AuthFailure { status: Option<u16> },

    #[error("Unexpected response from server: {message}")]
    UnexpectedResponse { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_position(label: impl Into<String>) -> Self {
        Self::InvalidPositionFormat {
            label: label.into(),
        }
    }

    pub fn out_of_bounds(label: impl Into<String>) -> Self {
        Self::OutOfBounds {
            label: label.into(),
        }
    }

    pub fn no_tank_at(label: impl Into<String>) -> Self {
        Self::NoTankAtTargetPosition {
            label: label.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Authentication failures are intercepted at the application level
    /// to force re-authentication; callers must not retry them.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Error::AuthFailure { .. })
    }

    /// Errors raised locally before any request was issued.
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            Error::InvalidPositionFormat { .. }
                | Error::OutOfBounds { .. }
                | Error::SizeMismatch { .. }
                | Error::NoTankAtTargetPosition { .. }
                | Error::TankNotPlaced { .. }
                | Error::Validation { .. }
        )
    }

    /// Message shown to the user for a failed operation.
    ///
    /// The server's message is preferred verbatim. Local rejections carry
    /// their own text. Everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            e if e.is_local_rejection() => e.to_string(),
            Error::AuthFailure { .. } => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
