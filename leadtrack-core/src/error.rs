/// Structured error types for leadtrack-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (leadtrack-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.
use thiserror::Error;

/// Main error type for leadtrack-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration error (missing or malformed environment variable)
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Required environment variable is not set
    #[error("Missing required environment variable '{name}'")]
    MissingEnv { name: &'static str },

    /// Token could not be signed
    #[error("Failed to sign token: {source}")]
    TokenSign { source: jsonwebtoken::errors::Error },

    /// Token failed signature or expiry validation
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Password could not be hashed
    #[error("Failed to hash password")]
    PasswordHash,

    /// Stored password hash is not a valid PHC string
    #[error("Stored password hash is malformed")]
    MalformedPasswordHash,
}

/// Result type alias for leadtrack-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
