//! Unified error type for the fortune bot.
//!
//! Expected outcomes of the queue (duplicate text, unknown ids, bad input) are
//! ordinary variants so the command layer can turn them into replies. An empty
//! rotation is not an error at all: `select_next` returns `Ok(None)`.

use thiserror::Error;

/// Every failure the bot can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// The text already exists as a fortune or as a pending submission.
    #[error("Fortune already exists: \"{text}\"")]
    Duplicate {
        /// The rejected text
        text: String,
    },

    /// No pending submission with this id.
    #[error("Submission #{id} not found or already resolved")]
    SubmissionNotFound {
        /// Submission id that was referenced
        id: i64,
    },

    /// No fortune with this id, or the fortune is not eligible for the operation.
    #[error("Fortune #{id} not found")]
    FortuneNotFound {
        /// Storage id that was referenced
        id: i64,
    },

    /// User supplied input that cannot be stored.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong
        message: String,
    },

    /// Settings or seed files could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
    },

    /// Database failure; the triggering request is aborted without partial writes.
    #[error("Database error: {0}")]
    Database(String),

    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// JSON encoding failure during export.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// True for outcomes caused by the request itself rather than by the system.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Duplicate { .. }
                | Self::SubmissionNotFound { .. }
                | Self::FortuneNotFound { .. }
                | Self::InvalidInput { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_classification() {
        assert!(
            Error::Duplicate {
                text: "x".to_string()
            }
            .is_user_facing()
        );
        assert!(Error::SubmissionNotFound { id: 3 }.is_user_facing());
        assert!(!Error::Database("disk full".to_string()).is_user_facing());
        assert!(
            !Error::Config {
                message: "bad".to_string()
            }
            .is_user_facing()
        );
    }

    #[test]
    fn test_db_error_conversion() {
        let err: Error = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, Error::Database(ref msg) if msg.contains("boom")));
    }
}
