//! Error types for deptrec-control.

use thiserror::Error;

use deptrec_core::StoreError;

use crate::mailer::MailerError;

/// All errors that can arise from the façade layer.
#[derive(Debug, Error)]
pub enum ControlError {
    /// An error from the record store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Login attempt with credentials the store does not recognise.
    #[error("invalid credentials for {0}")]
    BadCredentials(String),

    /// A coordinator-only session was requested by a non-coordinator.
    #[error("{0} is not a seminar coordinator")]
    NotCoordinator(String),

    /// A staff session tried to manage a publication it does not author.
    #[error("publication {0} is not authored by the signed-in staff member")]
    NotAuthor(String),

    /// A search scan matched nothing.
    #[error("no search result for {0:?}")]
    NoMatch(String),

    /// The seminar is not listed, or its date has already passed.
    #[error("seminar {topic:?} cannot be announced: {reason}")]
    NotAnnounceable { topic: String, reason: String },

    /// Outbound message delivery failed.
    #[error("mail error: {0}")]
    Mail(#[from] MailerError),
}
