//! Outbound-message capability.
//!
//! Transport is an external collaborator: the façades only need "send this
//! message to these addresses". Implementations decide how (SMTP bridge,
//! queue, test double). [`LogMailer`] is the built-in development sink.

use log::info;
use thiserror::Error;

/// Delivery failure reported by a [`Mailer`] implementation.
#[derive(Debug, Error)]
#[error("delivery to {recipients} failed: {reason}")]
pub struct MailerError {
    pub recipients: String,
    pub reason: String,
}

/// The send-message capability consumed by the façade layer.
pub trait Mailer {
    fn deliver(&mut self, to: &[String], subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Logs every message instead of sending it. Never fails.
#[derive(Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn deliver(&mut self, to: &[String], subject: &str, body: &str) -> Result<(), MailerError> {
        info!(
            "mail to {}: {subject} ({} chars)",
            to.join(", "),
            body.len()
        );
        Ok(())
    }
}
