//! Per-role façades over the department record store.
//!
//! Each session type validates a credential, then forwards to the store,
//! which owns all mutation, persistence, and notification. Outbound
//! messages (seminar announcements, publication/support requests) go
//! through the [`Mailer`] capability; transport is an external
//! collaborator.

pub mod admin;
pub mod coordinator;
pub mod error;
pub mod mailer;
pub mod staff;
pub mod visitor;

pub use admin::AdminSession;
pub use coordinator::CoordinatorSession;
pub use error::ControlError;
pub use mailer::{LogMailer, Mailer, MailerError};
pub use staff::StaffSession;
