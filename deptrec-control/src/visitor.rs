//! Visitor requests: public publication search and contact messages.
//!
//! Read-only over the store; outbound messages go through the [`Mailer`]
//! capability.

use deptrec_core::types::Publication;
use deptrec_core::{Store, StoreError};

use crate::error::ControlError;
use crate::mailer::Mailer;

/// Linear scan for the publication with the given title.
pub fn search_by_title<'a>(store: &'a Store, title: &str) -> Result<&'a Publication, ControlError> {
    store
        .publication_by_title(title)
        .ok_or_else(|| ControlError::NoMatch(title.to_owned()))
}

/// Linear scan for all publications naming `author`.
pub fn search_by_author<'a>(
    store: &'a Store,
    author: &str,
) -> Result<Vec<&'a Publication>, ControlError> {
    let matches = store.publications_by_author(author);
    if matches.is_empty() {
        return Err(ControlError::NoMatch(author.to_owned()));
    }
    Ok(matches)
}

/// Mail a copy request for `publication` to its authoring staff member.
pub fn request_publication(
    publication: &Publication,
    requester_name: &str,
    requester_email: &str,
    message: &str,
    mailer: &mut dyn Mailer,
) -> Result<(), ControlError> {
    let body = format!(
        "{requester_name}\n\n{requester_email}\n\n{}\n\n{message}",
        publication.title
    );
    mailer.deliver(
        &[publication.staff_email.clone()],
        "Publication request",
        &body,
    )?;
    Ok(())
}

/// Mail a support request to the department administrator.
pub fn request_support(
    store: &Store,
    requester_name: &str,
    requester_email: &str,
    message: &str,
    mailer: &mut dyn Mailer,
) -> Result<(), ControlError> {
    let admin = store
        .admin()
        .ok_or_else(|| StoreError::NotFound("system administrator".to_owned()))?;
    let body = format!("{requester_name}\n\n{requester_email}\n\n{message}");
    mailer.deliver(&[admin.email.clone()], "Support request", &body)?;
    Ok(())
}
