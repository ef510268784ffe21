//! Staff façade: publication management for a signed-in staff member.

use deptrec_core::types::Publication;
use deptrec_core::Store;

use crate::error::ControlError;

/// A logged-in staff member acting on their own publications.
pub struct StaffSession<'a> {
    store: &'a mut Store,
    email: String,
}

impl std::fmt::Debug for StaffSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffSession")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl<'a> StaffSession<'a> {
    /// Credential scan over the store's staff list.
    pub fn login(
        store: &'a mut Store,
        email: &str,
        password: &str,
    ) -> Result<Self, ControlError> {
        if store.find_staff_by_credentials(email, password).is_none() {
            return Err(ControlError::BadCredentials(email.to_owned()));
        }
        Ok(Self {
            store,
            email: email.to_owned(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Register a publication authored by the signed-in member.
    pub fn publish(&mut self, publication: Publication) -> Result<(), ControlError> {
        if publication.staff_email != self.email {
            return Err(ControlError::NotAuthor(publication.id.to_string()));
        }
        Ok(self.store.add_publication(publication)?)
    }

    /// Withdraw one of the member's own publications.
    pub fn withdraw(&mut self, publication: &Publication) -> Result<(), ControlError> {
        if publication.staff_email != self.email {
            return Err(ControlError::NotAuthor(publication.id.to_string()));
        }
        Ok(self.store.remove_publication(publication)?)
    }

    /// The member's derived publication list.
    pub fn my_publications(&self) -> Vec<&Publication> {
        self.store.publications_of(&self.email)
    }
}
