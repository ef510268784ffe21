//! Administrator façade.
//!
//! Every method is a thin pass-through: the store validates, mutates,
//! persists, and broadcasts; this layer only gates the operations behind
//! an administrator login.

use deptrec_core::types::{
    AcademicStaff, GroupId, ResearchGroup, ResearchStudent, SystemAdmin,
};
use deptrec_core::Store;
use log::info;

use crate::error::ControlError;

/// A logged-in administrator acting on the store.
pub struct AdminSession<'a> {
    store: &'a mut Store,
}

impl std::fmt::Debug for AdminSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession").finish_non_exhaustive()
    }
}

impl<'a> AdminSession<'a> {
    /// Check `email`/`password` against the administrator record.
    pub fn login(
        store: &'a mut Store,
        email: &str,
        password: &str,
    ) -> Result<Self, ControlError> {
        let recognised = store
            .admin()
            .is_some_and(|a| a.email == email && a.password == password);
        if !recognised {
            return Err(ControlError::BadCredentials(email.to_owned()));
        }
        info!("administrator {email} logged in");
        Ok(Self { store })
    }

    /// Replace the administrator record (the singleton is never removed).
    pub fn replace_admin(&mut self, admin: SystemAdmin) -> Result<(), ControlError> {
        Ok(self.store.set_system_admin(admin)?)
    }

    pub fn register_research_group(&mut self, group: ResearchGroup) -> Result<(), ControlError> {
        Ok(self.store.add_research_group(group)?)
    }

    pub fn remove_research_group(&mut self, group: &ResearchGroup) -> Result<(), ControlError> {
        Ok(self.store.remove_research_group(group)?)
    }

    pub fn rename_research_group(&mut self, id: GroupId, name: &str) -> Result<(), ControlError> {
        Ok(self.store.rename_research_group(id, name)?)
    }

    pub fn register_staff_member(&mut self, staff: AcademicStaff) -> Result<(), ControlError> {
        Ok(self.store.add_academic_staff(staff)?)
    }

    pub fn remove_staff_member(&mut self, staff: &AcademicStaff) -> Result<(), ControlError> {
        Ok(self.store.remove_academic_staff(staff)?)
    }

    pub fn edit_staff_details(
        &mut self,
        current: &AcademicStaff,
        name: &str,
        title: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ControlError> {
        Ok(self
            .store
            .update_staff_details(current, name, title, email, password)?)
    }

    pub fn register_research_student(
        &mut self,
        student: ResearchStudent,
    ) -> Result<(), ControlError> {
        Ok(self.store.add_research_student(student)?)
    }

    pub fn remove_research_student(
        &mut self,
        student: &ResearchStudent,
    ) -> Result<(), ControlError> {
        Ok(self.store.remove_research_student(student)?)
    }

    pub fn edit_student_details(
        &mut self,
        current: &ResearchStudent,
        name: &str,
        title: &str,
        email: &str,
        student_id: &str,
    ) -> Result<(), ControlError> {
        Ok(self
            .store
            .update_student_details(current, name, title, email, student_id)?)
    }

    pub fn appoint_seminar_coordinator(
        &mut self,
        group_id: GroupId,
        email: &str,
    ) -> Result<(), ControlError> {
        Ok(self.store.set_seminar_coordinator(group_id, email)?)
    }
}
