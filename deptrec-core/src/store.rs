//! The authoritative in-memory record store.
//!
//! The store is the sole mutation surface: every operation validates its
//! preconditions, mutates in place, persists the full document, and then
//! broadcasts to subscribers. A failed validation leaves the graph
//! untouched. A failed save leaves the mutation applied and reports the
//! distinct [`StoreError::Unsaved`] condition, recoverable by calling
//! [`Store::save`] again.
//!
//! Membership and authorship are single-sourced: members live only in the
//! flat staff/student lists (each carrying a `group_id` back-reference)
//! and publications only in the global list (carrying a `staff_email`
//! back-reference). `members_of` and `publications_of` derive the nested
//! views by linear scan.
//!
//! Single-threaded by design: operations are check-then-act and a
//! multi-threaded host must wrap the whole store in one mutual-exclusion
//! region.

use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info};

use crate::document;
use crate::error::StoreError;
use crate::observer::{ObserverHub, UpdateFn};
use crate::types::{
    AcademicStaff, GroupId, GroupMember, Publication, ResearchGroup, ResearchStudent, Seminar,
    SubscriberId, SystemAdmin,
};

/// Ceiling on the number of research groups per department.
pub const MAX_GROUPS: usize = 10;

/// The department record store.
pub struct Store {
    path: PathBuf,
    admin: Option<SystemAdmin>,
    groups: Vec<ResearchGroup>,
    staff: Vec<AcademicStaff>,
    students: Vec<ResearchStudent>,
    publications: Vec<Publication>,
    hub: ObserverHub,
}

impl Store {
    /// An empty store persisting to `path`. Nothing is written until the
    /// first mutation (or an explicit [`Store::save`]).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            admin: None,
            groups: Vec::new(),
            staff: Vec::new(),
            students: Vec::new(),
            publications: Vec::new(),
            hub: ObserverHub::new(),
        }
    }

    /// Startup entry point: an empty store, repopulated from `path` when a
    /// document already exists there.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        if store.path.exists() {
            store.reload()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Accessors: read-only snapshots; mutation goes through the operations
    // -----------------------------------------------------------------------

    pub fn admin(&self) -> Option<&SystemAdmin> {
        self.admin.as_ref()
    }

    pub fn groups(&self) -> &[ResearchGroup] {
        &self.groups
    }

    pub fn staff(&self) -> &[AcademicStaff] {
        &self.staff
    }

    pub fn students(&self) -> &[ResearchStudent] {
        &self.students
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn group(&self, id: GroupId) -> Option<&ResearchGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Derived membership view: the group's staff (flat-list order), then
    /// its students.
    pub fn members_of(&self, id: GroupId) -> Vec<GroupMember> {
        let mut members: Vec<GroupMember> = self
            .staff
            .iter()
            .filter(|s| s.group_id == id)
            .cloned()
            .map(GroupMember::Staff)
            .collect();
        members.extend(
            self.students
                .iter()
                .filter(|s| s.group_id == id)
                .cloned()
                .map(GroupMember::Student),
        );
        members
    }

    /// Derived authorship view: publications whose `staff_email` names the
    /// given staff member, in global-list order.
    pub fn publications_of(&self, staff_email: &str) -> Vec<&Publication> {
        self.publications
            .iter()
            .filter(|p| p.staff_email == staff_email)
            .collect()
    }

    /// Linear credential scan consumed by login collaborators; the store
    /// itself has no authentication logic.
    pub fn find_staff_by_credentials(&self, email: &str, password: &str) -> Option<&AcademicStaff> {
        self.staff
            .iter()
            .find(|s| s.email == email && s.password == password)
    }

    pub fn find_student_by_credentials(
        &self,
        email: &str,
        student_id: &str,
    ) -> Option<&ResearchStudent> {
        self.students
            .iter()
            .find(|s| s.email == email && s.student_id == student_id)
    }

    pub fn publication_by_title(&self, title: &str) -> Option<&Publication> {
        self.publications.iter().find(|p| p.title == title)
    }

    pub fn publications_by_author(&self, author: &str) -> Vec<&Publication> {
        self.publications
            .iter()
            .filter(|p| p.authors.iter().any(|a| a == author))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Administrator
    // -----------------------------------------------------------------------

    /// Assign (or replace) the administrator record.
    pub fn set_system_admin(&mut self, admin: SystemAdmin) -> Result<(), StoreError> {
        self.install_admin(admin);
        self.commit()
    }

    pub(crate) fn install_admin(&mut self, admin: SystemAdmin) {
        self.admin = Some(admin);
    }

    // -----------------------------------------------------------------------
    // Research groups
    // -----------------------------------------------------------------------

    pub fn add_research_group(&mut self, group: ResearchGroup) -> Result<(), StoreError> {
        self.insert_research_group(group)?;
        self.commit()
    }

    pub(crate) fn insert_research_group(&mut self, group: ResearchGroup) -> Result<(), StoreError> {
        if self.groups.iter().any(|g| g.id == group.id) {
            return Err(StoreError::Duplicate(format!("research group {}", group.id)));
        }
        if self.groups.len() == MAX_GROUPS {
            return Err(StoreError::CapacityExceeded(MAX_GROUPS));
        }
        debug!("registering research group {} ({})", group.id, group.name);
        self.groups.push(group);
        Ok(())
    }

    /// Remove a group and its owned seminars. Members stay in the flat
    /// lists; their `group_id` dangles until they are reassigned.
    pub fn remove_research_group(&mut self, group: &ResearchGroup) -> Result<(), StoreError> {
        let Some(idx) = self.groups.iter().position(|g| g.id == group.id) else {
            return Err(StoreError::NotFound(format!("research group {}", group.id)));
        };
        self.groups.remove(idx);
        self.commit()
    }

    /// The group id is immutable; only the name can change.
    pub fn rename_research_group(&mut self, id: GroupId, name: &str) -> Result<(), StoreError> {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == id) else {
            return Err(StoreError::NotFound(format!("research group {id}")));
        };
        group.name = name.to_owned();
        self.commit()
    }

    // -----------------------------------------------------------------------
    // Members
    // -----------------------------------------------------------------------

    pub fn add_academic_staff(&mut self, staff: AcademicStaff) -> Result<(), StoreError> {
        self.insert_academic_staff(staff)?;
        self.commit()
    }

    pub(crate) fn insert_academic_staff(&mut self, staff: AcademicStaff) -> Result<(), StoreError> {
        if !self.groups.iter().any(|g| g.id == staff.group_id) {
            return Err(StoreError::NotFound(format!("research group {}", staff.group_id)));
        }
        if self.staff.iter().any(|s| s.same_identity(&staff)) {
            return Err(StoreError::Duplicate(format!("staff member {}", staff.email)));
        }
        if self.group_has_member_email(staff.group_id, &staff.email) {
            return Err(StoreError::Duplicate(format!(
                "member {} in group {}",
                staff.email, staff.group_id
            )));
        }
        self.staff.push(staff);
        Ok(())
    }

    /// Remove a staff member. If they coordinate their group's seminars,
    /// the group's coordinator reference is cleared with them.
    pub fn remove_academic_staff(&mut self, staff: &AcademicStaff) -> Result<(), StoreError> {
        let Some(idx) = self.staff.iter().position(|s| s.same_identity(staff)) else {
            return Err(StoreError::NotFound(format!("staff member {}", staff.email)));
        };
        let removed = self.staff.remove(idx);
        if let Some(group) = self.groups.iter_mut().find(|g| g.id == removed.group_id) {
            if group.seminar_coordinator.as_deref() == Some(removed.email.as_str()) {
                group.seminar_coordinator = None;
            }
        }
        self.commit()
    }

    /// Replace a staff member's details. An email change is cascaded to
    /// the coordinator back-reference and to the member's publications so
    /// the derived views stay intact.
    pub fn update_staff_details(
        &mut self,
        current: &AcademicStaff,
        name: &str,
        title: &str,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        let Some(idx) = self.staff.iter().position(|s| s.same_identity(current)) else {
            return Err(StoreError::NotFound(format!("staff member {}", current.email)));
        };
        let old_email = self.staff[idx].email.clone();
        if old_email != email {
            for publication in &mut self.publications {
                if publication.staff_email == old_email {
                    publication.staff_email = email.to_owned();
                }
            }
            let group_id = self.staff[idx].group_id;
            if let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) {
                if group.seminar_coordinator.as_deref() == Some(old_email.as_str()) {
                    group.seminar_coordinator = Some(email.to_owned());
                }
            }
        }
        let staff = &mut self.staff[idx];
        staff.name = name.to_owned();
        staff.title = title.to_owned();
        staff.email = email.to_owned();
        staff.password = password.to_owned();
        self.commit()
    }

    pub fn add_research_student(&mut self, student: ResearchStudent) -> Result<(), StoreError> {
        self.insert_research_student(student)?;
        self.commit()
    }

    pub(crate) fn insert_research_student(
        &mut self,
        student: ResearchStudent,
    ) -> Result<(), StoreError> {
        if !self.groups.iter().any(|g| g.id == student.group_id) {
            return Err(StoreError::NotFound(format!("research group {}", student.group_id)));
        }
        if self.students.iter().any(|s| s.same_identity(&student)) {
            return Err(StoreError::Duplicate(format!("research student {}", student.email)));
        }
        if self.group_has_member_email(student.group_id, &student.email) {
            return Err(StoreError::Duplicate(format!(
                "member {} in group {}",
                student.email, student.group_id
            )));
        }
        self.students.push(student);
        Ok(())
    }

    pub fn remove_research_student(&mut self, student: &ResearchStudent) -> Result<(), StoreError> {
        let Some(idx) = self.students.iter().position(|s| s.same_identity(student)) else {
            return Err(StoreError::NotFound(format!("research student {}", student.email)));
        };
        self.students.remove(idx);
        self.commit()
    }

    pub fn update_student_details(
        &mut self,
        current: &ResearchStudent,
        name: &str,
        title: &str,
        email: &str,
        student_id: &str,
    ) -> Result<(), StoreError> {
        let Some(student) = self.students.iter_mut().find(|s| s.same_identity(current)) else {
            return Err(StoreError::NotFound(format!("research student {}", current.email)));
        };
        student.name = name.to_owned();
        student.title = title.to_owned();
        student.email = email.to_owned();
        student.student_id = student_id.to_owned();
        self.commit()
    }

    fn group_has_member_email(&self, group_id: GroupId, email: &str) -> bool {
        self.staff
            .iter()
            .any(|s| s.group_id == group_id && s.email == email)
            || self
                .students
                .iter()
                .any(|s| s.group_id == group_id && s.email == email)
    }

    // -----------------------------------------------------------------------
    // Publications
    // -----------------------------------------------------------------------

    pub fn add_publication(&mut self, publication: Publication) -> Result<(), StoreError> {
        self.insert_publication(publication)?;
        self.commit()
    }

    pub(crate) fn insert_publication(&mut self, publication: Publication) -> Result<(), StoreError> {
        if !self.staff.iter().any(|s| s.email == publication.staff_email) {
            return Err(StoreError::NotFound(format!(
                "staff member {}",
                publication.staff_email
            )));
        }
        if !self.groups.iter().any(|g| g.id == publication.group_id) {
            return Err(StoreError::NotFound(format!("research group {}", publication.group_id)));
        }
        if let Some(existing) = self
            .publications
            .iter()
            .find(|p| p.collides_with(&publication))
        {
            return Err(StoreError::Duplicate(format!(
                "publication with id {} or title {:?}",
                existing.id, existing.title
            )));
        }
        debug!("registering publication {} ({:?})", publication.id, publication.title);
        self.publications.push(publication);
        Ok(())
    }

    pub fn remove_publication(&mut self, publication: &Publication) -> Result<(), StoreError> {
        let Some(idx) = self
            .publications
            .iter()
            .position(|p| p.same_identity(publication))
        else {
            return Err(StoreError::NotFound(format!("publication {}", publication.id)));
        };
        self.publications.remove(idx);
        self.commit()
    }

    // -----------------------------------------------------------------------
    // Seminars and coordinators
    // -----------------------------------------------------------------------

    /// Appoint `email` as the group's seminar coordinator. Supersedes any
    /// previous holder: their flag is cleared, the new holder's set.
    pub fn set_seminar_coordinator(
        &mut self,
        group_id: GroupId,
        email: &str,
    ) -> Result<(), StoreError> {
        let Some(group_idx) = self.groups.iter().position(|g| g.id == group_id) else {
            return Err(StoreError::NotFound(format!("research group {group_id}")));
        };
        let Some(staff_idx) = self
            .staff
            .iter()
            .position(|s| s.group_id == group_id && s.email == email)
        else {
            return Err(StoreError::NotFound(format!(
                "staff member {email} in group {group_id}"
            )));
        };
        if let Some(previous) = self.groups[group_idx].seminar_coordinator.take() {
            if previous != email {
                if let Some(prev) = self
                    .staff
                    .iter_mut()
                    .find(|s| s.group_id == group_id && s.email == previous)
                {
                    prev.coordinator = false;
                }
            }
        }
        self.staff[staff_idx].coordinator = true;
        self.groups[group_idx].seminar_coordinator = Some(email.to_owned());
        self.commit()
    }

    /// Schedule a seminar. The date-time must be strictly in the future;
    /// only the load path records past seminars (as history).
    pub fn schedule_seminar(&mut self, seminar: Seminar) -> Result<(), StoreError> {
        if seminar.date_time <= Local::now().naive_local() {
            return Err(StoreError::DatePassed(seminar.date_time));
        }
        self.insert_seminar(seminar)?;
        self.commit()
    }

    /// Insert without the future-date check: the exemption for seminars
    /// reconstructed from the persisted document.
    pub(crate) fn insert_seminar(&mut self, seminar: Seminar) -> Result<(), StoreError> {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == seminar.group_id) else {
            return Err(StoreError::NotFound(format!("research group {}", seminar.group_id)));
        };
        if group.seminars.iter().any(|s| s.same_identity(&seminar)) {
            return Err(StoreError::Duplicate(format!("seminar {:?}", seminar.topic)));
        }
        group.seminars.push(seminar);
        Ok(())
    }

    pub fn remove_seminar(&mut self, seminar: &Seminar) -> Result<(), StoreError> {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == seminar.group_id) else {
            return Err(StoreError::NotFound(format!("research group {}", seminar.group_id)));
        };
        let Some(idx) = group.seminars.iter().position(|s| s.same_identity(seminar)) else {
            return Err(StoreError::NotFound(format!("seminar {:?}", seminar.topic)));
        };
        group.seminars.remove(idx);
        self.commit()
    }

    /// Replace a listed seminar's details. The new date-time is validated
    /// like a fresh scheduling.
    pub fn reschedule_seminar(
        &mut self,
        seminar: &Seminar,
        updated: Seminar,
    ) -> Result<(), StoreError> {
        if updated.date_time <= Local::now().naive_local() {
            return Err(StoreError::DatePassed(updated.date_time));
        }
        let Some(group) = self.groups.iter_mut().find(|g| g.id == seminar.group_id) else {
            return Err(StoreError::NotFound(format!("research group {}", seminar.group_id)));
        };
        let Some(idx) = group.seminars.iter().position(|s| s.same_identity(seminar)) else {
            return Err(StoreError::NotFound(format!("seminar {:?}", seminar.topic)));
        };
        if !updated.same_identity(seminar)
            && group.seminars.iter().any(|s| s.same_identity(&updated))
        {
            return Err(StoreError::Duplicate(format!("seminar {:?}", updated.topic)));
        }
        let mut updated = updated;
        updated.group_id = seminar.group_id;
        group.seminars[idx] = updated;
        self.commit()
    }

    pub(crate) fn link_coordinator(&mut self, group_id: GroupId, email: &str) -> bool {
        let resolvable = self
            .staff
            .iter()
            .any(|s| s.group_id == group_id && s.email == email);
        if !resolvable {
            return false;
        }
        if let Some(staff) = self
            .staff
            .iter_mut()
            .find(|s| s.group_id == group_id && s.email == email)
        {
            staff.coordinator = true;
        }
        if let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) {
            group.seminar_coordinator = Some(email.to_owned());
        }
        true
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Write the full document to the configured path (atomic `.tmp` +
    /// rename). Also the retry entry point after an `Unsaved` error.
    pub fn save(&self) -> Result<(), StoreError> {
        document::save_at(self, &self.path)
    }

    /// Clear all collections, then repopulate from the configured path.
    ///
    /// A malformed document leaves the store EMPTY: the clear happens
    /// before parsing, and there is no rollback to the pre-load contents.
    /// Subscriptions survive a reload.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.clear_collections();
        match document::load_into(self) {
            Ok(()) => {
                info!(
                    "loaded {} groups, {} staff, {} students, {} publications from {}",
                    self.groups.len(),
                    self.staff.len(),
                    self.students.len(),
                    self.publications.len(),
                    self.path.display()
                );
                self.hub.broadcast();
                Ok(())
            }
            Err(err) => {
                self.clear_collections();
                Err(err)
            }
        }
    }

    fn clear_collections(&mut self) {
        self.admin = None;
        self.groups.clear();
        self.staff.clear();
        self.students.clear();
        self.publications.clear();
    }

    /// Persist and broadcast after a successful mutation. The broadcast
    /// happens regardless of the save outcome: the in-memory state did
    /// change either way.
    fn commit(&mut self) -> Result<(), StoreError> {
        let saved = self.save();
        self.hub.broadcast();
        match saved {
            Ok(()) => Ok(()),
            Err(source) => Err(StoreError::Unsaved {
                path: self.path.clone(),
                source: Box::new(source),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Notification
    // -----------------------------------------------------------------------

    pub fn subscribe(&mut self, id: SubscriberId, hook: UpdateFn) -> Result<(), StoreError> {
        self.hub.subscribe(id, hook)
    }

    pub fn unsubscribe(&mut self, id: &SubscriberId) -> Result<(), StoreError> {
        self.hub.unsubscribe(id)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    use super::*;
    use crate::types::{PublicationId, PublicationKind};

    fn scratch_store() -> (TempDir, Store) {
        let dir = TempDir::new().expect("tempdir");
        let store = Store::new(dir.path().join("department.yaml"));
        (dir, store)
    }

    fn group(id: u32) -> ResearchGroup {
        ResearchGroup::new(format!("Group {id}"), GroupId(id))
    }

    fn staff(email: &str, group: u32) -> AcademicStaff {
        AcademicStaff::new("Ada Lovelace", "Prof", email, GroupId(group), "pw")
    }

    fn journal(id: &str, title: &str, staff_email: &str, group: u32) -> Publication {
        Publication {
            id: PublicationId::from(id),
            title: title.to_owned(),
            authors: vec!["A. Lee".to_owned()],
            abstract_text: "An abstract.".to_owned(),
            group_id: GroupId(group),
            staff_email: staff_email.to_owned(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).expect("date"),
            kind: PublicationKind::Journal {
                journal_name: "IEEE PAMI".to_owned(),
                page_number: 42,
            },
        }
    }

    fn future_seminar(topic: &str, group: u32) -> Seminar {
        let dt = Local::now().naive_local() + Duration::days(7);
        Seminar::new(dt, "LT-2", topic, GroupId(group))
    }

    #[test]
    fn duplicate_group_id_is_rejected() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("first add");
        let err = store
            .add_research_group(ResearchGroup::new("Other name", GroupId(1)))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got: {err}");
        assert_eq!(store.groups().len(), 1);
    }

    #[test]
    fn tenth_group_succeeds_eleventh_hits_ceiling() {
        let (_dir, mut store) = scratch_store();
        for id in 1..=10 {
            store.add_research_group(group(id)).expect("within ceiling");
        }
        let err = store.add_research_group(group(11)).unwrap_err();
        assert!(matches!(err, StoreError::CapacityExceeded(MAX_GROUPS)), "got: {err}");
        assert_eq!(store.groups().len(), 10);
    }

    #[test]
    fn staff_requires_existing_group() {
        let (_dir, mut store) = scratch_store();
        let err = store.add_academic_staff(staff("a@x.edu", 9)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)), "got: {err}");
    }

    #[test]
    fn duplicate_member_registration_is_rejected() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");
        store.add_academic_staff(staff("a@x.edu", 1)).expect("staff");
        let err = store.add_academic_staff(staff("a@x.edu", 1)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got: {err}");
        assert_eq!(store.staff().len(), 1);
    }

    #[test]
    fn same_email_in_same_group_is_duplicate_across_kinds() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");
        store.add_academic_staff(staff("a@x.edu", 1)).expect("staff");
        let err = store
            .add_research_student(ResearchStudent::new(
                "Kim",
                "PhD cand.",
                "a@x.edu",
                GroupId(1),
                "s-100",
            ))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got: {err}");
    }

    #[test]
    fn publication_requires_registered_author() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(3)).expect("group");
        let err = store
            .add_publication(journal("J1", "Edge Detection", "a@x.edu", 3))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)), "got: {err}");
    }

    #[test]
    fn duplicate_publication_id_or_title_is_rejected() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(3)).expect("group");
        store.add_academic_staff(staff("a@x.edu", 3)).expect("staff");
        store
            .add_publication(journal("J1", "Edge Detection", "a@x.edu", 3))
            .expect("first add");

        let same_id = journal("J1", "A Fresh Title", "a@x.edu", 3);
        let err = store.add_publication(same_id).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got: {err}");

        let same_title = journal("J2", "Edge Detection", "a@x.edu", 3);
        let err = store.add_publication(same_title).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)), "got: {err}");

        assert_eq!(store.publications().len(), 1);
        assert_eq!(store.publications_of("a@x.edu").len(), 1);
    }

    #[test]
    fn derived_views_follow_the_flat_lists() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(3)).expect("group");
        store.add_academic_staff(staff("a@x.edu", 3)).expect("staff");
        store
            .add_research_student(ResearchStudent::new(
                "Kim",
                "PhD cand.",
                "k@x.edu",
                GroupId(3),
                "s-100",
            ))
            .expect("student");
        store
            .add_publication(journal("J1", "Edge Detection", "a@x.edu", 3))
            .expect("publication");

        let members = store.members_of(GroupId(3));
        assert_eq!(members.len(), 2);
        assert!(matches!(members[0], GroupMember::Staff(_)));
        assert!(matches!(members[1], GroupMember::Student(_)));
        assert_eq!(store.publications_of("a@x.edu")[0].id, PublicationId::from("J1"));
    }

    #[test]
    fn coordinator_appointment_supersedes() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");
        store.add_academic_staff(staff("a@x.edu", 1)).expect("a");
        store
            .add_academic_staff(AcademicStaff::new("Bo", "Dr", "b@x.edu", GroupId(1), "pw2"))
            .expect("b");

        store.set_seminar_coordinator(GroupId(1), "a@x.edu").expect("first");
        store.set_seminar_coordinator(GroupId(1), "b@x.edu").expect("second");

        let g = store.group(GroupId(1)).expect("group");
        assert_eq!(g.seminar_coordinator.as_deref(), Some("b@x.edu"));
        let flags: Vec<(String, bool)> = store
            .staff()
            .iter()
            .map(|s| (s.email.clone(), s.coordinator))
            .collect();
        assert!(flags.contains(&("a@x.edu".to_owned(), false)));
        assert!(flags.contains(&("b@x.edu".to_owned(), true)));
    }

    #[test]
    fn coordinator_must_belong_to_the_group() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("g1");
        store.add_research_group(group(2)).expect("g2");
        store.add_academic_staff(staff("a@x.edu", 2)).expect("staff");
        let err = store.set_seminar_coordinator(GroupId(1), "a@x.edu").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)), "got: {err}");
    }

    #[test]
    fn removing_coordinator_clears_group_reference() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");
        let member = staff("a@x.edu", 1);
        store.add_academic_staff(member.clone()).expect("staff");
        store.set_seminar_coordinator(GroupId(1), "a@x.edu").expect("appoint");

        let mut appointed = member;
        appointed.coordinator = true;
        store.remove_academic_staff(&appointed).expect("remove");
        assert!(store.group(GroupId(1)).expect("group").seminar_coordinator.is_none());
    }

    #[test]
    fn past_seminar_is_rejected_future_is_listed() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");

        let past = Seminar::new(
            Local::now().naive_local() - Duration::hours(1),
            "LT-2",
            "History",
            GroupId(1),
        );
        let err = store.schedule_seminar(past).unwrap_err();
        assert!(matches!(err, StoreError::DatePassed(_)), "got: {err}");
        assert!(store.group(GroupId(1)).expect("group").seminars.is_empty());

        store.schedule_seminar(future_seminar("Optics", 1)).expect("future");
        assert_eq!(store.group(GroupId(1)).expect("group").seminars.len(), 1);
    }

    #[test]
    fn reschedule_replaces_in_place() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");
        let seminar = future_seminar("Optics", 1);
        store.schedule_seminar(seminar.clone()).expect("schedule");

        let mut updated = seminar.clone();
        updated.date_time += Duration::days(1);
        updated.location = "LT-9".to_owned();
        store.reschedule_seminar(&seminar, updated.clone()).expect("reschedule");

        let g = store.group(GroupId(1)).expect("group");
        assert_eq!(g.seminars.len(), 1);
        assert_eq!(g.seminars[0].location, "LT-9");
        assert_eq!(g.seminars[0].date_time, updated.date_time);
    }

    #[test]
    fn staff_email_update_cascades_to_references() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(3)).expect("group");
        let member = staff("a@x.edu", 3);
        store.add_academic_staff(member.clone()).expect("staff");
        store.set_seminar_coordinator(GroupId(3), "a@x.edu").expect("appoint");
        store
            .add_publication(journal("J1", "Edge Detection", "a@x.edu", 3))
            .expect("publication");

        let mut appointed = member;
        appointed.coordinator = true;
        store
            .update_staff_details(&appointed, "Ada Lovelace", "Prof", "ada@x.edu", "pw")
            .expect("update");

        assert_eq!(
            store.group(GroupId(3)).expect("group").seminar_coordinator.as_deref(),
            Some("ada@x.edu")
        );
        assert_eq!(store.publications()[0].staff_email, "ada@x.edu");
        assert_eq!(store.publications_of("ada@x.edu").len(), 1);
        assert!(store.publications_of("a@x.edu").is_empty());
    }

    #[test]
    fn collection_sizes_track_adds_and_removes() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("g1");
        store.add_research_group(group(2)).expect("g2");
        store.add_academic_staff(staff("a@x.edu", 1)).expect("staff");
        store
            .add_research_student(ResearchStudent::new(
                "Kim",
                "PhD cand.",
                "k@x.edu",
                GroupId(1),
                "s-100",
            ))
            .expect("student");
        store
            .add_publication(journal("J1", "Edge Detection", "a@x.edu", 1))
            .expect("publication");

        assert_eq!(store.groups().len(), 2);
        assert_eq!(store.staff().len(), 1);
        assert_eq!(store.students().len(), 1);
        assert_eq!(store.publications().len(), 1);

        store
            .remove_publication(&journal("J1", "Edge Detection", "a@x.edu", 1))
            .expect("remove pub");
        store.remove_research_group(&group(2)).expect("remove group");
        assert_eq!(store.publications().len(), 0);
        assert_eq!(store.groups().len(), 1);
    }

    #[test]
    fn credential_scans_find_members() {
        let (_dir, mut store) = scratch_store();
        store.add_research_group(group(1)).expect("group");
        store.add_academic_staff(staff("a@x.edu", 1)).expect("staff");
        store
            .add_research_student(ResearchStudent::new(
                "Kim",
                "PhD cand.",
                "k@x.edu",
                GroupId(1),
                "s-100",
            ))
            .expect("student");

        assert!(store.find_staff_by_credentials("a@x.edu", "pw").is_some());
        assert!(store.find_staff_by_credentials("a@x.edu", "wrong").is_none());
        assert!(store.find_student_by_credentials("k@x.edu", "s-100").is_some());
        assert!(store.find_student_by_credentials("k@x.edu", "s-999").is_none());
    }

    #[test]
    fn mutations_broadcast_to_subscribers() {
        let (_dir, mut store) = scratch_store();
        let seen = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&seen);
        store
            .subscribe(SubscriberId::from("view"), Box::new(move || counter.set(counter.get() + 1)))
            .expect("subscribe");

        store.add_research_group(group(1)).expect("add");
        assert_eq!(seen.get(), 1);

        // A failed validation must not broadcast.
        let _ = store.add_research_group(group(1));
        assert_eq!(seen.get(), 1);

        store.remove_research_group(&group(1)).expect("remove");
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn failed_save_reports_unsaved_but_keeps_mutation() {
        let dir = TempDir::new().expect("tempdir");
        // A directory at the document path makes every save fail.
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).expect("mkdir");
        let mut store = Store::new(&path);

        let err = store.add_research_group(group(1)).unwrap_err();
        assert!(matches!(err, StoreError::Unsaved { .. }), "got: {err}");
        assert_eq!(store.groups().len(), 1, "mutation must stay applied");
    }
}
