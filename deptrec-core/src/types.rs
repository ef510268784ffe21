//! Domain types for the department record store.
//!
//! Identity rules follow the store's conventions, not derived equality:
//! derived `PartialEq` compares every field, while the store's duplicate
//! and removal checks go through the explicit key helpers on each type
//! (`same_identity`, `collides_with`). The keys are:
//!
//! - research group: `GroupId`
//! - academic staff: (email, password)
//! - research student: (email, student id)
//! - publication: (id, title) composite; either colliding alone rejects
//! - seminar: (date-time, topic)

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed research group identifier, unique across the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for GroupId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A strongly-typed publication identifier (e.g. `"J1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicationId(pub String);

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PublicationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PublicationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed handle for a notification subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub String);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SubscriberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubscriberId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Administrator
// ---------------------------------------------------------------------------

/// The single department administrator record.
///
/// At most one exists per store; it is created at load time or assigned
/// explicitly, and never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemAdmin {
    pub name: String,
    pub office_number: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// An academic staff member.
///
/// `group_id` is a back-reference naming the member's group; the store's
/// flat staff list is the single source of truth for membership. The
/// member's publications are derived from the store's global publication
/// list via the `staff_email` back-reference, never owned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicStaff {
    pub name: String,
    pub title: String,
    pub email: String,
    pub group_id: GroupId,
    pub password: String,
    /// True while this member is their group's seminar coordinator.
    pub coordinator: bool,
}

impl AcademicStaff {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
        group_id: GroupId,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            email: email.into(),
            group_id,
            password: password.into(),
            coordinator: false,
        }
    }

    /// Identity key: (email, password).
    pub fn same_identity(&self, other: &AcademicStaff) -> bool {
        self.email == other.email && self.password == other.password
    }
}

/// A research student member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchStudent {
    pub name: String,
    pub title: String,
    pub email: String,
    pub group_id: GroupId,
    pub student_id: String,
}

impl ResearchStudent {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
        group_id: GroupId,
        student_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            email: email.into(),
            group_id,
            student_id: student_id.into(),
        }
    }

    /// Identity key: (email, student id).
    pub fn same_identity(&self, other: &ResearchStudent) -> bool {
        self.email == other.email && self.student_id == other.student_id
    }
}

/// A group member of either kind; the variant is the discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupMember {
    Staff(AcademicStaff),
    Student(ResearchStudent),
}

impl GroupMember {
    pub fn name(&self) -> &str {
        match self {
            GroupMember::Staff(s) => &s.name,
            GroupMember::Student(s) => &s.name,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            GroupMember::Staff(s) => &s.title,
            GroupMember::Student(s) => &s.title,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            GroupMember::Staff(s) => &s.email,
            GroupMember::Student(s) => &s.email,
        }
    }

    pub fn group_id(&self) -> GroupId {
        match self {
            GroupMember::Staff(s) => s.group_id,
            GroupMember::Student(s) => s.group_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Publications
// ---------------------------------------------------------------------------

/// Kind-specific publication fields; the variant is the discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicationKind {
    Journal {
        journal_name: String,
        page_number: u32,
    },
    Conference {
        conference_name: String,
        conference_location: String,
        conference_date: NaiveDate,
    },
    Book {
        isbn: String,
        publisher: String,
    },
}

/// A publication authored by a staff member.
///
/// `group_id` names the owning group and `staff_email` the authoring staff
/// member; both are back-references for lookup, conferring no ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub id: PublicationId,
    pub title: String,
    /// Ordered author names; the first author leads citations.
    pub authors: Vec<String>,
    pub abstract_text: String,
    pub group_id: GroupId,
    pub staff_email: String,
    pub date: NaiveDate,
    pub kind: PublicationKind,
}

impl Publication {
    /// Identity key: (id, title); both must match.
    pub fn same_identity(&self, other: &Publication) -> bool {
        self.id == other.id && self.title == other.title
    }

    /// Uniqueness check for adds: id OR title colliding is a duplicate.
    pub fn collides_with(&self, other: &Publication) -> bool {
        self.id == other.id || self.title == other.title
    }
}

// ---------------------------------------------------------------------------
// Seminars and groups
// ---------------------------------------------------------------------------

/// A seminar held (or to be held) by a research group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seminar {
    pub date_time: NaiveDateTime,
    pub location: String,
    pub topic: String,
    pub group_id: GroupId,
}

impl Seminar {
    pub fn new(
        date_time: NaiveDateTime,
        location: impl Into<String>,
        topic: impl Into<String>,
        group_id: GroupId,
    ) -> Self {
        Self {
            date_time,
            location: location.into(),
            topic: topic.into(),
            group_id,
        }
    }

    /// Identity key: (date-time, topic).
    pub fn same_identity(&self, other: &Seminar) -> bool {
        self.date_time == other.date_time && self.topic == other.topic
    }
}

/// A research group.
///
/// The group owns its seminar list. It does NOT own a member list: the
/// store's flat staff/student collections are the single source of truth,
/// and membership is derived from their `group_id` back-references.
/// `seminar_coordinator` holds the coordinator's email, resolved against
/// the derived membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchGroup {
    pub id: GroupId,
    pub name: String,
    pub seminar_coordinator: Option<String>,
    pub seminars: Vec<Seminar>,
}

impl ResearchGroup {
    pub fn new(name: impl Into<String>, id: GroupId) -> Self {
        Self {
            id,
            name: name.into(),
            seminar_coordinator: None,
            seminars: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(GroupId::from(3).to_string(), "3");
        assert_eq!(PublicationId::from("J1").to_string(), "J1");
        assert_eq!(SubscriberId::from("main-view").to_string(), "main-view");
    }

    #[test]
    fn staff_identity_requires_email_and_password() {
        let a = AcademicStaff::new("Ada", "Prof", "a@x.edu", GroupId(1), "p");
        let mut b = a.clone();
        assert!(a.same_identity(&b));
        b.password = "other".into();
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn student_identity_requires_email_and_student_id() {
        let a = ResearchStudent::new("Kim", "PhD cand.", "k@x.edu", GroupId(1), "s-100");
        let mut b = a.clone();
        assert!(a.same_identity(&b));
        b.student_id = "s-101".into();
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn publication_collision_is_id_or_title() {
        let base = Publication {
            id: PublicationId::from("J1"),
            title: "Edge Detection".into(),
            authors: vec!["A. Lee".into()],
            abstract_text: String::new(),
            group_id: GroupId(3),
            staff_email: "a@x.edu".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            kind: PublicationKind::Journal {
                journal_name: "IEEE PAMI".into(),
                page_number: 42,
            },
        };
        let mut same_id = base.clone();
        same_id.title = "Different Title".into();
        let mut same_title = base.clone();
        same_title.id = PublicationId::from("J2");

        assert!(base.collides_with(&same_id));
        assert!(base.collides_with(&same_title));
        assert!(!base.same_identity(&same_id));
        assert!(!base.same_identity(&same_title));
    }

    #[test]
    fn seminar_identity_is_datetime_and_topic() {
        let dt = NaiveDate::from_ymd_opt(2026, 9, 1)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let a = Seminar::new(dt, "LT-2", "Optics", GroupId(1));
        let mut b = a.clone();
        b.location = "LT-9".into();
        assert!(a.same_identity(&b));
        b.topic = "Acoustics".into();
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn member_view_exposes_shared_fields() {
        let staff = GroupMember::Staff(AcademicStaff::new(
            "Ada",
            "Prof",
            "a@x.edu",
            GroupId(2),
            "p",
        ));
        assert_eq!(staff.name(), "Ada");
        assert_eq!(staff.email(), "a@x.edu");
        assert_eq!(staff.group_id(), GroupId(2));
    }
}
