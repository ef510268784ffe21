//! Persisted-document codec.
//!
//! # Document shape
//!
//! One YAML file for the whole store. The root holds an optional
//! administrator block (omitted when no admin is set) and the group list;
//! each group nests its member list (derived from the flat lists on save)
//! and seminars; each staff member nests their derived publication list.
//! Member and publication variants carry a `kind` discriminant. Dates are
//! plain integer components joined by commas (`year,month,day`, seminars
//! additionally `,hour,minute`), stable across runs, platforms, and
//! locales.
//!
//! # Load
//!
//! Two-phase: construct everything (groups, then members, then nested
//! publications, registering each in the flat collections), then a
//! linking pass resolves the group's coordinator email against the
//! now-populated membership. Seminars are reconstructed as history,
//! exempt from the future-date rule. The store clears itself before
//! calling in here, so a malformed document leaves it empty.
//!
//! The document structs below are private: the runtime graph is flat
//! (single source of truth) while the document is nested, so the two
//! shapes are converted explicitly rather than serializing the runtime
//! types directly.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::Store;
use crate::types::{
    AcademicStaff, GroupId, Publication, PublicationId, PublicationKind, ResearchGroup,
    ResearchStudent, Seminar, SystemAdmin,
};

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.deptrec/department.yaml` — pure, no I/O.
pub fn data_path_at(home: &Path) -> PathBuf {
    home.join(".deptrec").join("department.yaml")
}

/// `data_path_at` convenience wrapper (uses `dirs::home_dir()`).
pub fn default_data_path() -> Result<PathBuf, StoreError> {
    let home = dirs::home_dir().ok_or(StoreError::HomeNotFound)?;
    Ok(data_path_at(&home))
}

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct StoreDoc {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    administrator: Option<AdminDoc>,
    #[serde(default)]
    groups: Vec<GroupDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AdminDoc {
    name: String,
    office_number: String,
    phone_number: String,
    email: String,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroupDoc {
    group_id: u32,
    name: String,
    #[serde(default)]
    members: Vec<MemberDoc>,
    /// Coordinator's email; empty when unset.
    #[serde(default)]
    seminar_coordinator: String,
    #[serde(default)]
    seminars: Vec<SeminarDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum MemberDoc {
    Staff {
        name: String,
        title: String,
        email: String,
        password: String,
        coordinator: bool,
        #[serde(default)]
        publications: Vec<PublicationDoc>,
    },
    Student {
        name: String,
        title: String,
        email: String,
        student_id: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct PublicationDoc {
    publication_id: String,
    title: String,
    authors: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_text: String,
    group_id: u32,
    staff_email: String,
    /// `year,month,day`.
    date: String,
    #[serde(flatten)]
    kind: PublicationKindDoc,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum PublicationKindDoc {
    Journal {
        journal_name: String,
        page_number: u32,
    },
    Conference {
        conference_name: String,
        conference_location: String,
        /// `year,month,day`.
        conference_date: String,
    },
    Book {
        isbn: String,
        publisher: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct SeminarDoc {
    topic: String,
    location: String,
    /// `year,month,day,hour,minute`.
    date_time: String,
}

// ---------------------------------------------------------------------------
// Date encoding
// ---------------------------------------------------------------------------

fn encode_date(date: NaiveDate) -> String {
    format!("{},{},{}", date.year(), date.month(), date.day())
}

fn decode_date(text: &str) -> Result<NaiveDate, String> {
    let parts = split_numbers(text, 3)?;
    NaiveDate::from_ymd_opt(parts[0] as i32, parts[1] as u32, parts[2] as u32)
        .ok_or_else(|| format!("invalid calendar date {text:?}"))
}

fn encode_date_time(dt: NaiveDateTime) -> String {
    format!(
        "{},{},{},{},{}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute()
    )
}

fn decode_date_time(text: &str) -> Result<NaiveDateTime, String> {
    let parts = split_numbers(text, 5)?;
    NaiveDate::from_ymd_opt(parts[0] as i32, parts[1] as u32, parts[2] as u32)
        .and_then(|d| d.and_hms_opt(parts[3] as u32, parts[4] as u32, 0))
        .ok_or_else(|| format!("invalid date-time {text:?}"))
}

fn split_numbers(text: &str, expected: usize) -> Result<Vec<i64>, String> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != expected {
        return Err(format!(
            "expected {expected} comma-joined integers, got {text:?}"
        ));
    }
    parts
        .iter()
        .map(|p| {
            p.trim()
                .parse::<i64>()
                .map_err(|_| format!("non-numeric date component in {text:?}"))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

/// Atomically write the full store document to `path`.
///
/// Write flow: serialize → `.tmp` sibling → `rename`. The `.tmp` lives in
/// the target directory so the rename never crosses filesystems.
pub(crate) fn save_at(store: &Store, path: &Path) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let yaml = serde_yaml::to_string(&to_doc(store))?;
    let tmp_path = path.with_extension("yaml.tmp");
    std::fs::write(&tmp_path, yaml)?;
    std::fs::rename(&tmp_path, path)?;
    debug!("saved store document to {}", path.display());
    Ok(())
}

fn to_doc(store: &Store) -> StoreDoc {
    StoreDoc {
        administrator: store.admin().map(|a| AdminDoc {
            name: a.name.clone(),
            office_number: a.office_number.clone(),
            phone_number: a.phone_number.clone(),
            email: a.email.clone(),
            password: a.password.clone(),
        }),
        groups: store.groups().iter().map(|g| group_doc(store, g)).collect(),
    }
}

fn group_doc(store: &Store, group: &ResearchGroup) -> GroupDoc {
    let mut members: Vec<MemberDoc> = store
        .staff()
        .iter()
        .filter(|s| s.group_id == group.id)
        .map(|s| MemberDoc::Staff {
            name: s.name.clone(),
            title: s.title.clone(),
            email: s.email.clone(),
            password: s.password.clone(),
            coordinator: s.coordinator,
            publications: store
                .publications_of(&s.email)
                .into_iter()
                .map(publication_doc)
                .collect(),
        })
        .collect();
    members.extend(
        store
            .students()
            .iter()
            .filter(|s| s.group_id == group.id)
            .map(|s| MemberDoc::Student {
                name: s.name.clone(),
                title: s.title.clone(),
                email: s.email.clone(),
                student_id: s.student_id.clone(),
            }),
    );
    GroupDoc {
        group_id: group.id.0,
        name: group.name.clone(),
        members,
        seminar_coordinator: group.seminar_coordinator.clone().unwrap_or_default(),
        seminars: group
            .seminars
            .iter()
            .map(|s| SeminarDoc {
                topic: s.topic.clone(),
                location: s.location.clone(),
                date_time: encode_date_time(s.date_time),
            })
            .collect(),
    }
}

fn publication_doc(publication: &Publication) -> PublicationDoc {
    PublicationDoc {
        publication_id: publication.id.0.clone(),
        title: publication.title.clone(),
        authors: publication.authors.clone(),
        abstract_text: publication.abstract_text.clone(),
        group_id: publication.group_id.0,
        staff_email: publication.staff_email.clone(),
        date: encode_date(publication.date),
        kind: match &publication.kind {
            PublicationKind::Journal {
                journal_name,
                page_number,
            } => PublicationKindDoc::Journal {
                journal_name: journal_name.clone(),
                page_number: *page_number,
            },
            PublicationKind::Conference {
                conference_name,
                conference_location,
                conference_date,
            } => PublicationKindDoc::Conference {
                conference_name: conference_name.clone(),
                conference_location: conference_location.clone(),
                conference_date: encode_date(*conference_date),
            },
            PublicationKind::Book { isbn, publisher } => PublicationKindDoc::Book {
                isbn: isbn.clone(),
                publisher: publisher.clone(),
            },
        },
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Parse the document at the store's configured path and repopulate the
/// (already cleared) collections. Any in-document invariant violation is
/// reported as `Corrupt`.
pub(crate) fn load_into(store: &mut Store) -> Result<(), StoreError> {
    let path = store.path().to_path_buf();
    let contents = std::fs::read_to_string(&path)?;
    let doc: StoreDoc = serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse {
        path: path.clone(),
        source: e,
    })?;
    apply(store, doc, &path)
}

fn apply(store: &mut Store, doc: StoreDoc, path: &Path) -> Result<(), StoreError> {
    if let Some(a) = doc.administrator {
        store.install_admin(SystemAdmin {
            name: a.name,
            office_number: a.office_number,
            phone_number: a.phone_number,
            email: a.email,
            password: a.password,
        });
    }
    for group in doc.groups {
        let group_id = GroupId(group.group_id);
        store
            .insert_research_group(ResearchGroup::new(group.name, group_id))
            .map_err(|e| corrupt(path, e))?;

        for member in group.members {
            match member {
                MemberDoc::Staff {
                    name,
                    title,
                    email,
                    password,
                    coordinator,
                    publications,
                } => {
                    let mut staff = AcademicStaff::new(name, title, email, group_id, password);
                    staff.coordinator = coordinator;
                    store.insert_academic_staff(staff).map_err(|e| corrupt(path, e))?;
                    for publication in publications {
                        let publication = publication_from_doc(publication, path)?;
                        store.insert_publication(publication).map_err(|e| corrupt(path, e))?;
                    }
                }
                MemberDoc::Student {
                    name,
                    title,
                    email,
                    student_id,
                } => {
                    store
                        .insert_research_student(ResearchStudent::new(
                            name, title, email, group_id, student_id,
                        ))
                        .map_err(|e| corrupt(path, e))?;
                }
            }
        }

        // Linking pass: the coordinator back-reference can only resolve
        // once the group's membership is in memory.
        if !group.seminar_coordinator.is_empty()
            && !store.link_coordinator(group_id, &group.seminar_coordinator)
        {
            warn!(
                "seminar coordinator {} not found among members of group {}; left unset",
                group.seminar_coordinator, group_id
            );
        }

        for seminar in group.seminars {
            let date_time = decode_date_time(&seminar.date_time)
                .map_err(|reason| StoreError::Corrupt {
                    path: path.to_path_buf(),
                    reason,
                })?;
            store
                .insert_seminar(Seminar::new(
                    date_time,
                    seminar.location,
                    seminar.topic,
                    group_id,
                ))
                .map_err(|e| corrupt(path, e))?;
        }
    }
    Ok(())
}

fn publication_from_doc(doc: PublicationDoc, path: &Path) -> Result<Publication, StoreError> {
    let date = decode_date(&doc.date).map_err(|reason| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason,
    })?;
    let kind = match doc.kind {
        PublicationKindDoc::Journal {
            journal_name,
            page_number,
        } => PublicationKind::Journal {
            journal_name,
            page_number,
        },
        PublicationKindDoc::Conference {
            conference_name,
            conference_location,
            conference_date,
        } => PublicationKind::Conference {
            conference_name,
            conference_location,
            conference_date: decode_date(&conference_date).map_err(|reason| {
                StoreError::Corrupt {
                    path: path.to_path_buf(),
                    reason,
                }
            })?,
        },
        PublicationKindDoc::Book { isbn, publisher } => PublicationKind::Book { isbn, publisher },
    };
    Ok(Publication {
        id: PublicationId(doc.publication_id),
        title: doc.title,
        authors: doc.authors,
        abstract_text: doc.abstract_text,
        group_id: GroupId(doc.group_id),
        staff_email: doc.staff_email,
        date,
        kind,
    })
}

fn corrupt(path: &Path, source: StoreError) -> StoreError {
    StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: source.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
