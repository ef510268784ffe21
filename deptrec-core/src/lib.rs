//! Department record store — entities, invariants, persistence, and
//! change notification.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain entities
//! - [`error`] — [`StoreError`]
//! - [`store`] — [`Store`]: the sole mutation surface
//! - [`document`] — persisted-document path helpers (save/load run through
//!   the store)
//! - [`observer`] — the notification hub

pub mod document;
pub mod error;
pub mod observer;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use observer::{ObserverHub, UpdateFn};
pub use store::{Store, MAX_GROUPS};
pub use types::{
    AcademicStaff, GroupId, GroupMember, Publication, PublicationId, PublicationKind,
    ResearchGroup, ResearchStudent, Seminar, SubscriberId, SystemAdmin,
};
