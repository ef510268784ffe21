//! Seminar-coordinator façade: schedule, cancel, reschedule, and announce
//! a group's seminars.

use chrono::{Duration, Local, NaiveDateTime};
use deptrec_core::types::{GroupId, Seminar};
use deptrec_core::{Store, StoreError};
use log::info;

use crate::error::ControlError;
use crate::mailer::Mailer;

/// A logged-in seminar coordinator acting on their group's seminar list.
pub struct CoordinatorSession<'a> {
    store: &'a mut Store,
    group_id: GroupId,
    email: String,
}

impl std::fmt::Debug for CoordinatorSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorSession")
            .field("group_id", &self.group_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl<'a> CoordinatorSession<'a> {
    /// Staff credential scan, additionally requiring the coordinator flag.
    pub fn login(
        store: &'a mut Store,
        email: &str,
        password: &str,
    ) -> Result<Self, ControlError> {
        let Some(staff) = store.find_staff_by_credentials(email, password) else {
            return Err(ControlError::BadCredentials(email.to_owned()));
        };
        if !staff.coordinator {
            return Err(ControlError::NotCoordinator(email.to_owned()));
        }
        let group_id = staff.group_id;
        Ok(Self {
            store,
            group_id,
            email: email.to_owned(),
        })
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn schedule(
        &mut self,
        date_time: NaiveDateTime,
        location: &str,
        topic: &str,
    ) -> Result<(), ControlError> {
        let seminar = Seminar::new(date_time, location, topic, self.group_id);
        self.store.schedule_seminar(seminar)?;
        info!("{} scheduled seminar {topic:?} for group {}", self.email, self.group_id);
        Ok(())
    }

    pub fn cancel(&mut self, seminar: &Seminar) -> Result<(), ControlError> {
        Ok(self.store.remove_seminar(seminar)?)
    }

    pub fn reschedule(
        &mut self,
        seminar: &Seminar,
        date_time: NaiveDateTime,
        location: &str,
        topic: &str,
    ) -> Result<(), ControlError> {
        let updated = Seminar::new(date_time, location, topic, self.group_id);
        Ok(self.store.reschedule_seminar(seminar, updated)?)
    }

    /// Mail the seminar details to every group member, together with the
    /// group's publications from the last 30 days. Only a listed,
    /// still-future seminar can be announced.
    pub fn announce(
        &mut self,
        seminar: &Seminar,
        mailer: &mut dyn Mailer,
    ) -> Result<(), ControlError> {
        let group = self
            .store
            .group(self.group_id)
            .ok_or_else(|| StoreError::NotFound(format!("research group {}", self.group_id)))?;
        if !group.seminars.iter().any(|s| s.same_identity(seminar)) {
            return Err(ControlError::NotAnnounceable {
                topic: seminar.topic.clone(),
                reason: "not in the group's seminar list".into(),
            });
        }
        if seminar.date_time <= Local::now().naive_local() {
            return Err(ControlError::NotAnnounceable {
                topic: seminar.topic.clone(),
                reason: "its date has already passed".into(),
            });
        }

        let recipients: Vec<String> = self
            .store
            .members_of(self.group_id)
            .iter()
            .map(|m| m.email().to_owned())
            .collect();

        let cutoff = Local::now().date_naive() - Duration::days(30);
        let mut body = format!(
            "Hello,\nThe next seminar, on the topic of {}, is in {} at {} on {}.\n\n\
             Publications from the group in the last 30 days:\n",
            seminar.topic,
            seminar.location,
            seminar.date_time.format("%H:%M"),
            seminar.date_time.format("%A %-d %B %Y"),
        );
        for publication in self.store.publications() {
            if publication.group_id != self.group_id || publication.date <= cutoff {
                continue;
            }
            body.push('\n');
            body.push_str(&publication.title);
            if let Some(first) = publication.authors.first() {
                body.push('\t');
                body.push_str(first);
                if publication.authors.len() > 1 {
                    body.push_str(" et al.");
                }
            }
        }

        let subject = format!("Seminar: {}", seminar.topic);
        mailer.deliver(&recipients, &subject, &body)?;
        info!(
            "announced seminar {:?} to {} member(s) of group {}",
            seminar.topic,
            recipients.len(),
            self.group_id
        );
        Ok(())
    }
}
