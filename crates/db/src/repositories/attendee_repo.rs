//! Repository for the attendee roster.

use std::collections::HashMap;

use cafe_core::email::normalize_email;

use crate::error::{RepoError, StoreError};
use crate::models::attendee::{Attendee, MergeCounts};
use crate::store::{collections, Store};

/// Provides roster lookups and imports.
pub struct AttendeeRepo;

impl AttendeeRepo {
    /// The whole roster in import order.
    pub async fn list(store: &Store) -> Result<Vec<Attendee>, StoreError> {
        store.read_all(collections::ATTENDEES).await
    }

    pub async fn count(store: &Store) -> Result<usize, StoreError> {
        Ok(Self::list(store).await?.len())
    }

    /// Find an attendee by email (normalized before comparing).
    pub async fn find_by_email(store: &Store, email: &str) -> Result<Option<Attendee>, StoreError> {
        let email = normalize_email(email);
        Ok(Self::list(store)
            .await?
            .into_iter()
            .find(|a| a.email == email))
    }

    /// Find an attendee by ticket code, ignoring case and surrounding space.
    pub async fn find_by_ticket(store: &Store, code: &str) -> Result<Option<Attendee>, StoreError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(Self::list(store).await?.into_iter().find(|a| {
            a.ticket_code
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(code))
        }))
    }

    /// Replace the roster, returning the new size.
    pub async fn replace_all(store: &Store, attendees: Vec<Attendee>) -> Result<usize, StoreError> {
        let total = attendees.len();
        store.write_all(collections::ATTENDEES, &attendees).await?;
        tracing::info!(total, "Attendee roster replaced");
        Ok(total)
    }

    /// Add new attendees and update existing ones (matched by email).
    ///
    /// Existing ticket codes are kept when the incoming row has none.
    pub async fn merge(store: &Store, incoming: Vec<Attendee>) -> Result<MergeCounts, RepoError> {
        let counts = store
            .mutate(collections::ATTENDEES, |roster: &mut Vec<Attendee>| {
                let mut index: HashMap<String, usize> = roster
                    .iter()
                    .enumerate()
                    .map(|(i, a)| (a.email.clone(), i))
                    .collect();

                let mut counts = MergeCounts::default();
                for attendee in incoming {
                    match index.get(&attendee.email) {
                        Some(&i) => {
                            let existing = &mut roster[i];
                            existing.name = attendee.name;
                            if attendee.ticket_code.is_some() {
                                existing.ticket_code = attendee.ticket_code;
                            }
                            counts.updated += 1;
                        }
                        None => {
                            index.insert(attendee.email.clone(), roster.len());
                            roster.push(attendee);
                            counts.added += 1;
                        }
                    }
                }
                Ok::<_, RepoError>(counts)
            })
            .await?;

        tracing::info!(added = counts.added, updated = counts.updated, "Attendee roster merged");
        Ok(counts)
    }
}
