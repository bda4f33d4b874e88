//! Mutators for the `calendarEvents` collection.

use chrono::NaiveDate;

use bayanihan_shared::constants::COLLECTION_CALENDAR_EVENTS;
use bayanihan_shared::{DomainError, EntityId};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::models::CalendarEvent;

/// Input of [`Database::save_event`]: `id` present edits an existing
/// event in place, absent inserts a new one.
#[derive(Debug, Clone)]
pub struct SaveEvent {
    pub id: Option<EntityId>,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Database {
    /// List all scheduled events.
    pub fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        self.read_collection(COLLECTION_CALENDAR_EVENTS)
    }

    /// Events scheduled on one calendar day.
    pub fn events_on(&self, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
        Ok(self
            .list_events()?
            .into_iter()
            .filter(|e| e.date == date)
            .collect())
    }

    /// Insert or edit an event.
    pub fn save_event(&self, input: SaveEvent) -> Result<CalendarEvent> {
        if input.title.trim().is_empty() {
            return Err(DomainError::EmptyField("title").into());
        }

        let mut all = self.list_events()?;

        let saved = match input.id {
            Some(id) => {
                let Some(event) = all.iter_mut().find(|e| e.id == id) else {
                    return Err(StoreError::NotFound {
                        collection: COLLECTION_CALENDAR_EVENTS,
                        id,
                    });
                };
                event.title = input.title;
                event.description = input.description;
                event.date = input.date;
                event.clone()
            }
            None => {
                let event = CalendarEvent {
                    id: EntityId::now(),
                    title: input.title,
                    description: input.description,
                    date: input.date,
                };
                all.push(event.clone());
                event
            }
        };

        self.write_collection(COLLECTION_CALENDAR_EVENTS, &all)?;

        tracing::info!(id = %saved.id, date = %saved.date, "event saved");
        Ok(saved)
    }

    /// Remove an event.
    pub fn delete_event(&self, id: EntityId) -> Result<()> {
        let mut all = self.list_events()?;
        let before = all.len();
        all.retain(|e| e.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound {
                collection: COLLECTION_CALENDAR_EVENTS,
                id,
            });
        }
        self.write_collection(COLLECTION_CALENDAR_EVENTS, &all)?;

        tracing::info!(%id, "event deleted");
        Ok(())
    }

    /// Drop events dated before `today`. Run once at sign-in.
    ///
    /// Returns how many events were removed; nothing is written when the
    /// sweep finds none.
    pub fn sweep_past_events(&self, today: NaiveDate) -> Result<usize> {
        let mut all = self.list_events()?;
        let before = all.len();
        all.retain(|e| e.date >= today);
        let removed = before - all.len();

        if removed > 0 {
            self.write_collection(COLLECTION_CALENDAR_EVENTS, &all)?;
            tracing::info!(removed, "past events swept");
        }
        Ok(removed)
    }
}
