//! # bayanihan-store
//!
//! Local persistent storage for the Bayanihan portal, backed by SQLite.
//!
//! The persisted layout is a single key-value table of named collections,
//! each value a JSON array of records — the same contract the portal's
//! web build kept in browser localStorage, so existing data stays
//! readable. The crate exposes a synchronous [`Database`] handle that
//! wraps a `rusqlite::Connection` and provides typed accessors and the
//! domain mutators for every collection.
//!
//! Mutators that cross the resident/moderator boundary fan a notification
//! record out to the counterpart audience's collection (see
//! [`fanout`](crate::fanout)).

pub mod analytics;
pub mod announcements;
pub mod audit;
pub mod calendar;
pub mod certificates;
pub mod collections;
pub mod database;
pub mod migrations;
pub mod models;
pub mod notifications;
pub mod reports;

mod error;
mod fanout;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
