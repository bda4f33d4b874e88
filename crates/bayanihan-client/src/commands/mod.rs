//! Tauri invoke command handlers.
//!
//! Each sub-module groups related commands by domain and is registered
//! in the [`tauri::Builder`] invoke handler in `lib.rs`; `media` holds
//! the shared attachment-encoding helpers. Commands are thin: they
//! resolve the session, call a store mutator, record the audit entry,
//! and emit change events for every written collection.

pub mod analytics;
pub mod announcements;
pub mod audit;
pub mod calendar;
pub mod certificates;
pub mod media;
pub mod notifications;
pub mod reports;
pub mod session;
