pub mod commands;
pub mod events;
pub mod state;

use std::sync::{Arc, Mutex};

use tracing_subscriber::{fmt, EnvFilter};

use crate::state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("bayanihan_client_lib=debug,bayanihan_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!("Starting Bayanihan desktop client");

    let app_state = Arc::new(Mutex::new(AppState::new()));

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_notification::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            commands::session::sign_in,
            commands::session::sign_out,
            commands::session::current_session,
            commands::announcements::list_announcements,
            commands::announcements::create_announcement,
            commands::announcements::add_comment,
            commands::announcements::delete_announcement,
            commands::reports::list_reports,
            commands::reports::submit_report,
            commands::reports::update_report_status,
            commands::reports::cancel_report,
            commands::reports::delete_report,
            commands::certificates::list_certificate_requests,
            commands::certificates::submit_certificate_request,
            commands::certificates::decide_certificate_request,
            commands::certificates::delete_certificate_request,
            commands::calendar::list_events,
            commands::calendar::events_on,
            commands::calendar::save_event,
            commands::calendar::delete_event,
            commands::notifications::list_notifications,
            commands::notifications::unread_notification_count,
            commands::notifications::mark_notification_read,
            commands::notifications::mark_all_notifications_read,
            commands::notifications::mark_notifications_of_kind_read,
            commands::notifications::delete_notification,
            commands::notifications::clear_notifications,
            commands::notifications::list_inbox,
            commands::notifications::mark_inbox_message_read,
            commands::notifications::delete_inbox_message,
            commands::audit::list_audit_log,
            commands::analytics::analytics_snapshot,
        ])
        .run(tauri::generate_context!())
        .expect("Failed to run Tauri application");
}
