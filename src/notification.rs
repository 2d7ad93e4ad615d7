//! Desktop notifications via freedesktop D-Bus.

use crate::editor::{Notice, NoticeLevel};
use std::collections::HashMap;
use zbus::{Connection, proxy};

/// Notification display time in milliseconds.
const EXPIRE_TIMEOUT_MS: i32 = 3000;

/// D-Bus interface for freedesktop Notifications.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Send a notification.
    ///
    /// # Returns
    /// Notification ID
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Send a desktop notification.
///
/// # Arguments
/// * `summary` - Notification title
/// * `body` - Notification body text
/// * `icon` - Optional icon name (defaults to "applications-graphics")
pub async fn send_notification(summary: &str, body: &str, icon: Option<&str>) -> Result<(), String> {
    let connection = Connection::session()
        .await
        .map_err(|e| format!("Failed to connect to session bus: {}", e))?;

    let proxy = NotificationsProxy::new(&connection)
        .await
        .map_err(|e| format!("Failed to create notifications proxy: {}", e))?;

    proxy
        .notify(
            "Arto",
            0,
            icon.unwrap_or("applications-graphics"),
            summary,
            body,
            vec![],
            HashMap::new(),
            EXPIRE_TIMEOUT_MS,
        )
        .await
        .map_err(|e| format!("Failed to send notification: {}", e))?;

    Ok(())
}

/// Forward editor notices to the desktop, blocking until they are delivered.
///
/// Failures are logged and otherwise ignored.
pub fn send_notices_blocking(notices: &[Notice]) {
    if notices.is_empty() {
        return;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            log::warn!("Failed to create Tokio runtime for notifications: {}", e);
            return;
        }
    };

    runtime.block_on(async {
        for notice in notices {
            let (summary, icon) = notice_presentation(notice.level);
            if let Err(e) = send_notification(summary, &notice.message, Some(icon)).await {
                log::warn!("{}", e);
            }
        }
    });
}

fn notice_presentation(level: NoticeLevel) -> (&'static str, &'static str) {
    match level {
        NoticeLevel::Info => ("Arto", "applications-graphics"),
        NoticeLevel::Warning => ("Arto: action unavailable", "dialog-warning"),
        NoticeLevel::Error => ("Arto: action failed", "dialog-error"),
    }
}
