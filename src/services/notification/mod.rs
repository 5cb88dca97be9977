use anyhow::Result;
use notify_rust::{Notification, Timeout};

use crate::models::task::TaskId;

/// Semantic events surfaced to the user by a notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TaskCreated { id: TaskId, name: String },
    TaskUpdated { id: TaskId, name: String },
    TaskDeleted { id: TaskId, name: String },
    /// Advisory failure; the engine state is unaffected.
    Failed { message: String },
}

impl Notice {
    pub fn summary(&self) -> &'static str {
        match self {
            Notice::TaskCreated { .. } => "Task created",
            Notice::TaskUpdated { .. } => "Task updated",
            Notice::TaskDeleted { .. } => "Task deleted",
            Notice::Failed { .. } => "Something went wrong",
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Notice::TaskCreated { name, .. }
            | Notice::TaskUpdated { name, .. }
            | Notice::TaskDeleted { name, .. } => name,
            Notice::Failed { message } => message,
        }
    }

    pub fn urgency(&self) -> NotificationUrgency {
        match self {
            Notice::Failed { .. } => NotificationUrgency::Critical,
            _ => NotificationUrgency::Normal,
        }
    }
}

/// Receives notices; presentation is up to the implementor.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&mut self, notice: Notice) {
        match notice.urgency() {
            NotificationUrgency::Normal => log::info!("{}: {}", notice.summary(), notice.body()),
            NotificationUrgency::Critical => log::warn!("{}: {}", notice.summary(), notice.body()),
        }
    }
}

/// Service for displaying system notifications
pub struct NotificationService {
    enabled: bool,
}

impl NotificationService {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Check if notifications are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable notifications
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Show a notification with a title and body
    pub fn show(&self, title: &str, body: &str, urgency: NotificationUrgency) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let timeout = match urgency {
            NotificationUrgency::Normal => Timeout::Milliseconds(5000),
            NotificationUrgency::Critical => Timeout::Milliseconds(10000),
        };

        Notification::new()
            .summary(title)
            .body(body)
            .timeout(timeout)
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shows notices as desktop notifications, logging any delivery failure.
#[derive(Default)]
pub struct DesktopNotificationSink {
    service: NotificationService,
}

impl DesktopNotificationSink {
    pub fn new(service: NotificationService) -> Self {
        Self { service }
    }
}

impl NotificationSink for DesktopNotificationSink {
    fn notify(&mut self, notice: Notice) {
        if let Err(e) = self
            .service
            .show(notice.summary(), notice.body(), notice.urgency())
        {
            log::warn!("{}", e);
        }
    }
}

/// Notification urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationUrgency {
    Normal,
    Critical,
}
