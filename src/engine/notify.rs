use anyhow::Result;
use log::info;

use crate::domain::Assignment;

use super::stores::NotificationSink;

/// Default sink: writes the notification to the log. A mail or chat
/// transport would slot in behind the same trait.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn assignment_responded(&self, admin: Option<&str>, assignment: &Assignment) -> Result<()> {
        info!(
            "Notify {}: referee {} responded to assignment {} ({}, match {}) -> {}",
            admin.unwrap_or("<unassigned>"),
            assignment.referee_id,
            assignment.id,
            assignment.role,
            assignment.match_id,
            assignment.status.as_str()
        );
        Ok(())
    }
}
