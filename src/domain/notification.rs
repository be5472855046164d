use serde::{Deserialize, Serialize};

/// Type given to reminders created from the notifications page.
pub const HEARING_REMINDER: &str = "hearing_reminder";

/// Hearing reminder or system notice addressed to the signed-in user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub notification_type: String,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub reminder_date: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Reminder posted to `POST /notifications`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewReminder {
    pub title: String,
    pub message: String,
    pub notification_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    /// ISO-8601 local date and time of the hearing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
}
