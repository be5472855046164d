use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use validator::Validate;

use crate::domain::notification::{HEARING_REMINDER, NewReminder};
use crate::forms::FormError;
use crate::forms::auth::optional;

#[derive(Debug, Default, Deserialize, Validate)]
/// Hearing reminder form.
pub struct ReminderForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    #[validate(length(max = 100))]
    pub case_number: Option<String>,
    /// `datetime-local` (`2025-03-14T09:30`) or plain date input.
    pub reminder_date: Option<String>,
}

/// Normalizes a browser date or date-time to `YYYY-MM-DDTHH:MM:SS`.
fn reminder_timestamp(raw: &str) -> Option<String> {
    let timestamp = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(9, 0, 0).unwrap_or_default())
        })
        .ok()?;
    Some(timestamp.format("%Y-%m-%dT%H:%M:%S").to_string())
}

impl TryFrom<ReminderForm> for NewReminder {
    type Error = FormError;

    fn try_from(form: ReminderForm) -> Result<Self, Self::Error> {
        let form = ReminderForm {
            title: form.title.trim().to_string(),
            message: form.message.trim().to_string(),
            ..form
        };
        form.validate()?;
        let reminder_date = match optional(form.reminder_date) {
            Some(raw) => Some(reminder_timestamp(&raw).ok_or(FormError::InvalidDate("Hearing date"))?),
            None => None,
        };
        Ok(NewReminder {
            title: form.title,
            message: form.message,
            notification_type: HEARING_REMINDER,
            case_number: optional(form.case_number),
            reminder_date,
        })
    }
}
