use chrono::{DateTime, TimeDelta, Utc};

use crate::errors::CoreError;
use crate::models::id::RecordId;
use crate::models::parse_timestamp;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// Text the user has typed into a create/edit form, before normalisation.
pub trait Draft: Default + Clone {
    /// Record this form edits.
    type Record;

    /// Normalised body sent to the backend.
    type Payload;

    /// Capitalised entity name used in messages, e.g. "Goal".
    const ENTITY: &'static str;

    /// Prefill from an existing record.
    fn from_record(record: &Self::Record) -> Self;

    fn record_id(record: &Self::Record) -> RecordId;

    /// Required-field check followed by normalisation. `now` stands in for
    /// an empty date field.
    fn to_payload(&self, now: DateTime<Utc>) -> Result<Self::Payload, CoreError>;
}

/// Whether the shared form creates a new record or edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(RecordId),
}

/// Banner shown above the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormNotice {
    Error(String),
    /// Shown until `hide_at`, when the form closes.
    Success {
        message: String,
        hide_at: DateTime<Utc>,
    },
}

/// State of a create/edit form.
#[derive(Debug, Clone, Default)]
pub struct FormState<D> {
    visible: bool,
    mode: FormMode,
    pub draft: D,
    notice: Option<FormNotice>,
}

impl<D: Draft> FormState<D> {
    pub fn new() -> Self {
        Self {
            visible: false,
            mode: FormMode::Creating,
            draft: D::default(),
            notice: None,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub fn notice(&self) -> Option<&FormNotice> {
        self.notice.as_ref()
    }

    /// Heading of the form, e.g. "Add New Goal" / "Edit Goal".
    #[must_use]
    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Creating => format!("Add New {}", D::ENTITY),
            FormMode::Editing(_) => format!("Edit {}", D::ENTITY),
        }
    }

    pub fn open_create(&mut self) {
        self.visible = true;
        self.mode = FormMode::Creating;
        self.draft = D::default();
        self.notice = None;
    }

    pub fn open_edit(&mut self, record: &D::Record) {
        self.visible = true;
        self.mode = FormMode::Editing(D::record_id(record));
        self.draft = D::from_record(record);
        self.notice = None;
    }

    /// Close and forget everything typed.
    pub fn cancel(&mut self) {
        self.visible = false;
        self.mode = FormMode::Creating;
        self.draft = D::default();
        self.notice = None;
    }

    /// The "Add" / "Cancel" header button. Closing while editing discards
    /// the edit; opening always starts a fresh create.
    pub fn toggle(&mut self) {
        if self.visible {
            self.cancel();
        } else {
            self.open_create();
        }
    }

    /// Close the form once its success banner has expired. Returns whether
    /// it closed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match &self.notice {
            Some(FormNotice::Success { hide_at, .. }) if now >= *hide_at => {
                self.visible = false;
                self.notice = None;
                true
            }
            _ => false,
        }
    }

    /// Validate the draft. On failure the error is shown inline and no
    /// request should be made.
    pub(crate) fn begin_submit(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<(FormMode, D::Payload), CoreError> {
        self.notice = None;
        match self.draft.to_payload(now) {
            Ok(payload) => Ok((self.mode.clone(), payload)),
            Err(e) => {
                let message = match &e {
                    CoreError::ValidationError(message) => message.clone(),
                    other => other.to_string(),
                };
                self.notice = Some(FormNotice::Error(message));
                Err(e)
            }
        }
    }

    /// The save went through: show the banner, reset to an empty create
    /// form, and schedule the close.
    pub(crate) fn submit_succeeded(
        &mut self,
        mode: &FormMode,
        now: DateTime<Utc>,
        dismiss_after: TimeDelta,
    ) {
        let verb = match mode {
            FormMode::Creating => "added",
            FormMode::Editing(_) => "updated",
        };
        self.notice = Some(FormNotice::Success {
            message: format!("{} {verb} successfully!", D::ENTITY),
            hide_at: now
                .checked_add_signed(dismiss_after)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        });
        self.draft = D::default();
        self.mode = FormMode::Creating;
    }

    /// The save failed: keep the draft for a retry.
    pub(crate) fn submit_failed(&mut self, mode: &FormMode) {
        let verb = match mode {
            FormMode::Creating => "add",
            FormMode::Editing(_) => "update",
        };
        self.notice = Some(FormNotice::Error(format!(
            "Failed to {verb} {}. Please try again.",
            D::ENTITY.to_lowercase()
        )));
    }
}

/// Numeric form input, read like a browser number parse: the longest
/// numeric prefix counts ("12abc" is 12, "1,000" is 1) and text with no
/// leading number, or an infinite one, reads as 0.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    let text = raw.trim_start();
    let numeric_len = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let candidate = &text[..numeric_len];

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Date form input; blank means `now`.
pub fn parse_form_date(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, CoreError> {
    if raw.trim().is_empty() {
        return Ok(now);
    }
    parse_timestamp(raw).ok_or_else(|| CoreError::ValidationError(format!("Invalid date: {raw}")))
}

/// Render a stored date for a date input (`YYYY-MM-DD`), or blank.
#[must_use]
pub fn format_form_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn require(fields: &[&str]) -> Result<(), CoreError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(CoreError::ValidationError(REQUIRED_FIELDS_MESSAGE.into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::pages::goals::GoalDraft;

    #[test]
    fn amounts_default_to_zero() {
        assert_eq!(parse_amount("56000"), 56000.0);
        assert_eq!(parse_amount(" 12.5 "), 12.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
    }

    #[test]
    fn amounts_read_leading_number() {
        assert_eq!(parse_amount("12abc"), 12.0);
        assert_eq!(parse_amount("1,000"), 1.0);
        assert_eq!(parse_amount("1e3x"), 1000.0);
        assert_eq!(parse_amount("2.5.1"), 2.5);
        assert_eq!(parse_amount("-40 rupees"), -40.0);
        assert_eq!(parse_amount("7e"), 7.0);
    }

    #[test]
    fn huge_dismiss_delay_never_closes() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap();
        let mut form: FormState<GoalDraft> = FormState::new();
        form.open_create();

        form.submit_succeeded(&FormMode::Creating, now, TimeDelta::MAX);

        let year_later = Utc.with_ymd_and_hms(2027, 3, 1, 10, 0, 0).unwrap();
        assert!(!form.tick(year_later));
        assert!(form.is_visible());
    }

    #[test]
    fn blank_date_is_now() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_form_date("", now).unwrap(), now);
        assert_eq!(
            parse_form_date("2025-12-31", now).unwrap(),
            Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
        );
        assert!(matches!(
            parse_form_date("31/12/2025", now),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn form_date_round_trips_through_input_format() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(format_form_date(Some(date)), "2024-01-15");
        assert_eq!(format_form_date(None), "");
    }
}
