//! Mutating-operation commands and their pure validators.
//!
//! Each command is the decoded JSON body of one endpoint. Validation is a
//! pure function over the command and "today": no persistence is touched
//! before a command passes. Absent fields and empty strings are equivalent —
//! both mean "not supplied" — which keeps partial updates forgiving about
//! how clients omit fields.
//!
//! Due-date boundary policy: a date is accepted when it is **not before
//! today** (today itself is valid), held identically for create and update.
//! The boundary is evaluated exactly once, inside `validate`; the `due_date`
//! accessors only parse, so post-validation callers (store, merge view) see
//! a stable result even when local midnight passes mid-request.

use crate::libs::errors::TaskError;
use chrono::{Local, NaiveDate};
use serde::Deserialize;

const TITLE_MAX_CHARS: usize = 255;
const DESCRIPTION_MAX_CHARS: usize = 500;
const DATE_FORMAT: &str = "%Y-%m-%d";

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn parse_due_date(raw: &str) -> Result<NaiveDate, TaskError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| TaskError::InvalidDueDate)
}

fn validate_due_date(raw: &str) -> Result<(), TaskError> {
    if parse_due_date(raw)? < Local::now().date_naive() {
        return Err(TaskError::InvalidDueDate);
    }
    Ok(())
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskCommand {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl CreateTaskCommand {
    pub fn title(&self) -> Option<&str> {
        supplied(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        supplied(&self.description)
    }

    /// The supplied due date, parsed. The not-before-today boundary belongs
    /// to `validate` alone.
    pub fn due_date(&self) -> Result<Option<NaiveDate>, TaskError> {
        supplied(&self.due_date).map(parse_due_date).transpose()
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        let title = self.title().ok_or(TaskError::TitleRequired)?;
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(TaskError::TitleTooLong);
        }
        if let Some(description) = self.description() {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                return Err(TaskError::DescriptionTooLong);
            }
        }
        if let Some(raw) = supplied(&self.due_date) {
            validate_due_date(raw)?;
        }
        Ok(())
    }
}

/// Body of `PUT /tasks/{id}`. All fields optional, at least one required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskCommand {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl UpdateTaskCommand {
    pub fn title(&self) -> Option<&str> {
        supplied(&self.title)
    }

    pub fn description(&self) -> Option<&str> {
        supplied(&self.description)
    }

    /// The supplied due date, parsed. The not-before-today boundary belongs
    /// to `validate` alone.
    pub fn due_date(&self) -> Result<Option<NaiveDate>, TaskError> {
        supplied(&self.due_date).map(parse_due_date).transpose()
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if self.title().is_none() && self.description().is_none() && supplied(&self.due_date).is_none() {
            return Err(TaskError::NoFieldsToUpdate);
        }
        if let Some(title) = self.title() {
            if title.chars().count() > TITLE_MAX_CHARS {
                return Err(TaskError::TitleTooLong);
            }
        }
        if let Some(description) = self.description() {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                return Err(TaskError::DescriptionTooLong);
            }
        }
        if let Some(raw) = supplied(&self.due_date) {
            validate_due_date(raw)?;
        }
        Ok(())
    }
}

/// Body of `PATCH /tasks/{id}/complete`.
///
/// `completed` must be explicitly present; JSON `null` counts as absent,
/// `false` is a valid explicit value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeCompletionCommand {
    #[serde(default)]
    pub completed: Option<bool>,
}

impl ChangeCompletionCommand {
    pub fn validate(&self) -> Result<bool, TaskError> {
        self.completed.ok_or(TaskError::CompletionStatusRequired)
    }
}
