use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::validation::{Validate, ValidationErrors};

/// Longest accepted title, in characters
pub const TITLE_MAX_CHARS: usize = 255;

/// Longest accepted description, in characters
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// A to-do item as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: Option<String>,
    pub created_at: Timestamp,
    pub done_at: Option<Timestamp>,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// Payload for creating a to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

impl Validate for NewTodo {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_title(&self.title, &mut errors);
        check_description(self.description.as_deref(), &mut errors);
        errors.into_result()
    }
}

/// Partial update of a to-do item; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Validate for TodoPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.is_none() && self.description.is_none() && self.completed.is_none() {
            errors.add("body", "at least one field must be provided");
        }
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        check_description(self.description.as_deref(), &mut errors);

        errors.into_result()
    }
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    if title.trim().is_empty() {
        errors.add("title", "must not be blank");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.add("title", format!("must be at most {TITLE_MAX_CHARS} characters"));
    }
}

fn check_description(description: Option<&str>, errors: &mut ValidationErrors) {
    if let Some(description) = description
        && description.chars().count() > DESCRIPTION_MAX_CHARS
    {
        errors.add(
            "description",
            format!("must be at most {DESCRIPTION_MAX_CHARS} characters"),
        );
    }
}
