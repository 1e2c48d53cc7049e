use serde::Serialize;

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field path as it appears on the wire (e.g. `title`)
    pub field: String,
    /// Why the value was rejected
    pub message: String,
}

/// Outcome of a failed validation step
///
/// Carried as its own variant through the server's fault handling so that
/// validation failures are recognised by tag rather than by inspecting
/// arbitrary error types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed{}", describe_fields(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a rejected field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one field was rejected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// `: field: message; field: message`, or nothing when empty
fn describe_fields(errors: &[FieldError]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (i, error) in errors.iter().enumerate() {
        let sep = if i == 0 { ": " } else { "; " };
        let _ = write!(out, "{sep}{}: {}", error.field, error.message);
    }
    out
}

/// Input that can check itself after deserialization
pub trait Validate {
    /// # Errors
    ///
    /// Returns every rejected field
    fn validate(&self) -> Result<(), ValidationErrors>;
}
