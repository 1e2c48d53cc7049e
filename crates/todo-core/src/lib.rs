#![allow(clippy::must_use_candidate)]

//! Wire types shared by the todo API server and its client
//!
//! The error envelope defined here is the only failure shape that crosses
//! the HTTP boundary in either direction

pub mod envelope;
pub mod todo;
pub mod validation;

pub use envelope::{ErrorCode, ErrorEnvelope};
pub use todo::{NewTodo, Todo, TodoPatch};
pub use validation::{FieldError, Validate, ValidationErrors};
