#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed HTTP gateway for the todo API
//!
//! Every outgoing call goes through [`TodoClient`]. Non-success responses
//! are decoded from the shared error envelope into [`ApiError::Api`].

mod client;
pub mod error;

pub use client::{BASE_URL_ENV, TodoClient};
pub use error::{ApiError, Result};
pub use todo_core::{ErrorEnvelope, NewTodo, Todo, TodoPatch};
