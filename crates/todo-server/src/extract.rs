use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use todo_core::{Validate, ValidationErrors};

use crate::fault::Fault;

/// JSON body that has been deserialized and validated
///
/// A body of the wrong shape and a body failing [`Validate`] are both
/// validation faults; syntax errors and a missing content type are
/// classified client faults carrying the framework's message.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Fault;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(rejection_fault)?;

        value.validate()?;

        Ok(Self(value))
    }
}

fn rejection_fault(rejection: JsonRejection) -> Fault {
    match rejection {
        JsonRejection::JsonDataError(error) => {
            let mut errors = ValidationErrors::new();
            errors.add("body", error.body_text());
            Fault::Validation(errors)
        }
        other => Fault::classified(other.status(), other.body_text()),
    }
}
