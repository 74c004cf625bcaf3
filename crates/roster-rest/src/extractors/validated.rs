//! Validated JSON extractor.
//!
//! Deserializes the body and runs its `validator` rules before the handler
//! sees it. Failures come back as 400 responses in the usual envelope, with
//! field-level details for rule violations.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use roster_core::{field_errors, validation_errors_to_roster_error, ErrorResponse, RosterError};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn json_rejection(rejection: &JsonRejection) -> AppError {
    let error = RosterError::validation(format!("Invalid JSON: {rejection}"));
    let response = ErrorResponse {
        code: "INVALID_JSON".to_string(),
        message: error.to_string(),
        details: None,
    };
    AppError::with_response(error, response)
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| json_rejection(&rejection))?;

        if let Err(errors) = value.validate() {
            let details = field_errors(&errors);
            let error = validation_errors_to_roster_error(errors);
            let response = ErrorResponse::from_error(&error).with_details(details);
            return Err(AppError::with_response(error, response));
        }

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest};
    use roster_core::validation::rules::not_blank;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[validate(custom(function = "not_blank", message = "Name is required"))]
        name: String,
    }

    fn request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(signup) = ValidatedJson::<Signup>::from_request(request(r#"{"name":"Ann"}"#), &())
            .await
            .unwrap();
        assert_eq!(signup.name, "Ann");
    }

    #[tokio::test]
    async fn test_rule_violation_carries_field_details() {
        let err = ValidatedJson::<Signup>::from_request(request(r#"{"name":"  "}"#), &())
            .await
            .unwrap_err();

        assert!(matches!(err.0, RosterError::Validation(_)));
        let details = err.1.and_then(|r| r.details).unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "name");
        assert_eq!(details[0].message, "Name is required");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let err = ValidatedJson::<Signup>::from_request(request("{"), &())
            .await
            .unwrap_err();
        assert_eq!(err.1.unwrap().code, "INVALID_JSON");
    }
}
