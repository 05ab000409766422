//! HTTP handlers: thin request validation and response shaping over the
//! domain services.

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod extractors;
pub mod health;
pub mod orders;
pub mod products;
pub mod response;
pub mod storage;
pub mod users;

use validator::Validate;

use crate::error::{ApiError, Result};

/// Run the validator derives on a request body and fold all failures into a
/// single 400 response.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<()> {
    payload.validate().map_err(|errors| {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{} is invalid", field)),
                }
            }
        }
        if messages.is_empty() {
            messages.push("request body failed validation".to_string());
        }
        ApiError::Validation(format!("Validation failed: {}", messages.join("; ")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
        name: String,
    }

    #[test]
    fn test_validate_payload_collects_messages() {
        let bad = Sample {
            name: "x".to_string(),
        };
        let err = validate_payload(&bad).unwrap_err();
        assert!(err.to_string().contains("Name must be at least 2 characters"));

        let good = Sample {
            name: "ok".to_string(),
        };
        assert!(validate_payload(&good).is_ok());
    }
}
