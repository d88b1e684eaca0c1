//! Request and response bodies.

pub mod request;
pub mod response;

use validator::Validate;

use pvz_core::error::AppError;

/// Runs `validator` rules on a request body, joining every failure into
/// one validation error.
pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}
