//! Bridge from `validator` derive results to [`CoreError`].

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived validation rules on `input`.
///
/// Field errors are flattened into a single message of the form
/// `"field: message; field: message"`, sorted by field name so the output
/// is stable across runs.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(format_errors(&errors)))
}

/// Render validation errors as `"field: message"` pairs.
///
/// Falls back to the rule code when a rule carries no custom message.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
