//! Request validation that reports a single, stable message per request.

use validator::Validate;

use crate::error::AppError;

/// A request body validated with `validator`, reporting the first failing
/// field in `FIELD_ORDER` as a `400 Bad Request`.
pub trait ValidateRequest: Validate {
    /// Fields in the order their failures take precedence.
    const FIELD_ORDER: &'static [&'static str];

    fn validate_request(&self) -> Result<(), AppError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let field_errors = errors.field_errors();
        let message = Self::FIELD_ORDER
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .chain(field_errors.values())
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|msg| msg.to_string()))
            .unwrap_or_else(|| errors.to_string());

        Err(AppError::bad_request(message))
    }
}
