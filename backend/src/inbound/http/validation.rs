//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every field-level rejection carries `details: { field, code }` so clients
//! can highlight the offending input.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, MenuItemValidationError, RegistrationValidationError,
    RestaurantValidationError, UploadValidationError, UserValidationError,
};

/// Build an `invalid_request` error pointing at `field`.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(field, "missing_field", format!("{field} is required"))
}

/// Parse an identifier from a path or query segment.
///
/// Malformed identifiers are reported as `404 Not Found` when they address a
/// resource by path, since no record can match them.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("{resource} not found")))
}

pub(crate) fn restaurant_form_error(err: RestaurantValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn menu_item_form_error(err: MenuItemValidationError) -> Error {
    field_error(err.field(), err.code(), err.to_string())
}

pub(crate) fn registration_error(err: RegistrationValidationError) -> Error {
    let code = match &err {
        RegistrationValidationError::Name(UserValidationError::DisplayNameTooLong { .. }) => {
            "name_too_long"
        }
        RegistrationValidationError::Name(_) => "empty_name",
        RegistrationValidationError::Email(_) => "invalid_email",
        RegistrationValidationError::PasswordTooShort { .. } => "password_too_short",
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn login_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyEmail => "email",
        LoginValidationError::EmptyPassword => "password",
    };
    field_error(field, "missing_field", err.to_string())
}

pub(crate) fn upload_error(err: UploadValidationError) -> Error {
    let code = match err {
        UploadValidationError::InvalidFolder => "invalid_folder",
        UploadValidationError::UnsupportedFileType => "unsupported_file_type",
        UploadValidationError::InvalidKey => "invalid_key",
    };
    field_error(err.field(), code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, RestaurantId};
    use rstest::rstest;

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error("restaurantId");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "restaurantId is required");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "restaurantId");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn malformed_path_ids_are_not_found(#[case] raw: &str) {
        let err = parse_path_id::<RestaurantId>(raw, "restaurant").expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn upload_error_uses_field_and_code() {
        let err = upload_error(UploadValidationError::UnsupportedFileType);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "fileName");
        assert_eq!(details["code"], "unsupported_file_type");
    }
}
