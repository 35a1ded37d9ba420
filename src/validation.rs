//! Checks for the text fields of request bodies.

use email_address::EmailAddress;
use rust_decimal::Decimal;

use crate::Error;

/// The longest title, name or code the API accepts.
pub const MAX_TEXT_LENGTH: usize = 64;

/// Trim `value` and check that it is not empty and at most [MAX_TEXT_LENGTH] characters.
///
/// `field` names the field in the error message.
///
/// # Errors
///
/// Returns [Error::Validation] if the trimmed value is empty or too long.
pub fn validate_text(field: &str, value: &str) -> Result<String, Error> {
    let value = value.trim();

    if value.is_empty() {
        return Err(Error::Validation(format!("{field} cannot be empty")));
    }

    if value.chars().count() > MAX_TEXT_LENGTH {
        return Err(Error::Validation(format!(
            "{field} cannot be longer than {MAX_TEXT_LENGTH} characters"
        )));
    }

    Ok(value.to_owned())
}

/// Like [validate_text] but an absent or blank value is allowed and becomes `None`.
///
/// # Errors
///
/// Returns [Error::Validation] if the value is too long.
pub fn validate_optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => validate_text(field, value).map(Some),
    }
}

/// The most significant digits a money value may have.
///
/// Money values are rendered as JSON numbers, and every decimal within these
/// limits survives the trip through `f64` unchanged.
pub const MAX_DECIMAL_DIGITS: usize = 15;
/// The most digits a money value may have after the decimal point.
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Check that `value` fits in [MAX_DECIMAL_DIGITS] significant digits and
/// [MAX_DECIMAL_PLACES] decimal places.
///
/// # Errors
///
/// Returns [Error::Validation] if the value is too precise.
pub fn validate_decimal(field: &str, value: Decimal) -> Result<Decimal, Error> {
    let normalized = value.normalize();

    if normalized.scale() > MAX_DECIMAL_PLACES {
        return Err(Error::Validation(format!(
            "{field} cannot have more than {MAX_DECIMAL_PLACES} decimal places"
        )));
    }

    if normalized.mantissa().unsigned_abs().to_string().len() > MAX_DECIMAL_DIGITS {
        return Err(Error::Validation(format!(
            "{field} cannot have more than {MAX_DECIMAL_DIGITS} significant digits"
        )));
    }

    Ok(value)
}

/// [validate_decimal] for a field that may be absent.
///
/// # Errors
///
/// Returns [Error::Validation] if the value is too precise.
pub fn validate_optional_decimal(
    field: &str,
    value: Option<Decimal>,
) -> Result<Option<Decimal>, Error> {
    value.map(|value| validate_decimal(field, value)).transpose()
}

/// Check that `value` is a well-formed email address.
///
/// # Errors
///
/// Returns [Error::Validation] if the address is malformed or too long.
pub fn validate_email(value: &str) -> Result<String, Error> {
    let value = validate_text("email", value)?;

    if !EmailAddress::is_valid(&value) {
        return Err(Error::Validation(format!(
            "\"{value}\" is not a valid email address"
        )));
    }

    Ok(value)
}
