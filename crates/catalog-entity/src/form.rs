//! Parsing helpers for HTML form input.

use std::str::FromStr;

use catalog_core::error::AppError;
use catalog_core::result::AppResult;

/// Parse the raw value submitted for `field`, treating a blank value as absent.
///
/// Browsers submit every input of a form, so an untouched text box arrives
/// as `field=` rather than being omitted. Input that does not parse is a
/// validation error naming the field and the offending value.
pub fn parse_field<T: FromStr>(field: &str, raw: Option<&str>) -> AppResult<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(|_| {
            AppError::validation(format!("The value '{value}' is not valid for {field}."))
        }),
    }
}
