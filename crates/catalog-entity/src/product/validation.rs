//! Custom validators for product fields.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Fractional digits allowed by `NUMERIC(18,2)`.
pub const PRICE_SCALE: u32 = 2;

/// Integer digits allowed by `NUMERIC(18,2)`.
pub const PRICE_INTEGER_DIGITS: usize = 16;

/// Reject prices that would not fit a `NUMERIC(18,2)` column.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let normalized = price.normalize();
    if normalized.scale() > PRICE_SCALE {
        let mut err = ValidationError::new("price_scale");
        err.message = Some("Price must have at most 2 decimal places".into());
        return Err(err);
    }

    let integer_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len();
    if integer_digits > PRICE_INTEGER_DIGITS {
        let mut err = ValidationError::new("price_precision");
        err.message = Some("Price must have at most 16 integer digits".into());
        return Err(err);
    }

    Ok(())
}
