//! # Validation Module
//!
//! Required-field checks run before any request leaves the device.
//!
//! A field counts as present when it is non-empty. Whitespace-only text is
//! accepted, which is how the forms have always behaved.

use crate::error::ValidationError;

/// Fails with `Required` when `value` is empty.
pub fn validate_required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Login and registration both need an email and a password.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_required("email", email)?;
    validate_required("password", password)?;
    Ok(())
}

/// A listing needs brand, model and price.
pub fn validate_listing_required(
    marca: &str,
    modelo: &str,
    preco: &str,
) -> Result<(), ValidationError> {
    validate_required("marca", marca)?;
    validate_required("modelo", modelo)?;
    validate_required("preco", preco)?;
    Ok(())
}
