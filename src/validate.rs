//! Field validation, applied in a fixed order that stops at the first failure:
//!
//! 1. Presence: a required field with no default must be in the source.
//! 2. Choices: the coerced value must equal one of the declared choices.
//! 3. Kind constraints:
//!    - string: `min_length`, `max_length`, `pattern`, then the validator
//!    - number: `min`, `max` (inclusive), then the validator
//!    - boolean / object: the validator
//!
//! Steps 2 and 3 are skipped when the field is optional and absent. Presence is
//! checked against the raw source before coercion; the rest run on the coerced
//! value.
//!
//! String lengths count Unicode scalar values.

use crate::error::EnvfigError;
use crate::schema::FieldDescriptor;
use crate::types::Value;

/// Fail if a required field without a default is absent from the source.
pub fn check_presence(
    descriptor: &FieldDescriptor,
    field: &str,
    raw: Option<&str>,
) -> Result<(), EnvfigError> {
    if raw.is_none() && descriptor.required && descriptor.default.is_none() {
        return Err(EnvfigError::MissingRequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Check choices and kind constraints on a coerced value.
pub fn validate(
    descriptor: &FieldDescriptor,
    field: &str,
    value: Option<&Value>,
) -> Result<(), EnvfigError> {
    let Some(value) = value else {
        return Ok(());
    };

    if let Some(choices) = &descriptor.choices
        && !choices.is_empty()
        && !choices.contains(value)
    {
        return Err(EnvfigError::InvalidEnum {
            field: field.to_string(),
            value: value.clone(),
            choices: choices.clone(),
        });
    }

    match value {
        Value::String(s) => check_string(descriptor, field, s)?,
        Value::Number(n) => check_number(descriptor, field, *n)?,
        Value::Boolean(_) | Value::Object(_) => {}
    }

    if let Some(validator) = &descriptor.validator
        && validator.check(value) == Some(false)
    {
        return Err(EnvfigError::CustomValidation {
            field: field.to_string(),
            value: value.clone(),
        });
    }

    Ok(())
}

fn check_string(descriptor: &FieldDescriptor, field: &str, s: &str) -> Result<(), EnvfigError> {
    let actual = s.chars().count();
    let too_short = descriptor.min_length.is_some_and(|min| actual < min);
    let too_long = descriptor.max_length.is_some_and(|max| actual > max);
    if too_short || too_long {
        return Err(EnvfigError::InvalidStringLength {
            field: field.to_string(),
            value: s.to_string(),
            actual,
            min: descriptor.min_length,
            max: descriptor.max_length,
        });
    }

    if let Some(pattern) = &descriptor.pattern
        && !pattern.is_match(s)
    {
        return Err(EnvfigError::InvalidPattern {
            field: field.to_string(),
            value: s.to_string(),
            pattern: pattern.as_str().to_string(),
        });
    }
    Ok(())
}

fn check_number(descriptor: &FieldDescriptor, field: &str, n: f64) -> Result<(), EnvfigError> {
    let below = descriptor.min.is_some_and(|min| n < min);
    let above = descriptor.max.is_some_and(|max| n > max);
    if below || above {
        return Err(EnvfigError::InvalidNumberRange {
            field: field.to_string(),
            value: n,
            min: descriptor.min,
            max: descriptor.max,
        });
    }
    Ok(())
}
