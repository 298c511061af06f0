use crate::error::StoreError;
use chrono::{SubsecRound, TimeDelta, Utc};
use sea_orm::prelude::DateTime;

/// Column widths, matching the schema
pub(crate) const SHORT_TEXT: usize = 255;
pub(crate) const LONG_TEXT: usize = 500;
pub(crate) const TAG_TEXT: usize = 50;

/// Current time, truncated to what every supported engine can store
pub(crate) fn now() -> DateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Next `updated_at` for a row last written at `previous`; always strictly later
pub(crate) fn touched(previous: DateTime) -> DateTime {
    let now = now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

/// Trims a required text field and checks it is present and fits its column
pub(crate) fn required(field: &str, value: String, max_len: usize) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::validation(format!("{field} must not be blank")));
    }
    check_len(field, value, max_len)?;
    Ok(value.to_owned())
}

/// Trims an optional text field; blank input is stored as absent
pub(crate) fn optional(
    field: &str,
    value: Option<String>,
    max_len: Option<usize>,
) -> Result<Option<String>, StoreError> {
    let Some(value) = value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
    else {
        return Ok(None);
    };

    if let Some(max_len) = max_len {
        check_len(field, &value, max_len)?;
    }
    Ok(Some(value))
}

fn check_len(field: &str, value: &str, max_len: usize) -> Result<(), StoreError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(StoreError::validation(format!(
            "{field} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(())
}
