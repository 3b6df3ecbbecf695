use super::FeedEvent;
use std::fmt;

/// Validation errors for FeedEvent
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingName(i64),
    InvalidDigestionPeriod(i64, f64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName(id) => {
                write!(f, "animal_added for id {} has an empty name", id)
            }
            ValidationError::InvalidDigestionPeriod(id, hours) => {
                write!(
                    f,
                    "animal_added for id {} has digestion period {} (must be a positive number of hours)",
                    id, hours
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a FeedEvent's field values.
///
/// Validation rules:
/// - `animal_added` name must be non-empty (occupant lists are name-based)
/// - `animal_added` digestion period must be positive and finite
///
/// All other kinds carry only ids, locations, and timestamps, which are
/// shape-checked by deserialization; the applier handles unknown ids.
pub fn validate(event: &FeedEvent) -> Result<(), ValidationError> {
    if let FeedEvent::AnimalAdded {
        id,
        name,
        digestion_period_in_hours,
        ..
    } = event
    {
        if name.is_empty() {
            return Err(ValidationError::MissingName(*id));
        }
        if !(digestion_period_in_hours.is_finite() && *digestion_period_in_hours > 0.0) {
            return Err(ValidationError::InvalidDigestionPeriod(
                *id,
                *digestion_period_in_hours,
            ));
        }
    }

    Ok(())
}
