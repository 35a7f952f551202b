use crate::field::{Field, PatternValueType};
use thiserror::Error;

/// Crate specific Errors implementation.
///
/// Parsing is all-or-nothing: any rule violation in any field of any alternative
/// rejects the whole expression.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum CronError {
    /// Error parsing cron expression.
    #[error("invalid cron expression `{expression}`: {cause}")]
    InvalidExpression {
        /// Expression as it was provided by the caller.
        expression: String,
        /// What exactly is wrong with it.
        cause: InvalidCause,
    },
}

impl CronError {
    pub(crate) fn new(expression: impl Into<String>, cause: InvalidCause) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            cause,
        }
    }

    /// Returns the rejected expression.
    pub fn expression(&self) -> &str {
        match self {
            Self::InvalidExpression { expression, .. } => expression,
        }
    }

    /// Returns the reason of rejection.
    pub fn cause(&self) -> &InvalidCause {
        match self {
            Self::InvalidExpression { cause, .. } => cause,
        }
    }
}

/// Human-readable reason why an expression was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum InvalidCause {
    /// Nothing but whitespace (or `|` separators) was provided.
    #[error("expression is empty")]
    Empty,
    /// Wrong number of whitespace separated fields.
    #[error("expected {min} to {max} fields, found {found}")]
    FieldCount {
        /// Minimal allowed number of fields.
        min: usize,
        /// Maximal allowed number of fields.
        max: usize,
        /// Number of fields in the expression.
        found: usize,
    },
    /// Special character is used in a field which doesn't support it.
    #[error("`{operator}` can only be used for {allowed}, found in {field} field")]
    OperatorNotAllowed {
        /// Offending operator.
        operator: &'static str,
        /// Human-readable list of fields which accept the operator.
        allowed: &'static str,
        /// Field where the operator was found.
        field: Field,
    },
    /// Exclusive pattern (`*`, `?`, `L` or `LW`) is mixed with other list items.
    #[error("`{token}` can't be combined with other values in {field} field")]
    NotAlone {
        /// Field being parsed.
        field: Field,
        /// Exclusive token.
        token: String,
    },
    /// Token has a wrong shape, i.e. `1-2-3` or `5/`.
    #[error("malformed {kind} `{token}` in {field} field")]
    Malformed {
        /// Field being parsed.
        field: Field,
        /// What kind of sub-expression was expected.
        kind: &'static str,
        /// Offending token.
        token: String,
    },
    /// Numeric value is outside of the field's bounds.
    #[error("value `{token}` of {field} field is out of bounds {min}-{max}")]
    OutOfBounds {
        /// Field being parsed.
        field: Field,
        /// Offending token.
        token: String,
        /// Minimal allowed value.
        min: PatternValueType,
        /// Maximal allowed value.
        max: PatternValueType,
    },
    /// Token is neither a number nor a known alias.
    #[error("unknown value `{token}` in {field} field, allowed {min}-{max}")]
    UnknownValue {
        /// Field being parsed.
        field: Field,
        /// Offending token.
        token: String,
        /// Minimal allowed value.
        min: PatternValueType,
        /// Maximal allowed value.
        max: PatternValueType,
    },
    /// Range with the start after its end.
    #[error("range `{token}` of {field} field starts after it ends")]
    InvalidRange {
        /// Field being parsed.
        field: Field,
        /// Offending token.
        token: String,
    },
    /// Step of zero or larger than the field's maximum.
    #[error("step `{token}` of {field} field must be within 1-{max}")]
    InvalidStep {
        /// Field being parsed.
        field: Field,
        /// Offending token.
        token: String,
        /// Maximal allowed step.
        max: PatternValueType,
    },
    /// Instance number of `#` isn't within 1-5.
    #[error("weekday instance `{token}` must be within 1-5")]
    InvalidNthInstance {
        /// Offending token.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CronError::new(
            "? ? ?",
            InvalidCause::FieldCount {
                min: 4,
                max: 6,
                found: 3,
            },
        );
        assert_eq!(
            error.to_string(),
            "invalid cron expression `? ? ?`: expected 4 to 6 fields, found 3"
        );
        assert_eq!(error.expression(), "? ? ?");

        let error = CronError::new(
            "0 0 32 * ?",
            InvalidCause::OutOfBounds {
                field: Field::DayOfMonth,
                token: "32".to_owned(),
                min: 1,
                max: 31,
            },
        );
        assert_eq!(
            error.to_string(),
            "invalid cron expression `0 0 32 * ?`: value `32` of day_of_month field is out of bounds 1-31"
        );
    }
}
