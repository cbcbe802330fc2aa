
use std::{fmt::Display, str::FromStr};

use bigdecimal::BigDecimal;

use crate::environment::prelude::Value;

pub mod prelude {
    pub use super::{format, Output};
}

/// Numbers strictly between these magnitudes are shown in fixed-point.
const LOWER_BOUND: i64 = 1;
const UPPER_BOUND: i64 = 1_000_000;

/// A value ready to be shown to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Exact positional decimal, never in exponent form.
    Fixed(BigDecimal),
    Value(Value),
}

impl Output {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Output::Fixed(_))
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Fixed(value) => write!(f, "{}", value.to_plain_string()),
            Output::Value(value) => write!(f, "{value}"),
        }
    }
}

fn in_fixed_range(magnitude: &BigDecimal) -> bool {
    *magnitude > BigDecimal::from(LOWER_BOUND) && *magnitude < BigDecimal::from(UPPER_BOUND)
}

pub fn format(value: Value) -> Output {
    let fixed = match &value {
        Value::Integer { .. } | Value::Decimal { .. } => value.to_decimal()
            .filter(|decimal| in_fixed_range(&decimal.abs())),
        // shortest text that reads back as the same float
        Value::Float { value: float } => {
            let magnitude = float.abs();

            if magnitude > LOWER_BOUND as f64 && magnitude < UPPER_BOUND as f64 {
                BigDecimal::from_str(&float.to_string()).ok()
            } else {
                None
            }
        },
        Value::Boolean { .. } | Value::String { .. } | Value::Null => None,
    };

    match fixed {
        Some(decimal) => Output::Fixed(decimal),
        None => Output::Value(value),
    }
}
