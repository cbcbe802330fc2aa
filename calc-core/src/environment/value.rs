use std::fmt::Display;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::parser::prelude::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer {
        value: BigInt
    },
    Decimal {
        value: BigDecimal
    },
    /// Result of a real-valued operation (`**`, `sqrt`, `exp`, `log`).
    Float {
        value: f64,
    },
    Boolean {
        value: bool
    },
    String {
        value: String,
    },
    Null,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer { value } => write!(f, "{value}"),
            Value::Decimal { value } => write!(f, "{value}"),
            Value::Float { value } => {
                let magnitude = value.abs();

                if magnitude != 0.0 && (magnitude >= 1e16 || magnitude < 1e-4) {
                    write!(f, "{value:e}")
                } else {
                    write!(f, "{value}")
                }
            },
            Value::Boolean { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
            Value::Null => Ok(())
        }
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        match value {
            Literal::Int(value) => Value::Integer { value },
            Literal::Decimal(value) => Value::Decimal { value },
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer { value: BigInt::from(value) }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Integer { .. } => ValueType::Integer,
            Self::Decimal { .. } => ValueType::Decimal,
            Self::Float { .. } => ValueType::Float,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::String { .. } => ValueType::String,
            Self::Null => ValueType::Null
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer { .. } | Self::Decimal { .. } | Self::Float { .. })
    }

    /// Exact base-10 view of an integer or decimal.
    pub fn to_decimal(&self) -> Option<BigDecimal> {
        match self {
            Self::Integer { value } => Some(BigDecimal::new(value.clone(), 0)),
            Self::Decimal { value } => Some(value.clone()),
            _ => None
        }
    }

    /// Real-valued view of any number. Huge exact values may saturate to infinity.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Integer { value } => value.to_f64(),
            Self::Decimal { value } => value.to_f64(),
            Self::Float { value } => Some(*value),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Decimal,
    Float,
    Boolean,
    String,
    Null
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Integer => "integer",
            ValueType::Decimal => "decimal",
            ValueType::Float => "real number",
            ValueType::Boolean => "boolean",
            ValueType::String => "text",
            ValueType::Null => "nothing",
        };

        write!(f, "{name}")
    }
}
