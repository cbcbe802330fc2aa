use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::{
    environment::prelude::{Value, ValueType},
    parser::prelude::{BinaryOperator, Function},
};

use super::error::EvalErrorType;

/// Two operands brought to a common representation.
enum Operands {
    Integers(BigInt, BigInt),
    Decimals(BigDecimal, BigDecimal),
    Floats(f64, f64),
}

impl Operands {
    fn promote(left: Value, right: Value, operation: &'static str) -> Result<Self, EvalErrorType> {
        for value in [&left, &right] {
            if !value.is_number() {
                return Err(EvalErrorType::NotANumber { found: value._type() });
            }
        }

        match (left, right) {
            (Value::Integer { value: left }, Value::Integer { value: right }) => {
                Ok(Self::Integers(left, right))
            },
            (left @ Value::Float { .. }, right) | (left, right @ Value::Float { .. }) => {
                Ok(Self::Floats(real(&left, operation)?, real(&right, operation)?))
            },
            (left, right) => match (left.to_decimal(), right.to_decimal()) {
                (Some(left), Some(right)) => Ok(Self::Decimals(left, right)),
                _ => Err(EvalErrorType::NotANumber { found: ValueType::Null })
            }
        }
    }
}

/// Huge exact numbers have no finite `f64` and count as an overflow.
fn real(value: &Value, operation: &'static str) -> Result<f64, EvalErrorType> {
    if !value.is_number() {
        return Err(EvalErrorType::NotANumber { found: value._type() });
    }

    value.to_f64()
        .filter(|value| value.is_finite())
        .ok_or(EvalErrorType::Overflow { operation })
}

fn finite(value: f64, operation: &'static str) -> Result<f64, EvalErrorType> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalErrorType::Overflow { operation })
    }
}

/// Drops trailing zeros without switching to an exponent form.
fn trim(value: BigDecimal) -> BigDecimal {
    let value = value.normalized();
    let (_, scale) = value.as_bigint_and_exponent();

    if scale < 0 {
        value.with_scale(0)
    } else {
        value
    }
}

fn digits(value: &BigInt) -> i64 {
    value.magnitude().to_string().len() as i64
}

/// Quotient rounded to `precision` significant digits, at least one.
fn divide(left: BigDecimal, right: BigDecimal, precision: u64) -> BigDecimal {
    let precision = precision.max(1);
    let (numerator, left_scale) = left.into_bigint_and_exponent();
    let (denominator, right_scale) = right.into_bigint_and_exponent();
    let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);

    // two guard digits past the requested precision
    let shift = (precision as i64 + digits(&denominator) - digits(&numerator) + 2).max(0);
    let scaled = numerator * BigInt::from(10).pow(shift as u32);

    let quotient = &scaled / &denominator;
    let remainder = &scaled % &denominator;
    let scale = left_scale - right_scale + shift;

    // a discarded remainder must keep a cut-off tie from rounding as exact
    let quotient = if remainder.is_zero() {
        BigDecimal::new(quotient, scale)
    } else {
        let sticky = if negative { -1 } else { 1 };
        BigDecimal::new(quotient * 10 + sticky, scale + 1)
    };

    trim(quotient.with_prec(precision))
}

pub fn arithmetic(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    precision: u64
) -> Result<Value, EvalErrorType> {
    if operator == BinaryOperator::Pow {
        return power(left, right);
    }

    let operands = Operands::promote(left, right, operator.symbol())?;

    if operator == BinaryOperator::Div {
        let zero = match &operands {
            Operands::Integers(_, right) => right.is_zero(),
            Operands::Decimals(_, right) => right.is_zero(),
            Operands::Floats(_, right) => *right == 0.0,
        };

        if zero {
            return Err(EvalErrorType::DivisionByZero);
        }
    }

    let value = match operands {
        Operands::Integers(left, right) => match operator {
            BinaryOperator::Add => Value::Integer { value: left + right },
            BinaryOperator::Sub => Value::Integer { value: left - right },
            BinaryOperator::Mul => Value::Integer { value: left * right },
            BinaryOperator::Div => Value::Decimal {
                value: divide(BigDecimal::new(left, 0), BigDecimal::new(right, 0), precision)
            },
            _ => unreachable!("`{operator}` is not arithmetic")
        },
        Operands::Decimals(left, right) => match operator {
            BinaryOperator::Add => Value::Decimal { value: left + right },
            BinaryOperator::Sub => Value::Decimal { value: left - right },
            BinaryOperator::Mul => Value::Decimal { value: left * right },
            BinaryOperator::Div => Value::Decimal { value: divide(left, right, precision) },
            _ => unreachable!("`{operator}` is not arithmetic")
        },
        Operands::Floats(left, right) => {
            let value = match operator {
                BinaryOperator::Add => left + right,
                BinaryOperator::Sub => left - right,
                BinaryOperator::Mul => left * right,
                BinaryOperator::Div => left / right,
                _ => unreachable!("`{operator}` is not arithmetic")
            };

            Value::Float { value: finite(value, operator.symbol())? }
        }
    };

    Ok(value)
}

fn power(base: Value, exponent: Value) -> Result<Value, EvalErrorType> {
    let base = real(&base, "**")?;
    let exponent = real(&exponent, "**")?;

    if base == 0.0 && exponent < 0.0 {
        return Err(EvalErrorType::DivisionByZero);
    }

    let value = base.powf(exponent);

    if value.is_nan() {
        return Err(EvalErrorType::PowerDomain);
    }

    Ok(Value::Float { value: finite(value, "**")? })
}

pub fn compare(
    operator: BinaryOperator,
    left: Value,
    right: Value
) -> Result<Value, EvalErrorType> {
    let ordering = match (left, right) {
        (Value::Boolean { value: left }, Value::Boolean { value: right }) => match operator {
            BinaryOperator::Equal => return Ok(Value::Boolean { value: left == right }),
            BinaryOperator::NotEqual => return Ok(Value::Boolean { value: left != right }),
            _ => return Err(EvalErrorType::NotANumber { found: ValueType::Boolean })
        },
        (left, right) => match Operands::promote(left, right, operator.symbol())? {
            Operands::Integers(left, right) => left.cmp(&right),
            Operands::Decimals(left, right) => left.cmp(&right),
            Operands::Floats(left, right) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        }
    };

    let value = match operator {
        BinaryOperator::Equal => ordering == Ordering::Equal,
        BinaryOperator::NotEqual => ordering != Ordering::Equal,
        BinaryOperator::GreaterThan => ordering == Ordering::Greater,
        BinaryOperator::LessThan => ordering == Ordering::Less,
        BinaryOperator::GreaterThanOrEqual => ordering != Ordering::Less,
        BinaryOperator::LessThanOrEqual => ordering != Ordering::Greater,
        _ => unreachable!("`{operator}` is not a comparison")
    };

    Ok(Value::Boolean { value })
}

pub fn apply(function: Function, argument: Value) -> Result<Value, EvalErrorType> {
    let x = real(&argument, function.name())?;

    let value = match function {
        Function::Sqrt if x < 0.0 => return Err(EvalErrorType::SqrtOfNegative),
        Function::Sqrt => x.sqrt(),
        Function::Exp => finite(x.exp(), function.name())?,
        Function::Log if x <= 0.0 => return Err(EvalErrorType::LogarithmDomain),
        Function::Log => x.ln(),
    };

    Ok(Value::Float { value })
}
