use std::{rc::Rc, str::FromStr};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{
    environment::prelude::{UserId, Value, ValueType, VariableTable},
    parser::prelude::{parse_line, DEFAULT_MAX_DEPTH},
    utils::prelude::{LineWarningEmitter, VectorWarningEmitterIO, Warning, WarningEmitter},
};

use super::{error::{EvalErrorType, EvalWarning}, eval, EvalContext};

fn run_with(src: &str, table: &mut VariableTable, precision: u64) -> Result<Value, EvalErrorType> {
    let node = parse_line(src, DEFAULT_MAX_DEPTH).expect("test input parses");
    let emitter = WarningEmitter::null();
    let warnings = LineWarningEmitter::new(src.to_string(), &emitter);
    let context = EvalContext { precision, warnings: &warnings };

    eval(&node, table, &context).map_err(|error| error.error)
}

fn run(src: &str, table: &mut VariableTable) -> Result<Value, EvalErrorType> {
    run_with(src, table, 28)
}

fn value(src: &str) -> Result<Value, EvalErrorType> {
    run(src, &mut VariableTable::seeded(UserId::Id(1)))
}

fn decimal(text: &str) -> Value {
    Value::Decimal { value: BigDecimal::from_str(text).unwrap() }
}

#[test]
fn test_integer_arithmetic_stays_exact() -> Result<(), EvalErrorType> {
    assert_eq!(value("2 + 3 * 4")?, Value::from(14));
    assert_eq!(value("(2 + 3) * 4")?, Value::from(20));
    assert_eq!(value("7 - 10")?, Value::from(-3));

    let big = "123456789012345678901234567890";
    assert_eq!(
        value(&format!("{big} * 10"))?,
        Value::Integer { value: BigInt::from_str(&format!("{big}0")).unwrap() }
    );

    Ok(())
}

#[test]
fn test_decimals_are_exact() -> Result<(), EvalErrorType> {
    assert_eq!(value("0.1 + 0.2")?, decimal("0.3"));
    assert_eq!(value("1.5 * 2")?, decimal("3"));
    assert!(matches!(value("1 + 0.5")?, Value::Decimal { .. }));

    Ok(())
}

#[test]
fn test_division() -> Result<(), EvalErrorType> {
    assert_eq!(value("10 / 4")?, decimal("2.5"));
    assert_eq!(value("10 / 2")?.to_string(), "5");
    assert_eq!(value("100 / 1")?.to_string(), "100");
    assert_eq!(value("1 / 3")?, decimal("0.3333333333333333333333333333"));
    assert_eq!(run_with("2 / 3", &mut VariableTable::new(), 5)?, decimal("0.66667"));

    Ok(())
}

#[test]
fn test_division_by_zero() {
    assert_eq!(value("1 / 0"), Err(EvalErrorType::DivisionByZero));
    assert_eq!(value("1.5 / 0.0"), Err(EvalErrorType::DivisionByZero));
    assert_eq!(value("sqrt(4) / 0"), Err(EvalErrorType::DivisionByZero));
    assert_eq!(value("0 ** -1"), Err(EvalErrorType::DivisionByZero));
}

#[test]
fn test_power_is_real_valued() -> Result<(), EvalErrorType> {
    assert_eq!(value("2 ** 10")?, Value::Float { value: 1024.0 });
    assert_eq!(value("4 ** 0.5")?, Value::Float { value: 2.0 });
    assert_eq!(value("2e3")?, Value::Float { value: 2000.0 });
    assert_eq!(value("-8 ** 0.5"), Err(EvalErrorType::PowerDomain));
    assert_eq!(value("10 ** 400"), Err(EvalErrorType::Overflow { operation: "**" }));

    Ok(())
}

#[test]
fn test_functions() -> Result<(), EvalErrorType> {
    assert_eq!(value("sqrt(9)")?, Value::Float { value: 3.0 });
    assert_eq!(value("log(1)")?, Value::Float { value: 0.0 });
    assert_eq!(value("exp(0)")?, Value::Float { value: 1.0 });

    assert_eq!(value("sqrt(-4)"), Err(EvalErrorType::SqrtOfNegative));
    assert_eq!(value("log(0)"), Err(EvalErrorType::LogarithmDomain));
    assert_eq!(value("log(-1)"), Err(EvalErrorType::LogarithmDomain));
    assert_eq!(value("exp(1000)"), Err(EvalErrorType::Overflow { operation: "exp" }));

    Ok(())
}

#[test]
fn test_float_promotes_mixed_operands() -> Result<(), EvalErrorType> {
    assert_eq!(value("sqrt(4) + 1")?, Value::Float { value: 3.0 });
    assert_eq!(value("sqrt(4) * 0.5")?, Value::Float { value: 1.0 });

    Ok(())
}

#[test]
fn test_comparisons() -> Result<(), EvalErrorType> {
    assert_eq!(value("5 > 3")?, Value::Boolean { value: true });
    assert_eq!(value("5 == 5")?, Value::Boolean { value: true });
    assert_eq!(value("5 != 5.0")?, Value::Boolean { value: false });
    assert_eq!(value("0.1 + 0.2 == 0.3")?, Value::Boolean { value: true });
    assert_eq!(value("2 <= 1")?, Value::Boolean { value: false });
    assert_eq!(value("sqrt(16) >= 4")?, Value::Boolean { value: true });

    Ok(())
}

#[test]
fn test_booleans() -> Result<(), EvalErrorType> {
    let mut table = VariableTable::new();

    run("a = 1 < 2", &mut table)?;
    run("b = 2 < 1", &mut table)?;

    assert_eq!(run("a != b", &mut table)?, Value::Boolean { value: true });
    assert_eq!(run("a > b", &mut table), Err(EvalErrorType::NotANumber { found: ValueType::Boolean }));
    assert_eq!(run("a + 1", &mut table), Err(EvalErrorType::NotANumber { found: ValueType::Boolean }));
    assert_eq!(run("sqrt(a)", &mut table), Err(EvalErrorType::NotANumber { found: ValueType::Boolean }));

    Ok(())
}

#[test]
fn test_assignment() -> Result<(), EvalErrorType> {
    let mut table = VariableTable::seeded(UserId::Id(1));

    assert_eq!(
        run("x = 5", &mut table)?,
        Value::String { value: "Set variable 'x' to '5'".to_string() }
    );
    assert_eq!(run("3x", &mut table)?, Value::from(15));
    assert_eq!(run("y = x / 2", &mut table)?.to_string(), "Set variable 'y' to '2.5'");
    assert_eq!(run("2 * k + id", &mut table)?, Value::from(2_001));

    Ok(())
}

#[test]
fn test_undefined_variable() {
    let mut table = VariableTable::seeded(UserId::Id(1));
    let before = table.clone();

    assert_eq!(
        run("x = y + 1", &mut table),
        Err(EvalErrorType::UndefinedVariable { name: "y".to_string() })
    );
    assert_eq!(table, before);
}

#[test]
fn test_empty_line_is_null() -> Result<(), EvalErrorType> {
    assert_eq!(value("")?, Value::Null);

    Ok(())
}

#[test]
fn test_error_location() {
    let node = parse_line("1 + 4 / 0", DEFAULT_MAX_DEPTH).unwrap();
    let emitter = WarningEmitter::null();
    let warnings = LineWarningEmitter::new("1 + 4 / 0".to_string(), &emitter);
    let context = EvalContext { precision: 28, warnings: &warnings };

    let err = eval(&node, &mut VariableTable::new(), &context).unwrap_err();

    assert_eq!(err.error, EvalErrorType::DivisionByZero);
    assert_eq!((err.location.start, err.location.end), (4, 9));
}

#[test]
fn test_overwriting_constant_warns() -> Result<(), EvalErrorType> {
    let io = Rc::new(VectorWarningEmitterIO::new());
    let emitter = WarningEmitter::new(io.clone());
    let warnings = LineWarningEmitter::new("k = 2".to_string(), &emitter);
    let context = EvalContext { precision: 28, warnings: &warnings };
    let mut table = VariableTable::seeded(UserId::Anonymous);

    let node = parse_line("k = 2", DEFAULT_MAX_DEPTH).unwrap();
    eval(&node, &mut table, &context).map_err(|error| error.error)?;

    assert_eq!(table.get("k"), Some(&Value::from(2)));
    assert_eq!(emitter.count(), 1);

    match io.pop() {
        Some(Warning::Eval { warning: EvalWarning::ConstantOverwritten { name, .. }, .. }) => {
            assert_eq!(name, "k");
        },
        other => panic!("expected a warning, got {other:?}"),
    }

    let node = parse_line("x = 2", DEFAULT_MAX_DEPTH).unwrap();
    eval(&node, &mut table, &context).map_err(|error| error.error)?;
    assert_eq!(emitter.count(), 1);

    Ok(())
}
