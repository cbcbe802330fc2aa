use crate::{environment::prelude::ValueType, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalErrorType {
    /// Occurs when a formula reads a variable the current user never assigned.
    ///
    /// Example:
    /// ```text
    /// >> y * 2      <- `y` has no value set
    /// ```
    UndefinedVariable { name: String },
    DivisionByZero,
    SqrtOfNegative,
    LogarithmDomain,
    /// Occurs when a real power has no real result.
    ///
    /// Example:
    /// ```text
    /// >> -8 ** 0.5
    /// ```
    PowerDomain,
    Overflow { operation: &'static str },
    /// Occurs when a boolean or text reaches arithmetic, e.g. `flag = 1 < 2` then `flag + 1`.
    NotANumber { found: ValueType },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub error: EvalErrorType,
    pub location: SrcSpan
}

impl EvalError {
    pub fn new(error: EvalErrorType, location: SrcSpan) -> Self {
        Self { error, location }
    }

    pub fn is_name_error(&self) -> bool {
        matches!(self.error, EvalErrorType::UndefinedVariable { .. })
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            EvalErrorType::UndefinedVariable { name } => (
                "Undefined variable",
                vec![format!("`{name}` has no value set")]
            ),
            EvalErrorType::DivisionByZero => ("Division by zero", vec![]),
            EvalErrorType::SqrtOfNegative => (
                "Square root of a negative number",
                vec!["Results must be real numbers".to_string()]
            ),
            EvalErrorType::LogarithmDomain => (
                "Logarithm of a non-positive number",
                vec!["`log` is only defined for numbers greater than zero".to_string()]
            ),
            EvalErrorType::PowerDomain => (
                "Power has no real result",
                vec!["A negative base needs a whole exponent".to_string()]
            ),
            EvalErrorType::Overflow { operation } => (
                "Result is too large",
                vec![format!("`{operation}` overflowed the range of real numbers")]
            ),
            EvalErrorType::NotANumber { found } => (
                "Expected a number",
                vec![format!("Found a {found}")]
            ),
        }
    }

    pub fn hint(&self) -> Option<String> {
        match &self.error {
            EvalErrorType::UndefinedVariable { name } => Some(format!("assign it first, e.g. `{name} = 1`")),
            _ => None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalWarning {
    /// Occurs when an assignment replaces one of the bindings every table starts with.
    ConstantOverwritten {
        name: String,
        location: SrcSpan,
    },
}

impl EvalWarning {
    pub fn location(&self) -> SrcSpan {
        match self {
            EvalWarning::ConstantOverwritten { location, .. } => *location
        }
    }
}
