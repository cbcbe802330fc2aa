pub mod error;
pub mod numeric;

#[cfg(test)]
mod tests;

use crate::{
    environment::prelude::{is_seeded, Value, VariableTable},
    parser::prelude::{BinaryOperator, Function, Node},
    utils::prelude::{LineWarningEmitter, SrcSpan},
};

use error::{EvalError, EvalWarning};

pub mod prelude {
    pub use super::{
        error::*,
        eval,
        EvalContext,
    };
}

/// What a single evaluation needs besides the tree and the table.
pub struct EvalContext<'a> {
    /// Significant digits kept by exact division.
    pub precision: u64,
    pub warnings: &'a LineWarningEmitter<'a>,
}

/// Reduces a parsed line to a value. A failing line leaves `table` as it was.
pub fn eval(node: &Node, table: &mut VariableTable, context: &EvalContext) -> Result<Value, EvalError> {
    match node {
        Node::Assign { name, value, location } => {
            eval_assignment(name, value, *location, table, context)
        },
        Node::Empty => Ok(Value::Null),
        expression => eval_expression(expression, table, context),
    }
}

fn eval_assignment(
    name: &str,
    value: &Node,
    location: SrcSpan,
    table: &mut VariableTable,
    context: &EvalContext
) -> Result<Value, EvalError> {
    let value = eval(value, table, context)?;

    if is_seeded(name) {
        context.warnings.emit(EvalWarning::ConstantOverwritten {
            name: name.to_string(),
            location,
        });
    }

    let message = format!("Set variable '{name}' to '{value}'");
    table.set(name.to_string(), value);

    Ok(Value::String { value: message })
}

fn eval_expression(
    expression: &Node,
    table: &mut VariableTable,
    context: &EvalContext
) -> Result<Value, EvalError> {
    match expression {
        Node::Literal { value, .. } => Ok(Value::from(value.clone())),
        Node::VarRef { name, location } => table.get(name)
            .cloned()
            .ok_or_else(|| EvalError::new(
                error::EvalErrorType::UndefinedVariable { name: name.clone() },
                *location
            )),
        Node::BinaryOp { operator, left, right, location } => {
            let left = eval(left, table, context)?;
            let right = eval(right, table, context)?;

            eval_infix(*operator, left, right, *location, context)
        },
        Node::UnaryFunc { function, argument, location } => {
            let argument = eval(argument, table, context)?;

            eval_function(*function, argument, *location)
        },
        Node::Assign { .. } | Node::Empty => eval(expression, table, context),
    }
}

fn eval_infix(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    location: SrcSpan,
    context: &EvalContext
) -> Result<Value, EvalError> {
    let result = if operator.is_comparison() {
        numeric::compare(operator, left, right)
    } else {
        numeric::arithmetic(operator, left, right, context.precision)
    };

    result.map_err(|error| EvalError::new(error, location))
}

fn eval_function(function: Function, argument: Value, location: SrcSpan) -> Result<Value, EvalError> {
    numeric::apply(function, argument)
        .map_err(|error| EvalError::new(error, location))
}
