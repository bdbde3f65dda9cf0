//! Placeholder expression evaluation.
//!
//! Evaluation is a pure walk over the expression tree. Missing arguments
//! evaluate to null and null propagates through arithmetic. Operator and
//! operand combinations without a coercion rule and unresolvable function
//! calls are hard errors.
//!
//! Numeric coercion: when either operand is a float the operation runs in
//! floating point, otherwise when either is an integer it runs in checked
//! integer arithmetic. Numeric strings are parsed; when neither operand is a
//! number both are coerced to strings.

use crate::interpreter::EvalError;
use crate::interpreter::context::EvalContext;
use crate::interpreter::format::display_string;
use crate::interpreter::functions::call_function;
use crate::types::{BinaryOp, Expression, TrinaryOp, UnaryOp, Value};

/// Evaluate an expression against the context's arguments.
///
/// # Errors
///
/// Returns an error if:
/// - An operator is applied to operands it has no coercion rule for
/// - A called function is unknown for the given number of arguments
/// - Integer arithmetic divides by zero or overflows
pub fn evaluate(expr: &Expression, ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
    match expr {
        Expression::Constant(value) => Ok(value.clone()),
        Expression::ArgumentByIndex(index) => Ok(ctx.argument(*index).cloned().unwrap_or_default()),
        Expression::ArgumentByName(name) => {
            Ok(ctx.named_argument(name).cloned().unwrap_or_default())
        }
        Expression::Parenthesis(inner) => evaluate(inner, ctx),
        Expression::Unary(op, operand) => unary(*op, &evaluate(operand, ctx)?),
        Expression::Binary(op, left, right) => binary_expression(*op, left, right, ctx),
        Expression::Trinary(TrinaryOp::Condition, test, then, otherwise) => {
            if truthy(&evaluate(test, ctx)?)? {
                evaluate(then, ctx)
            } else {
                evaluate(otherwise, ctx)
            }
        }
        Expression::Call { name, args } => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            call_function(name, &values, ctx)
        }
    }
}

/// Evaluate the operands of a binary expression, short-circuiting the
/// logical operators and `??`.
fn binary_expression(
    op: BinaryOp,
    left: &Expression,
    right: &Expression,
    ctx: &EvalContext<'_>,
) -> Result<Value, EvalError> {
    let left = evaluate(left, ctx)?;
    match op {
        BinaryOp::LogicalAnd => {
            if !truthy(&left)? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(truthy(&evaluate(right, ctx)?)?))
        }
        BinaryOp::LogicalOr => {
            if truthy(&left)? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(truthy(&evaluate(right, ctx)?)?))
        }
        BinaryOp::Coalesce => {
            if left.is_null() {
                evaluate(right, ctx)
            } else {
                Ok(left)
            }
        }
        _ => binary(op, &left, &evaluate(right, ctx)?, ctx),
    }
}

/// Apply a unary operator to an evaluated operand.
pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, EvalError> {
    let invalid = || EvalError::InvalidOperand {
        op: op.symbol(),
        operand: operand.type_name(),
    };
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!truthy(value)?)),
        (_, Value::Null) => Ok(Value::Null),
        (UnaryOp::Negate, Value::Integer(n)) => n
            .checked_neg()
            .map(Value::Integer)
            .ok_or(EvalError::Overflow { op: op.symbol() }),
        (UnaryOp::Negate, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Plus, Value::Integer(_) | Value::Float(_)) => Ok(operand.clone()),
        (UnaryOp::OnesComplement, Value::Integer(n)) => Ok(Value::Integer(!n)),
        _ => Err(invalid()),
    }
}

/// Apply a binary operator to evaluated operands.
///
/// The logical operators and `??` are applied eagerly here; the evaluator
/// short-circuits them before reaching this function.
pub fn binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    ctx: &EvalContext<'_>,
) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Equal => Ok(Value::Bool(values_equal(left, right, ctx))),
        BinaryOp::NotEqual => Ok(Value::Bool(!values_equal(left, right, ctx))),
        BinaryOp::LessThan
        | BinaryOp::LessOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterOrEqual => compare(op, left, right),
        BinaryOp::LogicalAnd => Ok(Value::Bool(truthy(left)? && truthy(right)?)),
        BinaryOp::LogicalOr => Ok(Value::Bool(truthy(left)? || truthy(right)?)),
        BinaryOp::Coalesce => Ok(if left.is_null() {
            right.clone()
        } else {
            left.clone()
        }),
        BinaryOp::In => contains(right, left, ctx).map(Value::Bool),
        _ if left.is_null() || right.is_null() => Ok(Value::Null),
        BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => bitwise(op, left, right),
        BinaryOp::LeftShift | BinaryOp::RightShift => shift(op, left, right),
        BinaryOp::Add
        | BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Modulo
        | BinaryOp::Power => arithmetic(op, left, right, ctx),
    }
}

/// Boolean reading of a value.
pub fn truthy(value: &Value) -> Result<bool, EvalError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(*b),
        Value::Integer(n) => Ok(*n != 0),
        Value::Float(f) => Ok(*f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(EvalError::NotBoolean {
                type_name: value.type_name(),
            }),
        },
        Value::List(items) => Ok(!items.is_empty()),
        Value::Object(_) => Err(EvalError::NotBoolean {
            type_name: value.type_name(),
        }),
    }
}

/// Operands after numeric coercion.
enum Numbers {
    Integers(i64, i64),
    Floats(f64, f64),
}

enum Number {
    Integer(i64),
    Float(f64),
}

fn is_number(value: &Value) -> bool {
    matches!(value, Value::Integer(_) | Value::Float(_))
}

fn to_number(op: BinaryOp, value: &Value, other: &Value) -> Result<Number, EvalError> {
    match value {
        Value::Integer(n) => Ok(Number::Integer(*n)),
        Value::Float(f) => Ok(Number::Float(*f)),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<i64>() {
                Ok(Number::Integer(n))
            } else if let Ok(f) = s.parse::<f64>() {
                Ok(Number::Float(f))
            } else {
                Err(EvalError::NotNumeric {
                    value: s.to_string(),
                })
            }
        }
        _ => Err(EvalError::InvalidOperands {
            op: op.symbol(),
            left: value.type_name(),
            right: other.type_name(),
        }),
    }
}

/// Coerce both operands to numbers when at least one of them is numeric.
fn numbers(op: BinaryOp, left: &Value, right: &Value) -> Result<Option<Numbers>, EvalError> {
    if !is_number(left) && !is_number(right) {
        return Ok(None);
    }
    let pair = match (to_number(op, left, right)?, to_number(op, right, left)?) {
        (Number::Integer(a), Number::Integer(b)) => Numbers::Integers(a, b),
        (Number::Integer(a), Number::Float(b)) => Numbers::Floats(a as f64, b),
        (Number::Float(a), Number::Integer(b)) => Numbers::Floats(a, b as f64),
        (Number::Float(a), Number::Float(b)) => Numbers::Floats(a, b),
    };
    Ok(Some(pair))
}

fn values_equal(left: &Value, right: &Value, ctx: &EvalContext<'_>) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        _ if is_number(left) || is_number(right) => {
            match numbers(BinaryOp::Equal, left, right) {
                Ok(Some(Numbers::Integers(a, b))) => a == b,
                Ok(Some(Numbers::Floats(a, b))) => a == b,
                _ => false,
            }
        }
        (Value::String(_), _) | (_, Value::String(_)) => {
            display_string(left, ctx) == display_string(right, ctx)
        }
        _ => left == right,
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let ordering = match numbers(op, left, right)? {
        Some(Numbers::Integers(a, b)) => Some(a.cmp(&b)),
        Some(Numbers::Floats(a, b)) => a.partial_cmp(&b),
        None => match (left, right) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => {
                return Err(EvalError::InvalidOperands {
                    op: op.symbol(),
                    left: left.type_name(),
                    right: right.type_name(),
                });
            }
        },
    };
    // NaN compares false with everything.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    Ok(Value::Bool(match op {
        BinaryOp::LessThan => ordering.is_lt(),
        BinaryOp::LessOrEqual => ordering.is_le(),
        BinaryOp::GreaterThan => ordering.is_gt(),
        _ => ordering.is_ge(),
    }))
}

fn arithmetic(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    ctx: &EvalContext<'_>,
) -> Result<Value, EvalError> {
    let overflow = || EvalError::Overflow { op: op.symbol() };
    match numbers(op, left, right)? {
        Some(Numbers::Integers(a, b)) => {
            let result = match op {
                BinaryOp::Add => a.checked_add(b),
                BinaryOp::Subtract => a.checked_sub(b),
                BinaryOp::Multiply => a.checked_mul(b),
                BinaryOp::Divide | BinaryOp::Modulo if b == 0 => {
                    return Err(EvalError::DivideByZero);
                }
                BinaryOp::Divide => a.checked_div(b),
                BinaryOp::Modulo => a.checked_rem(b),
                // Negative exponents leave the integers.
                BinaryOp::Power => match u32::try_from(b) {
                    Ok(exponent) => a.checked_pow(exponent),
                    Err(_) => return Ok(Value::Float((a as f64).powf(b as f64))),
                },
                _ => None,
            };
            result.map(Value::Integer).ok_or_else(overflow)
        }
        // Float division by zero yields an infinity or NaN.
        Some(Numbers::Floats(a, b)) => Ok(Value::Float(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => a / b,
            BinaryOp::Modulo => a % b,
            _ => a.powf(b),
        })),
        None if op == BinaryOp::Add => {
            let mut text = display_string(left, ctx);
            text.push_str(&display_string(right, ctx));
            Ok(Value::String(text))
        }
        None => Err(EvalError::InvalidOperands {
            op: op.symbol(),
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

fn bitwise(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
            BinaryOp::And => *a & *b,
            BinaryOp::Or => *a | *b,
            _ => *a ^ *b,
        })),
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(match op {
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            _ => a ^ b,
        })),
        _ => Err(EvalError::InvalidOperands {
            op: op.symbol(),
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

fn shift(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
        return Err(EvalError::InvalidOperands {
            op: op.symbol(),
            left: left.type_name(),
            right: right.type_name(),
        });
    };
    let overflow = EvalError::Overflow { op: op.symbol() };
    let amount = u32::try_from(*b).map_err(|_| overflow.clone())?;
    let result = if op == BinaryOp::LeftShift {
        a.checked_shl(amount)
    } else {
        a.checked_shr(amount)
    };
    result.map(Value::Integer).ok_or(overflow)
}

/// `needle in haystack`.
fn contains(haystack: &Value, needle: &Value, ctx: &EvalContext<'_>) -> Result<bool, EvalError> {
    let not_iterable = || EvalError::NotIterable {
        type_name: haystack.type_name(),
    };
    match haystack {
        Value::List(items) => Ok(items.iter().any(|item| values_equal(needle, item, ctx))),
        Value::Object(object) => {
            let items = object.elements().ok_or_else(not_iterable)?;
            Ok(items.iter().any(|item| values_equal(needle, item, ctx)))
        }
        _ => Err(not_iterable()),
    }
}
