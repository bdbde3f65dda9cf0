//! Integration tests for placeholder expression evaluation.

use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use lineloc::interpreter::{
    EvalContext, EvalError, FormatProvider, Function, FunctionRegistry, evaluate,
};
use lineloc::{BinaryOp, Expression, LocaleId, ObjectValue, UnaryOp, Value, params};

fn eval(expr: &Expression) -> Result<Value, EvalError> {
    evaluate(expr, &EvalContext::new(&[]))
}

fn eval_with(expr: &Expression, args: &[Value]) -> Result<Value, EvalError> {
    evaluate(expr, &EvalContext::new(args))
}

fn bin(op: BinaryOp, left: impl Into<Value>, right: impl Into<Value>) -> Expression {
    Expression::binary(op, Expression::constant(left), Expression::constant(right))
}

// =============================================================================
// Arguments
// =============================================================================

#[test]
fn test_argument_by_index() {
    let args = [Value::from(1), Value::from(2)];
    assert_eq!(eval_with(&Expression::argument(1), &args), Ok(Value::Integer(2)));
}

#[test]
fn test_argument_out_of_range_is_null() {
    let args = [Value::from(1), Value::from(2)];
    assert_eq!(eval_with(&Expression::argument(5), &args), Ok(Value::Null));
    assert_eq!(eval(&Expression::argument(0)), Ok(Value::Null));
}

#[test]
fn test_argument_by_name() {
    let named = params! { "count" => 3 };
    let ctx = EvalContext::new(&[]).with_named_args(&named);
    assert_eq!(evaluate(&Expression::named("count"), &ctx), Ok(Value::Integer(3)));
    assert_eq!(evaluate(&Expression::named("missing"), &ctx), Ok(Value::Null));
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn test_integer_arithmetic() {
    assert_eq!(eval(&bin(BinaryOp::Add, 2, 3)), Ok(Value::Integer(5)));
    assert_eq!(eval(&bin(BinaryOp::Subtract, 2, 3)), Ok(Value::Integer(-1)));
    assert_eq!(eval(&bin(BinaryOp::Multiply, 4, 3)), Ok(Value::Integer(12)));
    assert_eq!(eval(&bin(BinaryOp::Divide, 7, 2)), Ok(Value::Integer(3)));
    assert_eq!(eval(&bin(BinaryOp::Modulo, 7, 2)), Ok(Value::Integer(1)));
    assert_eq!(eval(&bin(BinaryOp::Power, 2, 10)), Ok(Value::Integer(1024)));
}

#[test]
fn test_float_wins_coercion() {
    assert_eq!(eval(&bin(BinaryOp::Add, 2, 0.5)), Ok(Value::Float(2.5)));
    assert_eq!(eval(&bin(BinaryOp::Divide, 7.0, 2)), Ok(Value::Float(3.5)));
    assert_eq!(eval(&bin(BinaryOp::Power, 2, -1)), Ok(Value::Float(0.5)));
}

#[test]
fn test_numeric_strings_are_coerced() {
    assert_eq!(eval(&bin(BinaryOp::Multiply, "2", 3)), Ok(Value::Integer(6)));
    assert_eq!(eval(&bin(BinaryOp::Add, "1.5", 1)), Ok(Value::Float(2.5)));
    assert_eq!(
        eval(&bin(BinaryOp::Add, "abc", 1)),
        Err(EvalError::NotNumeric {
            value: "abc".to_string()
        })
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        eval(&bin(BinaryOp::Add, "Hello, ", "world")),
        Ok(Value::String("Hello, world".to_string()))
    );
    assert!(matches!(
        eval(&bin(BinaryOp::Subtract, "a", "b")),
        Err(EvalError::InvalidOperands { op: "-", .. })
    ));
}

#[test]
fn test_integer_divide_by_zero() {
    assert_eq!(eval(&bin(BinaryOp::Divide, 1, 0)), Err(EvalError::DivideByZero));
    assert_eq!(eval(&bin(BinaryOp::Modulo, 1, 0)), Err(EvalError::DivideByZero));
}

#[test]
fn test_float_divide_by_zero_is_ieee() {
    assert_eq!(eval(&bin(BinaryOp::Divide, 1.0, 0.0)), Ok(Value::Float(f64::INFINITY)));
    assert_eq!(eval(&bin(BinaryOp::Divide, -1, 0.0)), Ok(Value::Float(f64::NEG_INFINITY)));
    let Ok(Value::Float(remainder)) = eval(&bin(BinaryOp::Modulo, 1.0, 0.0)) else {
        panic!("expected a float remainder");
    };
    assert!(remainder.is_nan());
}

#[test]
fn test_overflow() {
    assert_eq!(
        eval(&bin(BinaryOp::Add, i64::MAX, 1)),
        Err(EvalError::Overflow { op: "+" })
    );
    assert_eq!(
        eval(&Expression::unary(UnaryOp::Negate, Expression::constant(i64::MIN))),
        Err(EvalError::Overflow { op: "-" })
    );
}

#[test]
fn test_null_propagates() {
    assert_eq!(eval(&bin(BinaryOp::Add, Value::Null, 1)), Ok(Value::Null));
    assert_eq!(eval(&bin(BinaryOp::Multiply, 2, Value::Null)), Ok(Value::Null));
}

#[test]
fn test_bitwise_and_shift() {
    assert_eq!(eval(&bin(BinaryOp::And, 6, 3)), Ok(Value::Integer(2)));
    assert_eq!(eval(&bin(BinaryOp::Or, 6, 3)), Ok(Value::Integer(7)));
    assert_eq!(eval(&bin(BinaryOp::Xor, 6, 3)), Ok(Value::Integer(5)));
    assert_eq!(eval(&bin(BinaryOp::LeftShift, 1, 4)), Ok(Value::Integer(16)));
    assert_eq!(eval(&bin(BinaryOp::RightShift, 16, 2)), Ok(Value::Integer(4)));
    assert_eq!(eval(&bin(BinaryOp::And, true, false)), Ok(Value::Bool(false)));
    assert!(eval(&bin(BinaryOp::And, 1.5, 1)).is_err());
}

// =============================================================================
// Comparison and logic
// =============================================================================

#[test]
fn test_equality_never_errors() {
    assert_eq!(eval(&bin(BinaryOp::Equal, 1, 1.0)), Ok(Value::Bool(true)));
    assert_eq!(eval(&bin(BinaryOp::Equal, "a", 1)), Ok(Value::Bool(false)));
    assert_eq!(eval(&bin(BinaryOp::Equal, "1", 1)), Ok(Value::Bool(true)));
    assert_eq!(
        eval(&bin(BinaryOp::Equal, Value::Null, Value::Null)),
        Ok(Value::Bool(true))
    );
    assert_eq!(eval(&bin(BinaryOp::NotEqual, Value::Null, 0)), Ok(Value::Bool(true)));
}

#[test]
fn test_ordering() {
    assert_eq!(eval(&bin(BinaryOp::LessThan, 1, 2)), Ok(Value::Bool(true)));
    assert_eq!(eval(&bin(BinaryOp::GreaterOrEqual, 2.5, 2)), Ok(Value::Bool(true)));
    assert_eq!(eval(&bin(BinaryOp::LessThan, "a", "b")), Ok(Value::Bool(true)));
    assert!(matches!(
        eval(&bin(BinaryOp::LessThan, Value::Null, 1)),
        Err(EvalError::InvalidOperands { .. })
    ));
}

#[test]
fn test_logical_short_circuit() {
    let failing = Expression::call("NoSuchFunction", vec![]);
    let and = Expression::binary(
        BinaryOp::LogicalAnd,
        Expression::constant(false),
        failing.clone(),
    );
    assert_eq!(eval(&and), Ok(Value::Bool(false)));
    let or = Expression::binary(BinaryOp::LogicalOr, Expression::constant(1), failing);
    assert_eq!(eval(&or), Ok(Value::Bool(true)));
}

#[test]
fn test_coalesce() {
    assert_eq!(eval(&bin(BinaryOp::Coalesce, Value::Null, 5)), Ok(Value::Integer(5)));
    assert_eq!(eval(&bin(BinaryOp::Coalesce, 0, 5)), Ok(Value::Integer(0)));
}

#[test]
fn test_in_operator() {
    let list = Value::List(vec![1.into(), 2.into(), 3.into()]);
    assert_eq!(eval(&bin(BinaryOp::In, 2, list.clone())), Ok(Value::Bool(true)));
    assert_eq!(eval(&bin(BinaryOp::In, 4, list)), Ok(Value::Bool(false)));
    assert_eq!(
        eval(&bin(BinaryOp::In, 2, 5)),
        Err(EvalError::NotIterable {
            type_name: "integer"
        })
    );
}

#[test]
fn test_condition() {
    let expr = Expression::condition(
        Expression::binary(
            BinaryOp::GreaterThan,
            Expression::argument(0),
            Expression::constant(1),
        ),
        Expression::constant("many"),
        Expression::constant("few"),
    );
    assert_eq!(eval_with(&expr, &[5.into()]), Ok(Value::from("many")));
    assert_eq!(eval_with(&expr, &[1.into()]), Ok(Value::from("few")));
}

#[test]
fn test_unary_operators() {
    let unary = |op, v: Value| eval(&Expression::unary(op, Expression::constant(v)));
    assert_eq!(unary(UnaryOp::Negate, 5.into()), Ok(Value::Integer(-5)));
    assert_eq!(unary(UnaryOp::Plus, 2.5.into()), Ok(Value::Float(2.5)));
    assert_eq!(unary(UnaryOp::Not, true.into()), Ok(Value::Bool(false)));
    assert_eq!(unary(UnaryOp::OnesComplement, 0.into()), Ok(Value::Integer(-1)));
    assert_eq!(
        unary(UnaryOp::Negate, "x".into()),
        Err(EvalError::InvalidOperand {
            op: "-",
            operand: "string"
        })
    );
}

#[test]
fn test_parenthesis() {
    let expr = Expression::binary(
        BinaryOp::Multiply,
        Expression::parenthesis(bin(BinaryOp::Add, 1, 2)),
        Expression::constant(3),
    );
    assert_eq!(eval(&expr), Ok(Value::Integer(9)));
}

// =============================================================================
// Function calls
// =============================================================================

#[test]
fn test_unknown_function_suggests() {
    let expr = Expression::call(
        "Frmat",
        vec![Expression::argument(0), Expression::constant("N0")],
    );
    let err = eval(&expr).unwrap_err();
    assert!(err.is_function_resolve_failure());
    insta::assert_snapshot!(err, @"unknown function 'Frmat' with 2 argument(s); did you mean Format?");
}

#[test]
fn test_unknown_arity_is_an_error() {
    let expr = Expression::call("ToUpper", vec![]);
    assert!(matches!(eval(&expr), Err(EvalError::UnknownFunction { arity: 0, .. })));
}

#[test]
fn test_caller_table_comes_first() {
    let mut functions = FunctionRegistry::new();
    functions
        .register(
            "Twice",
            Function::Unary(|_, v| Ok(Value::Integer(v.as_integer().unwrap_or(0) * 2))),
        )
        .register("ToUpper", Function::Unary(|_, _| Ok(Value::from("custom"))));
    let args = [Value::from(21)];
    let ctx = EvalContext::new(&args).with_functions(&functions);

    let twice = Expression::call("Twice", vec![Expression::argument(0)]);
    assert_eq!(evaluate(&twice, &ctx), Ok(Value::Integer(42)));

    let upper = Expression::call("ToUpper", vec![Expression::constant("x")]);
    assert_eq!(evaluate(&upper, &ctx), Ok(Value::from("custom")));

    // Built-ins stay reachable.
    let lower = Expression::call("ToLower", vec![Expression::constant("ABC")]);
    assert_eq!(evaluate(&lower, &ctx), Ok(Value::from("abc")));
}

#[test]
fn test_variadic_function() {
    let mut functions = FunctionRegistry::new();
    functions.register(
        "Count",
        Function::Variadic(|_, args| Ok(Value::from(args.len()))),
    );
    let ctx = EvalContext::new(&[]).with_functions(&functions);
    let expr = Expression::call(
        "Count",
        vec![
            Expression::constant(1),
            Expression::constant(2),
            Expression::constant(3),
            Expression::constant(4),
        ],
    );
    assert_eq!(evaluate(&expr, &ctx), Ok(Value::Integer(4)));
}

#[test]
fn test_arguments_evaluated_before_call() {
    let expr = Expression::call(
        "Format",
        vec![bin(BinaryOp::Divide, 1, 0), Expression::constant("N0")],
    );
    assert_eq!(eval(&expr), Err(EvalError::DivideByZero));
}

// =============================================================================
// String coercion
// =============================================================================

#[derive(Debug)]
struct Money(i64);

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} units", self.0)
    }
}

impl ObjectValue for Money {
    fn to_locale_string(&self, _format: Option<&str>, locale: &LocaleId) -> Option<String> {
        (locale.language() == "fi").then(|| format!("{} €", self.0))
    }

    fn elements(&self) -> Option<Vec<Value>> {
        Some(vec![Value::Integer(self.0)])
    }
}

struct Shouting;

impl FormatProvider for Shouting {
    fn format(&self, value: &Value, _format: Option<&str>, _locale: &LocaleId) -> Option<String> {
        value.as_str().map(str::to_uppercase)
    }
}

#[test]
fn test_object_locale_string() {
    let money: Arc<dyn ObjectValue> = Arc::new(Money(5));
    let args = [Value::from(money)];
    let fi = LocaleId::new("fi");
    let en = LocaleId::new("en");
    let to_string = Expression::call("ToString", vec![Expression::argument(0)]);

    let ctx = EvalContext::new(&args).with_locale(&fi);
    assert_eq!(evaluate(&to_string, &ctx), Ok(Value::from("5 €")));
    let ctx = EvalContext::new(&args).with_locale(&en);
    assert_eq!(evaluate(&to_string, &ctx), Ok(Value::from("5 units")));
}

#[test]
fn test_object_elements_for_in() {
    let money: Arc<dyn ObjectValue> = Arc::new(Money(5));
    let expr = Expression::binary(
        BinaryOp::In,
        Expression::constant(5),
        Expression::constant(money),
    );
    assert_eq!(eval(&expr), Ok(Value::Bool(true)));
}

#[test]
fn test_format_provider_comes_first() {
    let args = [Value::from("quiet")];
    let ctx = EvalContext::new(&args).with_format_provider(&Shouting);
    let expr = Expression::call("ToString", vec![Expression::argument(0)]);
    assert_eq!(evaluate(&expr, &ctx), Ok(Value::from("QUIET")));
}

#[test]
fn test_named_map_is_plain_hash_map() {
    let mut named = HashMap::new();
    named.insert("x".to_string(), Value::from(1));
    let ctx = EvalContext::new(&[]).with_named_args(&named);
    assert_eq!(ctx.named_argument("x"), Some(&Value::Integer(1)));
}
