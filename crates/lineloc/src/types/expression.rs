//! Placeholder expression tree.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::Value;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
    OnesComplement,
    Plus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
            UnaryOp::OnesComplement => "~",
            UnaryOp::Plus => "+",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    And,
    Or,
    Xor,
    LeftShift,
    RightShift,
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    LogicalAnd,
    LogicalOr,
    Coalesce,
    In,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterOrEqual => ">=",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Coalesce => "??",
            BinaryOp::In => "in",
        }
    }
}

/// Trinary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrinaryOp {
    /// `a ? b : c`
    Condition,
}

/// An expression bound to a placeholder.
///
/// The template parser produces `ArgumentByIndex`, wrapped in `Call("Format", ..)`
/// and `Call("Alignment", ..)` as needed. The remaining forms are available to
/// hosts that build expressions directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(Value),
    ArgumentByIndex(usize),
    ArgumentByName(String),
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Trinary(TrinaryOp, Box<Expression>, Box<Expression>, Box<Expression>),
    Call { name: String, args: Vec<Expression> },
    Parenthesis(Box<Expression>),
}

impl Expression {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(value.into())
    }

    pub fn argument(index: usize) -> Self {
        Expression::ArgumentByIndex(index)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Expression::ArgumentByName(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Expression::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn condition(test: Expression, then: Expression, otherwise: Expression) -> Self {
        Expression::Trinary(
            TrinaryOp::Condition,
            Box::new(test),
            Box::new(then),
            Box::new(otherwise),
        )
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    pub fn parenthesis(inner: Expression) -> Self {
        Expression::Parenthesis(Box::new(inner))
    }

    /// The argument index this expression ultimately reads, looking through
    /// `Format`/`Alignment` style wrappers (first call argument).
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            Expression::ArgumentByIndex(i) => Some(*i),
            Expression::Call { args, .. } => args.first().and_then(Expression::argument_index),
            Expression::Parenthesis(inner) => inner.argument_index(),
            _ => None,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expression::Constant(Value::String(s)) => write!(f, "{s:?}"),
            Expression::Constant(Value::Null) => write!(f, "null"),
            Expression::Constant(v) => write!(f, "{v}"),
            Expression::ArgumentByIndex(i) => write!(f, "#{i}"),
            Expression::ArgumentByName(name) => write!(f, "${name}"),
            Expression::Unary(op, operand) => write!(f, "{}{operand}", op.symbol()),
            Expression::Binary(op, left, right) => write!(f, "{left} {} {right}", op.symbol()),
            Expression::Trinary(TrinaryOp::Condition, test, then, otherwise) => {
                write!(f, "{test} ? {then} : {otherwise}")
            }
            Expression::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expression::Parenthesis(inner) => write!(f, "({inner})"),
        }
    }
}
