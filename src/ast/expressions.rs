use std::fmt::Display;

use super::ast::Ident;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOp {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Expression tree.
///
/// Binary variants are split by operator family so later stages can type
/// them without re-inspecting the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Relational {
        op: RelationalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(char),
    BoolLiteral(bool),
    ArrayAccess {
        ident: Ident,
        index: Box<Expr>,
    },
    Call {
        ident: Ident,
        args: Vec<Expr>,
    },
    Ident(Ident),
    Parenthesized(Box<Expr>),
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Not => write!(f, "not"),
            UnaryOp::Plus => write!(f, "+"),
            UnaryOp::Minus => write!(f, "-"),
        }
    }
}

impl Display for ArithmeticOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticOp::Mul => write!(f, "*"),
            ArithmeticOp::Div => write!(f, "/"),
            ArithmeticOp::Mod => write!(f, "%"),
            ArithmeticOp::Add => write!(f, "+"),
            ArithmeticOp::Sub => write!(f, "-"),
        }
    }
}

impl Display for RelationalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationalOp::Equal => write!(f, "=="),
            RelationalOp::NotEqual => write!(f, "!="),
            RelationalOp::Less => write!(f, "<"),
            RelationalOp::Greater => write!(f, ">"),
            RelationalOp::LessEqual => write!(f, "<="),
            RelationalOp::GreaterEqual => write!(f, ">="),
        }
    }
}

impl Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
        }
    }
}
