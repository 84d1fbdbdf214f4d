use super::{ast::Ident, expressions::Expr};

/// An assignable or readable location: `name` or `name[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeftExpr {
    pub ident: Ident,
    pub index: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `target = value;`
    Assign { target: LeftExpr, value: Expr },
    /// `if cond then ... [else ...] endif`
    If {
        cond: Expr,
        then_block: Vec<Statement>,
        else_block: Option<Vec<Statement>>,
    },
    /// `while cond do ... endwhile`
    While { cond: Expr, body: Vec<Statement> },
    /// `callee(args);`
    ProcCall { callee: Ident, args: Vec<Expr> },
    /// `read target;`
    Read { target: LeftExpr },
    /// `write value;`
    WriteExpr { value: Expr },
    /// `write "literal";`
    WriteString { literal: String },
    /// `return [value];`
    Return { value: Option<Expr> },
    /// `try ... catch ... endtry`
    Try {
        body: Vec<Statement>,
        handler: Vec<Statement>,
    },
    /// `throw value;`
    Throw { value: Expr },
}
