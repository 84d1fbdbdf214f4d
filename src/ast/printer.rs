//! Canonical source rendering.
//!
//! Every node renders back to source text that the parser accepts. Parentheses
//! are emitted only for [`Expr::Parenthesized`] nodes, so a tree built by the
//! parser prints to text that parses back to an equal tree.

use std::fmt::{self, Display, Formatter};

use super::{
    ast::{Function, Ident, Parameter, Program, VariableDeclaration},
    expressions::Expr,
    statements::{LeftExpr, Statement},
};

const INDENT: &str = "  ";

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Unary { op, operand } => write!(f, "{} {}", op, operand),
            Expr::Arithmetic { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Relational { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expr::Logical { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expr::IntLiteral(value) => write!(f, "{}", value),
            Expr::FloatLiteral(value) => write!(f, "{}", float_literal(*value)),
            Expr::CharLiteral(value) => write!(f, "'{}'", escape(&value.to_string(), '\'')),
            Expr::BoolLiteral(value) => write!(f, "{}", value),
            Expr::ArrayAccess { ident, index } => write!(f, "{}[{}]", ident, index),
            Expr::Call { ident, args } => {
                write!(f, "{}(", ident)?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Expr::Ident(ident) => write!(f, "{}", ident),
            Expr::Parenthesized(inner) => write!(f, "({})", inner),
        }
    }
}

impl Display for LeftExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.index {
            Some(index) => write!(f, "{}[{}]", self.ident, index),
            None => write!(f, "{}", self.ident),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_statement(f, self, 0)
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.ty)
    }
}

impl Display for VariableDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "var {} : {};", self.name, self.ty)
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "func {}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        write!(f, ")")?;
        if let Some(return_type) = &self.return_type {
            write!(f, " : {}", return_type)?;
        }
        writeln!(f)?;

        for declaration in &self.declarations {
            writeln!(f, "{}{}", INDENT, declaration)?;
        }
        write_block(f, &self.statements, 1)?;
        writeln!(f, "endfunc")
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}

fn write_args(f: &mut Formatter<'_>, args: &[Expr]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

fn write_block(f: &mut Formatter<'_>, statements: &[Statement], depth: usize) -> fmt::Result {
    for statement in statements {
        write!(f, "{}", INDENT.repeat(depth))?;
        write_statement(f, statement, depth)?;
        writeln!(f)?;
    }
    Ok(())
}

/// Writes one statement whose first line is already indented to `depth`.
fn write_statement(f: &mut Formatter<'_>, statement: &Statement, depth: usize) -> fmt::Result {
    let pad = INDENT.repeat(depth);
    match statement {
        Statement::Assign { target, value } => write!(f, "{} = {};", target, value),
        Statement::If {
            cond,
            then_block,
            else_block,
        } => {
            writeln!(f, "if {} then", cond)?;
            write_block(f, then_block, depth + 1)?;
            if let Some(else_block) = else_block {
                writeln!(f, "{}else", pad)?;
                write_block(f, else_block, depth + 1)?;
            }
            write!(f, "{}endif", pad)
        }
        Statement::While { cond, body } => {
            writeln!(f, "while {} do", cond)?;
            write_block(f, body, depth + 1)?;
            write!(f, "{}endwhile", pad)
        }
        Statement::ProcCall { callee, args } => {
            write!(f, "{}(", callee)?;
            write_args(f, args)?;
            write!(f, ");")
        }
        Statement::Read { target } => write!(f, "read {};", target),
        Statement::WriteExpr { value } => write!(f, "write {};", value),
        Statement::WriteString { literal } => write!(f, "write \"{}\";", escape(literal, '"')),
        Statement::Return { value: Some(value) } => write!(f, "return {};", value),
        Statement::Return { value: None } => write!(f, "return;"),
        Statement::Try { body, handler } => {
            writeln!(f, "try")?;
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}catch", pad)?;
            write_block(f, handler, depth + 1)?;
            write!(f, "{}endtry", pad)
        }
        Statement::Throw { value } => write!(f, "throw {};", value),
    }
}

/// Floats always keep a fractional part so they lex as float literals again.
fn float_literal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
