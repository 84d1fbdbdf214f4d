use crate::Position;

use super::{statements::Statement, types::Type};

/// Root of the tree: every function of a source file, in order.
///
/// A successfully parsed program always holds at least one function.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// `func name(params) [: type] declarations statements endfunc`
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub declarations: Vec<VariableDeclaration>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Ident,
    pub ty: Type,
}

/// One declared variable.
///
/// `var a, b : int;` yields two declarations, each owning its own copy of the type.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: Ident,
    pub ty: Type,
}

/// A name as written in the source, with the position of its token.
#[derive(Debug, Clone)]
pub struct Ident {
    pub name: String,
    pub position: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Ident {
            name: name.into(),
            position,
        }
    }
}

// Positions do not take part in tree equality.
impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
