use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{features::Features, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("bool", TokenKind::Bool);
        map.insert("char", TokenKind::Char);
        map.insert("array", TokenKind::Array);
        map.insert("of", TokenKind::Of);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("endif", TokenKind::EndIf);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("endwhile", TokenKind::EndWhile);
        map.insert("func", TokenKind::Func);
        map.insert("endfunc", TokenKind::EndFunc);
        map.insert("return", TokenKind::Return);
        map.insert("read", TokenKind::Read);
        map.insert("write", TokenKind::Write);
        map.insert("try", TokenKind::Try);
        map.insert("endtry", TokenKind::EndTry);
        map.insert("catch", TokenKind::Catch);
        map.insert("throw", TokenKind::Throw);
        map.insert("and", TokenKind::And);
        map.insert("or", TokenKind::Or);
        map.insert("not", TokenKind::Not);
        map.insert("true", TokenKind::BoolVal);
        map.insert("false", TokenKind::BoolVal);
        map
    };
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    IntVal,
    FloatVal,
    CharVal,
    BoolVal,
    String,
    Identifier,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,

    Colon,
    Comma,
    Semicolon,
    Assignment, // =

    Equals,    // ==
    NotEquals, // !=
    Less,
    Greater,
    LessEquals,
    GreaterEquals,

    And,
    Or,
    Not,

    Plus,
    Dash,
    Star,
    Slash,
    Percent,

    // Reserved
    Var,
    Int,
    Float,
    Bool,
    Char,
    Array,
    Of,
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndWhile,
    Func,
    EndFunc,
    Return,
    Read,
    Write,
    Try,
    EndTry,
    Catch,
    Throw,
}

impl TokenKind {
    /// The feature a keyword belongs to, if it is not part of the minimal profile.
    pub fn required_feature(&self) -> Option<Features> {
        match self {
            TokenKind::Array | TokenKind::Of => Some(Features::ARRAYS),
            TokenKind::Try | TokenKind::EndTry | TokenKind::Catch | TokenKind::Throw => {
                Some(Features::EXCEPTIONS)
            }
            _ => None,
        }
    }

    /// How the kind is spelled in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::IntVal => "integer literal",
            TokenKind::FloatVal => "float literal",
            TokenKind::CharVal => "character literal",
            TokenKind::BoolVal => "boolean literal",
            TokenKind::String => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::OpenBracket => "`[`",
            TokenKind::CloseBracket => "`]`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Assignment => "`=`",
            TokenKind::Equals => "`==`",
            TokenKind::NotEquals => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::Greater => "`>`",
            TokenKind::LessEquals => "`<=`",
            TokenKind::GreaterEquals => "`>=`",
            TokenKind::And => "`and`",
            TokenKind::Or => "`or`",
            TokenKind::Not => "`not`",
            TokenKind::Plus => "`+`",
            TokenKind::Dash => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Var => "`var`",
            TokenKind::Int => "`int`",
            TokenKind::Float => "`float`",
            TokenKind::Bool => "`bool`",
            TokenKind::Char => "`char`",
            TokenKind::Array => "`array`",
            TokenKind::Of => "`of`",
            TokenKind::If => "`if`",
            TokenKind::Then => "`then`",
            TokenKind::Else => "`else`",
            TokenKind::EndIf => "`endif`",
            TokenKind::While => "`while`",
            TokenKind::Do => "`do`",
            TokenKind::EndWhile => "`endwhile`",
            TokenKind::Func => "`func`",
            TokenKind::EndFunc => "`endfunc`",
            TokenKind::Return => "`return`",
            TokenKind::Read => "`read`",
            TokenKind::Write => "`write`",
            TokenKind::Try => "`try`",
            TokenKind::EndTry => "`endtry`",
            TokenKind::Catch => "`catch`",
            TokenKind::Throw => "`throw`",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn is_one_of(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
