use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    Int,
    Float,
    Bool,
    Char,
}

/// A declared type: a basic type or a fixed-size array of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(BasicType),
    /// The size is taken verbatim from the literal; zero is not rejected here.
    Array { size: u32, element: BasicType },
}

impl Display for BasicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BasicType::Int => write!(f, "int"),
            BasicType::Float => write!(f, "float"),
            BasicType::Bool => write!(f, "bool"),
            BasicType::Char => write!(f, "char"),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Basic(basic) => write!(f, "{}", basic),
            Type::Array { size, element } => write!(f, "array [{}] of {}", size, element),
        }
    }
}
