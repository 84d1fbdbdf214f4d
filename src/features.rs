//! Grammar profiles.
//!
//! The language exists in two surface forms that share one parser: a minimal
//! profile and an extended profile adding fixed-size arrays, the modulo
//! operator and exception statements. The parser and the lexer consult a
//! [`Features`] set when they build their lookup tables, so a disabled
//! construct is simply never recognised.

use bitflags::bitflags;

bitflags! {
    /// The set of optional grammar constructs recognised by a parse.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u8 {
        /// `array [N] of T` types and `ident[expr]` indexing.
        const ARRAYS = 1;
        /// The `%` multiplicative operator.
        const MODULO = 1 << 1;
        /// `try ... catch ... endtry` and `throw expr;`.
        const EXCEPTIONS = 1 << 2;
    }
}

impl Features {
    pub const MINIMAL: Features = Features::empty();
    pub const EXTENDED: Features = Features::all();
}

impl Default for Features {
    fn default() -> Self {
        Features::EXTENDED
    }
}
