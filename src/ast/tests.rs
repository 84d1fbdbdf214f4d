//! Unit tests for the AST and its canonical printer.
//!
//! The property test at the bottom generates trees whose parentheses already
//! agree with operator precedence, prints them and parses the text back.

use proptest::prelude::*;

use crate::{features::Features, parse_source, Position};

use super::{
    ast::{Function, Ident, Parameter, Program, VariableDeclaration},
    expressions::{ArithmeticOp, Expr, LogicalOp, RelationalOp, UnaryOp},
    statements::{LeftExpr, Statement},
    types::{BasicType, Type},
};

fn id(name: &str) -> Ident {
    Ident::new(name, Position::null())
}

#[test]
fn test_ident_equality_ignores_position() {
    let first = Ident::new("x", Position { line: 1, column: 1 });
    let second = Ident::new("x", Position { line: 7, column: 12 });

    assert_eq!(first, second);
    assert_ne!(first, id("y"));
}

#[test]
fn test_type_display() {
    assert_eq!(Type::Basic(BasicType::Char).to_string(), "char");
    assert_eq!(
        Type::Array {
            size: 10,
            element: BasicType::Float
        }
        .to_string(),
        "array [10] of float"
    );
}

#[test]
fn test_expression_display() {
    let expr = Expr::Arithmetic {
        op: ArithmeticOp::Mul,
        left: Box::new(Expr::Parenthesized(Box::new(Expr::Arithmetic {
            op: ArithmeticOp::Add,
            left: Box::new(Expr::IntLiteral(1)),
            right: Box::new(Expr::Ident(id("x"))),
        }))),
        right: Box::new(Expr::Unary {
            op: UnaryOp::Minus,
            operand: Box::new(Expr::IntLiteral(3)),
        }),
    };
    assert_eq!(expr.to_string(), "(1 + x) * - 3");

    let expr = Expr::Logical {
        op: LogicalOp::Or,
        left: Box::new(Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(Expr::Ident(id("done"))),
        }),
        right: Box::new(Expr::Relational {
            op: RelationalOp::LessEqual,
            left: Box::new(Expr::ArrayAccess {
                ident: id("v"),
                index: Box::new(Expr::IntLiteral(0)),
            }),
            right: Box::new(Expr::Call {
                ident: id("f"),
                args: vec![Expr::BoolLiteral(true), Expr::CharLiteral('c')],
            }),
        }),
    };
    assert_eq!(expr.to_string(), "not done or v[0] <= f(true, 'c')");
}

#[test]
fn test_literal_display() {
    assert_eq!(Expr::FloatLiteral(2.0).to_string(), "2.0");
    assert_eq!(Expr::FloatLiteral(0.25).to_string(), "0.25");
    assert_eq!(Expr::CharLiteral('\'').to_string(), r"'\''");
    assert_eq!(Expr::CharLiteral('\n').to_string(), r"'\n'");
    assert_eq!(
        Statement::WriteString {
            literal: String::from("say \"hi\"\n")
        }
        .to_string(),
        r#"write "say \"hi\"\n";"#
    );
}

#[test]
fn test_function_display() {
    let function = Function {
        name: id("main"),
        parameters: vec![Parameter {
            name: id("n"),
            ty: Type::Basic(BasicType::Int),
        }],
        return_type: Some(Type::Basic(BasicType::Int)),
        declarations: vec![VariableDeclaration {
            name: id("v"),
            ty: Type::Array {
                size: 10,
                element: BasicType::Int,
            },
        }],
        statements: vec![Statement::While {
            cond: Expr::Relational {
                op: RelationalOp::Less,
                left: Box::new(Expr::Ident(id("n"))),
                right: Box::new(Expr::IntLiteral(10)),
            },
            body: vec![Statement::Read {
                target: LeftExpr {
                    ident: id("v"),
                    index: Some(Expr::Ident(id("n"))),
                },
            }],
        }],
    };

    assert_eq!(
        function.to_string(),
        "func main(n : int) : int\n  var v : array [10] of int;\n  while n < 10 do\n    read v[n];\n  endwhile\nendfunc\n"
    );
}

#[test]
fn test_canonical_source_is_a_fixed_point() {
    let source = "\
func main(n : int) : int
  var v : array [10] of int;
  var c : char;
  if n < 0 then
    return - n;
  else
    write \"big\\n\";
  endif
  try
    f(v[1], c);
  catch
    throw 1;
  endtry
  return n % 3;
endfunc

func f(a : int, c : char)
  return;
endfunc
";
    let program = parse_source(source, None, Features::EXTENDED).unwrap();
    assert_eq!(program.to_string(), source);
}

const NAMES: &[&str] = &["a", "b", "count", "total", "v", "f", "g"];
const CHARS: &[char] = &['a', 'z', 'Q', '0', '7'];
const BASIC_TYPES: &[BasicType] = &[
    BasicType::Int,
    BasicType::Float,
    BasicType::Bool,
    BasicType::Char,
];

#[derive(Debug, Clone, Copy)]
enum BinaryOp {
    Arithmetic(ArithmeticOp),
    Relational(RelationalOp),
    Logical(LogicalOp),
}

const BINARY_OPS: &[BinaryOp] = &[
    BinaryOp::Arithmetic(ArithmeticOp::Mul),
    BinaryOp::Arithmetic(ArithmeticOp::Div),
    BinaryOp::Arithmetic(ArithmeticOp::Mod),
    BinaryOp::Arithmetic(ArithmeticOp::Add),
    BinaryOp::Arithmetic(ArithmeticOp::Sub),
    BinaryOp::Relational(RelationalOp::Equal),
    BinaryOp::Relational(RelationalOp::NotEqual),
    BinaryOp::Relational(RelationalOp::Less),
    BinaryOp::Relational(RelationalOp::Greater),
    BinaryOp::Relational(RelationalOp::LessEqual),
    BinaryOp::Relational(RelationalOp::GreaterEqual),
    BinaryOp::Logical(LogicalOp::And),
    BinaryOp::Logical(LogicalOp::Or),
];

const UNARY_OPS: &[UnaryOp] = &[UnaryOp::Not, UnaryOp::Plus, UnaryOp::Minus];

const UNARY_LEVEL: u8 = 6;

/// Binding strength of the outermost operator, atoms being the strongest.
fn level(expr: &Expr) -> u8 {
    match expr {
        Expr::Logical {
            op: LogicalOp::Or, ..
        } => 1,
        Expr::Logical {
            op: LogicalOp::And,
            ..
        } => 2,
        Expr::Relational { .. } => 3,
        Expr::Arithmetic {
            op: ArithmeticOp::Add | ArithmeticOp::Sub,
            ..
        } => 4,
        Expr::Arithmetic { .. } => 5,
        Expr::Unary { .. } => UNARY_LEVEL,
        _ => 7,
    }
}

fn parenthesized(expr: Expr) -> Box<Expr> {
    Box::new(Expr::Parenthesized(Box::new(expr)))
}

fn make_unary(op: UnaryOp, operand: Expr) -> Expr {
    let operand = if level(&operand) < UNARY_LEVEL {
        parenthesized(operand)
    } else {
        Box::new(operand)
    };
    Expr::Unary { op, operand }
}

/// Builds a binary node, adding the parentheses a left-associative parse needs.
fn make_binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let mut node = match op {
        BinaryOp::Arithmetic(op) => Expr::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        BinaryOp::Relational(op) => Expr::Relational {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        BinaryOp::Logical(op) => Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
    };

    let own = level(&node);
    match &mut node {
        Expr::Arithmetic { left, right, .. }
        | Expr::Relational { left, right, .. }
        | Expr::Logical { left, right, .. } => {
            if level(left) < own {
                *left = parenthesized(std::mem::replace(&mut **left, Expr::IntLiteral(0)));
            }
            if level(right) <= own {
                *right = parenthesized(std::mem::replace(&mut **right, Expr::IntLiteral(0)));
            }
        }
        _ => {}
    }
    node
}

fn arb_ident() -> impl Strategy<Value = Ident> {
    prop::sample::select(NAMES).prop_map(id)
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0i64..10_000).prop_map(Expr::IntLiteral),
        (0u32..4_000).prop_map(|n| Expr::FloatLiteral(f64::from(n) / 4.0)),
        prop::sample::select(CHARS).prop_map(Expr::CharLiteral),
        any::<bool>().prop_map(Expr::BoolLiteral),
        arb_ident().prop_map(Expr::Ident),
    ];

    leaf.prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            (prop::sample::select(UNARY_OPS), inner.clone())
                .prop_map(|(op, operand)| make_unary(op, operand)),
            (prop::sample::select(BINARY_OPS), inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| make_binary(op, left, right)),
            (arb_ident(), inner.clone()).prop_map(|(ident, index)| Expr::ArrayAccess {
                ident,
                index: Box::new(index),
            }),
            (arb_ident(), prop::collection::vec(inner.clone(), 0..3))
                .prop_map(|(ident, args)| Expr::Call { ident, args }),
            inner.prop_map(|expr| Expr::Parenthesized(Box::new(expr))),
        ]
    })
}

fn arb_left_expr() -> impl Strategy<Value = LeftExpr> {
    (arb_ident(), prop::option::of(arb_expr())).prop_map(|(ident, index)| LeftExpr { ident, index })
}

fn arb_statement() -> impl Strategy<Value = Statement> {
    let leaf = prop_oneof![
        (arb_left_expr(), arb_expr()).prop_map(|(target, value)| Statement::Assign { target, value }),
        (arb_ident(), prop::collection::vec(arb_expr(), 0..3))
            .prop_map(|(callee, args)| Statement::ProcCall { callee, args }),
        arb_left_expr().prop_map(|target| Statement::Read { target }),
        arb_expr().prop_map(|value| Statement::WriteExpr { value }),
        "[a-z ]{0,12}".prop_map(|literal| Statement::WriteString { literal }),
        prop::option::of(arb_expr()).prop_map(|value| Statement::Return { value }),
        arb_expr().prop_map(|value| Statement::Throw { value }),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        let block = prop::collection::vec(inner, 0..4);
        prop_oneof![
            (arb_expr(), block.clone(), prop::option::of(block.clone())).prop_map(
                |(cond, then_block, else_block)| Statement::If {
                    cond,
                    then_block,
                    else_block,
                }
            ),
            (arb_expr(), block.clone()).prop_map(|(cond, body)| Statement::While { cond, body }),
            (block.clone(), block).prop_map(|(body, handler)| Statement::Try { body, handler }),
        ]
    })
}

fn arb_type() -> impl Strategy<Value = Type> {
    prop_oneof![
        prop::sample::select(BASIC_TYPES).prop_map(Type::Basic),
        (0u32..100, prop::sample::select(BASIC_TYPES))
            .prop_map(|(size, element)| Type::Array { size, element }),
    ]
}

fn arb_function() -> impl Strategy<Value = Function> {
    (
        arb_ident(),
        prop::collection::vec((arb_ident(), arb_type()), 0..3),
        prop::option::of(arb_type()),
        prop::collection::vec((arb_ident(), arb_type()), 0..3),
        prop::collection::vec(arb_statement(), 0..4),
    )
        .prop_map(|(name, parameters, return_type, declarations, statements)| Function {
            name,
            parameters: parameters
                .into_iter()
                .map(|(name, ty)| Parameter { name, ty })
                .collect(),
            return_type,
            declarations: declarations
                .into_iter()
                .map(|(name, ty)| VariableDeclaration { name, ty })
                .collect(),
            statements,
        })
}

fn arb_program() -> impl Strategy<Value = Program> {
    prop::collection::vec(arb_function(), 1..3).prop_map(|functions| Program { functions })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn printed_program_parses_back(program in arb_program()) {
        let source = program.to_string();
        let reparsed = parse_source(&source, None, Features::EXTENDED);
        prop_assert_eq!(reparsed, Ok(program), "source:\n{}", source);
    }

    #[test]
    fn printed_expression_parses_back(expr in arb_expr()) {
        let source = format!("func main()\n  x = {};\nendfunc\n", expr);
        let program = parse_source(&source, None, Features::EXTENDED);
        let expected = Program {
            functions: vec![Function {
                name: id("main"),
                parameters: vec![],
                return_type: None,
                declarations: vec![],
                statements: vec![Statement::Assign {
                    target: LeftExpr { ident: id("x"), index: None },
                    value: expr,
                }],
            }],
        };
        prop_assert_eq!(program, Ok(expected), "source:\n{}", source);
    }
}
