//! Integration tests for the front end.
//!
//! These tests run whole programs through the public pipeline, from source
//! text through tokenization and parsing, and check the resulting trees and
//! diagnostics.

use asl_parser::{
    ast::{
        expressions::Expr,
        statements::Statement,
        types::{BasicType, Type},
    },
    errors::errors::ErrorImpl,
    features::Features,
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse_source,
    parser::parser::parse,
    render_error,
};

const FACTORIAL: &str = "\
// Recursive and iterative factorial
func fact(n : int) : int
  if n <= 1 then
    return 1;
  endif
  return n * fact(n - 1);
endfunc

func main()
  var i, acc : int;
  read i;
  acc = 1;
  while i > 1 do
    acc = acc * i;
    i = i - 1;
  endwhile
  write acc;
  write \"\\n\";
  write fact(5) == acc;
endfunc
";

const SORT: &str = "\
func swap(v : array [10] of int, i : int, j : int)
  var t : int;
  t = v[i];
  v[i] = v[j];
  v[j] = t;
endfunc

func main()
  var v : array [10] of int;
  var i, j : int;
  var sorted : bool;
  i = 0;
  while i < 10 do
    read v[i];
    i = i + 1;
  endwhile
  sorted = false;
  while not sorted do
    sorted = true;
    j = 0;
    while j < 9 do
      if v[j] > v[j + 1] then
        swap(v, j, j + 1);
        sorted = false;
      endif
      j = j + 1;
    endwhile
  endwhile
  try
    if v[0] % 2 != 0 then
      throw v[0];
    endif
  catch
    write \"odd minimum\";
  endtry
endfunc
";

#[test]
fn test_parse_minimal_program() {
    let tokens = tokenize(FACTORIAL, Some("fact.asl".to_string()), Features::MINIMAL).unwrap();
    let program = parse(tokens, Features::MINIMAL).unwrap();

    assert_eq!(program.functions.len(), 2);

    let fact = &program.functions[0];
    assert_eq!(fact.name.name, "fact");
    assert_eq!(fact.return_type, Some(Type::Basic(BasicType::Int)));
    assert_eq!(fact.statements.len(), 2);

    let main = &program.functions[1];
    assert_eq!(main.declarations.len(), 2);
    assert_eq!(main.statements.len(), 6);
    assert!(matches!(main.statements[2], Statement::While { .. }));
    assert_eq!(
        main.statements[4],
        Statement::WriteString {
            literal: String::from("\n")
        }
    );
    assert!(matches!(
        &main.statements[5],
        Statement::WriteExpr {
            value: Expr::Relational { .. }
        }
    ));
}

#[test]
fn test_parse_extended_program() {
    let program = parse_source(SORT, Some("sort.asl".to_string()), Features::EXTENDED).unwrap();

    assert_eq!(program.functions.len(), 2);

    let swap = &program.functions[0];
    assert_eq!(swap.parameters.len(), 3);
    assert_eq!(
        swap.parameters[0].ty,
        Type::Array {
            size: 10,
            element: BasicType::Int
        }
    );

    let main = &program.functions[1];
    assert_eq!(main.declarations.len(), 4);
    assert!(matches!(
        main.statements.last(),
        Some(Statement::Try { body, handler }) if body.len() == 1 && handler.len() == 1
    ));
}

#[test]
fn test_extended_program_is_rejected_by_minimal_profile() {
    let errors = parse_source(SORT, None, Features::MINIMAL).unwrap_err();

    assert!(errors.len() > 1);
    assert!(errors
        .iter()
        .all(|error| !matches!(error.get_impl(), ErrorImpl::UnrecognisedToken { .. })));
}

#[test]
fn test_printed_program_parses_back() {
    let program = parse_source(SORT, None, Features::EXTENDED).unwrap();
    let printed = program.to_string();
    let reparsed = parse_source(&printed, None, Features::EXTENDED).unwrap();

    assert_eq!(program, reparsed);
    assert_eq!(printed, reparsed.to_string());
}

#[test]
fn test_diagnostics_are_collected_across_functions() {
    let source = "\
func f(a : int) : int
  return a +;
endfunc

func main()
  var x int;
  x = f(1, 2;
  write x;
endfunc
";
    let errors = parse_source(source, None, Features::EXTENDED).unwrap_err();
    let lines: Vec<u32> = errors.iter().map(|error| error.get_position().line).collect();

    assert_eq!(lines, vec![2, 6, 7]);
    assert!(matches!(
        errors[1].get_impl(),
        ErrorImpl::UnexpectedToken {
            found: TokenKind::Int,
            ..
        }
    ));
    assert!(matches!(
        errors[2].get_impl(),
        ErrorImpl::UnexpectedToken {
            found: TokenKind::Semicolon,
            ..
        }
    ));
}

#[test]
fn test_lexical_error_stops_pipeline() {
    let errors = parse_source("func main()\n  x = #;\nendfunc\n", None, Features::EXTENDED)
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_render_premature_end() {
    let source = "func main()\n  while true do\n    x = 1;\n";
    let errors = parse_source(source, None, Features::EXTENDED).unwrap_err();

    assert_eq!(errors.len(), 1);
    let rendered = render_error(&errors[0], source, "loop.asl");
    assert!(rendered.starts_with("Error: PrematureEnd (Input ended early, expected "));
    assert!(rendered.contains("-> loop.asl\n"));
    assert!(rendered.contains("at 4:1"));
}
