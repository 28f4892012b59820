use myc_session::diagnostics::prelude::*;

use super::{ParseError, ParseErrorKind, Parser, UnrecognizedToken};
use crate::ast::*;
use crate::grammar::Grammar;
use crate::lexer::Lexer;
use crate::types::{Type, TypeKind};

fn parse(source: &str) -> Result<(Program, Vec<UnrecognizedToken>), ParseError> {
    let tokens = Lexer::new(source).lex().unwrap().tokens;
    let grammar = Grammar::default();
    Parser::new(&tokens, &grammar).parse()
}

fn parse_ok(source: &str) -> Program {
    let (program, unrecognized) = parse(source).unwrap();
    assert!(unrecognized.is_empty(), "unrecognized: {unrecognized:?}");
    program
}

fn parse_err(source: &str) -> ParseError {
    parse(source).unwrap_err()
}

/// Parse `source` as the only statement of a function body.
fn statement(source: &str) -> Statement {
    let program = parse_ok(&format!("void f() {{ {source}; }}"));
    let [statement] = program.get("f").unwrap().statements.as_slice() else {
        panic!("expected one statement in {source:?}");
    };
    statement.clone()
}

fn int(text: &str) -> Statement {
    Statement::literal(text, Type::integer_literal())
}

fn var(name: &str) -> Statement {
    Statement::variable(name)
}

fn op(operator: &str, lhs: Statement, rhs: Statement) -> Statement {
    Statement::operator_call(operator, lhs, rhs)
}

fn int32() -> Type {
    Type::new("signed int", TypeKind::Int32)
}

#[test]
fn function_with_parameters() {
    let program = parse_ok("int f(int a, int b) { a + b; }");

    assert_eq!(program.len(), 1);
    assert_eq!(
        program.get("f"),
        Some(&FunctionDefinition {
            name: "f".to_owned(),
            parameters: vec![
                ParameterDefinition {
                    name: "a".to_owned(),
                    ty: int32(),
                },
                ParameterDefinition {
                    name: "b".to_owned(),
                    ty: int32(),
                },
            ],
            statements: vec![op("+", var("a"), var("b"))],
            returns_something: false,
        })
    );
}

#[test]
fn unnamed_parameters() {
    let program = parse_ok("void f(double, char c) {}");
    let params = &program.get("f").unwrap().parameters;

    assert_eq!(params[0].name, "");
    assert_eq!(params[0].ty.kind, TypeKind::Double);
    assert_eq!(params[1].name, "c");
    assert_eq!(params[1].ty.kind, TypeKind::Int8);
}

#[test]
fn precedence() {
    assert_eq!(
        statement("1 + 2 * 3"),
        op("+", int("1"), op("*", int("2"), int("3")))
    );
    assert_eq!(
        statement("1 * 2 + 3"),
        op("+", op("*", int("1"), int("2")), int("3"))
    );
    assert_eq!(
        statement("a = b + c * d - e"),
        op(
            "=",
            var("a"),
            op("-", op("+", var("b"), op("*", var("c"), var("d"))), var("e"))
        )
    );
}

#[test]
fn equal_precedence_is_left_associative() {
    assert_eq!(
        statement("1 - 2 - 3"),
        op("-", op("-", int("1"), int("2")), int("3"))
    );
    assert_eq!(
        statement("1 / 2 * 3"),
        op("*", op("/", int("1"), int("2")), int("3"))
    );
    assert_eq!(
        statement("a = b = c"),
        op("=", op("=", var("a"), var("b")), var("c"))
    );
}

#[test]
fn parenthesized_right_operand_stays_grouped() {
    assert_eq!(
        statement("a * (b + c)"),
        op("*", var("a"), op("+", var("b"), var("c")))
    );
    assert_eq!(statement("((a))"), var("a"));
}

#[test]
fn parentheses_leave_no_group_in_the_tree() {
    // a tighter operator still descends into the parenthesized call
    assert_eq!(
        statement("(1 + 2) * 3"),
        op("+", int("1"), op("*", int("2"), int("3")))
    );
    assert_eq!(
        statement("a = (b + c) * d"),
        op("=", var("a"), op("+", var("b"), op("*", var("c"), var("d"))))
    );
}

#[test]
fn splice_descends_a_long_right_spine() {
    assert_eq!(
        statement("a = b - c * d * e"),
        op(
            "=",
            var("a"),
            op("-", var("b"), op("*", op("*", var("c"), var("d")), var("e")))
        )
    );
    assert_eq!(
        statement("a = b = c + d * e - f"),
        op(
            "=",
            op("=", var("a"), var("b")),
            op("-", op("+", var("c"), op("*", var("d"), var("e"))), var("f"))
        )
    );
}

#[test]
fn literals() {
    assert_eq!(
        statement("\"hi\" + 2.5"),
        op(
            "+",
            Statement::literal("hi", Type::string_literal()),
            Statement::literal("2.5", Type::double_literal()),
        )
    );
}

#[test]
fn variable_declarations() {
    assert_eq!(
        statement("int x"),
        Statement::VariableDeclaration {
            name: "x".to_owned(),
            ty: int32(),
            initializer: None,
        }
    );

    assert_eq!(
        statement("unsigned y = 1 + 2"),
        Statement::VariableDeclaration {
            name: "y".to_owned(),
            ty: Type::new("unsigned int", TypeKind::UInt32),
            initializer: Some(Box::new(op("+", int("1"), int("2")))),
        }
    );
}

#[test]
fn function_calls() {
    assert_eq!(
        statement("f()"),
        Statement::FunctionCall {
            name: "f".to_owned(),
            arguments: vec![],
        }
    );

    assert_eq!(
        statement("f(1, g(a), b * 2)"),
        Statement::FunctionCall {
            name: "f".to_owned(),
            arguments: vec![
                int("1"),
                Statement::FunctionCall {
                    name: "g".to_owned(),
                    arguments: vec![var("a")],
                },
                op("*", var("b"), int("2")),
            ],
        }
    );

    assert_eq!(
        statement("x = f(1) + 2"),
        op(
            "=",
            var("x"),
            op(
                "+",
                Statement::FunctionCall {
                    name: "f".to_owned(),
                    arguments: vec![int("1")],
                },
                int("2")
            )
        )
    );
}

#[test]
fn empty_statements() {
    let program = parse_ok("void f() { ; ; 1; ; }");
    assert_eq!(program.get("f").unwrap().statements, [int("1")]);
}

#[test]
fn functions_are_ordered_by_name() {
    let program = parse_ok("void b() {} void c() {} void a() {}");
    let names: Vec<_> = program.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn redefinition_replaces_earlier() {
    let program = parse_ok("void f() { 1; } void f() { 2; }");

    assert_eq!(program.len(), 1);
    assert_eq!(program.get("f").unwrap().statements, [int("2")]);
}

#[test]
fn unrecognized_tokens_are_skipped() {
    let (program, unrecognized) = parse("x 1 ; void f() {}").unwrap();

    assert!(program.get("f").is_some());

    let skipped: Vec<_> = unrecognized.iter().map(|u| u.token.text.as_str()).collect();
    assert_eq!(skipped, ["x", "1", ";"]);

    let diagnostic = unrecognized[1].clone().into_diagnostic(&SourceId(0));
    assert_eq!(
        diagnostic.notes,
        ["expected a function definition, found integer literal"]
    );
}

#[test]
fn prototypes_are_skipped() {
    let (program, unrecognized) = parse("int f(int a); void g() {}").unwrap();

    assert_eq!(program.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(), ["g"]);

    let skipped: Vec<_> = unrecognized.iter().map(|u| u.token.text.as_str()).collect();
    assert_eq!(skipped, ["int", "f", "(", "int", "a", ")", ";"]);
}

#[test]
fn unknown_type_is_not_a_function() {
    let (program, unrecognized) = parse("float f() {}").unwrap();

    assert!(program.is_empty());
    assert_eq!(unrecognized.len(), 6);
}

#[test]
fn missing_paren_in_parameters() {
    let err = parse_err("int f(int a { a; }");

    assert_eq!(err.kind, ParseErrorKind::ExpectedParameterSeparator);
    assert_eq!(err.found.as_ref().map(|t| t.text.as_str()), Some("{"));
    assert_eq!(err.line(), Some(1));
}

#[test]
fn missing_parameter_type() {
    let err = parse_err("int f(a) {}");
    assert_eq!(err.kind, ParseErrorKind::ExpectedParameterType);
}

#[test]
fn missing_semicolon() {
    let err = parse_err("void f() {\n  a\n  b;\n}");

    assert_eq!(err.kind, ParseErrorKind::ExpectedSemicolon);
    assert_eq!(err.line(), Some(3));
    assert_eq!(
        err.to_string(),
        "expected `;` at end of statement, found `b` on line 3"
    );
}

#[test]
fn missing_semicolon_at_end_of_input() {
    let err = parse_err("void f() { a");

    assert_eq!(err.kind, ParseErrorKind::ExpectedSemicolon);
    assert_eq!(err.found, None);
    assert_eq!(err.line(), None);
    assert_eq!(
        err.to_string(),
        "expected `;` at end of statement, found end of input"
    );
}

#[test]
fn missing_closing_brace() {
    let err = parse_err("void f() { a;");
    assert_eq!(err.kind, ParseErrorKind::ExpectedSemicolon);
    assert_eq!(err.found, None);
}

#[test]
fn trailing_operator_is_left_for_caller() {
    let err = parse_err("void f() { a + ; }");

    assert_eq!(err.kind, ParseErrorKind::ExpectedSemicolon);
    assert_eq!(err.found.as_ref().map(|t| t.text.as_str()), Some("+"));
}

#[test]
fn missing_initializer() {
    let err = parse_err("void f() { int x = ; }");
    assert_eq!(err.kind, ParseErrorKind::ExpectedInitializer);
}

#[test]
fn parenthesis_errors() {
    assert_eq!(
        parse_err("void f() { (1 + 2; }").kind,
        ParseErrorKind::UnbalancedParen
    );
    assert_eq!(parse_err("void f() { (); }").kind, ParseErrorKind::EmptyParens);
}

#[test]
fn empty_parentheses_are_fatal() {
    let err = parse_err("void f() {\n  x = ();\n}");
    let kind = err.kind;

    assert_eq!(kind, ParseErrorKind::EmptyParens);
    assert_eq!(err.found.as_ref().map(|t| t.text.as_str()), Some(")"));
    assert_eq!(err.line(), Some(2));
}

#[test]
fn argument_errors() {
    assert_eq!(
        parse_err("void f() { g(1,); }").kind,
        ParseErrorKind::ExpectedArgument
    );

    let err = parse_err("void f() { g(1 2); }");
    assert_eq!(err.kind, ParseErrorKind::ExpectedArgumentSeparator);
    assert_eq!(err.found.as_ref().map(|t| t.text.as_str()), Some("2"));

    let err = parse_err("void f() { g(1");
    assert_eq!(err.kind, ParseErrorKind::ExpectedArgumentSeparator);
    assert_eq!(err.found, None);
}

#[test]
fn error_json() {
    let err = parse_err("void f() {\n  x y;\n}");

    insta::assert_json_snapshot!(err, @r###"
    {
      "kind": "ExpectedSemicolon",
      "found": {
        "kind": "Identifier",
        "text": "y",
        "line": 2,
        "span": {
          "start": 15,
          "end": 16
        }
      },
      "span": {
        "start": 15,
        "end": 16
      }
    }
    "###);
}
