//! Human-readable views of tokens and syntax trees.
//!
//! The dumps show the structure as parsed. The canonical rendering writes the
//! tree back out as source with every operator call parenthesized, so it
//! re-parses to the same tree.

use std::fmt::{self, Display};

use crate::ast::{FunctionDefinition, Program, Statement};
use crate::grammar::TypeRegistry;
use crate::token::{Token, TokenKind};
use crate::types::Type;

const INDENT: &str = "    ";

/// One `Token(KIND, "text", line)` per line.
pub fn dump_tokens(tokens: &[Token]) -> String {
    DumpTokens(tokens).to_string()
}

/// An indented tree of every function, its parameters and statements.
pub fn dump_program(program: &Program) -> String {
    DumpProgram(program).to_string()
}

pub fn render_program(program: &Program, types: &TypeRegistry) -> String {
    CanonicalProgram { program, types }.to_string()
}

pub fn render_statement(statement: &Statement, types: &TypeRegistry) -> String {
    CanonicalStatement { statement, types }.to_string()
}

struct DumpTokens<'a>(&'a [Token]);

impl Display for DumpTokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in self.0 {
            writeln!(
                f,
                "Token({}, {:?}, {})",
                token_kind_label(token.kind),
                token.text,
                token.line
            )?;
        }

        Ok(())
    }
}

fn token_kind_label(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Identifier => "IDENTIFIER",
        TokenKind::IntegerLiteral => "INTEGER_LITERAL",
        TokenKind::DoubleLiteral => "DOUBLE_LITERAL",
        TokenKind::StringLiteral => "STRING_LITERAL",
        TokenKind::Operator => "OPERATOR",
    }
}

struct DumpProgram<'a>(&'a Program);

impl Display for DumpProgram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for function in self.0.iter() {
            dump_function(f, function)?;
        }

        Ok(())
    }
}

fn dump_function(f: &mut fmt::Formatter, function: &FunctionDefinition) -> fmt::Result {
    writeln!(f, "{}(", function.name)?;

    for param in &function.parameters {
        if param.name.is_empty() {
            writeln!(f, "{INDENT}{}", param.ty.name)?;
        } else {
            writeln!(f, "{INDENT}{} {}", param.ty.name, param.name)?;
        }
    }

    writeln!(f, ") {{")?;

    for statement in &function.statements {
        dump_statement(f, statement, 1)?;
    }

    writeln!(f, "}}")
}

fn dump_statement(f: &mut fmt::Formatter, statement: &Statement, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);

    let (label, children): (String, Vec<&Statement>) = match statement {
        Statement::VariableDeclaration {
            name,
            ty,
            initializer,
        } => (
            format!("VARIABLE_DECLARATION {} {name}", ty.name),
            initializer.iter().map(|s| &**s).collect(),
        ),

        Statement::FunctionCall { name, arguments } => {
            (format!("FUNCTION_CALL {name}"), arguments.iter().collect())
        }

        Statement::Literal { text, ty } if *ty == Type::string_literal() => {
            (format!("LITERAL {} {text:?}", ty.name), vec![])
        }
        Statement::Literal { text, ty } => (format!("LITERAL {} {text}", ty.name), vec![]),

        Statement::OperatorCall { operator, lhs, rhs } => {
            (format!("OPERATOR_CALL {operator}"), vec![&**lhs, &**rhs])
        }

        Statement::VariableName { name } => (format!("VARIABLE_NAME {name}"), vec![]),

        Statement::WhileLoop => ("WHILE_LOOP".to_owned(), vec![]),
    };

    if children.is_empty() {
        return writeln!(f, "{indent}{label}");
    }

    writeln!(f, "{indent}{label} (")?;
    for child in children {
        dump_statement(f, child, depth + 1)?;
    }
    writeln!(f, "{indent})")
}

struct CanonicalProgram<'a> {
    program: &'a Program,
    types: &'a TypeRegistry,
}

impl Display for CanonicalProgram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, function) in self.program.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            // return types aren't kept in the tree
            write!(f, "void {}(", function.name)?;

            for (i, param) in function.parameters.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }

                write!(f, "{}", type_keyword(&param.ty, self.types))?;
                if !param.name.is_empty() {
                    write!(f, " {}", param.name)?;
                }
            }

            writeln!(f, ") {{")?;

            for statement in &function.statements {
                let statement = CanonicalStatement {
                    statement,
                    types: self.types,
                };
                writeln!(f, "{INDENT}{statement};")?;
            }

            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

struct CanonicalStatement<'a> {
    statement: &'a Statement,
    types: &'a TypeRegistry,
}

impl<'a> CanonicalStatement<'a> {
    fn child(&self, statement: &'a Statement) -> CanonicalStatement<'a> {
        CanonicalStatement {
            statement,
            types: self.types,
        }
    }
}

impl Display for CanonicalStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.statement {
            Statement::VariableDeclaration {
                name,
                ty,
                initializer,
            } => {
                write!(f, "{} {name}", type_keyword(ty, self.types))?;
                if let Some(initializer) = initializer {
                    write!(f, " = {}", self.child(initializer))?;
                }
                Ok(())
            }

            Statement::FunctionCall { name, arguments } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", self.child(argument))?;
                }
                write!(f, ")")
            }

            Statement::Literal { text, ty } if *ty == Type::string_literal() => {
                write_string_literal(f, text)
            }
            Statement::Literal { text, .. } => write!(f, "{text}"),

            Statement::OperatorCall { operator, lhs, rhs } => {
                write!(f, "({} {operator} {})", self.child(lhs), self.child(rhs))
            }

            Statement::VariableName { name } => write!(f, "{name}"),

            // renders as an empty statement
            Statement::WhileLoop => Ok(()),
        }
    }
}

/// The keyword for a built-in type, or its descriptive name otherwise.
fn type_keyword<'a>(ty: &'a Type, types: &TypeRegistry) -> &'a str {
    types.keyword_of(ty).unwrap_or(ty.name.as_str())
}

/// Quote a string, escaping what the lexer can decode. A `"` can't be escaped
/// and is written as is.
fn write_string_literal(f: &mut fmt::Formatter, text: &str) -> fmt::Result {
    write!(f, "\"")?;

    for ch in text.chars() {
        match ch {
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            '\\' => write!(f, "\\\\")?,
            _ => write!(f, "{ch}")?,
        }
    }

    write!(f, "\"")
}
