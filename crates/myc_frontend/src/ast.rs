use std::collections::BTreeMap;

use crate::types::Type;
use crate::Node;

/// Parse result: functions keyed, and ordered, by name.
#[derive(Node!, Default)]
pub struct Program {
    pub functions: BTreeMap<String, FunctionDefinition>,
}

impl Program {
    /// Add a function, replacing any earlier function with the same name.
    pub fn insert(&mut self, function: FunctionDefinition) -> Option<FunctionDefinition> {
        self.functions.insert(function.name.clone(), function)
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[derive(Node!)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<ParameterDefinition>,
    pub statements: Vec<Statement>,
    // TODO: set once return statements are parsed
    pub returns_something: bool,
}

#[derive(Node!)]
pub struct ParameterDefinition {
    /// Empty if the parameter is unnamed.
    pub name: String,
    pub ty: Type,
}

#[derive(Node!)]
pub enum Statement {
    VariableDeclaration {
        name: String,
        ty: Type,
        initializer: Option<Box<Statement>>,
    },

    FunctionCall {
        name: String,
        arguments: Vec<Statement>,
    },

    Literal {
        text: String,
        ty: Type,
    },

    OperatorCall {
        operator: String,
        lhs: Box<Statement>,
        rhs: Box<Statement>,
    },

    VariableName {
        name: String,
    },

    /// Not produced by the parser yet.
    WhileLoop,
}

impl Statement {
    pub fn variable(name: impl Into<String>) -> Self {
        Statement::VariableName { name: name.into() }
    }

    pub fn literal(text: impl Into<String>, ty: Type) -> Self {
        Statement::Literal {
            text: text.into(),
            ty,
        }
    }

    pub fn operator_call(operator: impl Into<String>, lhs: Statement, rhs: Statement) -> Self {
        Statement::OperatorCall {
            operator: operator.into(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}
