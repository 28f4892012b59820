//! Fixed tables the parser consults: built-in types and binary operators.

use std::collections::HashMap;

use crate::types::{Type, TypeKind};

/// Binding strength of a binary operator. Higher binds tighter; `0` means
/// the token is not a binary operator.
pub type Precedence = u32;

/// Maps type keywords to their built-in types.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<&'static str, Type>,
}

impl TypeRegistry {
    pub fn builtin() -> Self {
        let types = [
            ("void", Type::new("void", TypeKind::Void)),
            ("int", Type::new("signed int", TypeKind::Int32)),
            ("unsigned", Type::new("unsigned int", TypeKind::UInt32)),
            ("char", Type::new("signed char", TypeKind::Int8)),
            ("uint8_t", Type::new("uint8_t", TypeKind::Int8)),
            ("double", Type::new("double", TypeKind::Double)),
        ];

        Self {
            types: types.into_iter().collect(),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<&Type> {
        self.types.get(keyword)
    }

    /// The keyword a type is spelled with in source, if it is a built-in.
    pub fn keyword_of(&self, ty: &Type) -> Option<&'static str> {
        self.types
            .iter()
            .find_map(|(&keyword, builtin)| (builtin == ty).then_some(keyword))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Precedences of the binary operators.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    precedences: HashMap<&'static str, Precedence>,
}

impl OperatorTable {
    pub fn precedence(&self, operator: &str) -> Precedence {
        self.precedences.get(operator).copied().unwrap_or(0)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        let precedences = [("=", 1), ("+", 10), ("-", 10), ("*", 50), ("/", 50)];

        Self {
            precedences: precedences.into_iter().collect(),
        }
    }
}

/// Everything the parser needs besides the tokens. Built once and shared.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    pub types: TypeRegistry,
    pub operators: OperatorTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_types() {
        let types = TypeRegistry::builtin();

        assert_eq!(types.get("int").map(|t| t.kind), Some(TypeKind::Int32));
        assert_eq!(types.get("unsigned").map(|t| t.kind), Some(TypeKind::UInt32));
        assert_eq!(types.get("char").map(|t| t.kind), Some(TypeKind::Int8));
        assert_eq!(types.get("uint8_t").map(|t| t.kind), Some(TypeKind::Int8));
        assert_eq!(types.get("double").map(|t| t.kind), Some(TypeKind::Double));
        assert_eq!(types.get("void").map(|t| t.kind), Some(TypeKind::Void));

        assert_eq!(types.get("Int"), None);
        assert_eq!(types.get("float"), None);
    }

    #[test]
    fn keyword_round_trip() {
        let types = TypeRegistry::builtin();

        for keyword in ["void", "int", "unsigned", "char", "uint8_t", "double"] {
            let ty = types.get(keyword).unwrap();
            assert_eq!(types.keyword_of(ty), Some(keyword));
        }

        assert_eq!(types.keyword_of(&Type::string_literal()), None);
    }

    #[test]
    fn precedences() {
        let operators = OperatorTable::default();

        assert_eq!(operators.precedence("="), 1);
        assert_eq!(operators.precedence("+"), operators.precedence("-"));
        assert!(operators.precedence("*") > operators.precedence("+"));
        assert_eq!(operators.precedence("*"), operators.precedence("/"));
        assert_eq!(operators.precedence(")"), 0);
        assert_eq!(operators.precedence(";"), 0);
    }
}
