use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Type {
    pub name: String,
    pub kind: TypeKind,
    /// Only populated for [`TypeKind::Struct`].
    pub fields: Vec<Type>,
}

#[derive(NodeCopy!)]
pub enum TypeKind {
    Void,
    Int8,
    UInt8,
    Int32,
    UInt32,
    Double,
    Struct,
}

impl Type {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: vec![],
        }
    }

    pub fn double_literal() -> Self {
        Self::new("double", TypeKind::Double)
    }

    pub fn integer_literal() -> Self {
        Self::new("signed integer", TypeKind::Int32)
    }

    pub fn string_literal() -> Self {
        Self::new("string", TypeKind::UInt8)
    }
}
