use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shape of the right-hand side of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    /// `type X struct { ... }`
    Struct,
    /// `type X interface { ... }`
    Interface,
    /// Named basic types, aliases, function types and everything else
    Other,
}

impl TypeShape {
    pub fn from_node_kind(kind: &str) -> Self {
        match kind {
            "struct_type" => TypeShape::Struct,
            "interface_type" => TypeShape::Interface,
            _ => TypeShape::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeShape::Struct => "struct",
            TypeShape::Interface => "interface",
            TypeShape::Other => "other",
        }
    }
}

/// Top-level type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub shape: TypeShape,
    /// Starts with an upper-case letter
    pub exported: bool,
    /// 1-based line of the declaration
    pub line: usize,
}

/// Declared result type of a function, with a leading `*` stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReturnType {
    /// A plain identifier such as `DatabaseManager`
    Named { name: String, pointer: bool },
    /// A member of another package such as `databasemgr.IDatabaseManager`
    Qualified {
        package: String,
        member: String,
        pointer: bool,
    },
    /// Any other type expression, kept as source text
    Other { text: String },
}

impl ReturnType {
    /// Source-like rendering without the pointer marker
    pub fn type_text(&self) -> String {
        match self {
            ReturnType::Named { name, .. } => name.clone(),
            ReturnType::Qualified {
                package, member, ..
            } => format!("{package}.{member}"),
            ReturnType::Other { text } => text.clone(),
        }
    }

    pub fn is_pointer(&self) -> bool {
        match self {
            ReturnType::Named { pointer, .. } | ReturnType::Qualified { pointer, .. } => *pointer,
            ReturnType::Other { .. } => false,
        }
    }
}

/// Top-level function declaration (methods with receivers are not included)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    /// One entry per returned value; `(a, b int)` yields two entries
    pub results: Vec<ReturnType>,
    pub line: usize,
}

impl FuncDecl {
    pub fn returns_single_value(&self) -> bool {
        self.results.len() == 1
    }
}

/// Structural summary of one Go compilation unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub package: String,
    pub types: Vec<TypeDecl>,
    pub functions: Vec<FuncDecl>,
}

impl SourceUnit {
    pub fn function(&self, name: &str) -> Option<&FuncDecl> {
        self.functions.iter().find(|func| func.name == name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.function(name).is_some()
    }

    pub fn structs(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types
            .iter()
            .filter(|decl| decl.shape == TypeShape::Struct)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types
            .iter()
            .filter(|decl| decl.shape == TypeShape::Interface)
    }
}
