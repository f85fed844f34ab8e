// Statically declared node type descriptors. No serde_json::Value here.

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

/// A Rust type the engine can structure into.
///
/// `TYPE_NAME` must name a [`NodeType`] in the registry handed to the engine;
/// the struct's fields must match that descriptor's fields one to one.
pub trait AstNode: DeserializeOwned {
    const TYPE_NAME: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    /// Integer in `0..=u32::MAX`.
    Unsigned,
    Number,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarKind),
    /// String scalar restricted to a fixed value set (checked after normalization).
    Enum(&'static [&'static str]),
    /// Nested node, by registry name.
    Node(&'static str),
    List(Box<FieldType>),
    Optional(Box<FieldType>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Internal (snake case) name.
    pub name: &'static str,
    pub ty: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeType {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>, // declaration order = canonical output order
}

/// Closed set of node types, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<&'static str, NodeType>,
}

// ————————————————————————————————————————————————————————————————————————————
// FIELD TYPES
// ————————————————————————————————————————————————————————————————————————————

impl FieldType {
    pub fn string() -> Self { Self::Scalar(ScalarKind::String) }
    pub fn integer() -> Self { Self::Scalar(ScalarKind::Integer) }
    pub fn unsigned() -> Self { Self::Scalar(ScalarKind::Unsigned) }
    pub fn number() -> Self { Self::Scalar(ScalarKind::Number) }
    pub fn boolean() -> Self { Self::Scalar(ScalarKind::Boolean) }
    pub fn one_of(values: &'static [&'static str]) -> Self { Self::Enum(values) }
    pub fn node(name: &'static str) -> Self { Self::Node(name) }
    pub fn list(item: FieldType) -> Self { Self::List(Box::new(item)) }
    pub fn optional(inner: FieldType) -> Self { Self::Optional(Box::new(inner)) }

    /// Whether a mapping may omit a field of this type.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Every node type name this field type refers to, outermost first.
    pub fn referenced_nodes(&self) -> Vec<&'static str> {
        match self {
            Self::Scalar(_) | Self::Enum(_) => Vec::new(),
            Self::Node(name) => vec![*name],
            Self::List(inner) | Self::Optional(inner) => inner.referenced_nodes(),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Unsigned => "unsigned integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        })
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Enum(values) => write!(f, "one of {values:?}"),
            Self::Node(name) => f.write_str(name),
            Self::List(item) => write!(f, "list of {item}"),
            Self::Optional(inner) => write!(f, "optional {inner}"),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NODE TYPES
// ————————————————————————————————————————————————————————————————————————————

impl NodeType {
    pub fn new(name: &'static str) -> Self {
        Self { name, fields: Vec::new() }
    }

    pub fn field(mut self, name: &'static str, ty: FieldType) -> Self {
        self.fields.push(FieldDescriptor { name, ty });
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Registry::register`].
    pub fn with(mut self, node_type: NodeType) -> Self {
        self.register(node_type);
        self
    }

    /// Add or replace a node type; returns the replaced one.
    pub fn register(&mut self, node_type: NodeType) -> Option<NodeType> {
        self.types.insert(node_type.name, node_type)
    }

    pub fn get(&self, name: &str) -> Option<&NodeType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeType> {
        self.types.values()
    }

    /// `(owner type, missing type)` for every field that names an unregistered type.
    pub fn dangling_references(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        for node_type in self.types.values() {
            for field in &node_type.fields {
                for name in field.ty.referenced_nodes() {
                    if !self.contains(name) {
                        out.push((node_type.name, name));
                    }
                }
            }
        }
        out
    }
}
