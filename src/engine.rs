//! Type-directed structuring of dynamic trees.
//!
//! One call per tree level, driven by a [`FieldType`]:
//! - scalars are kind-checked, strings normalized
//! - optionals short-circuit on null/absent
//! - sequences are structured element by element, fail-fast
//! - nodes are tag-checked, key-normalized, and filled field by field
//!   from their descriptor; undeclared keys are ignored
//!
//! The output of [`Structurer::structure_value`] is the canonical tree:
//! internal keys only, declared fields only, absent optionals as null.
//! [`Structurer::structure`] then binds that tree into the target struct.
use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::{Map, Value};
use tracing::trace;

use crate::config::Options;
use crate::descriptor::{AstNode, FieldType, NodeType, Registry, ScalarKind};
use crate::error::{PathSegment, Reason, Shape, StructuringError};
use crate::normalize::{camel_to_snake_case, strip_spaces};
use crate::path_de;
use crate::tag;

pub struct Structurer<'a> {
    registry: &'a Registry,
    options: &'a Options,
}

impl<'a> Structurer<'a> {
    pub fn new(registry: &'a Registry, options: &'a Options) -> Self {
        Self { registry, options }
    }

    /// Structure `node` into `T`, all or nothing.
    pub fn structure<T: AstNode>(&self, node: &Value) -> Result<T, StructuringError> {
        let canonical = self.structure_node(node, T::TYPE_NAME)?;
        path_de::from_value_with_path(canonical).map_err(|err| {
            StructuringError::new(T::TYPE_NAME, Reason::Binding { path: err.path, message: err.message })
        })
    }

    /// Structure `node` against `ty`, producing the canonical tree.
    pub fn structure_value(&self, node: &Value, ty: &FieldType) -> Result<Value, StructuringError> {
        match ty {
            FieldType::Scalar(kind) => structure_scalar(node, *kind),
            FieldType::Enum(allowed) => self.structure_enum(node, *allowed),
            FieldType::Optional(inner) => match node {
                Value::Null => Ok(Value::Null),
                _ => self.structure_value(node, inner),
            },
            FieldType::List(item) => self.structure_list(node, item, ty),
            FieldType::Node(name) => self.structure_node(node, name),
        }
    }

    fn structure_enum(&self, node: &Value, allowed: &'static [&'static str]) -> Result<Value, StructuringError> {
        let Value::String(raw) = node else {
            return Err(wrong_shape(FieldType::Enum(allowed), Shape::String, node));
        };
        let value = strip_spaces(raw);
        if self.options.enforce_constraints && !allowed.contains(&value.as_str()) {
            return Err(StructuringError::new(
                FieldType::Enum(allowed),
                Reason::Constraint {
                    value,
                    allowed: allowed.iter().map(|s| s.to_string()).collect(),
                },
            ));
        }
        Ok(Value::String(value))
    }

    fn structure_list(&self, node: &Value, item: &FieldType, ty: &FieldType) -> Result<Value, StructuringError> {
        let Value::Array(elements) = node else {
            return Err(wrong_shape(ty, Shape::Sequence, node));
        };
        elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                self.structure_value(element, item)
                    .map_err(|err| err.within(PathSegment::Index(index)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    fn structure_node(&self, node: &Value, type_name: &str) -> Result<Value, StructuringError> {
        let Some(node_type) = self.registry.get(type_name) else {
            return Err(StructuringError::new(type_name, Reason::UnknownType { name: type_name.to_string() }));
        };
        let Value::Object(map) = node else {
            return Err(wrong_shape(node_type.name, Shape::Mapping, node));
        };
        trace!(node_type = node_type.name, keys = map.len(), "structuring node");

        tag::check_type_tag(map, &self.options.tag_key, node_type.name)
            .map_err(|reason| StructuringError::new(node_type.name, reason))?;
        let fields = normalize_keys(map, &self.options.tag_key, node_type)?;

        let mut out = Map::new();
        for field in &node_type.fields {
            let value = match fields.get(field.name) {
                Some((key, value)) => self
                    .structure_value(value, &field.ty)
                    .map_err(|err| err.within(PathSegment::Field((*key).clone())))?,
                None if field.ty.is_optional() => Value::Null,
                None => {
                    return Err(StructuringError::new(
                        node_type.name,
                        Reason::MissingField { field: field.name.to_string() },
                    ));
                }
            };
            out.insert(field.name.to_string(), value);
        }

        for (name, (key, _)) in &fields {
            if node_type.get(name).is_none() {
                trace!(node_type = node_type.name, key = key.as_str(), "ignoring undeclared field");
            }
        }
        Ok(Value::Object(out))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Internal name → (original key, value), excluding the type tag.
fn normalize_keys<'m>(
    map: &'m Map<String, Value>,
    tag_key: &str,
    node_type: &NodeType,
) -> Result<IndexMap<String, (&'m String, &'m Value)>, StructuringError> {
    let mut out = IndexMap::with_capacity(map.len());
    for (key, value) in tag::data_fields(map, tag_key) {
        match out.entry(camel_to_snake_case(key)) {
            Entry::Vacant(slot) => {
                slot.insert((key, value));
            }
            Entry::Occupied(slot) => {
                let (first, _) = slot.get();
                return Err(StructuringError::new(
                    node_type.name,
                    Reason::KeyCollision {
                        first: (*first).clone(),
                        second: key.clone(),
                        field: slot.key().clone(),
                    },
                ));
            }
        }
    }
    Ok(out)
}

fn structure_scalar(node: &Value, kind: ScalarKind) -> Result<Value, StructuringError> {
    match (kind, node) {
        (ScalarKind::String, Value::String(s)) => Ok(Value::String(strip_spaces(s))),
        (ScalarKind::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(node.clone()),
        (ScalarKind::Integer, Value::Number(n)) => Err(StructuringError::new(
            kind,
            Reason::NotAnInteger { found: n.to_string() },
        )),
        (ScalarKind::Unsigned, Value::Number(n)) => match n.as_u64() {
            Some(value) if value <= u64::from(u32::MAX) => Ok(node.clone()),
            _ if n.is_i64() || n.is_u64() => Err(StructuringError::new(
                kind,
                Reason::OutOfRange { found: n.to_string(), min: 0, max: u64::from(u32::MAX) },
            )),
            _ => Err(StructuringError::new(kind, Reason::NotAnInteger { found: n.to_string() })),
        },
        (ScalarKind::Number, Value::Number(_))
        | (ScalarKind::Boolean, Value::Bool(_))
        | (ScalarKind::Null, Value::Null) => Ok(node.clone()),
        (kind, node) => Err(wrong_shape(kind, scalar_shape(kind), node)),
    }
}

fn scalar_shape(kind: ScalarKind) -> Shape {
    match kind {
        ScalarKind::String => Shape::String,
        ScalarKind::Integer | ScalarKind::Unsigned | ScalarKind::Number => Shape::Number,
        ScalarKind::Boolean => Shape::Boolean,
        ScalarKind::Null => Shape::Null,
    }
}

fn wrong_shape(expected: impl ToString, wanted: Shape, node: &Value) -> StructuringError {
    StructuringError::new(expected, Reason::WrongShape { wanted, found: Shape::of(node) })
}
