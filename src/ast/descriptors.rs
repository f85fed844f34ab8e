//! Field descriptors for every Gherkin node type, built once.
use once_cell::sync::Lazy;

use crate::descriptor::{FieldType, NodeType, Registry};

pub const KEYWORD_TYPES: &[&str] = &["Unknown", "Context", "Action", "Outcome", "Conjunction"];
pub const DOC_STRING_DELIMITERS: &[&str] = &["\"\"\"", "```"];

static GHERKIN: Lazy<Registry> = Lazy::new(build);

/// The Gherkin document registry.
pub fn registry() -> &'static Registry {
    &GHERKIN
}

fn string() -> FieldType { FieldType::string() }
fn node(name: &'static str) -> FieldType { FieldType::node(name) }
fn list_of(name: &'static str) -> FieldType { FieldType::list(FieldType::node(name)) }
fn optional(ty: FieldType) -> FieldType { FieldType::optional(ty) }

fn build() -> Registry {
    Registry::new()
        .with(
            NodeType::new("GherkinDocument")
                .field("uri", optional(string()))
                .field("feature", optional(node("Feature")))
                .field("comments", list_of("Comment")),
        )
        .with(
            NodeType::new("Location")
                .field("line", FieldType::unsigned())
                .field("column", optional(FieldType::unsigned())),
        )
        .with(
            NodeType::new("Comment")
                .field("location", node("Location"))
                .field("text", string()),
        )
        .with(
            NodeType::new("Tag")
                .field("location", node("Location"))
                .field("name", string())
                .field("id", string()),
        )
        .with(
            NodeType::new("Feature")
                .field("location", node("Location"))
                .field("tags", list_of("Tag"))
                .field("language", string())
                .field("keyword", string())
                .field("name", string())
                .field("description", string())
                .field("children", list_of("FeatureChild")),
        )
        .with(
            NodeType::new("FeatureChild")
                .field("rule", optional(node("Rule")))
                .field("background", optional(node("Background")))
                .field("scenario", optional(node("Scenario"))),
        )
        .with(
            NodeType::new("Rule")
                .field("location", node("Location"))
                .field("tags", list_of("Tag"))
                .field("keyword", string())
                .field("name", string())
                .field("description", string())
                .field("children", list_of("RuleChild"))
                .field("id", string()),
        )
        .with(
            NodeType::new("RuleChild")
                .field("background", optional(node("Background")))
                .field("scenario", optional(node("Scenario"))),
        )
        .with(
            NodeType::new("Background")
                .field("location", node("Location"))
                .field("keyword", string())
                .field("name", string())
                .field("description", string())
                .field("steps", list_of("Step"))
                .field("id", string()),
        )
        .with(
            NodeType::new("Scenario")
                .field("location", node("Location"))
                .field("tags", list_of("Tag"))
                .field("keyword", string())
                .field("name", string())
                .field("description", string())
                .field("steps", list_of("Step"))
                .field("examples", list_of("Examples"))
                .field("id", string()),
        )
        .with(
            NodeType::new("Examples")
                .field("location", node("Location"))
                .field("tags", list_of("Tag"))
                .field("keyword", string())
                .field("name", string())
                .field("description", string())
                .field("table_header", optional(node("TableRow")))
                .field("table_body", list_of("TableRow"))
                .field("id", string()),
        )
        .with(
            NodeType::new("Step")
                .field("location", node("Location"))
                .field("keyword", string())
                .field("keyword_type", optional(FieldType::one_of(KEYWORD_TYPES)))
                .field("text", string())
                .field("doc_string", optional(node("DocString")))
                .field("data_table", optional(node("DataTable")))
                .field("id", string()),
        )
        .with(
            NodeType::new("DocString")
                .field("location", node("Location"))
                .field("media_type", optional(string()))
                .field("content", string())
                .field("delimiter", FieldType::one_of(DOC_STRING_DELIMITERS)),
        )
        .with(
            NodeType::new("DataTable")
                .field("location", node("Location"))
                .field("rows", list_of("TableRow")),
        )
        .with(
            NodeType::new("TableRow")
                .field("location", node("Location"))
                .field("cells", list_of("TableCell"))
                .field("id", string()),
        )
        .with(
            NodeType::new("TableCell")
                .field("location", node("Location"))
                .field("value", string()),
        )
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::ast::*;
    use crate::config::Options;
    use crate::descriptor::{AstNode, ScalarKind};
    use crate::engine::Structurer;

    /// A mapping for `ty` built from its descriptor alone. `full` fills every
    /// optional and gives lists one element; numbers sit at their bounds and
    /// enums take `values[pick % len]`.
    fn sample(ty: &FieldType, full: bool, pick: usize) -> Value {
        match ty {
            FieldType::Scalar(ScalarKind::String) => json!(" text "),
            FieldType::Scalar(ScalarKind::Integer) => json!(if full { i64::MAX } else { i64::MIN }),
            FieldType::Scalar(ScalarKind::Unsigned) => json!(if full { u32::MAX } else { 0 }),
            FieldType::Scalar(ScalarKind::Number) => json!(0.5),
            FieldType::Scalar(ScalarKind::Boolean) => json!(full),
            FieldType::Scalar(ScalarKind::Null) => Value::Null,
            FieldType::Enum(values) => json!(values[pick % values.len()]),
            FieldType::Optional(inner) if full => sample(inner, full, pick),
            FieldType::Optional(_) => Value::Null,
            FieldType::List(item) if full => json!([sample(item, full, pick)]),
            FieldType::List(_) => json!([]),
            FieldType::Node(name) => {
                let node_type = registry().get(name).unwrap();
                let mut map: serde_json::Map<String, Value> = node_type
                    .fields
                    .iter()
                    .map(|field| (field.name.to_string(), sample(&field.ty, full, pick)))
                    .collect();
                map.insert("type".into(), json!(node_type.name));
                Value::Object(map)
            }
        }
    }

    fn binds<T: AstNode>(full: bool, pick: usize) -> &'static str {
        let options = Options::default();
        let node = sample(&FieldType::node(T::TYPE_NAME), full, pick);
        if let Err(err) = Structurer::new(registry(), &options).structure::<T>(&node) {
            panic!("{} does not bind (full: {full}, pick: {pick}): {err}", T::TYPE_NAME);
        }
        T::TYPE_NAME
    }

    #[test]
    fn registry_is_closed() {
        assert!(registry().dangling_references().is_empty());
        assert_eq!(registry().len(), 16);
    }

    #[test]
    fn every_ast_type_is_registered() {
        for name in [
            GherkinDocument::TYPE_NAME,
            Location::TYPE_NAME,
            Comment::TYPE_NAME,
            Tag::TYPE_NAME,
            Feature::TYPE_NAME,
            FeatureChild::TYPE_NAME,
            Rule::TYPE_NAME,
            RuleChild::TYPE_NAME,
            Background::TYPE_NAME,
            Scenario::TYPE_NAME,
            Examples::TYPE_NAME,
            Step::TYPE_NAME,
            DocString::TYPE_NAME,
            DataTable::TYPE_NAME,
            TableRow::TYPE_NAME,
            TableCell::TYPE_NAME,
        ] {
            assert!(registry().contains(name), "{name} is not registered");
        }
    }

    #[test]
    fn every_registered_type_binds_at_its_bounds() {
        let picks = KEYWORD_TYPES.len().max(DOC_STRING_DELIMITERS.len());
        for (full, pick) in std::iter::once((false, 0)).chain((0..picks).map(|pick| (true, pick))) {
            let mut bound = vec![
                binds::<GherkinDocument>(full, pick),
                binds::<Location>(full, pick),
                binds::<Comment>(full, pick),
                binds::<Tag>(full, pick),
                binds::<Feature>(full, pick),
                binds::<FeatureChild>(full, pick),
                binds::<Rule>(full, pick),
                binds::<RuleChild>(full, pick),
                binds::<Background>(full, pick),
                binds::<Scenario>(full, pick),
                binds::<Examples>(full, pick),
                binds::<Step>(full, pick),
                binds::<DocString>(full, pick),
                binds::<DataTable>(full, pick),
                binds::<TableRow>(full, pick),
                binds::<TableCell>(full, pick),
            ];
            let mut registered: Vec<&str> = registry().iter().map(|node_type| node_type.name).collect();
            bound.sort_unstable();
            registered.sort_unstable();
            assert_eq!(bound, registered);
        }
    }

    #[test]
    fn keyword_type_names_round_trip() {
        for name in KEYWORD_TYPES {
            assert_eq!(KeywordType::from_name(name).map(|kind| kind.as_str()), Some(*name));
        }
        assert_eq!(KeywordType::from_name("Setup"), None);
    }

    #[test]
    fn field_names_are_internal_names() {
        for node_type in registry().iter() {
            for field in &node_type.fields {
                assert_eq!(
                    crate::normalize::camel_to_snake_case(field.name),
                    field.name,
                    "{}.{}",
                    node_type.name,
                    field.name
                );
            }
        }
    }
}
