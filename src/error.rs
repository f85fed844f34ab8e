use std::collections::VecDeque;
use std::fmt;

use serde_json::Value;

/// Failures visible to callers of the entry point.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The source text does not conform to the grammar.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] GrammarError),
    /// The grammar output does not match the expected AST shape.
    #[error("deserialize error: {0}")]
    Deserialize(#[from] StructuringError),
}

/// Grammar-level error reported by the external parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{message}", location_prefix(.line, .column))]
pub struct GrammarError {
    pub message: String,
    pub line: Option<u64>,
    pub column: Option<u64>,
}

impl GrammarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), line: None, column: None }
    }

    pub fn at(mut self, line: Option<u64>, column: Option<u64>) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

/// `(line:column): `, `(line): ` or nothing.
fn location_prefix(line: &Option<u64>, column: &Option<u64>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!("({line}:{column}): "),
        (Some(line), None) => format!("({line}): "),
        _ => String::new(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// STRUCTURING
// ————————————————————————————————————————————————————————————————————————————

/// Why structuring stopped at [`StructuringError::path`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Reason {
    #[error("type tag `{found}` does not match `{expected}`")]
    TagMismatch { found: String, expected: String },
    #[error("missing required field `{field}`")]
    MissingField { field: String },
    #[error("wanted {wanted}, found {found}")]
    WrongShape { wanted: Shape, found: Shape },
    #[error("number {found} is not an integer")]
    NotAnInteger { found: String },
    #[error("number {found} is outside {min}..={max}")]
    OutOfRange { found: String, min: u64, max: u64 },
    #[error("keys `{first}` and `{second}` both normalize to `{field}`")]
    KeyCollision { first: String, second: String, field: String },
    #[error("`{value}` is not one of {allowed:?}")]
    Constraint { value: String, allowed: Vec<String> },
    #[error("no descriptor registered for `{name}`")]
    UnknownType { name: String },
    #[error("typed binding failed at `{path}`: {message}")]
    Binding { path: String, message: String },
}

/// Kind of a dynamic node, for shape mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Mapping,
    Sequence,
    String,
    Number,
    Boolean,
    Null,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mapping => "a mapping",
            Self::Sequence => "a sequence",
            Self::String => "a string",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::Null => "null",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Key as it appears in the dynamic tree.
    Field(String),
    Index(usize),
}

/// Location of a node inside the dynamic tree, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(VecDeque<PathSegment>);

impl FieldPath {
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.0.iter()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(key) if i == 0 => f.write_str(key)?,
                PathSegment::Field(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Structuring failure: where, against which type, and why.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("at `{path}` (expected {expected}): {reason}")]
pub struct StructuringError {
    pub path: FieldPath,
    pub expected: String,
    pub reason: Reason,
}

impl StructuringError {
    pub fn new(expected: impl ToString, reason: Reason) -> Self {
        Self { path: FieldPath::default(), expected: expected.to_string(), reason }
    }

    /// Prefix the path while unwinding out of a child.
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.0.push_front(segment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_paths() {
        let error = StructuringError::new("Step", Reason::MissingField { field: "text".into() })
            .within(PathSegment::Index(1))
            .within(PathSegment::Field("steps".into()))
            .within(PathSegment::Field("scenario".into()))
            .within(PathSegment::Index(2))
            .within(PathSegment::Field("children".into()))
            .within(PathSegment::Field("feature".into()));
        assert_eq!(error.path.to_string(), "feature.children[2].scenario.steps[1]");
        assert_eq!(
            error.to_string(),
            "at `feature.children[2].scenario.steps[1]` (expected Step): missing required field `text`"
        );
    }

    #[test]
    fn root_path_is_labelled() {
        let error = StructuringError::new(
            "Doc",
            Reason::WrongShape { wanted: Shape::Mapping, found: Shape::Sequence },
        );
        assert!(error.path.is_root());
        assert_eq!(error.to_string(), "at `<root>` (expected Doc): wanted a mapping, found a sequence");
    }

    #[test]
    fn grammar_error_shows_location() {
        let error = GrammarError::new("expected value").at(Some(3), Some(7));
        assert_eq!(error.to_string(), "(3:7): expected value");
        assert_eq!(GrammarError::new("boom").to_string(), "boom");
        assert_eq!(GrammarError::new("eof").at(Some(4), None).to_string(), "(4): eof");
        assert!(std::error::Error::source(&error).is_none());
        let wrapped = ParseError::from(error);
        assert_eq!(wrapped.to_string(), "invalid input: (3:7): expected value");
    }
}
