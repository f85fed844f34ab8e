//! Typed Gherkin document AST.
//!
//! Mirrors the `gherkinDocument` shape produced by the Cucumber `gherkin`
//! tool. Nodes are immutable once structured; fields are read through
//! accessors. The matching descriptors live in [`descriptors`].
pub mod descriptors;

use serde::{Deserialize, Serialize};

use crate::descriptor::AstNode;

pub use descriptors::registry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GherkinDocument {
    uri: Option<String>,
    feature: Option<Feature>,
    comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    line: u32,
    column: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Comment {
    location: Location,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tag {
    location: Location,
    name: String,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    location: Location,
    tags: Vec<Tag>,
    language: String,
    keyword: String,
    name: String,
    description: String,
    children: Vec<FeatureChild>,
}

/// Exactly one of the fields is set in a well-formed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureChild {
    rule: Option<Rule>,
    background: Option<Background>,
    scenario: Option<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    location: Location,
    tags: Vec<Tag>,
    keyword: String,
    name: String,
    description: String,
    children: Vec<RuleChild>,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleChild {
    background: Option<Background>,
    scenario: Option<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Background {
    location: Location,
    keyword: String,
    name: String,
    description: String,
    steps: Vec<Step>,
    id: String,
}

/// A scenario, or a scenario outline when it has examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    location: Location,
    tags: Vec<Tag>,
    keyword: String,
    name: String,
    description: String,
    steps: Vec<Step>,
    examples: Vec<Examples>,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Examples {
    location: Location,
    tags: Vec<Tag>,
    keyword: String,
    name: String,
    description: String,
    table_header: Option<TableRow>,
    table_body: Vec<TableRow>,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    location: Location,
    keyword: String,
    keyword_type: Option<String>, // one of `KEYWORD_TYPES` unless constraints are off
    text: String,
    doc_string: Option<DocString>,
    data_table: Option<DataTable>,
    id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordType {
    Unknown,
    Context,
    Action,
    Outcome,
    Conjunction,
}

impl KeywordType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Unknown" => Some(Self::Unknown),
            "Context" => Some(Self::Context),
            "Action" => Some(Self::Action),
            "Outcome" => Some(Self::Outcome),
            "Conjunction" => Some(Self::Conjunction),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Context => "Context",
            Self::Action => "Action",
            Self::Outcome => "Outcome",
            Self::Conjunction => "Conjunction",
        }
    }
}

/// Argument attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepArgument<'a> {
    DocString(&'a DocString),
    DataTable(&'a DataTable),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocString {
    location: Location,
    media_type: Option<String>,
    content: String,
    delimiter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataTable {
    location: Location,
    rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableRow {
    location: Location,
    cells: Vec<TableCell>,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableCell {
    location: Location,
    value: String,
}

// ————————————————————————————————————————————————————————————————————————————
// ACCESSORS
// ————————————————————————————————————————————————————————————————————————————

impl GherkinDocument {
    pub fn uri(&self) -> Option<&str> { self.uri.as_deref() }
    pub fn feature(&self) -> Option<&Feature> { self.feature.as_ref() }
    pub fn comments(&self) -> &[Comment] { &self.comments }
}

impl Location {
    pub fn line(&self) -> u32 { self.line }
    pub fn column(&self) -> Option<u32> { self.column }
}

impl Comment {
    pub fn location(&self) -> Location { self.location }
    pub fn text(&self) -> &str { &self.text }
}

impl Tag {
    pub fn location(&self) -> Location { self.location }
    pub fn name(&self) -> &str { &self.name }
    pub fn id(&self) -> &str { &self.id }
}

impl Feature {
    pub fn location(&self) -> Location { self.location }
    pub fn tags(&self) -> &[Tag] { &self.tags }
    pub fn language(&self) -> &str { &self.language }
    pub fn keyword(&self) -> &str { &self.keyword }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn children(&self) -> &[FeatureChild] { &self.children }

    /// Scenarios declared directly under the feature and inside its rules.
    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.children.iter().flat_map(|child| {
            let direct = child.scenario.iter();
            let ruled = child
                .rule
                .iter()
                .flat_map(|rule| rule.children.iter().filter_map(|c| c.scenario.as_ref()));
            direct.chain(ruled)
        })
    }
}

impl FeatureChild {
    pub fn rule(&self) -> Option<&Rule> { self.rule.as_ref() }
    pub fn background(&self) -> Option<&Background> { self.background.as_ref() }
    pub fn scenario(&self) -> Option<&Scenario> { self.scenario.as_ref() }
}

impl Rule {
    pub fn location(&self) -> Location { self.location }
    pub fn tags(&self) -> &[Tag] { &self.tags }
    pub fn keyword(&self) -> &str { &self.keyword }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn children(&self) -> &[RuleChild] { &self.children }
    pub fn id(&self) -> &str { &self.id }
}

impl RuleChild {
    pub fn background(&self) -> Option<&Background> { self.background.as_ref() }
    pub fn scenario(&self) -> Option<&Scenario> { self.scenario.as_ref() }
}

impl Background {
    pub fn location(&self) -> Location { self.location }
    pub fn keyword(&self) -> &str { &self.keyword }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn steps(&self) -> &[Step] { &self.steps }
    pub fn id(&self) -> &str { &self.id }
}

impl Scenario {
    pub fn location(&self) -> Location { self.location }
    pub fn tags(&self) -> &[Tag] { &self.tags }
    pub fn keyword(&self) -> &str { &self.keyword }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn steps(&self) -> &[Step] { &self.steps }
    pub fn examples(&self) -> &[Examples] { &self.examples }
    pub fn id(&self) -> &str { &self.id }

    pub fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }
}

impl Examples {
    pub fn location(&self) -> Location { self.location }
    pub fn tags(&self) -> &[Tag] { &self.tags }
    pub fn keyword(&self) -> &str { &self.keyword }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn table_header(&self) -> Option<&TableRow> { self.table_header.as_ref() }
    pub fn table_body(&self) -> &[TableRow] { &self.table_body }
    pub fn id(&self) -> &str { &self.id }
}

impl Step {
    pub fn location(&self) -> Location { self.location }
    pub fn keyword(&self) -> &str { &self.keyword }
    /// Names outside the known set read as [`KeywordType::Unknown`].
    pub fn keyword_type(&self) -> Option<KeywordType> {
        self.keyword_type
            .as_deref()
            .map(|name| KeywordType::from_name(name).unwrap_or(KeywordType::Unknown))
    }

    /// The keyword type exactly as structured.
    pub fn keyword_type_name(&self) -> Option<&str> { self.keyword_type.as_deref() }
    pub fn text(&self) -> &str { &self.text }
    pub fn doc_string(&self) -> Option<&DocString> { self.doc_string.as_ref() }
    pub fn data_table(&self) -> Option<&DataTable> { self.data_table.as_ref() }
    pub fn id(&self) -> &str { &self.id }

    /// The doc string or data table, whichever is present.
    pub fn argument(&self) -> Option<StepArgument<'_>> {
        self.doc_string
            .as_ref()
            .map(StepArgument::DocString)
            .or_else(|| self.data_table.as_ref().map(StepArgument::DataTable))
    }
}

impl DocString {
    pub fn location(&self) -> Location { self.location }
    pub fn media_type(&self) -> Option<&str> { self.media_type.as_deref() }
    pub fn content(&self) -> &str { &self.content }
    pub fn delimiter(&self) -> &str { &self.delimiter }
}

impl DataTable {
    pub fn location(&self) -> Location { self.location }
    pub fn rows(&self) -> &[TableRow] { &self.rows }
}

impl TableRow {
    pub fn location(&self) -> Location { self.location }
    pub fn cells(&self) -> &[TableCell] { &self.cells }
    pub fn id(&self) -> &str { &self.id }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(TableCell::value)
    }
}

impl TableCell {
    pub fn location(&self) -> Location { self.location }
    pub fn value(&self) -> &str { &self.value }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE NAMES
// ————————————————————————————————————————————————————————————————————————————

impl AstNode for GherkinDocument { const TYPE_NAME: &'static str = "GherkinDocument"; }
impl AstNode for Location { const TYPE_NAME: &'static str = "Location"; }
impl AstNode for Comment { const TYPE_NAME: &'static str = "Comment"; }
impl AstNode for Tag { const TYPE_NAME: &'static str = "Tag"; }
impl AstNode for Feature { const TYPE_NAME: &'static str = "Feature"; }
impl AstNode for FeatureChild { const TYPE_NAME: &'static str = "FeatureChild"; }
impl AstNode for Rule { const TYPE_NAME: &'static str = "Rule"; }
impl AstNode for RuleChild { const TYPE_NAME: &'static str = "RuleChild"; }
impl AstNode for Background { const TYPE_NAME: &'static str = "Background"; }
impl AstNode for Scenario { const TYPE_NAME: &'static str = "Scenario"; }
impl AstNode for Examples { const TYPE_NAME: &'static str = "Examples"; }
impl AstNode for Step { const TYPE_NAME: &'static str = "Step"; }
impl AstNode for DocString { const TYPE_NAME: &'static str = "DocString"; }
impl AstNode for DataTable { const TYPE_NAME: &'static str = "DataTable"; }
impl AstNode for TableRow { const TYPE_NAME: &'static str = "TableRow"; }
impl AstNode for TableCell { const TYPE_NAME: &'static str = "TableCell"; }
