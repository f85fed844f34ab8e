//! Structure the dynamic tree of a parsed Gherkin document into a typed AST.
//!
//! ```text
//! source ─▶ GrammarParser ─▶ serde_json::Value ─▶ Structurer ─▶ GherkinDocument
//! ```
//!
//! The grammar parser is external ([`grammar::GrammarParser`]); this crate
//! only checks shape and normalizes representation.
pub mod ast;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod normalize;
pub mod path_de;
pub mod tag;

use rayon::prelude::*;
use tracing::debug;

pub use ast::GherkinDocument;
pub use config::Options;
pub use descriptor::AstNode;
pub use engine::Structurer;
pub use error::{GrammarError, ParseError, StructuringError};
pub use grammar::{GrammarParser, MessageStreamParser};

/// Entry point: grammar parser + options, structuring into the Gherkin registry.
#[derive(Debug, Clone, Default)]
pub struct Parser<G = MessageStreamParser> {
    grammar: G,
    options: Options,
}

impl Parser {
    /// Parser over the Cucumber `gherkin` JSON message stream.
    pub fn message_stream() -> Self {
        Self::new(MessageStreamParser)
    }
}

impl<G: GrammarParser> Parser<G> {
    pub fn new(grammar: G) -> Self {
        Self { grammar, options: Options::default() }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parse one document.
    pub fn parse(&self, source: &str) -> Result<GherkinDocument, ParseError> {
        self.parse_as(source)
    }

    /// Parse one document whose root is any registered node type.
    pub fn parse_as<T: AstNode>(&self, source: &str) -> Result<T, ParseError> {
        debug!(bytes = source.len(), root = T::TYPE_NAME, "parsing");
        let tree = self.grammar.parse(source).inspect_err(|err| {
            debug!(error = %err, "grammar parser rejected input");
        })?;
        let structured = Structurer::new(ast::registry(), &self.options)
            .structure::<T>(&tree)
            .inspect_err(|err| debug!(error = %err, "structuring failed"))?;
        Ok(structured)
    }

    /// Parse independent documents in parallel; results keep input order.
    pub fn parse_all<S>(&self, sources: &[S]) -> Vec<Result<GherkinDocument, ParseError>>
    where
        S: AsRef<str> + Sync,
        G: Sync,
    {
        sources
            .par_iter()
            .map(|source| self.parse(source.as_ref()))
            .collect()
    }
}

/// Parse one Gherkin message stream with default options.
pub fn parse(source: &str) -> Result<GherkinDocument, ParseError> {
    Parser::message_stream().parse(source)
}
