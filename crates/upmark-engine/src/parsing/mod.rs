//! # Parsing
//!
//! Rule-driven markup parsing over an immutable text buffer.
//!
//! A document starts life as one [`Raw`](entity::Raw) entity covering the
//! whole text. Each rule in turn replaces the raw entities it can explain
//! with typed ones and leaves the rest raw, so a rule earlier in the list
//! always wins over a later one for the same text.
//!
//! ## Modules
//!
//! - **`span`**: byte ranges and the shared [`Buffer`]
//! - **`entity`**: the [`Entity`](entity::Entity) tree and its rendering
//! - **`rules`**: the [`Rule`] trait and every built-in rule
//! - **`snapshot`**: normalization and invariant checks for tests

pub mod entity;
pub mod rules;
pub mod snapshot;
pub mod span;

#[cfg(test)]
mod tests;

use log::debug;

use entity::{Content, Entity};
use rules::{Rule, RuleKind};
use span::Buffer;

/// Applies an ordered list of rules to documents.
pub struct Parser {
    rules: Vec<Box<dyn Rule>>,
}

impl Parser {
    /// Rules run in the given order; earlier rules take precedence.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn from_kinds(kinds: &[RuleKind]) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build()).collect())
    }

    /// Every built-in rule in [`RuleKind::STANDARD`] order.
    pub fn standard() -> Self {
        Self::from_kinds(&RuleKind::STANDARD)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn parse<'a>(&self, text: &'a str) -> Content<'a> {
        let content = Content::raw_from_buffer(Buffer::new(text));
        debug!("parsing {} bytes with {} rules", text.len(), self.rules.len());
        self.run_rules(content)
    }

    /// Runs every rule again over whatever raw text `content` still holds.
    pub fn reparse<'a>(&self, content: Content<'a>) -> Content<'a> {
        self.run_rules(content)
    }

    fn run_rules<'a>(&self, content: Content<'a>) -> Content<'a> {
        self.rules
            .iter()
            .fold(content, |content, rule| Self::apply_rule(rule.as_ref(), content))
    }

    /// Replaces each raw entity with what `rule` makes of its span. Other
    /// entities pass through untouched.
    pub fn apply_rule<'a>(rule: &dyn Rule, content: Content<'a>) -> Content<'a> {
        let before = content.len();
        let out: Content<'a> = content
            .into_iter()
            .flat_map(|entity| match entity {
                Entity::Raw(raw) => rule.parse(raw.buf, raw.span.start, raw.span.end),
                other => vec![other],
            })
            .collect();
        debug!("{}: {} -> {} entities", rule.name(), before, out.len());
        out
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses `text` with the standard rule set.
pub fn parse_document(text: &str) -> Content<'_> {
    Parser::standard().parse(text)
}

/// Parses `text` with the standard rule set and renders it.
pub fn to_html(text: &str) -> String {
    parse_document(text).to_html()
}
