pub mod error;
pub mod io;
pub mod parsing;


// Re-export key types for easier usage
pub use error::RuleError;
pub use io::*;
pub use parsing::{
    Parser,
    entity::{Content, Entity},
    parse_document,
    rules::{Rule, RuleKind},
    span::{Buffer, Span},
    to_html,
};
