use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}
