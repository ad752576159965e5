use crate::ast;
use thiserror::Error as ThisError;

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] ast::Error),

    #[error("backtracking exceeded the limit of {limit} steps")]
    StepLimitExceeded { limit: usize },
}
