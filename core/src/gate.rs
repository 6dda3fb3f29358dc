//! # Statement Gate
//!
//! Every statement is parsed against the SQLite grammar before it may reach
//! storage. The gate catches **malformed** statements (a corrupted builder, a
//! hand-written filter with a typo); it is not a policy engine and accepts any
//! well-formed statement of an allowed kind.
//!
//! A statement passes when its text parses as exactly one query, insert,
//! update, delete, create-table or create-index statement.

use sqlparser::ast::Statement as Ast;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::{Parser, ParserError};
use thiserror::Error;

use crate::statement::Statement;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("statement does not parse: {0}")]
    Malformed(#[from] ParserError),
    #[error("statement is empty")]
    Empty,
    #[error("expected a single statement, found {0}")]
    Multiple(usize),
    #[error("{0} statements are not accepted")]
    Unsupported(String),
}

#[derive(Debug)]
pub struct StatementGate {
    dialect: SQLiteDialect,
}

impl Default for StatementGate {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementGate {
    pub fn new() -> Self {
        Self {
            dialect: SQLiteDialect {},
        }
    }

    pub fn validate(&self, statement: &Statement) -> Result<(), GateError> {
        let parsed: Vec<Ast> = Parser::parse_sql(&self.dialect, statement.sql())?;

        match parsed.as_slice() {
            [] => Err(GateError::Empty),
            [single] if is_accepted(single) => Ok(()),
            [single] => Err(GateError::Unsupported(leading_keyword(single))),
            many => Err(GateError::Multiple(many.len())),
        }
    }
}

fn is_accepted(ast: &Ast) -> bool {
    matches!(
        ast,
        Ast::Query(_)
            | Ast::Insert { .. }
            | Ast::Update { .. }
            | Ast::Delete { .. }
            | Ast::CreateTable { .. }
            | Ast::CreateIndex { .. }
    )
}

fn leading_keyword(ast: &Ast) -> String {
    ast.to_string()
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_uppercase()
}
