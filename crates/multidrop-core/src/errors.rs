//! Errores del core.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("relation \"{0}\" does not exist")] TableNotFound(String),
    #[error("invalid default for {table}.{column}: {reason}")]
    InvalidDefault { table: String, column: String, reason: String },
    #[error("backend: {0}")] Backend(String),
}
