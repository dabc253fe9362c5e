//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas. Todo lo que
//! sale de aquí hacia `main` es fatal; los errores por columna viajan como
//! `CoreError::Backend` dentro del reporte.

use thiserror::Error;
use diesel::result::{ConnectionError, DatabaseErrorKind, Error as DieselError};
use multidrop_core::CoreError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("undefined object: {0}")]
    UndefinedObject(String),
    #[error("serialization conflict (retryable)")]
    SerializationConflict,
    #[error("transaction error: {0}")]
    Transaction(String),
    #[error("{0}")]
    Database(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("unknown database error: {0}")]
    Unknown(String),
}

impl From<ConnectionError> for PersistenceError {
    fn from(err: ConnectionError) -> Self {
        match err {
            ConnectionError::BadConnection(msg) => Self::Connection(msg.trim().to_string()),
            ConnectionError::InvalidConnectionUrl(msg) => Self::Config(format!("invalid DATABASE_URL: {msg}")),
            other => Self::Connection(other.to_string()),
        }
    }
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::SerializationFailure => Self::SerializationConflict,
                DatabaseErrorKind::ClosedConnection => Self::Connection(info.message().to_string()),
                _ if info.message().contains("does not exist") => Self::UndefinedObject(info.message().to_string()),
                _ => Self::Database(info.message().to_string()),
            },
            DieselError::AlreadyInTransaction => Self::Transaction("already in transaction".into()),
            DieselError::NotInTransaction => Self::Transaction("not in transaction".into()),
            DieselError::BrokenTransactionManager => Self::Transaction("broken transaction manager".into()),
            DieselError::RollbackErrorOnCommit { rollback_error, commit_error } => {
                Self::Transaction(format!("rollback={rollback_error}; commit={commit_error}"))
            }
            DieselError::RollbackTransaction => Self::Transaction("rollback transaction".into()),
            DieselError::DeserializationError(e) => Self::Unknown(format!("deser: {e}")),
            DieselError::QueryBuilderError(e) => Self::Unknown(format!("query builder: {e}")),
            other => Self::Unknown(format!("unhandled diesel error: {other:?}")),
        }
    }
}

impl From<PersistenceError> for CoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Core(inner) => inner,
            other => CoreError::Backend(other.to_string()),
        }
    }
}
