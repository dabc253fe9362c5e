use thiserror::Error;
use multidrop_persistence::PersistenceError;

/// Errores fatales de la corrida: cualquiera termina el proceso con código 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error serializando reporte: {0}")]
    Json(#[from] serde_json::Error),
}
