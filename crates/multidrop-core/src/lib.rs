//! multidrop-core: modelo y runner del parche de esquema multi-drop.
//!
//! Módulos:
//! - `model`: especificación de columnas y resultados por operación.
//! - `plan`: la lista fija (ordenada) de columnas a agregar.
//! - `executor`: trait `SchemaExecutor` + backend en memoria.
//! - `runner`: aplica el plan columna por columna y verifica el resultado.
pub mod errors;
pub mod executor;
pub mod model;
pub mod plan;
pub mod runner;

pub use errors::CoreError;
pub use executor::{InMemorySchema, SchemaExecutor};
pub use model::{ColumnOutcome, ColumnResult, ColumnSpec, ColumnType, DefaultValue, ExistingColumn, PatchReport, TypeMismatch,
                Verification};
pub use plan::{multi_drop_plan, MIGRATION_NAME};
pub use runner::{apply_plan, verify};
