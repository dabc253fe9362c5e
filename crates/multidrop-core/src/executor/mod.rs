//! Abstracción del backend que ejecuta el parche.
//!
//! El runner sólo conoce este trait; Postgres vive en `multidrop-persistence`
//! y `InMemorySchema` replica la semántica para tests y `--dry-run`.

mod memory;

pub use memory::InMemorySchema;

use crate::errors::CoreError;
use crate::model::{ColumnSpec, ExistingColumn};

pub trait SchemaExecutor {
    /// Agrega la columna si no existe.
    ///
    /// Contrato: cada llamada queda aislada. Un error deja al backend en
    /// condiciones de ejecutar la siguiente columna (savepoint en Postgres).
    fn add_column(&mut self, spec: &ColumnSpec) -> Result<(), CoreError>;

    /// Columnas actuales de la tabla, resuelta igual que la resolvería el
    /// `ALTER TABLE`. Vacío si la tabla no existe.
    fn columns(&mut self, table: &str) -> Result<Vec<ExistingColumn>, CoreError>;
}
