//! Sesión Postgres (Diesel) sobre una única conexión síncrona.
//!
//! Flujo de `apply`:
//! - `BEGIN` read-write sobre la conexión de la sesión.
//! - Cada columna corre en una transacción anidada (Diesel emite
//!   `SAVEPOINT`/`ROLLBACK TO SAVEPOINT`), así un `ALTER` fallido no deja la
//!   transacción externa abortada y las demás columnas siguen.
//! - `COMMIT` al final. Un fallo de commit es fatal.
//!
//! La conexión se libera en `close` o, en cualquier otro camino, en `Drop`.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;
use log::{debug, error, info};

use multidrop_core::{apply_plan, verify, ColumnSpec, CoreError, ExistingColumn, PatchReport, SchemaExecutor, Verification};

use crate::error::PersistenceError;

/// Columnas de la tabla que resolvería `ALTER TABLE "<tabla>"`: primer
/// schema del `search_path` que la contiene. Tabla inexistente -> sin filas.
const COLUMNS_SQL: &str = "SELECT a.attname::text AS column_name, \
                                  format_type(a.atttypid, a.atttypmod) AS data_type \
                           FROM pg_catalog.pg_attribute a \
                           WHERE a.attrelid = to_regclass(quote_ident($1)) \
                             AND a.attnum > 0 AND NOT a.attisdropped \
                           ORDER BY a.attnum";

#[derive(QueryableByName, Debug)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    column_name: String,
    #[diesel(sql_type = Text)]
    data_type: String,
}

/// `SchemaExecutor` sobre una conexión prestada. Cada operación va en su
/// propia transacción anidada: savepoint si hay una transacción abierta,
/// transacción propia si no.
pub struct PgExecutor<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> PgExecutor<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl SchemaExecutor for PgExecutor<'_> {
    fn add_column(&mut self, spec: &ColumnSpec) -> Result<(), CoreError> {
        let sql = spec.to_sql();
        self.conn
            .transaction::<_, PersistenceError, _>(|c| c.batch_execute(&sql).map_err(PersistenceError::from))
            .map_err(CoreError::from)
    }

    fn columns(&mut self, table: &str) -> Result<Vec<ExistingColumn>, CoreError> {
        let rows: Vec<ColumnRow> = self.conn
                                       .transaction::<_, PersistenceError, _>(|c| {
                                           diesel::sql_query(COLUMNS_SQL).bind::<Text, _>(table)
                                                                         .load::<ColumnRow>(c)
                                                                         .map_err(PersistenceError::from)
                                       })
                                       .map_err(CoreError::from)?;
        Ok(rows.into_iter().map(|r| ExistingColumn::new(r.column_name, r.data_type)).collect())
    }
}

/// Sesión de parche: dueña de la conexión durante toda la corrida. La
/// conexión se cierra al soltar la sesión (`close` o `Drop`).
pub struct PgSchemaSession {
    conn: PgConnection,
    target: String,
}

impl PgSchemaSession {
    /// Abre la conexión. Un error aquí es fatal para la corrida.
    ///
    /// `target` es sólo para logs (usar la URL redactada).
    pub fn connect(database_url: &str, target: &str) -> Result<Self, PersistenceError> {
        debug!("connect:start target={target}");
        let conn = PgConnection::establish(database_url).map_err(|e| {
                                                             let err = PersistenceError::from(e);
                                                             error!("connect:error target={target} err={err}");
                                                             err
                                                         })?;
        info!("connected to {target}");
        Ok(Self { conn,
                  target: target.to_string() })
    }

    /// Aplica el plan dentro de una transacción y hace commit.
    pub fn apply(&mut self, plan: &[ColumnSpec]) -> Result<PatchReport, PersistenceError> {
        let results = self.conn
                          .build_transaction()
                          .read_write()
                          .run::<_, PersistenceError, _>(|tx| Ok(apply_plan(&mut PgExecutor::new(tx), plan)))?;
        info!("transaction committed ({} statements)", results.len());
        Ok(PatchReport::new(results, true))
    }

    /// Verificación post-commit contra `pg_attribute`: columnas faltantes y
    /// tipos distintos a los del plan.
    pub fn verify(&mut self, plan: &[ColumnSpec]) -> Result<Verification, PersistenceError> {
        Ok(verify(&mut PgExecutor::new(&mut self.conn), plan)?)
    }

    /// Cierra explícitamente la conexión.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for PgSchemaSession {
    fn drop(&mut self) {
        debug!("connection released target={}", self.target);
    }
}
