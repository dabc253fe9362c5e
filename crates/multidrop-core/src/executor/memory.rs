use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::SchemaExecutor;
use crate::errors::CoreError;
use crate::model::{ColumnSpec, ColumnType, ExistingColumn};

#[derive(Debug, Clone, PartialEq)]
struct MemColumn {
    name: String,
    column_type: ColumnType,
}

/// Esquema en memoria con la semántica de `ADD COLUMN IF NOT EXISTS`:
/// - tabla inexistente -> `TableNotFound`;
/// - columna existente -> no-op (sin comparar tipos, igual que Postgres);
/// - default incompatible con el tipo -> `InvalidDefault`.
///
/// `fail_on` permite forzar el fallo de una columna concreta.
#[derive(Debug, Default, Clone)]
pub struct InMemorySchema {
    tables: BTreeMap<String, Vec<MemColumn>>,
    forced_failures: HashMap<(String, String), String>,
    executed: Vec<String>,
}

impl InMemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables<I, S>(tables: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let mut schema = Self::new();
        for t in tables {
            schema.tables.entry(t.into()).or_default();
        }
        schema
    }

    pub fn with_column(mut self, table: &str, column: &str, column_type: ColumnType) -> Self {
        self.tables.entry(table.to_string()).or_default().push(MemColumn { name: column.to_string(),
                                                                           column_type });
        self
    }

    pub fn fail_on(mut self, table: &str, column: &str, message: &str) -> Self {
        self.forced_failures.insert((table.to_string(), column.to_string()), message.to_string());
        self
    }

    /// SQL de cada `add_column` exitoso (incluye no-ops), en orden.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    #[cfg(test)]
    fn column(&self, table: &str, column: &str) -> Option<&MemColumn> {
        self.tables.get(table)?.iter().find(|c| c.name == column)
    }
}

impl SchemaExecutor for InMemorySchema {
    fn add_column(&mut self, spec: &ColumnSpec) -> Result<(), CoreError> {
        if let Some(msg) = self.forced_failures.get(&(spec.table.clone(), spec.column.clone())) {
            return Err(CoreError::Backend(msg.clone()));
        }
        let columns = self.tables
                          .get_mut(&spec.table)
                          .ok_or_else(|| CoreError::TableNotFound(spec.table.clone()))?;
        if let Some(default) = &spec.default {
            if !spec.column_type.accepts(default) {
                return Err(CoreError::InvalidDefault { table: spec.table.clone(),
                                                       column: spec.column.clone(),
                                                       reason: format!("{} is not assignable to {}",
                                                                       default.sql(),
                                                                       spec.column_type.sql()) });
            }
        }
        if columns.iter().any(|c| c.name == spec.column) {
            debug!("column {} already exists, skipping", spec.qualified_name());
        } else {
            columns.push(MemColumn { name: spec.column.clone(),
                                     column_type: spec.column_type });
        }
        self.executed.push(spec.to_sql());
        Ok(())
    }

    fn columns(&mut self, table: &str) -> Result<Vec<ExistingColumn>, CoreError> {
        Ok(self.tables
               .get(table)
               .map(|cols| {
                   cols.iter()
                       .map(|c| ExistingColumn::new(c.name.clone(), c.column_type.catalog_name()))
                       .collect()
               })
               .unwrap_or_default())
    }
}
