//! Aplicación del plan sobre un `SchemaExecutor`.
//!
//! Dos niveles de error:
//! - por columna: se registra en `ColumnOutcome::Failed` y la corrida sigue;
//! - fatales (conexión, commit): los propaga quien maneja la conexión, no
//!   este módulo.

use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};

use crate::errors::CoreError;
use crate::executor::SchemaExecutor;
use crate::model::{ColumnOutcome, ColumnResult, ColumnSpec, ExistingColumn, TypeMismatch, Verification};

/// Lee las columnas existentes de cada tabla del plan.
/// `None` para una tabla si el catálogo no se pudo consultar.
fn snapshot<E: SchemaExecutor + ?Sized>(executor: &mut E, plan: &[ColumnSpec]) -> HashMap<String, Option<BTreeSet<String>>> {
    let mut existing = HashMap::new();
    for spec in plan {
        if existing.contains_key(&spec.table) {
            continue;
        }
        let cols = match executor.columns(&spec.table) {
            Ok(cols) => {
                if cols.is_empty() {
                    warn!("table {} not found or has no columns", spec.table);
                }
                Some(cols.into_iter().map(|c| c.name).collect())
            }
            Err(e) => {
                warn!("pre-check for {} failed: {e}", spec.table);
                None
            }
        };
        existing.insert(spec.table.clone(), cols);
    }
    existing
}

/// Aplica cada columna en orden. Nunca aborta por un fallo individual.
pub fn apply_plan<E: SchemaExecutor + ?Sized>(executor: &mut E, plan: &[ColumnSpec]) -> Vec<ColumnResult> {
    let mut existing = snapshot(executor, plan);
    let mut results = Vec::with_capacity(plan.len());
    for spec in plan {
        debug!("apply:start {}", spec.to_sql());
        let outcome = match executor.add_column(spec) {
            Ok(()) => {
                let known = existing.get_mut(&spec.table).and_then(Option::as_mut);
                let already_present = known.map(|cols| !cols.insert(spec.column.clone()));
                info!("added column {}{}",
                      spec.qualified_name(),
                      if already_present == Some(true) { " (already present)" } else { "" });
                ColumnOutcome::Applied { already_present }
            }
            Err(e) => {
                warn!("failed to add column {}: {e}", spec.qualified_name());
                ColumnOutcome::Failed { error: e.to_string() }
            }
        };
        results.push(ColumnResult { spec: spec.clone(),
                                    outcome });
    }
    results
}

/// Lista las columnas del plan que no aparecen en el catálogo y las que
/// aparecen con un tipo distinto al del plan.
pub fn verify<E: SchemaExecutor + ?Sized>(executor: &mut E, plan: &[ColumnSpec]) -> Result<Verification, CoreError> {
    let mut by_table: HashMap<&str, Vec<ExistingColumn>> = HashMap::new();
    let mut verification = Verification::default();
    for spec in plan {
        if !by_table.contains_key(spec.table.as_str()) {
            let cols = executor.columns(&spec.table)?;
            by_table.insert(spec.table.as_str(), cols);
        }
        let found = by_table.get(spec.table.as_str())
                            .and_then(|cols| cols.iter().find(|c| c.name == spec.column));
        match found {
            None => verification.missing.push(spec.qualified_name()),
            Some(col) if col.data_type != spec.column_type.catalog_name() => {
                verification.mismatched.push(TypeMismatch { column: spec.qualified_name(),
                                                            expected: spec.column_type.catalog_name().to_string(),
                                                            found: col.data_type.clone() })
            }
            Some(_) => {}
        }
    }
    if verification.is_ok() {
        info!("verification ok: {} columns present", plan.len());
    } else {
        warn!("verification: missing columns {:?}, type mismatches {:?}",
              verification.missing,
              verification.mismatched);
    }
    Ok(verification)
}
