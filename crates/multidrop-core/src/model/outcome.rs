use serde::Serialize;

use super::ColumnSpec;

/// Resultado de aplicar una columna.
///
/// `Applied` cuenta como cambio aplicado aunque la columna ya existiera:
/// `ADD COLUMN IF NOT EXISTS` no informa si agregó algo. `already_present`
/// sale del chequeo previo contra el catálogo (`None` si no se pudo leer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ColumnOutcome {
    Applied {
        #[serde(skip_serializing_if = "Option::is_none")]
        already_present: Option<bool>,
    },
    Failed { error: String },
}

impl ColumnOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ColumnOutcome::Applied { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnResult {
    #[serde(flatten)]
    pub spec: ColumnSpec,
    #[serde(flatten)]
    pub outcome: ColumnOutcome,
}

/// Estado del catálogo tras la corrida.
///
/// - `missing`: columnas del plan ausentes (`Table.column`).
/// - `mismatched`: columnas presentes con otro tipo; `IF NOT EXISTS` no las
///   toca, así que quedan como estaban.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mismatched: Vec<TypeMismatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMismatch {
    pub column: String,
    pub expected: String,
    pub found: String,
}

impl Verification {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}

/// Reporte agregado de una corrida, en el orden del plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchReport {
    pub results: Vec<ColumnResult>,
    pub committed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

impl PatchReport {
    pub fn new(results: Vec<ColumnResult>, committed: bool) -> Self {
        Self { results,
               committed,
               verification: None }
    }

    pub fn applied(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_applied()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.applied()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }
}
