mod column;
mod outcome;

pub use column::{quote_ident, quote_literal, ColumnSpec, ColumnType, DefaultValue, ExistingColumn};
pub use outcome::{ColumnOutcome, ColumnResult, PatchReport, TypeMismatch, Verification};
