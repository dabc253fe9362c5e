//! multidrop-patch
//!
//! Parche único de esquema para rutas multi-drop: agrega seis columnas a
//! `DriverAvailability` y una a `Booking` con `ADD COLUMN IF NOT EXISTS`,
//! todo sobre una sola conexión y una sola transacción.
//!
//! - `cli`: flags opcionales (`--dry-run`, `--verify`, `--report`).
//! - `report`: salida legible y reporte JSON.
//! - `errors`: errores fatales de la corrida.

pub mod cli;
pub mod errors;
pub mod report;

use log::error;
use multidrop_core::{apply_plan, multi_drop_plan, verify, ColumnSpec, InMemorySchema, PatchReport, Verification, MIGRATION_NAME};
use multidrop_persistence::{DbConfig, PersistenceError, PgSchemaSession};

use cli::Args;
use errors::AppError;

/// Ejecuta la corrida completa. `Err` sólo para fallos fatales; los fallos
/// por columna quedan dentro del reporte.
pub fn run(args: &Args) -> Result<PatchReport, AppError> {
    let plan = multi_drop_plan();
    println!("🚀 Applying {MIGRATION_NAME} ({} column changes)", plan.len());

    let (report, pending) = if args.dry_run { (dry_run(&plan, args.verify), None) } else { apply_remote(&plan, args.verify)? };

    // El reporte se imprime aunque la verificación haya fallado: el commit ya ocurrió.
    for line in report::render_lines(&report) {
        println!("{line}");
    }
    if let Some(path) = &args.report {
        report::write_json(&report, path)?;
        println!("📄 Report saved: {}", path.display());
    }
    match pending {
        Some(err) => Err(err.into()),
        None => Ok(report),
    }
}

/// Conecta, aplica y (opcionalmente) verifica. Un error de la verificación
/// post-commit no descarta el reporte: vuelve junto a él para que `run` lo
/// muestre antes de fallar.
fn apply_remote(plan: &[ColumnSpec], check: bool) -> Result<(PatchReport, Option<PersistenceError>), AppError> {
    let cfg = DbConfig::from_env()?;
    let mut session = PgSchemaSession::connect(&cfg.connection_url(), &cfg.redacted_url())?;
    let report = session.apply(plan)?;
    let verification = if check { Some(session.verify(plan)) } else { None };
    session.close();
    Ok(attach_verification(report, verification))
}

fn attach_verification(mut report: PatchReport,
                       verification: Option<Result<Verification, PersistenceError>>)
                       -> (PatchReport, Option<PersistenceError>) {
    match verification {
        Some(Ok(v)) => {
            report.verification = Some(v);
            (report, None)
        }
        Some(Err(e)) => {
            error!("verification after commit failed: {e}");
            (report, Some(e))
        }
        None => (report, None),
    }
}

/// Imprime las sentencias y las simula sobre un esquema en memoria con las
/// tablas del plan.
fn dry_run(plan: &[ColumnSpec], check: bool) -> PatchReport {
    for spec in plan {
        println!("  {};", spec.to_sql());
    }
    let mut schema = InMemorySchema::with_tables(plan.iter().map(|s| s.table.clone()));
    let mut report = PatchReport::new(apply_plan(&mut schema, plan), false);
    if check {
        report.verification = verify(&mut schema, plan).ok();
    }
    report
}
