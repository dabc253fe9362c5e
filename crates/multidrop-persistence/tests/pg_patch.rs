//! Pruebas contra Postgres real (requiere DATABASE_URL; se omiten si falta).


use multidrop_core::{multi_drop_plan, ColumnOutcome, ColumnSpec, ColumnType, DefaultValue};
use multidrop_persistence::PgSchemaSession;
use test_support::ScratchSchema;

fn session(schema: &ScratchSchema) -> PgSchemaSession {
    PgSchemaSession::connect(&schema.url, &schema.name).expect("connect")
}

#[test]
fn full_plan_creates_typed_columns_with_defaults() {
    let Some(mut schema) = ScratchSchema::create("full") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    let plan = multi_drop_plan();
    let mut s = session(&schema);
    let report = s.apply(&plan).expect("apply");
    let verification = s.verify(&plan).expect("verify");
    s.close();

    assert!(report.committed);
    assert_eq!(report.applied(), 7);
    assert!(report.results.iter().all(|r| r.outcome == ColumnOutcome::Applied { already_present: Some(false) }));
    assert!(verification.is_ok(), "missing: {:?}", verification.missing);

    for spec in &plan {
        let info = schema.column(&spec.table, &spec.column).unwrap_or_else(|| panic!("{} missing", spec.qualified_name()));
        assert_eq!(info.data_type, spec.column_type.catalog_name(), "{}", spec.qualified_name());
    }
    let defaults = [("maxConcurrentDrops", "5"),
                    ("multiDropCapable", "true"),
                    ("currentCapacityUsed", "0"),
                    ("experienceLevel", "'standard'::text"),
                    ("performanceMetrics", "'{}'::jsonb")];
    for (column, expected) in defaults {
        let info = schema.column("DriverAvailability", column).expect("column");
        assert_eq!(info.column_default.as_deref(), Some(expected), "{column}");
    }
    assert!(schema.column("DriverAvailability", "preferredServiceAreas").expect("column").column_default.is_none());
    assert_eq!(schema.column("Booking", "isMultiDrop").expect("column").column_default.as_deref(), Some("false"));
}

#[test]
fn second_run_reports_columns_as_already_present() {
    let Some(schema) = ScratchSchema::create("rerun") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    let plan = multi_drop_plan();
    session(&schema).apply(&plan).expect("first run");

    let second = session(&schema).apply(&plan).expect("second run");
    assert_eq!(second.applied(), 7);
    assert!(second.results.iter().all(|r| r.outcome == ColumnOutcome::Applied { already_present: Some(true) }));
}

#[test]
fn tables_behind_an_empty_schema_in_search_path_are_found() {
    let Some(schema) = ScratchSchema::create_shadowed("shadow") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    let plan = multi_drop_plan();
    let first = session(&schema).apply(&plan).expect("first run");
    assert!(first.results.iter().all(|r| r.outcome == ColumnOutcome::Applied { already_present: Some(false) }));

    let mut s = session(&schema);
    let second = s.apply(&plan).expect("second run");
    let verification = s.verify(&plan).expect("verify");
    s.close();
    assert!(second.results.iter().all(|r| r.outcome == ColumnOutcome::Applied { already_present: Some(true) }));
    assert!(verification.is_ok(), "{verification:?}");
}

#[test]
fn session_stays_usable_across_apply_and_verify() {
    let Some(schema) = ScratchSchema::create("reuse") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    let plan = multi_drop_plan();
    let mut s = session(&schema);
    s.apply(&plan).expect("apply");
    assert!(s.verify(&plan).expect("verify").is_ok());
    assert_eq!(s.apply(&plan).expect("apply again").applied(), 7);
    assert!(s.verify(&plan).expect("verify again").is_ok());
    s.close();
}

#[test]
fn verify_flags_preexisting_column_with_other_type() {
    let Some(mut schema) = ScratchSchema::create("mismatch") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    schema.execute(&format!(r#"ALTER TABLE {}."Booking" ADD COLUMN "isMultiDrop" TEXT;"#, schema.name));
    let plan = multi_drop_plan();
    let mut s = session(&schema);
    let report = s.apply(&plan).expect("apply");
    let verification = s.verify(&plan).expect("verify");

    assert_eq!(report.applied(), 7);
    assert_eq!(report.results[6].outcome, ColumnOutcome::Applied { already_present: Some(true) });
    assert!(verification.missing.is_empty());
    assert_eq!(verification.mismatched.len(), 1);
    assert_eq!(verification.mismatched[0].column, "Booking.isMultiDrop");
    assert_eq!(verification.mismatched[0].found, "text");
}

#[test]
fn one_failing_statement_still_commits_the_others() {
    let Some(mut schema) = ScratchSchema::create("partial") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    let mut plan = multi_drop_plan();
    // Default inválido para INTEGER: Postgres rechaza sólo este ALTER.
    plan[4] = ColumnSpec::new("DriverAvailability", "experienceLevel", ColumnType::Integer)
        .with_default(DefaultValue::Text("standard".into()));

    let report = session(&schema).apply(&plan).expect("apply");
    assert!(report.committed);
    assert_eq!(report.applied(), 6);
    match &report.results[4].outcome {
        ColumnOutcome::Failed { error } => assert!(error.contains("invalid input syntax"), "{error}"),
        other => panic!("expected failure, got {other:?}"),
    }

    // Persistido tras el commit, visto desde otra conexión.
    assert!(schema.column("Booking", "isMultiDrop").is_some());
    assert!(schema.column("DriverAvailability", "performanceMetrics").is_some());
    assert!(schema.column("DriverAvailability", "experienceLevel").is_none());

    let verification = session(&schema).verify(&plan).expect("verify");
    assert_eq!(verification.missing, vec!["DriverAvailability.experienceLevel".to_string()]);
}

#[test]
fn existing_rows_receive_defaults() {
    let Some(mut schema) = ScratchSchema::create("rows") else {
        eprintln!("DATABASE_URL no definido: omitiendo test");
        return;
    };
    session(&schema).apply(&multi_drop_plan()).expect("apply");
    schema.execute(&format!(r#"DO $$ BEGIN
                                 IF (SELECT "maxConcurrentDrops" FROM {n}."DriverAvailability" WHERE id = 'a1') <> 5 THEN
                                   RAISE EXCEPTION 'default not applied';
                                 END IF;
                                 IF (SELECT "isMultiDrop" FROM {n}."Booking" WHERE id = 'b1') THEN
                                   RAISE EXCEPTION 'default not applied';
                                 END IF;
                               END $$;"#,
                            n = schema.name));
}
