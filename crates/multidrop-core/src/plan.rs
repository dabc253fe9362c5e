//! Plan fijo del parche multi-drop.
//!
//! Seis columnas sobre `DriverAvailability` y una sobre `Booking`, en este
//! orden. Los defaults coinciden con los que la API de drivers usa al crear
//! una disponibilidad nueva.

use serde_json::json;

use crate::model::{ColumnSpec, ColumnType, DefaultValue};

pub const MIGRATION_NAME: &str = "multi-drop-columns-v1";

pub const DRIVER_AVAILABILITY: &str = "DriverAvailability";
pub const BOOKING: &str = "Booking";

pub fn multi_drop_plan() -> Vec<ColumnSpec> {
    vec![ColumnSpec::new(DRIVER_AVAILABILITY, "maxConcurrentDrops", ColumnType::Integer).with_default(DefaultValue::Integer(5)),
         ColumnSpec::new(DRIVER_AVAILABILITY, "preferredServiceAreas", ColumnType::TextArray),
         ColumnSpec::new(DRIVER_AVAILABILITY, "multiDropCapable", ColumnType::Boolean).with_default(DefaultValue::Boolean(true)),
         ColumnSpec::new(DRIVER_AVAILABILITY, "currentCapacityUsed", ColumnType::Integer).with_default(DefaultValue::Integer(0)),
         ColumnSpec::new(DRIVER_AVAILABILITY, "experienceLevel", ColumnType::Text).with_default(DefaultValue::Text("standard".into())),
         ColumnSpec::new(DRIVER_AVAILABILITY, "performanceMetrics", ColumnType::Jsonb).with_default(DefaultValue::Json(json!({}))),
         ColumnSpec::new(BOOKING, "isMultiDrop", ColumnType::Boolean).with_default(DefaultValue::Boolean(false)),]
}
