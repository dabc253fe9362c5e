//! Especificación de una columna a agregar y su render a SQL.
//!
//! Los identificadores se emiten siempre entre comillas dobles: las tablas del
//! ORM usan camelCase (`"DriverAvailability"`, `"maxConcurrentDrops"`) y
//! Postgres los pliega a minúsculas si no se citan.

use serde::Serialize;
use serde_json::Value;

/// Tipos SQL soportados por el parche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Boolean,
    Text,
    TextArray,
    Jsonb,
}

impl ColumnType {
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Text => "TEXT",
            ColumnType::TextArray => "TEXT[]",
            ColumnType::Jsonb => "JSONB",
        }
    }

    /// Nombre tal como lo devuelve `format_type(atttypid, atttypmod)`.
    pub fn catalog_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
            ColumnType::TextArray => "text[]",
            ColumnType::Jsonb => "jsonb",
        }
    }

    /// Indica si un valor por defecto es asignable a este tipo sin cast.
    pub fn accepts(&self, default: &DefaultValue) -> bool {
        matches!((self, default),
                 (ColumnType::Integer, DefaultValue::Integer(_))
                 | (ColumnType::Boolean, DefaultValue::Boolean(_))
                 | (ColumnType::Text, DefaultValue::Text(_))
                 | (ColumnType::Jsonb, DefaultValue::Json(_)))
    }
}

/// Valor por defecto tipado de una columna.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Integer(i64),
    Boolean(bool),
    Text(String),
    Json(Value),
}

impl DefaultValue {
    /// Literal SQL del valor (texto escapado, JSON casteado a jsonb).
    pub fn sql(&self) -> String {
        match self {
            DefaultValue::Integer(v) => v.to_string(),
            DefaultValue::Boolean(v) => v.to_string(),
            DefaultValue::Text(v) => quote_literal(v),
            DefaultValue::Json(v) => format!("{}::jsonb", quote_literal(&v.to_string())),
        }
    }
}

/// Columna ya presente en el catálogo, con su tipo en forma `format_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingColumn {
    pub name: String,
    pub data_type: String,
}

impl ExistingColumn {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self { name: name.into(),
               data_type: data_type.into() }
    }
}

/// Una columna a agregar "si no existe" sobre una tabla.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub table: String,
    pub column: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl ColumnSpec {
    pub fn new(table: impl Into<String>, column: impl Into<String>, column_type: ColumnType) -> Self {
        Self { table: table.into(),
               column: column.into(),
               column_type,
               default: None }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// `Table.column`, usado en logs y en la verificación.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }

    /// Sentencia `ALTER TABLE ... ADD COLUMN IF NOT EXISTS` completa.
    pub fn to_sql(&self) -> String {
        let mut sql = format!("ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
                              quote_ident(&self.table),
                              quote_ident(&self.column),
                              self.column_type.sql());
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.sql());
        }
        sql
    }
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
