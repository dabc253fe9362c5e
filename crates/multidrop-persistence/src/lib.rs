//! multidrop-persistence
//!
//! Backend Postgres (Diesel, conexión síncrona única) del parche multi-drop.
//!
//! Módulos:
//! - `pg`: sesión sobre una `PgConnection`; implementa `SchemaExecutor`.
//! - `config`: carga de configuración desde `.env` / entorno.
//! - `error`: mapeo de errores Diesel a variantes semánticas.

pub mod config;
pub mod error;
pub mod pg;

pub use config::{init_dotenv, DbConfig};
pub use error::PersistenceError;
pub use pg::{PgExecutor, PgSchemaSession};
