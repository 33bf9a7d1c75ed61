//! Connection and native catalog traits implemented by database drivers

use crate::{QueryResult, Result, Value};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An open database connection.
///
/// A single connection must not be shared across concurrent introspection
/// calls; callers that introspect in parallel open one connection each.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Get the driver name (e.g., "informix", "db2")
    fn driver_name(&self) -> &str;

    /// Execute a query that returns rows, binding `params` to `?` placeholders.
    ///
    /// The returned [`QueryResult::columns`] carry the cursor description even
    /// when no rows are returned.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;

    /// Get the driver's native (non-SQL) catalog enumeration if supported
    fn as_native_catalog(&self) -> Option<&dyn NativeCatalog> {
        None
    }
}

/// Driver-native catalog enumeration.
///
/// These calls go through the driver's own metadata API rather than SQL text
/// composed by the caller.
#[async_trait]
pub trait NativeCatalog: Send + Sync {
    /// Name of the schema the connection currently resolves unqualified names in
    async fn current_schema(&self) -> Result<String>;

    /// Enumerate tables, optionally restricted to one schema
    async fn tables(&self, schema: Option<&str>) -> Result<Vec<NativeTable>>;

    /// Primary key columns of a table, in key sequence order
    async fn primary_keys(&self, schema: &str, table: &str) -> Result<Vec<NativePrimaryKey>>;

    /// Foreign key columns declared on a table (the referencing side)
    async fn foreign_keys(&self, schema: &str, table: &str) -> Result<Vec<NativeForeignKey>>;

    /// Every index column of a table, unique or not
    async fn indexes(&self, schema: &str, table: &str) -> Result<Vec<NativeIndex>>;
}

/// A table reported by [`NativeCatalog::tables`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeTable {
    pub table_schema: Option<String>,
    pub table_name: String,
    /// Driver table type, e.g. "TABLE", "VIEW"
    pub table_type: Option<String>,
}

/// One column of a primary key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativePrimaryKey {
    pub table_name: String,
    pub column_name: String,
    pub key_seq: i32,
    pub pk_name: String,
}

/// One column pair of a foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeForeignKey {
    pub pktable_name: String,
    pub pkcolumn_name: String,
    pub fktable_name: String,
    pub fkcolumn_name: String,
    pub key_seq: i32,
    pub fk_name: String,
}

/// One column of an index.
///
/// Table-statistics rows carry no index or column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeIndex {
    pub index_name: Option<String>,
    pub column_name: Option<String>,
    pub non_unique: bool,
    pub ordinal_position: Option<i32>,
}
