//! Schema introspection trait and the shapes it returns

use crate::{Connection, Result};
use async_trait::async_trait;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Schema introspection interface consumed by ORM-style database backends.
///
/// Every operation is a fresh round trip against the catalog: nothing is
/// cached between calls, and multi-query operations are not atomic with
/// respect to concurrent schema changes.
#[async_trait]
pub trait SchemaIntrospection: Send + Sync {
    /// Table names in the current database, lower-cased, in driver order
    async fn list_tables(&self, conn: &dyn Connection) -> Result<Vec<String>>;

    /// Map a driver type code to a field kind
    fn classify_type(&self, type_code: &TypeCode, column: &FieldInfo) -> Result<FieldKind>;

    /// Ordered column descriptions of a table
    async fn describe_table(&self, conn: &dyn Connection, table: &str) -> Result<Vec<FieldInfo>>;

    /// Single-column indexes of a table keyed by column name
    async fn get_indexes(&self, conn: &dyn Connection, table: &str) -> Result<IndexMap>;

    /// Referential constraint column triples declared on a table
    async fn get_key_columns(&self, conn: &dyn Connection, table: &str) -> Result<Vec<KeyColumn>>;

    /// Single-column foreign keys keyed by zero-based column ordinal
    async fn get_relations(&self, conn: &dyn Connection, table: &str) -> Result<RelationMap>;

    /// Check, unique, primary key, foreign key and index constraints by name
    async fn get_constraints(&self, conn: &dyn Connection, table: &str) -> Result<ConstraintMap>;

    /// Run every per-table operation in sequence
    async fn inspect_table(&self, conn: &dyn Connection, table: &str) -> Result<TableInspection> {
        let description = self.describe_table(conn, table).await?;
        let indexes = self.get_indexes(conn, table).await?;
        let relations = self.get_relations(conn, table).await?;
        let constraints = self.get_constraints(conn, table).await?;

        Ok(TableInspection {
            table: table.to_string(),
            description,
            indexes,
            relations,
            constraints,
        })
    }
}

/// Driver type codes.
///
/// Each code stands for a family of native column types, the way DB-API
/// drivers expose type objects. Native types outside every family are kept
/// verbatim in [`TypeCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeCode {
    String,
    Text,
    Xml,
    Number,
    BigInt,
    Float,
    Decimal,
    Date,
    Time,
    DateTime,
    Binary,
    Other(String),
}

impl TypeCode {
    pub fn as_str(&self) -> &str {
        match self {
            TypeCode::String => "STRING",
            TypeCode::Text => "TEXT",
            TypeCode::Xml => "XML",
            TypeCode::Number => "NUMBER",
            TypeCode::BigInt => "BIGINT",
            TypeCode::Float => "FLOAT",
            TypeCode::Decimal => "DECIMAL",
            TypeCode::Date => "DATE",
            TypeCode::Time => "TIME",
            TypeCode::DateTime => "DATETIME",
            TypeCode::Binary => "BINARY",
            TypeCode::Other(name) => name,
        }
    }
}

impl std::fmt::Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field kinds understood by the calling framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "CharField")]
    Char,
    #[serde(rename = "TextField")]
    Text,
    #[serde(rename = "XMLField")]
    Xml,
    #[serde(rename = "SmallIntegerField")]
    SmallInteger,
    #[serde(rename = "IntegerField")]
    Integer,
    #[serde(rename = "BigIntegerField")]
    BigInteger,
    #[serde(rename = "FloatField")]
    Float,
    #[serde(rename = "DecimalField")]
    Decimal,
    #[serde(rename = "DateField")]
    Date,
    #[serde(rename = "TimeField")]
    Time,
    #[serde(rename = "DateTimeField")]
    DateTime,
    #[serde(rename = "BinaryField")]
    Binary,
}

impl FieldKind {
    /// Framework label, e.g. "CharField"
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Char => "CharField",
            FieldKind::Text => "TextField",
            FieldKind::Xml => "XMLField",
            FieldKind::SmallInteger => "SmallIntegerField",
            FieldKind::Integer => "IntegerField",
            FieldKind::BigInteger => "BigIntegerField",
            FieldKind::Float => "FloatField",
            FieldKind::Decimal => "DecimalField",
            FieldKind::Date => "DateField",
            FieldKind::Time => "TimeField",
            FieldKind::DateTime => "DateTimeField",
            FieldKind::Binary => "BinaryField",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a table description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// Lower-cased column name
    pub name: String,
    /// Native type name as reported by the driver
    pub data_type: String,
    pub type_code: TypeCode,
    pub display_size: Option<i64>,
    pub internal_size: Option<i64>,
    pub precision: Option<i32>,
    pub scale: Option<i32>,
    pub null_ok: bool,
}

/// Key flags of a single-column index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexFlags {
    pub primary_key: bool,
    pub unique: bool,
}

/// Column name to index flags, in catalog row order
pub type IndexMap = indexmap::IndexMap<String, IndexFlags>;

/// A column in a referenced table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedColumn {
    /// Zero-based ordinal of the referenced column
    pub ordinal: usize,
    /// Referenced table name
    pub table: String,
}

/// Zero-based local column ordinal to referenced column
pub type RelationMap = BTreeMap<usize, RelatedColumn>;

/// A referential constraint column, by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColumn {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Target of a foreign key constraint.
///
/// Serialized as the flat tuple `(table, column, ...)` the calling framework
/// expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyTarget {
    pub table: String,
    pub columns: Vec<String>,
}

impl ForeignKeyTarget {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: vec![column.into()],
        }
    }

    /// Append a referenced column unless it is already listed
    pub fn add_column(&mut self, column: &str) {
        if !self.columns.iter().any(|c| c == column) {
            self.columns.push(column.to_string());
        }
    }

    /// Flatten to `[table, column, ...]`
    pub fn to_tuple(&self) -> Vec<&str> {
        std::iter::once(self.table.as_str())
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }
}

impl Serialize for ForeignKeyTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1 + self.columns.len()))?;
        seq.serialize_element(&self.table)?;
        for column in &self.columns {
            seq.serialize_element(column)?;
        }
        seq.end()
    }
}

/// Everything known about one named constraint or index
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConstraintInfo {
    /// Lower-cased column names, in the order the catalog reported them
    pub columns: Vec<String>,
    pub primary_key: bool,
    pub unique: bool,
    pub foreign_key: Option<ForeignKeyTarget>,
    pub check: bool,
    pub index: bool,
}

/// Constraint name to constraint facts, in first-seen order
pub type ConstraintMap = indexmap::IndexMap<String, ConstraintInfo>;

/// Combined result of [`SchemaIntrospection::inspect_table`]
#[derive(Debug, Clone, Serialize)]
pub struct TableInspection {
    pub table: String,
    pub description: Vec<FieldInfo>,
    pub indexes: IndexMap,
    pub relations: RelationMap,
    pub constraints: ConstraintMap,
}
