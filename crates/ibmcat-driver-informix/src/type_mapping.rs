//! Type code grouping and the capability-parameterized field kind table

use std::collections::HashMap;
use std::sync::Arc;

use ibmcat_core::{FieldInfo, FieldKind, IbmcatError, Result, TypeCode};
use serde::{Deserialize, Serialize};

/// Declared precision the driver reports for SMALLINT columns, which share
/// the NUMBER type code with INTEGER.
pub const SMALLINT_PRECISION: i32 = 5;

/// Capability level of the target schema.
///
/// `Legacy` targets backends without big-integer or binary field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaCapability {
    Legacy,
    #[default]
    Modern,
}

/// Fixed type code to field kind table
#[derive(Debug, Clone)]
pub struct TypeMap {
    entries: HashMap<TypeCode, FieldKind>,
}

impl TypeMap {
    pub fn for_capability(capability: SchemaCapability) -> Self {
        let mut entries = HashMap::from([
            (TypeCode::String, FieldKind::Char),
            (TypeCode::Text, FieldKind::Text),
            (TypeCode::Xml, FieldKind::Xml),
            (TypeCode::Number, FieldKind::Integer),
            (TypeCode::Float, FieldKind::Float),
            (TypeCode::Decimal, FieldKind::Decimal),
            (TypeCode::Date, FieldKind::Date),
            (TypeCode::Time, FieldKind::Time),
            (TypeCode::DateTime, FieldKind::DateTime),
        ]);

        match capability {
            SchemaCapability::Legacy => {
                entries.insert(TypeCode::BigInt, FieldKind::Integer);
            }
            SchemaCapability::Modern => {
                entries.insert(TypeCode::BigInt, FieldKind::BigInteger);
                entries.insert(TypeCode::Binary, FieldKind::Binary);
            }
        }

        Self { entries }
    }

    pub fn get(&self, type_code: &TypeCode) -> Option<FieldKind> {
        self.entries.get(type_code).copied()
    }

    pub fn contains(&self, type_code: &TypeCode) -> bool {
        self.entries.contains_key(type_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classifier consulted when a type code has no table entry
pub trait FieldKindFallback: Send + Sync {
    fn classify(&self, type_code: &TypeCode, column: &FieldInfo) -> Result<FieldKind>;
}

/// Fallback that refuses to guess
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictFallback;

impl FieldKindFallback for StrictFallback {
    fn classify(&self, type_code: &TypeCode, _column: &FieldInfo) -> Result<FieldKind> {
        Err(IbmcatError::UnsupportedType {
            type_code: type_code.to_string(),
        })
    }
}

/// Maps driver type codes to field kinds
#[derive(Clone)]
pub struct TypeClassifier {
    map: TypeMap,
    fallback: Arc<dyn FieldKindFallback>,
}

impl std::fmt::Debug for TypeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeClassifier")
            .field("map", &self.map)
            .finish_non_exhaustive()
    }
}

impl TypeClassifier {
    pub fn new(capability: SchemaCapability) -> Self {
        Self {
            map: TypeMap::for_capability(capability),
            fallback: Arc::new(StrictFallback),
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FieldKindFallback>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn type_map(&self) -> &TypeMap {
        &self.map
    }

    pub fn classify(&self, type_code: &TypeCode, column: &FieldInfo) -> Result<FieldKind> {
        if *type_code == TypeCode::Number && column.precision == Some(SMALLINT_PRECISION) {
            return Ok(FieldKind::SmallInteger);
        }
        match self.map.get(type_code) {
            Some(kind) => Ok(kind),
            None => self.fallback.classify(type_code, column),
        }
    }
}

/// Group a native type name into its driver type code.
///
/// Length and precision suffixes (`VARCHAR(40)`) and qualifiers
/// (`DATETIME YEAR TO SECOND`) are ignored.
pub fn type_code_for(native: &str) -> TypeCode {
    let upper = native.trim().to_uppercase();
    let base = upper.split('(').next().unwrap_or("").trim();

    if upper.ends_with("FOR BIT DATA") {
        return TypeCode::Binary;
    }
    if base.starts_with("DATETIME") {
        return TypeCode::DateTime;
    }

    match base {
        "CHAR" | "CHARACTER" | "VARCHAR" | "CHARACTER VARYING" | "CHAR VARYING" | "NCHAR"
        | "NVARCHAR" | "LVARCHAR" | "STRING" | "GRAPHIC" | "VARGRAPHIC" | "LONG VARCHAR" => {
            TypeCode::String
        }
        "TEXT" | "CLOB" | "CHARACTER LARGE OBJECT" | "CHAR LARGE OBJECT" | "DBCLOB"
        | "LONG VARGRAPHIC" => TypeCode::Text,
        "XML" => TypeCode::Xml,
        "INTEGER" | "INT" | "SMALLINT" | "SERIAL" => TypeCode::Number,
        "BIGINT" | "INT8" | "SERIAL8" | "BIGSERIAL" => TypeCode::BigInt,
        "FLOAT" | "REAL" | "DOUBLE" | "DOUBLE PRECISION" | "SMALLFLOAT" | "DECFLOAT" => {
            TypeCode::Float
        }
        "DECIMAL" | "DEC" | "NUMERIC" | "NUM" | "MONEY" => TypeCode::Decimal,
        "DATE" => TypeCode::Date,
        "TIME" => TypeCode::Time,
        "TIMESTAMP" => TypeCode::DateTime,
        "BLOB" | "BINARY LARGE OBJECT" | "BINARY" | "VARBINARY" | "BYTE" => TypeCode::Binary,
        _ => TypeCode::Other(base.to_string()),
    }
}
