//! Catalog-backed schema introspection for Informix and DB2 connections

use std::sync::Arc;

use async_trait::async_trait;
use ibmcat_core::{
    ColumnMeta, Connection, ConstraintMap, FieldInfo, FieldKind, IbmcatError, IdentifierQuoting,
    IndexFlags, IndexMap, KeyColumn, NativeCatalog, RelatedColumn, RelationMap, Result, Row,
    SchemaIntrospection, TypeCode, Value,
};

use crate::config::IntrospectionConfig;
use crate::constraints::ConstraintCollector;
use crate::sql;
use crate::type_mapping::{FieldKindFallback, TypeClassifier, type_code_for};

/// Introspects one table at a time through catalog queries and the driver's
/// native catalog enumeration.
///
/// Holds configuration only; every call re-queries the catalog.
#[derive(Clone)]
pub struct InformixIntrospection {
    config: IntrospectionConfig,
    classifier: TypeClassifier,
    quoting: Arc<dyn IdentifierQuoting>,
}

impl std::fmt::Debug for InformixIntrospection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InformixIntrospection")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl Default for InformixIntrospection {
    fn default() -> Self {
        Self::new(IntrospectionConfig::default())
    }
}

impl InformixIntrospection {
    pub fn new(config: IntrospectionConfig) -> Self {
        let classifier = TypeClassifier::new(config.capability);
        let quoting = Arc::new(config.quoting());
        Self {
            config,
            classifier,
            quoting,
        }
    }

    /// Replace the identifier quoting convention used for probe queries
    pub fn with_quoting(mut self, quoting: Arc<dyn IdentifierQuoting>) -> Self {
        self.quoting = quoting;
        self
    }

    /// Replace the classifier consulted for type codes missing from the table
    pub fn with_fallback(mut self, fallback: Arc<dyn FieldKindFallback>) -> Self {
        self.classifier = self.classifier.with_fallback(fallback);
        self
    }

    pub fn config(&self) -> &IntrospectionConfig {
        &self.config
    }

    /// Zero-based position of `column` in `table`
    async fn column_ordinal(
        &self,
        conn: &dyn Connection,
        table: &str,
        column: &str,
    ) -> Result<usize> {
        let result = conn
            .query(
                sql::COLUMN_ORDINAL,
                &[Value::from(column), Value::from(table)],
            )
            .await?;

        let colno = result
            .rows
            .first()
            .and_then(|row| row.get(0))
            .and_then(Value::as_i64)
            .ok_or_else(|| IbmcatError::column_not_found(column, table))?;

        if colno < 1 {
            return Err(IbmcatError::column_not_found(column, table));
        }
        Ok((colno - 1) as usize)
    }

    async fn constraint_schema(&self, catalog: &dyn NativeCatalog) -> Result<String> {
        match &self.config.catalog_schema {
            Some(schema) => Ok(schema.clone()),
            None => catalog.current_schema().await,
        }
    }
}

fn native_catalog(conn: &dyn Connection) -> Result<&dyn NativeCatalog> {
    conn.as_native_catalog().ok_or_else(|| {
        IbmcatError::NotSupported(format!(
            "driver '{}' does not expose a native catalog",
            conn.driver_name()
        ))
    })
}

fn required_str<'a>(row: &'a Row, index: usize, what: &str) -> Result<&'a str> {
    row.get_str(index)
        .ok_or_else(|| IbmcatError::Schema(format!("catalog row has no {}", what)))
}

/// Single-character catalog flags are CHAR columns and may be blank-padded
fn flag_is(row: &Row, index: usize, flag: &str) -> bool {
    row.get_str(index).is_some_and(|v| v.trim() == flag)
}

fn field_info(meta: &ColumnMeta) -> FieldInfo {
    FieldInfo {
        name: meta.name.to_lowercase(),
        data_type: meta.data_type.clone(),
        type_code: type_code_for(&meta.data_type),
        display_size: meta.display_size,
        internal_size: meta.internal_size,
        precision: meta.precision,
        scale: meta.scale,
        null_ok: meta.nullable,
    }
}

#[async_trait]
impl SchemaIntrospection for InformixIntrospection {
    #[tracing::instrument(skip(self, conn))]
    async fn list_tables(&self, conn: &dyn Connection) -> Result<Vec<String>> {
        let catalog = native_catalog(conn)?;
        let tables: Vec<String> = catalog
            .tables(None)
            .await?
            .into_iter()
            .map(|t| t.table_name.to_lowercase())
            .collect();

        tracing::debug!(count = tables.len(), "listed tables");
        Ok(tables)
    }

    fn classify_type(&self, type_code: &TypeCode, column: &FieldInfo) -> Result<FieldKind> {
        self.classifier.classify(type_code, column)
    }

    #[tracing::instrument(skip(self, conn))]
    async fn describe_table(&self, conn: &dyn Connection, table: &str) -> Result<Vec<FieldInfo>> {
        let probe = sql::describe_probe(self.quoting.as_ref(), table);
        let result = conn.query(&probe, &[]).await?;
        let description: Vec<FieldInfo> = result.columns.iter().map(field_info).collect();

        tracing::debug!(columns = description.len(), "described table");
        Ok(description)
    }

    #[tracing::instrument(skip(self, conn))]
    async fn get_indexes(&self, conn: &dyn Connection, table: &str) -> Result<IndexMap> {
        let result = conn
            .query(sql::SINGLE_COLUMN_INDEXES, &[Value::from(table)])
            .await?;

        let mut indexes = IndexMap::new();
        for row in &result.rows {
            let column = required_str(row, 0, "index column name")?;
            indexes.insert(
                column.to_string(),
                IndexFlags {
                    primary_key: flag_is(row, 2, "P"),
                    unique: flag_is(row, 1, "U"),
                },
            );
        }

        tracing::debug!(count = indexes.len(), "collected single-column indexes");
        Ok(indexes)
    }

    #[tracing::instrument(skip(self, conn))]
    async fn get_key_columns(&self, conn: &dyn Connection, table: &str) -> Result<Vec<KeyColumn>> {
        let result = conn.query(sql::KEY_COLUMNS, &[Value::from(table)]).await?;

        result
            .rows
            .iter()
            .map(|row| {
                Ok(KeyColumn {
                    column: required_str(row, 0, "referencing column name")?.to_string(),
                    referenced_table: required_str(row, 1, "referenced table name")?.to_string(),
                    referenced_column: required_str(row, 2, "referenced column name")?
                        .to_string(),
                })
            })
            .collect()
    }

    #[tracing::instrument(skip(self, conn))]
    async fn get_relations(&self, conn: &dyn Connection, table: &str) -> Result<RelationMap> {
        let key_columns = self.get_key_columns(conn, table).await?;

        let mut relations = RelationMap::new();
        for key in key_columns {
            let local = self.column_ordinal(conn, table, &key.column).await?;
            let remote = self
                .column_ordinal(conn, &key.referenced_table, &key.referenced_column)
                .await?;
            relations.insert(
                local,
                RelatedColumn {
                    ordinal: remote,
                    table: key.referenced_table.to_lowercase(),
                },
            );
        }

        tracing::debug!(count = relations.len(), "resolved relations");
        Ok(relations)
    }

    #[tracing::instrument(skip(self, conn))]
    async fn get_constraints(&self, conn: &dyn Connection, table: &str) -> Result<ConstraintMap> {
        let catalog = native_catalog(conn)?;
        let schema = self.constraint_schema(catalog).await?;
        let upper_params = [Value::from(schema.to_uppercase()), Value::from(table.to_uppercase())];

        let mut collector = ConstraintCollector::new();

        let checks = conn.query(sql::CHECK_CONSTRAINTS, &upper_params).await?;
        for row in &checks.rows {
            collector.add_check(
                required_str(row, 0, "check constraint name")?,
                required_str(row, 1, "check constraint column")?,
            );
        }
        tracing::debug!(rows = checks.row_count(), "check constraint pass");

        let uniques = conn.query(sql::UNIQUE_CONSTRAINTS, &upper_params).await?;
        for row in &uniques.rows {
            collector.add_unique(
                required_str(row, 0, "unique constraint name")?,
                required_str(row, 1, "unique constraint column")?,
            );
        }
        tracing::debug!(rows = uniques.row_count(), "unique constraint pass");

        let primary_keys = catalog.primary_keys(&schema, table).await?;
        for pk in &primary_keys {
            collector.add_primary_key(pk);
        }
        tracing::debug!(rows = primary_keys.len(), "primary key pass");

        let foreign_keys = catalog.foreign_keys(&schema, table).await?;
        for fk in &foreign_keys {
            collector.add_foreign_key(fk);
        }
        tracing::debug!(rows = foreign_keys.len(), "foreign key pass");

        let indexes = catalog.indexes(&schema, table).await?;
        let recorded = indexes.iter().filter(|ix| collector.add_index(ix)).count();
        tracing::debug!(rows = indexes.len(), recorded, "index pass");

        tracing::debug!(count = collector.len(), "collected constraints");
        Ok(collector.finish())
    }
}
