//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use ibmcat_core::{
    ColumnMeta, Connection, IbmcatError, NativeCatalog, NativeForeignKey, NativeIndex,
    NativePrimaryKey, NativeTable, QueryResult, Result, Value,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// A canned response for queries whose SQL contains `pattern` and, when
/// `params` is set, whose bound parameters match exactly.
struct QueryResponse {
    pattern: String,
    params: Option<Vec<Value>>,
    result: QueryResult,
}

/// Mock connection for exercising introspection without a database.
///
/// Catalog queries are answered from SQL-pattern responses (first match wins,
/// no match yields an empty result). Native catalog calls return the rows
/// configured with the `with_native_*` builders. Every query is logged with
/// its parameters for assertions.
pub struct MockConnection {
    pub driver: String,
    pub should_fail: bool,
    pub native_catalog: bool,
    pub current_schema: String,
    responses: Vec<QueryResponse>,
    tables: Vec<NativeTable>,
    primary_keys: Vec<NativePrimaryKey>,
    foreign_keys: Vec<NativeForeignKey>,
    indexes: Vec<NativeIndex>,
    query_log: Arc<Mutex<Vec<(String, Vec<Value>)>>>,
    native_calls: Arc<Mutex<Vec<String>>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            driver: "informix".to_string(),
            should_fail: false,
            native_catalog: true,
            current_schema: "app".to_string(),
            responses: Vec::new(),
            tables: Vec::new(),
            primary_keys: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            query_log: Arc::new(Mutex::new(Vec::new())),
            native_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn without_native_catalog(mut self) -> Self {
        self.native_catalog = false;
        self
    }

    pub fn with_current_schema(mut self, schema: impl Into<String>) -> Self {
        self.current_schema = schema.into();
        self
    }

    /// Register a response for queries containing the given SQL pattern.
    pub fn with_query_response(
        mut self,
        sql_contains: impl Into<String>,
        result: QueryResult,
    ) -> Self {
        self.responses.push(QueryResponse {
            pattern: sql_contains.into(),
            params: None,
            result,
        });
        self
    }

    /// Register a response for queries containing the pattern and bound to exactly `params`.
    pub fn with_param_response(
        mut self,
        sql_contains: impl Into<String>,
        params: &[&str],
        result: QueryResult,
    ) -> Self {
        self.responses.push(QueryResponse {
            pattern: sql_contains.into(),
            params: Some(params.iter().map(|p| Value::from(*p)).collect()),
            result,
        });
        self
    }

    pub fn with_native_table(mut self, name: &str) -> Self {
        self.tables.push(NativeTable {
            table_schema: Some(self.current_schema.to_uppercase()),
            table_name: name.to_string(),
            table_type: Some("TABLE".to_string()),
        });
        self
    }

    pub fn with_native_primary_key(mut self, pk_name: &str, column: &str, key_seq: i32) -> Self {
        self.primary_keys.push(NativePrimaryKey {
            table_name: String::new(),
            column_name: column.to_string(),
            key_seq,
            pk_name: pk_name.to_string(),
        });
        self
    }

    pub fn with_native_foreign_key(
        mut self,
        fk_name: &str,
        column: &str,
        pktable: &str,
        pkcolumn: &str,
    ) -> Self {
        let key_seq = self.foreign_keys.iter().filter(|f| f.fk_name == fk_name).count() as i32 + 1;
        self.foreign_keys.push(NativeForeignKey {
            pktable_name: pktable.to_string(),
            pkcolumn_name: pkcolumn.to_string(),
            fktable_name: String::new(),
            fkcolumn_name: column.to_string(),
            key_seq,
            fk_name: fk_name.to_string(),
        });
        self
    }

    pub fn with_native_index(mut self, index_name: &str, column: &str, unique: bool) -> Self {
        self.indexes.push(NativeIndex {
            index_name: Some(index_name.to_string()),
            column_name: Some(column.to_string()),
            non_unique: !unique,
            ordinal_position: Some(1),
        });
        self
    }

    pub fn with_native_statistics_row(mut self) -> Self {
        self.indexes.push(NativeIndex {
            index_name: None,
            column_name: None,
            non_unique: false,
            ordinal_position: None,
        });
        self
    }

    pub fn query_log(&self) -> Vec<(String, Vec<Value>)> {
        self.query_log.lock().clone()
    }

    pub fn query_count(&self) -> usize {
        self.query_log.lock().len()
    }

    pub fn native_calls(&self) -> Vec<String> {
        self.native_calls.lock().clone()
    }

    fn check_failure(&self, what: &str) -> Result<()> {
        if self.should_fail {
            Err(IbmcatError::Query(format!("{} failed", what)))
        } else {
            Ok(())
        }
    }

    fn record_native(&self, call: &str) {
        self.native_calls.lock().push(call.to_string());
    }
}

#[async_trait]
impl Connection for MockConnection {
    fn driver_name(&self) -> &str {
        &self.driver
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.query_log.lock().push((sql.to_string(), params.to_vec()));
        self.check_failure("Query")?;

        let matched = self.responses.iter().find(|r| {
            sql.contains(r.pattern.as_str())
                && r.params.as_deref().is_none_or(|p| p == params)
        });
        Ok(matched
            .map(|r| r.result.clone())
            .unwrap_or_else(QueryResult::empty))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }

    fn as_native_catalog(&self) -> Option<&dyn NativeCatalog> {
        if self.native_catalog { Some(self) } else { None }
    }
}

#[async_trait]
impl NativeCatalog for MockConnection {
    async fn current_schema(&self) -> Result<String> {
        self.record_native("current_schema");
        self.check_failure("current_schema")?;
        Ok(self.current_schema.clone())
    }

    async fn tables(&self, _schema: Option<&str>) -> Result<Vec<NativeTable>> {
        self.record_native("tables");
        self.check_failure("tables")?;
        Ok(self.tables.clone())
    }

    async fn primary_keys(&self, _schema: &str, _table: &str) -> Result<Vec<NativePrimaryKey>> {
        self.record_native("primary_keys");
        self.check_failure("primary_keys")?;
        Ok(self.primary_keys.clone())
    }

    async fn foreign_keys(&self, _schema: &str, _table: &str) -> Result<Vec<NativeForeignKey>> {
        self.record_native("foreign_keys");
        self.check_failure("foreign_keys")?;
        Ok(self.foreign_keys.clone())
    }

    async fn indexes(&self, _schema: &str, _table: &str) -> Result<Vec<NativeIndex>> {
        self.record_native("indexes");
        self.check_failure("indexes")?;
        Ok(self.indexes.clone())
    }
}

/// Build a result of string cells; `None` becomes NULL
pub fn string_rows(columns: &[&str], rows: &[&[Option<&str>]]) -> QueryResult {
    QueryResult::new(
        columns.iter().map(|c| ColumnMeta::new(*c, "VARCHAR")).collect(),
        rows.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(Value::from).unwrap_or(Value::Null))
                    .collect()
            })
            .collect(),
    )
}

/// Build the single-row result of an ordinal lookup
pub fn colno_result(colno: i16) -> QueryResult {
    QueryResult::new(
        vec![ColumnMeta::new("colno", "SMALLINT").with_precision(5)],
        vec![vec![Value::Int16(colno)]],
    )
}

/// Build a probe result carrying only a cursor description
pub fn description_result(columns: Vec<ColumnMeta>) -> QueryResult {
    QueryResult::new(columns, Vec::new())
}

/// Two-table schema: `parent(id primary key, name)` and
/// `child(id primary key, parent_id references parent(id))`.
pub fn parent_child_connection() -> MockConnection {
    MockConnection::new()
        .with_native_table("PARENT")
        .with_native_table("CHILD")
        .with_query_response(
            "FROM \"parent\"",
            description_result(vec![
                ColumnMeta::new("ID", "INTEGER").with_precision(10).with_sizes(11, 4),
                ColumnMeta::new("NAME", "VARCHAR").with_sizes(40, 40).nullable(true),
            ]),
        )
        .with_query_response(
            "FROM \"child\"",
            description_result(vec![
                ColumnMeta::new("ID", "INTEGER").with_precision(10).with_sizes(11, 4),
                ColumnMeta::new("PARENT_ID", "INTEGER")
                    .with_precision(10)
                    .with_sizes(11, 4)
                    .nullable(true),
            ]),
        )
        .with_param_response(
            "sysreferences",
            &["child"],
            string_rows(
                &["column_name", "tabname", "referenced_column"],
                &[&[Some("parent_id"), Some("parent"), Some("id")]],
            ),
        )
        .with_param_response("SELECT colno", &["parent_id", "child"], colno_result(2))
        .with_param_response("SELECT colno", &["id", "child"], colno_result(1))
        .with_param_response("SELECT colno", &["id", "parent"], colno_result(1))
        .with_param_response("SELECT colno", &["name", "parent"], colno_result(2))
        .with_param_response(
            "i1.part2 = 0",
            &["child"],
            string_rows(
                &["colname", "idxtype", "pkey"],
                &[
                    &[Some("id"), Some("U"), Some("P")],
                    &[Some("parent_id"), Some("D"), Some("R")],
                ],
            ),
        )
        .with_param_response(
            "i1.part2 = 0",
            &["parent"],
            string_rows(
                &["colname", "idxtype", "pkey"],
                &[&[Some("id"), Some("U"), Some("P")]],
            ),
        )
        .with_native_primary_key("PK_CHILD", "ID", 1)
        .with_native_foreign_key("FK_CHILD_PARENT", "PARENT_ID", "PARENT", "ID")
        .with_native_index("PK_CHILD", "ID", true)
        .with_native_index("IX_CHILD_PARENT", "PARENT_ID", false)
}

/// Initialize logging for tests if not already initialized
pub fn initialize_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("ibmcat_driver_informix=debug".parse().unwrap()),
            )
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
