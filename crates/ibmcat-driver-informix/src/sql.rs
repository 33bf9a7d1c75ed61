//! Catalog SQL text.
//!
//! Every lookup binds its names through `?` placeholders. The only SQL built
//! with an identifier spliced in is the description probe, whose target is
//! quoted by the caller's convention.

use ibmcat_core::IdentifierQuoting;

/// Single-column indexes of a table: column name, index type and the type of
/// the constraint backed by the index (if any).
///
/// Params: table name.
pub const SINGLE_COLUMN_INDEXES: &str = "\
SELECT c1.colname, i1.idxtype,
       (SELECT constrtype FROM sysconstraints WHERE idxname = i1.idxname) AS pkey
  FROM sysindexes i1, syscolumns c1
 WHERE i1.tabid = c1.tabid
   AND i1.part1 = c1.colno
   AND i1.part2 = 0
   AND i1.tabid = (SELECT tabid FROM systables WHERE tabname = ?)";

/// Referential constraint triples of a table: local column, referenced table,
/// referenced column.
///
/// Params: table name.
pub const KEY_COLUMNS: &str = "\
SELECT col1.colname AS column_name, t2.tabname, col2.colname AS referenced_column
  FROM syscolumns col1, sysindexes idx1, sysconstraints const1, systables t1,
       syscolumns col2, sysindexes idx2, sysconstraints const2, sysreferences ref,
       systables t2
 WHERE col1.tabid = idx1.tabid
   AND col1.colno = idx1.part1
   AND idx1.idxname = const1.idxname
   AND const1.tabid = t1.tabid
   AND const1.constrtype = 'R'
   AND col2.tabid = idx2.tabid
   AND col2.colno = idx2.part1
   AND idx2.idxname = const2.idxname
   AND const2.constrid = ref.primary
   AND ref.constrid = const1.constrid
   AND t2.tabid = idx2.tabid
   AND t1.tabname = ?";

/// One-based catalog position of a column.
///
/// Params: column name, table name.
pub const COLUMN_ORDINAL: &str = "\
SELECT colno
  FROM syscolumns
 WHERE colname = ?
   AND tabid = (SELECT tabid FROM systables WHERE tabname = ?)";

/// Columns covered by check constraints.
///
/// Params: schema (upper-cased), table name (upper-cased).
pub const CHECK_CONSTRAINTS: &str = "\
SELECT CONSTNAME, COLNAME
  FROM SYSCAT.COLCHECKS
 WHERE TABSCHEMA = ?
   AND TABNAME = ?";

/// Columns of unique constraints.
///
/// Params: schema (upper-cased), table name (upper-cased).
pub const UNIQUE_CONSTRAINTS: &str = "\
SELECT KEYCOL.CONSTNAME, KEYCOL.COLNAME
  FROM SYSCAT.KEYCOLUSE KEYCOL
 INNER JOIN SYSCAT.TABCONST TABCONST ON KEYCOL.CONSTNAME = TABCONST.CONSTNAME
 WHERE TABCONST.TABSCHEMA = ?
   AND TABCONST.TABNAME = ?
   AND TABCONST.TYPE = 'U'";

/// Probe that returns at most one row, used only for its cursor description
pub fn describe_probe(quoting: &dyn IdentifierQuoting, table: &str) -> String {
    format!("SELECT FIRST 1 * FROM {}", quoting.quote_identifier(table))
}
