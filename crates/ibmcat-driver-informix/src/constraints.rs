//! Accumulates constraint facts from the five catalog passes.
//!
//! Passes run in a fixed order: check, unique, primary key, foreign key,
//! index. A name may be reported by several passes; each pass only raises
//! the flag it owns and appends columns, and the index pass leaves names
//! already flagged unique or primary key alone.

use ibmcat_core::{
    ConstraintInfo, ConstraintMap, ForeignKeyTarget, NativeForeignKey, NativeIndex,
    NativePrimaryKey,
};

#[derive(Debug, Default)]
pub struct ConstraintCollector {
    constraints: ConstraintMap,
}

impl ConstraintCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, name: &str) -> &mut ConstraintInfo {
        self.constraints.entry(name.to_string()).or_default()
    }

    /// Pass 1: a column covered by a check constraint
    pub fn add_check(&mut self, name: &str, column: &str) {
        let info = self.entry(name);
        info.check = true;
        info.columns.push(column.to_lowercase());
    }

    /// Pass 2: a column of a unique constraint
    pub fn add_unique(&mut self, name: &str, column: &str) {
        let info = self.entry(name);
        info.unique = true;
        info.index = true;
        info.columns.push(column.to_lowercase());
    }

    /// Pass 3: a primary key column
    pub fn add_primary_key(&mut self, pk: &NativePrimaryKey) {
        let info = self.entry(&pk.pk_name);
        info.primary_key = true;
        info.index = true;
        info.columns.push(pk.column_name.to_lowercase());
    }

    /// Pass 4: one column pair of a foreign key
    pub fn add_foreign_key(&mut self, fk: &NativeForeignKey) {
        let table = fk.pktable_name.to_lowercase();
        let referenced = fk.pkcolumn_name.to_lowercase();

        let info = self.entry(&fk.fk_name);
        info.columns.push(fk.fkcolumn_name.to_lowercase());
        match info.foreign_key.as_mut() {
            Some(target) => target.add_column(&referenced),
            None => info.foreign_key = Some(ForeignKeyTarget::new(table, referenced)),
        }
    }

    /// Pass 5: one column of an index.
    ///
    /// Rows without an index or column name are table statistics and are
    /// ignored. A column already listed for the name is not repeated.
    /// Returns whether the row was recorded.
    pub fn add_index(&mut self, index: &NativeIndex) -> bool {
        let (Some(name), Some(column)) = (&index.index_name, &index.column_name) else {
            return false;
        };

        if let Some(existing) = self.constraints.get(name.as_str()) {
            if existing.unique || existing.primary_key {
                return false;
            }
        }

        let column = column.to_lowercase();
        let info = self.entry(name);
        info.index = true;
        if !info.columns.contains(&column) {
            info.columns.push(column);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn finish(self) -> ConstraintMap {
        self.constraints
    }
}
