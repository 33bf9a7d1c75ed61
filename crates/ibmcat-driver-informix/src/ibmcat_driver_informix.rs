//! Informix / DB2 catalog introspection for ibmcat
//!
//! This crate answers structural questions about a table - its columns,
//! single-column indexes, foreign key relations and named constraints - by
//! querying the system catalog (`systables`, `syscolumns`, `sysindexes`,
//! `sysconstraints`, `sysreferences`, `SYSCAT.*`) and the driver's native
//! catalog enumeration, and reshapes the rows into the structures defined in
//! `ibmcat-core`.

mod config;
mod constraints;
mod introspection;
mod sql;
mod type_mapping;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod constraints_tests;
#[cfg(test)]
mod type_mapping_tests;

pub use config::IntrospectionConfig;
pub use constraints::ConstraintCollector;
pub use introspection::InformixIntrospection;
pub use type_mapping::{
    FieldKindFallback, SMALLINT_PRECISION, SchemaCapability, StrictFallback, TypeClassifier,
    TypeMap, type_code_for,
};
