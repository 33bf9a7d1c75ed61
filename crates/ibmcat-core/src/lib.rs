//! ibmcat Core - driver traits and introspection result shapes
//!
//! This crate defines the seams between a database driver, the catalog
//! introspection layer, and the ORM backend that consumes it:
//!
//! - `Connection` / `NativeCatalog` - what a driver must provide
//! - `SchemaIntrospection` - what the introspection layer exposes
//! - `FieldInfo`, `IndexMap`, `RelationMap`, `ConstraintMap` - the shapes
//!   the backend expects
//! - `IdentifierQuoting` - how identifiers are spliced into SQL text

mod connection;
mod dialect;
mod error;
mod schema;
mod types;

pub use connection::*;
pub use dialect::*;
pub use error::*;
pub use schema::*;
pub use types::*;
