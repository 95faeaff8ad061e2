//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Validated input types live in `arbor_core`.

pub mod tree;
