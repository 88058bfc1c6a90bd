// Adapters layer: encodings of the domain values for external systems (database, XML, query strings).

pub mod query;
pub mod sql;
pub mod xml;
