// Domain layer: value types shared by the services that depend on this crate.

pub mod date;
pub mod datetime;
pub mod decimals;
pub mod error_fields;
pub mod layout;
pub mod nullable;
pub mod zone;
