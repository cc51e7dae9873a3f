//! Domain model module declarations.

pub mod snapshot;
