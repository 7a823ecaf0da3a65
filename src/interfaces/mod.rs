//! Adapters between the outside world and the application layer.

pub mod csv;
pub mod xml;
