//! Utilities shared by the database connectors

pub mod connection;

pub use connection::{Connect, ConnectionManager};
