//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process repositories, used without a database and in
//!   tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **notification**: log-only and webhook notification sinks
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod notification;
pub mod persistence;
