//! GraphQL API for Taskboard.
//!
//! Defines the schema, types, and resolvers for authentication, project
//! CRUD, membership management, and project-scoped to-dos. Every resolver
//! maps one field onto one or two store calls; there is no caching and no
//! batching. The gateway crate wires the schema into its HTTP routes;
//! this crate never touches the transport.

pub mod context;
pub mod error;
pub mod mutations;
pub mod queries;
pub mod schema;
pub mod types;

pub use schema::{TaskboardSchema, build_schema};
