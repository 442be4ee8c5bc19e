//! Document-store layer for Taskboard.
//!
//! Defines the domain models (`User`, `Project`, `ToDo`), the [`Store`]
//! trait the resolver layer talks to, and two backends: MongoDB for
//! production and an in-memory store for tests and local development.
//!
//! Identifiers are normalized at this boundary: domain models carry a
//! single `id: String` (ObjectId hex); the `_id: ObjectId` representation
//! never leaves the Mongo backend. A malformed id supplied by a caller
//! behaves as "no such document" rather than surfacing a parse error.

pub mod error;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod store;

pub use {
    error::{Result, StoreError},
    memory::MemoryStore,
    model::{NewUser, Project, ToDo, ToDoPatch, User},
    mongo::MongoStore,
    store::Store,
};
