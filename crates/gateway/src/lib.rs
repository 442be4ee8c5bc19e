//! HTTP gateway for Taskboard.
//!
//! Serves the GraphQL schema over a single `/graphql` endpoint (GraphiQL
//! on GET, execution on POST) plus a `/health` probe. The per-request
//! context builder lives here: it turns the `Authorization` header into a
//! resolved caller before the schema executes, so resolvers never see raw
//! credentials.

pub mod graphql_routes;
pub mod server;

pub use server::{AppState, build_app, run};
