//! Schema construction and type alias.

use std::sync::Arc;

use {
    async_graphql::{EmptySubscription, Schema},
    taskboard_store::Store,
};

use crate::{context::GqlContext, mutations::MutationRoot, queries::QueryRoot};

/// The full taskboard GraphQL schema type.
pub type TaskboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the shared store handle and signing secret.
///
/// The store handle is the single long-lived connection every in-flight
/// request shares; the per-request caller is attached as request data by
/// the gateway's context builder.
pub fn build_schema(store: Arc<dyn Store>, jwt_secret: impl Into<String>) -> TaskboardSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(GqlContext {
            store,
            jwt_secret: jwt_secret.into(),
        })
        .finish()
}
