//! Resolver context: the shared store handle and the per-request caller.

use std::sync::Arc;

use {
    async_graphql::{Context, Result},
    taskboard_store::{Store, User},
};

use crate::error::unauthenticated;

/// Shared context injected once at schema build time.
///
/// Holds the one long-lived store handle reused by every in-flight
/// request, plus the token-signing secret.
pub struct GqlContext {
    pub store: Arc<dyn Store>,
    pub jwt_secret: String,
}

/// The caller resolved for one request, attached as request data by the
/// gateway. `None` when the request carried no token or the referenced
/// user no longer exists.
#[derive(Clone)]
pub struct Caller(pub Option<User>);

/// Fetch the shared context from resolver scope.
pub fn gql_ctx<'a>(ctx: &'a Context<'_>) -> Result<&'a GqlContext> {
    ctx.data::<GqlContext>()
}

/// Extract the authenticated caller, failing with `UNAUTHENTICATED` for
/// anonymous requests. Called before any store access so a rejected
/// operation never mutates anything.
pub fn require_caller(ctx: &Context<'_>) -> Result<User> {
    match ctx.data_opt::<Caller>() {
        Some(Caller(Some(user))) => Ok(user.clone()),
        _ => Err(unauthenticated()),
    }
}
