//! GraphQL HTTP handlers: GraphiQL on GET, execution on POST.
//!
//! The POST handler doubles as the per-request context builder. It reads
//! the `Authorization` header (the whole value is the token; there is no
//! `Bearer` prefix in this protocol), resolves the caller, and attaches
//! it as request data. An absent token or a vanished user executes as
//! anonymous; an invalid token fails the request before any resolver
//! runs.

use {
    async_graphql::{Pos, http::GraphiQLSource},
    async_graphql_axum::{GraphQLRequest, GraphQLResponse},
    axum::{
        extract::State,
        http::{HeaderMap, header},
        response::{Html, IntoResponse},
    },
    taskboard_auth::AuthError,
    taskboard_graphql::context::Caller,
};

use crate::server::AppState;

/// GET `/graphql`: the GraphiQL IDE.
pub async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// POST `/graphql`: resolve the caller, then execute.
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let token = bearer_token(&headers);
    let caller =
        match taskboard_auth::resolve_caller(token, &state.jwt_secret, state.store.as_ref()).await {
            Ok(user) => Caller(user),
            Err(err) => return error_response(err),
        };
    state
        .schema
        .execute(req.into_inner().data(caller))
        .await
        .into()
}

/// The raw `Authorization` header value, if any.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Surface a caller-resolution failure as a request-level GraphQL error
/// without dispatching the operation.
fn error_response(err: AuthError) -> GraphQLResponse {
    let err = taskboard_graphql::error::auth_err(err);
    async_graphql::Response::from_errors(vec![err.into_server_error(Pos::default())]).into()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn bearer_token_takes_the_whole_header_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("some.jwt.token"),
        );
        assert_eq!(bearer_token(&headers), Some("some.jwt.token"));
    }

    #[test]
    fn missing_or_empty_header_is_anonymous() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(""));
        assert_eq!(bearer_token(&headers), None);
    }
}
