//! GraphQL query resolvers.

use async_graphql::{Context, ID, Object, Result};

use crate::{
    context::{gql_ctx, require_caller},
    error::store_err,
    types::Project,
};

/// Root query type.
#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Projects the caller is a member of. Unbounded, no pagination.
    async fn my_projects(&self, ctx: &Context<'_>) -> Result<Vec<Project>> {
        let caller = require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let projects = c
            .store
            .projects_for_member(&caller.id)
            .await
            .map_err(store_err)?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    /// Look up a single project by id, or null if absent. Any signed-in
    /// user may read any project; membership is not checked.
    async fn get_project(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Project>> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let project = c.store.project_by_id(id.as_str()).await.map_err(store_err)?;
        Ok(project.map(Into::into))
    }
}
