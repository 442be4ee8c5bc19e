//! GraphQL mutation resolvers.
//!
//! `signUp` and `signIn` are the only anonymous operations. Everything
//! else checks for a resolved caller before touching the store, and only
//! for presence; membership is never verified.

use {
    async_graphql::{Context, ID, Object, Result},
    taskboard_auth::AuthError,
    taskboard_store::{NewUser, ToDoPatch},
};

use crate::{
    context::{gql_ctx, require_caller},
    error::{auth_err, store_err},
    types::{AuthUser, Project, SignInInput, SignUpInput, ToDo},
};

/// Root mutation type.
#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    // ── Auth ────────────────────────────────────────────────────────────

    /// Create an account and return it with a signed session token.
    /// Duplicate emails are not rejected.
    async fn sign_up(&self, ctx: &Context<'_>, input: SignUpInput) -> Result<AuthUser> {
        let c = gql_ctx(ctx)?;
        let password_hash = taskboard_auth::hash_password(&input.password).map_err(auth_err)?;
        let user = c
            .store
            .create_user(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
                avatar: input.avatar,
            })
            .await
            .map_err(store_err)?;
        let token = taskboard_auth::issue_token(&user.id, &c.jwt_secret).map_err(auth_err)?;
        Ok(AuthUser {
            user: user.into(),
            token,
        })
    }

    /// Exchange email and password for a session token.
    async fn sign_in(&self, ctx: &Context<'_>, input: SignInInput) -> Result<AuthUser> {
        let c = gql_ctx(ctx)?;
        let user = c
            .store
            .user_by_email(&input.email)
            .await
            .map_err(store_err)?
            .ok_or_else(|| auth_err(AuthError::InvalidCredentials))?;
        if !taskboard_auth::verify_password(&input.password, &user.password_hash) {
            return Err(auth_err(AuthError::InvalidPassword));
        }
        let token = taskboard_auth::issue_token(&user.id, &c.jwt_secret).map_err(auth_err)?;
        Ok(AuthUser {
            user: user.into(),
            token,
        })
    }

    // ── Projects ────────────────────────────────────────────────────────

    /// Create a project with the caller as its only member.
    async fn create_project(&self, ctx: &Context<'_>, title: String) -> Result<Project> {
        let caller = require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let project = c
            .store
            .create_project(&title, &caller.id)
            .await
            .map_err(store_err)?;
        Ok(project.into())
    }

    /// Rename a project. Returns the refreshed project, or null for an
    /// unknown id.
    async fn update_project(
        &self,
        ctx: &Context<'_>,
        id: ID,
        title: String,
    ) -> Result<Option<Project>> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let project = c
            .store
            .rename_project(id.as_str(), &title)
            .await
            .map_err(store_err)?;
        Ok(project.map(Into::into))
    }

    /// Delete a project by id. Returns true whether or not anything
    /// matched; the project's to-dos are left in place.
    async fn deleted_project(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        c.store.delete_project(id.as_str()).await.map_err(store_err)?;
        Ok(true)
    }

    /// Add a user to a project's member set. A no-op returning the
    /// unchanged project when already a member; null when the project
    /// does not exist.
    async fn add_user_to_project(
        &self,
        ctx: &Context<'_>,
        project_id: ID,
        user_id: ID,
    ) -> Result<Option<Project>> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let project = c
            .store
            .add_project_member(project_id.as_str(), user_id.as_str())
            .await
            .map_err(store_err)?;
        Ok(project.map(Into::into))
    }

    // ── To-dos ──────────────────────────────────────────────────────────

    /// Create a to-do in a project, initially not completed.
    async fn create_to_do(
        &self,
        ctx: &Context<'_>,
        content: String,
        project_id: ID,
    ) -> Result<ToDo> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let todo = c
            .store
            .create_todo(&content, project_id.as_str())
            .await
            .map_err(store_err)?;
        Ok(todo.into())
    }

    /// Update the supplied fields of a to-do. Returns the refreshed
    /// to-do, or null for an unknown id.
    async fn update_to_do(
        &self,
        ctx: &Context<'_>,
        id: ID,
        content: Option<String>,
        is_completed: Option<bool>,
    ) -> Result<Option<ToDo>> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        let todo = c
            .store
            .update_todo(
                id.as_str(),
                ToDoPatch {
                    content,
                    is_completed,
                },
            )
            .await
            .map_err(store_err)?;
        Ok(todo.map(Into::into))
    }

    /// Delete a to-do by id. Returns true whether or not anything matched.
    async fn delete_to_do(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        require_caller(ctx)?;
        let c = gql_ctx(ctx)?;
        c.store.delete_todo(id.as_str()).await.map_err(store_err)?;
        Ok(true)
    }
}
