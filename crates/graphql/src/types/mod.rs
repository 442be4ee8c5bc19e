//! GraphQL object and input types mirroring the store models.
//!
//! Output types derive `SimpleObject`; the fields that need a store
//! lookup (`Project.progress`, `Project.users`, `Project.todos`,
//! `ToDo.project`) are resolved on a `ComplexObject` block. Inputs
//! derive `InputObject`.

use async_graphql::{ComplexObject, Context, ID, InputObject, Result, SimpleObject};

use crate::{
    context::gql_ctx,
    error::store_err,
};

// ── User ────────────────────────────────────────────────────────────────────

/// A registered account. The stored password hash is never exposed.
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<taskboard_store::User> for User {
    fn from(u: taskboard_store::User) -> Self {
        Self {
            id: ID(u.id),
            name: u.name,
            email: u.email,
            avatar: u.avatar,
        }
    }
}

// ── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Project {
    pub id: ID,
    pub title: String,
    /// Creation time, RFC 3339.
    pub created_at: String,
    #[graphql(skip)]
    pub member_user_ids: Vec<String>,
}

#[ComplexObject]
impl Project {
    /// Completion percentage across this project's to-dos, recomputed
    /// from the store on every read. A project with no to-dos reports 0.
    async fn progress(&self, ctx: &Context<'_>) -> Result<f64> {
        let c = gql_ctx(ctx)?;
        let todos = c
            .store
            .todos_for_project(self.id.as_str())
            .await
            .map_err(store_err)?;
        if todos.is_empty() {
            return Ok(0.0);
        }
        let completed = todos.iter().filter(|t| t.is_completed).count();
        Ok(100.0 * completed as f64 / todos.len() as f64)
    }

    /// Member accounts, fetched one by one in member order. Ids whose
    /// user document has vanished are skipped.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let c = gql_ctx(ctx)?;
        let mut users = Vec::with_capacity(self.member_user_ids.len());
        for member_id in &self.member_user_ids {
            if let Some(user) = c.store.user_by_id(member_id).await.map_err(store_err)? {
                users.push(user.into());
            }
        }
        Ok(users)
    }

    /// All of this project's to-dos. Unbounded.
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<ToDo>> {
        let c = gql_ctx(ctx)?;
        let todos = c
            .store
            .todos_for_project(self.id.as_str())
            .await
            .map_err(store_err)?;
        Ok(todos.into_iter().map(Into::into).collect())
    }
}

impl From<taskboard_store::Project> for Project {
    fn from(p: taskboard_store::Project) -> Self {
        Self {
            id: ID(p.id),
            title: p.title,
            created_at: p.created_at.to_rfc3339(),
            member_user_ids: p.member_user_ids,
        }
    }
}

// ── ToDo ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct ToDo {
    pub id: ID,
    pub content: String,
    pub is_completed: bool,
    #[graphql(skip)]
    pub project_id: String,
}

#[ComplexObject]
impl ToDo {
    /// Owning project. Errors for a to-do whose project was deleted out
    /// from under it (to-dos are not cascade-deleted).
    async fn project(&self, ctx: &Context<'_>) -> Result<Project> {
        let c = gql_ctx(ctx)?;
        let project = c
            .store
            .project_by_id(&self.project_id)
            .await
            .map_err(store_err)?;
        project
            .map(Into::into)
            .ok_or_else(|| async_graphql::Error::new("project not found"))
    }
}

impl From<taskboard_store::ToDo> for ToDo {
    fn from(t: taskboard_store::ToDo) -> Self {
        Self {
            id: ID(t.id),
            content: t.content,
            is_completed: t.is_completed,
            project_id: t.project_id,
        }
    }
}

// ── Auth payloads ───────────────────────────────────────────────────────────

/// Sign-up / sign-in result: the account plus a signed session token.
#[derive(Debug, SimpleObject)]
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

#[derive(Debug, InputObject)]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}
