use async_trait::async_trait;

use crate::{
    error::Result,
    model::{NewUser, Project, ToDo, ToDoPatch, User},
};

/// Document-store operations used by the resolver layer.
///
/// One long-lived implementation is shared by every in-flight request;
/// backends manage their own connection pooling. No operation spans more
/// than one document write, and none is retried.
#[async_trait]
pub trait Store: Send + Sync {
    // ── Users ────────────────────────────────────────────────────────────

    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn user_by_id(&self, id: &str) -> Result<Option<User>>;
    /// First account matching the email. Uniqueness is presumed, not
    /// enforced.
    async fn user_by_email(&self, email: &str) -> Result<Option<User>>;

    // ── Projects ─────────────────────────────────────────────────────────

    /// Insert a project with `created_at = now` and the creator as its
    /// only member.
    async fn create_project(&self, title: &str, creator_id: &str) -> Result<Project>;
    async fn project_by_id(&self, id: &str) -> Result<Option<Project>>;
    /// All projects whose member set contains the user. Unbounded.
    async fn projects_for_member(&self, user_id: &str) -> Result<Vec<Project>>;
    /// Set a project's title, returning the refreshed document, or `None`
    /// for an unknown id.
    async fn rename_project(&self, id: &str, title: &str) -> Result<Option<Project>>;
    /// Delete by id. No existence check; deleting an unknown id is not an
    /// error. The project's to-dos are left in place.
    async fn delete_project(&self, id: &str) -> Result<()>;
    /// Atomically add a user to a project's member set. Returns `None` if
    /// the project does not exist; returns the project unchanged if the
    /// user is already a member.
    async fn add_project_member(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<Project>>;

    // ── To-dos ───────────────────────────────────────────────────────────

    /// Insert a to-do with `is_completed = false`.
    async fn create_todo(&self, content: &str, project_id: &str) -> Result<ToDo>;
    async fn todo_by_id(&self, id: &str) -> Result<Option<ToDo>>;
    async fn todos_for_project(&self, project_id: &str) -> Result<Vec<ToDo>>;
    /// Apply the supplied fields, returning the refreshed document, or
    /// `None` for an unknown id.
    async fn update_todo(&self, id: &str, patch: ToDoPatch) -> Result<Option<ToDo>>;
    /// Delete by id. No existence check.
    async fn delete_todo(&self, id: &str) -> Result<()>;
}
