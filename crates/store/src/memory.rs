//! In-memory store used by tests and for local development without a
//! running MongoDB.

use std::sync::Mutex;

use {
    async_trait::async_trait,
    chrono::Utc,
    mongodb::bson::oid::ObjectId,
};

use crate::{
    error::Result,
    model::{NewUser, Project, ToDo, ToDoPatch, User},
    store::Store,
};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    projects: Vec<Project>,
    todos: Vec<ToDo>,
}

/// Keeps every collection in a `Vec` behind one mutex; each trait method
/// holds the guard for its whole body, so read-modify-write sequences
/// (membership add) are atomic here too.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fresh id in the same hex format the Mongo backend produces.
    fn new_id() -> String {
        ObjectId::new().to_hex()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let user = User {
            id: Self::new_id(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: user.avatar,
        };
        self.lock().users.push(user.clone());
        Ok(user)
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_project(&self, title: &str, creator_id: &str) -> Result<Project> {
        let project = Project {
            id: Self::new_id(),
            title: title.to_string(),
            created_at: Utc::now(),
            member_user_ids: vec![creator_id.to_string()],
        };
        self.lock().projects.push(project.clone());
        Ok(project)
    }

    async fn project_by_id(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.lock().projects.iter().find(|p| p.id == id).cloned())
    }

    async fn projects_for_member(&self, user_id: &str) -> Result<Vec<Project>> {
        Ok(self
            .lock()
            .projects
            .iter()
            .filter(|p| p.member_user_ids.iter().any(|m| m == user_id))
            .cloned()
            .collect())
    }

    async fn rename_project(&self, id: &str, title: &str) -> Result<Option<Project>> {
        let mut inner = self.lock();
        let Some(project) = inner.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        project.title = title.to_string();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        // To-dos referencing the project are left dangling on purpose.
        self.lock().projects.retain(|p| p.id != id);
        Ok(())
    }

    async fn add_project_member(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<Project>> {
        let mut inner = self.lock();
        let Some(project) = inner.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        if !project.member_user_ids.iter().any(|m| m == user_id) {
            project.member_user_ids.push(user_id.to_string());
        }
        Ok(Some(project.clone()))
    }

    async fn create_todo(&self, content: &str, project_id: &str) -> Result<ToDo> {
        let todo = ToDo {
            id: Self::new_id(),
            content: content.to_string(),
            is_completed: false,
            project_id: project_id.to_string(),
        };
        self.lock().todos.push(todo.clone());
        Ok(todo)
    }

    async fn todo_by_id(&self, id: &str) -> Result<Option<ToDo>> {
        Ok(self.lock().todos.iter().find(|t| t.id == id).cloned())
    }

    async fn todos_for_project(&self, project_id: &str) -> Result<Vec<ToDo>> {
        Ok(self
            .lock()
            .todos
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_todo(&self, id: &str, patch: ToDoPatch) -> Result<Option<ToDo>> {
        let mut inner = self.lock();
        let Some(todo) = inner.todos.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(content) = patch.content {
            todo.content = content;
        }
        if let Some(is_completed) = patch.is_completed {
            todo.is_completed = is_completed;
        }
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: &str) -> Result<()> {
        self.lock().todos.retain(|t| t.id != id);
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            password_hash: "hash".into(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn user_crud() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("Ada", "ada@x.com")).await.unwrap();

        let by_id = store.user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ada@x.com");
        let by_email = store.user_by_email("ada@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(store.user_by_id("unknown").await.unwrap().is_none());
        assert!(store.user_by_email("no@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_emails_are_stored() {
        let store = MemoryStore::new();
        let first = store.create_user(new_user("A", "dup@x.com")).await.unwrap();
        let second = store.create_user(new_user("B", "dup@x.com")).await.unwrap();
        assert_ne!(first.id, second.id);

        // Lookup by email resolves to the first inserted account.
        let found = store.user_by_email("dup@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn project_creation_adds_creator_as_member() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("Ada", "ada@x.com")).await.unwrap();
        let project = store.create_project("Launch", &user.id).await.unwrap();

        assert_eq!(project.member_user_ids, vec![user.id.clone()]);
        assert_eq!(store.projects_for_member(&user.id).await.unwrap().len(), 1);
        assert!(store.projects_for_member("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_project_returns_refreshed_or_none() {
        let store = MemoryStore::new();
        let project = store.create_project("Old", "u1").await.unwrap();

        let renamed = store.rename_project(&project.id, "New").await.unwrap().unwrap();
        assert_eq!(renamed.title, "New");
        assert_eq!(
            store.project_by_id(&project.id).await.unwrap().unwrap().title,
            "New"
        );

        assert!(store.rename_project("missing", "X").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_member_is_idempotent() {
        let store = MemoryStore::new();
        let project = store.create_project("P", "u1").await.unwrap();

        let once = store.add_project_member(&project.id, "u2").await.unwrap().unwrap();
        assert_eq!(once.member_user_ids, vec!["u1", "u2"]);

        let twice = store.add_project_member(&project.id, "u2").await.unwrap().unwrap();
        assert_eq!(twice.member_user_ids, vec!["u1", "u2"]);

        assert!(store.add_project_member("missing", "u2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_project_ignores_unknown_ids_and_keeps_todos() {
        let store = MemoryStore::new();
        let project = store.create_project("P", "u1").await.unwrap();
        store.create_todo("dangle", &project.id).await.unwrap();

        store.delete_project("missing").await.unwrap();
        assert!(store.project_by_id(&project.id).await.unwrap().is_some());

        store.delete_project(&project.id).await.unwrap();
        assert!(store.project_by_id(&project.id).await.unwrap().is_none());
        // The to-do survives its project.
        assert_eq!(store.todos_for_project(&project.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn todo_defaults_and_partial_update() {
        let store = MemoryStore::new();
        let todo = store.create_todo("write spec", "p1").await.unwrap();
        assert!(!todo.is_completed);

        let patched = store
            .update_todo(
                &todo.id,
                ToDoPatch {
                    is_completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(patched.is_completed);
        assert_eq!(patched.content, "write spec");

        let patched = store
            .update_todo(
                &todo.id,
                ToDoPatch {
                    content: Some("ship spec".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.content, "ship spec");
        assert!(patched.is_completed);

        assert!(
            store
                .update_todo("missing", ToDoPatch::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_todo_ignores_unknown_ids() {
        let store = MemoryStore::new();
        let todo = store.create_todo("x", "p1").await.unwrap();

        store.delete_todo("missing").await.unwrap();
        assert!(store.todo_by_id(&todo.id).await.unwrap().is_some());

        store.delete_todo(&todo.id).await.unwrap();
        assert!(store.todo_by_id(&todo.id).await.unwrap().is_none());
    }
}
