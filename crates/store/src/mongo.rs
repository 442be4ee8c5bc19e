//! MongoDB-backed store.
//!
//! Collections: `users`, `projects`, `todos`. Each collection is a typed
//! handle over an internal document struct; conversion to the domain
//! models (hex string ids) happens here and nowhere else.

use {
    async_trait::async_trait,
    chrono::{DateTime, Utc},
    futures::TryStreamExt,
    mongodb::{
        Client, Collection, Database,
        bson::{Document, doc, oid::ObjectId},
        options::ReturnDocument,
    },
    serde::{Deserialize, Serialize},
};

use crate::{
    error::Result,
    model::{NewUser, Project, ToDo, ToDoPatch, User},
    store::Store,
};

pub struct MongoStore {
    users: Collection<UserDoc>,
    projects: Collection<ProjectDoc>,
    todos: Collection<ToDoDoc>,
}

impl MongoStore {
    /// Open a client for the given URI and wrap the named database. The
    /// driver manages its own connection pooling behind this handle.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(&client.database(db_name)))
    }

    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
            projects: db.collection("projects"),
            todos: db.collection("todos"),
        }
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let doc = UserDoc {
            id: ObjectId::new(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            avatar: user.avatar,
        };
        self.users.insert_one(&doc).await?;
        Ok(doc.into())
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        let doc = self.users.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(Into::into))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let doc = self.users.find_one(doc! { "email": email }).await?;
        Ok(doc.map(Into::into))
    }

    async fn create_project(&self, title: &str, creator_id: &str) -> Result<Project> {
        let doc = ProjectDoc {
            id: ObjectId::new(),
            title: title.to_string(),
            created_at: Utc::now(),
            member_user_ids: parse_oid(creator_id).into_iter().collect(),
        };
        self.projects.insert_one(&doc).await?;
        Ok(doc.into())
    }

    async fn project_by_id(&self, id: &str) -> Result<Option<Project>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        let doc = self.projects.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(Into::into))
    }

    async fn projects_for_member(&self, user_id: &str) -> Result<Vec<Project>> {
        let Some(oid) = parse_oid(user_id) else {
            return Ok(Vec::new());
        };
        let docs: Vec<ProjectDoc> = self
            .projects
            .find(doc! { "member_user_ids": oid })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn rename_project(&self, id: &str, title: &str) -> Result<Option<Project>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        let doc = self
            .projects
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": { "title": title } })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Into::into))
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        let Some(oid) = parse_oid(id) else {
            return Ok(());
        };
        self.projects.delete_one(doc! { "_id": oid }).await?;
        Ok(())
    }

    async fn add_project_member(
        &self,
        project_id: &str,
        user_id: &str,
    ) -> Result<Option<Project>> {
        let Some(project_oid) = parse_oid(project_id) else {
            return Ok(None);
        };
        let Some(user_oid) = parse_oid(user_id) else {
            return self.project_by_id(project_id).await;
        };
        // Single atomic add-to-set: no read-then-push race, and re-adding
        // an existing member leaves the document untouched.
        let doc = self
            .projects
            .find_one_and_update(
                doc! { "_id": project_oid },
                doc! { "$addToSet": { "member_user_ids": user_oid } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Into::into))
    }

    async fn create_todo(&self, content: &str, project_id: &str) -> Result<ToDo> {
        // The project reference is not validated; a malformed id yields a
        // dangling reference, same as a well-formed id no project has.
        let doc = ToDoDoc {
            id: ObjectId::new(),
            content: content.to_string(),
            is_completed: false,
            project_id: parse_oid(project_id).unwrap_or_else(ObjectId::new),
        };
        self.todos.insert_one(&doc).await?;
        Ok(doc.into())
    }

    async fn todo_by_id(&self, id: &str) -> Result<Option<ToDo>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        let doc = self.todos.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(Into::into))
    }

    async fn todos_for_project(&self, project_id: &str) -> Result<Vec<ToDo>> {
        let Some(oid) = parse_oid(project_id) else {
            return Ok(Vec::new());
        };
        let docs: Vec<ToDoDoc> = self
            .todos
            .find(doc! { "project_id": oid })
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn update_todo(&self, id: &str, patch: ToDoPatch) -> Result<Option<ToDo>> {
        let Some(oid) = parse_oid(id) else {
            return Ok(None);
        };
        let mut set = Document::new();
        if let Some(content) = patch.content {
            set.insert("content", content);
        }
        if let Some(is_completed) = patch.is_completed {
            set.insert("is_completed", is_completed);
        }
        if set.is_empty() {
            // Nothing to write; still report the current document.
            return self.todo_by_id(id).await;
        }
        let doc = self
            .todos
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;
        Ok(doc.map(Into::into))
    }

    async fn delete_todo(&self, id: &str) -> Result<()> {
        let Some(oid) = parse_oid(id) else {
            return Ok(());
        };
        self.todos.delete_one(doc! { "_id": oid }).await?;
        Ok(())
    }
}

// ── Document types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct UserDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProjectDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    created_at: DateTime<Utc>,
    member_user_ids: Vec<ObjectId>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ToDoDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    content: String,
    is_completed: bool,
    project_id: ObjectId,
}

impl From<UserDoc> for User {
    fn from(d: UserDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            name: d.name,
            email: d.email,
            password_hash: d.password_hash,
            avatar: d.avatar,
        }
    }
}

impl From<ProjectDoc> for Project {
    fn from(d: ProjectDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            title: d.title,
            created_at: d.created_at,
            member_user_ids: d.member_user_ids.into_iter().map(ObjectId::to_hex).collect(),
        }
    }
}

impl From<ToDoDoc> for ToDo {
    fn from(d: ToDoDoc) -> Self {
        Self {
            id: d.id.to_hex(),
            content: d.content,
            is_completed: d.is_completed,
            project_id: d.project_id.to_hex(),
        }
    }
}

/// Parse a client-supplied id. Malformed ids behave as "no such document".
fn parse_oid(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_parse_to_none() {
        assert!(parse_oid("not-an-object-id").is_none());
        assert!(parse_oid("").is_none());
        let oid = ObjectId::new();
        assert_eq!(parse_oid(&oid.to_hex()), Some(oid));
    }

    #[test]
    fn project_doc_maps_to_hex_ids() {
        let member = ObjectId::new();
        let doc = ProjectDoc {
            id: ObjectId::new(),
            title: "Launch".into(),
            created_at: Utc::now(),
            member_user_ids: vec![member],
        };
        let id_hex = doc.id.to_hex();
        let project: Project = doc.into();
        assert_eq!(project.id, id_hex);
        assert_eq!(project.member_user_ids, vec![member.to_hex()]);
    }
}
